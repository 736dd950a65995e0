//! Append-only audit store
//!
//! Persists audit records to a line-delimited JSON (JSONL) file, one
//! record per line, flushed on every append. The interface exposes no
//! update or delete path: once a line is written it stays written.
//!
//! Surrogate ids are assigned under a single lock so that concurrent
//! appends can never hand out duplicate or out-of-order keys. The id
//! counter only advances after the line has reached the file, so a
//! failed append leaves no gap.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{TrailError, TrailResult};
use crate::models::{AuditRecord, NewAuditRecord, OperationCatalog};

use super::query::{Page, RecordFilter, SortOrder};

/// Append-only persistence and read-side query surface for audit records
#[derive(Debug)]
pub struct AuditStore {
    path: PathBuf,
    catalog: OperationCatalog,
    next_id: Mutex<u64>,
}

impl AuditStore {
    /// Open (or create on first append) the store at the given path
    ///
    /// Scans any existing log to resume the id sequence after the highest
    /// id already on disk.
    pub fn open(path: PathBuf) -> TrailResult<Self> {
        let store = Self {
            path,
            catalog: OperationCatalog::seed(),
            next_id: Mutex::new(1),
        };

        let highest = store
            .read_all()?
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0);
        *store.lock_next_id()? = highest + 1;

        Ok(store)
    }

    /// Append a record, assigning its surrogate id and timestamp
    ///
    /// Returns the assigned id. Any failure to reach the file surfaces as
    /// a `Persistence` error; deciding whether that failure may interrupt
    /// the surrounding business operation is the caller's concern, not
    /// the store's.
    pub fn append(&self, record: NewAuditRecord) -> TrailResult<u64> {
        record.validate()?;

        let mut next_id = self.lock_next_id()?;
        let id = *next_id;
        let record = record.into_record(id);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| TrailError::Persistence(format!("failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(&record)
            .map_err(|e| TrailError::Persistence(format!("failed to serialize record: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| TrailError::Persistence(format!("failed to write record: {}", e)))?;

        file.flush()
            .map_err(|e| TrailError::Persistence(format!("failed to flush audit log: {}", e)))?;

        // Only consume the id once the line is durably on disk
        *next_id = id + 1;
        Ok(id)
    }

    /// Filtered, ordered, paged listing
    ///
    /// Default order is newest first; ties on the timestamp fall back to
    /// the id sequence.
    pub fn list(
        &self,
        filter: &RecordFilter,
        order: SortOrder,
        page: Page,
    ) -> TrailResult<Vec<AuditRecord>> {
        let mut records: Vec<AuditRecord> = self
            .read_all()?
            .into_iter()
            .filter(|r| filter.matches(r, &self.catalog))
            .collect();

        records.sort_by(|a, b| match order {
            SortOrder::NewestFirst => b.created_on.cmp(&a.created_on).then(b.id.cmp(&a.id)),
            SortOrder::OldestFirst => a.created_on.cmp(&b.created_on).then(a.id.cmp(&b.id)),
        });

        Ok(page.apply(records))
    }

    /// Fetch a single record by id
    pub fn get(&self, id: u64) -> TrailResult<AuditRecord> {
        self.read_all()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| TrailError::record_not_found(id.to_string()))
    }

    /// Number of records in the log
    pub fn count(&self) -> TrailResult<usize> {
        Ok(self.read_all()?.len())
    }

    /// The operation catalog this store resolves ids against
    pub fn catalog(&self) -> &OperationCatalog {
        &self.catalog
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record in file order (oldest first)
    fn read_all(&self) -> TrailResult<Vec<AuditRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| TrailError::Io(format!("failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                TrailError::Io(format!(
                    "failed to read audit log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let record: AuditRecord = serde_json::from_str(&line).map_err(|e| {
                TrailError::Json(format!(
                    "failed to parse audit record at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            records.push(record);
        }

        Ok(records)
    }

    fn lock_next_id(&self) -> TrailResult<std::sync::MutexGuard<'_, u64>> {
        self.next_id
            .lock()
            .map_err(|e| TrailError::Persistence(format!("id lock poisoned: {}", e)))
    }
}
