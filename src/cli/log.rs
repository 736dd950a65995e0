//! Audit log CLI handlers
//!
//! Bridges clap argument parsing with the store's read-side query
//! surface. Handlers return the rendered output so main can print it.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;

use crate::config::Settings;
use crate::display::{format_record_details, format_record_list};
use crate::error::{TrailError, TrailResult};
use crate::models::Operation;
use crate::reports::{format_summary, ActivitySummary};
use crate::storage::{AuditStore, Page, RecordFilter, SortOrder};

/// Arguments for the `list` command
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Filter by actor identity
    #[arg(short, long)]
    pub username: Option<String>,

    /// Filter by target type name
    #[arg(short, long)]
    pub target: Option<String>,

    /// Filter by operation kind (INSERT, UPDATE or DELETE)
    #[arg(short, long)]
    pub operation: Option<String>,

    /// Only records at or after this time (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub since: Option<String>,

    /// Only records at or before this time (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub until: Option<String>,

    /// Number of records to show
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Number of records to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Sort oldest records first instead of newest first
    #[arg(long)]
    pub oldest_first: bool,
}

impl ListArgs {
    /// Translate CLI arguments into a store query
    pub fn to_query(&self, settings: &Settings) -> TrailResult<(RecordFilter, SortOrder, Page)> {
        let filter = RecordFilter {
            username: self.username.clone(),
            target: self.target.clone(),
            operation: self
                .operation
                .as_deref()
                .map(Operation::from_str)
                .transpose()?,
            since: self.since.as_deref().map(|s| parse_time(s, false)).transpose()?,
            until: self.until.as_deref().map(|s| parse_time(s, true)).transpose()?,
        };

        let order = if self.oldest_first {
            SortOrder::OldestFirst
        } else {
            SortOrder::NewestFirst
        };

        let page = Page {
            offset: self.offset,
            limit: Some(self.limit.unwrap_or(settings.list_limit)),
        };

        Ok((filter, order, page))
    }
}

/// Handle `trailkeeper list`
pub fn handle_list(args: &ListArgs, store: &AuditStore, settings: &Settings) -> TrailResult<String> {
    let (filter, order, page) = args.to_query(settings)?;
    let records = store.list(&filter, order, page)?;
    Ok(format_record_list(&records, store.catalog()))
}

/// Handle `trailkeeper show <id>`
pub fn handle_show(id: u64, store: &AuditStore) -> TrailResult<String> {
    let record = store.get(id)?;
    Ok(format_record_details(&record, store.catalog()))
}

/// Handle `trailkeeper stats`
pub fn handle_stats(store: &AuditStore) -> TrailResult<String> {
    let records = store.list(&RecordFilter::default(), SortOrder::default(), Page::all())?;
    let summary = ActivitySummary::from_records(&records, store.catalog());
    Ok(format_summary(&summary))
}

/// Parse a CLI time bound: a full RFC 3339 timestamp or a plain date
///
/// Plain dates expand to the start of the day for lower bounds and the
/// end of the day for upper bounds, so `--until 2025-06-15` includes the
/// whole of June 15th.
fn parse_time(input: &str, end_of_day: bool) -> TrailResult<DateTime<Utc>> {
    if let Ok(stamp) = input.parse::<DateTime<Utc>>() {
        return Ok(stamp);
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        TrailError::InvalidInput(format!(
            "unrecognized time '{}', expected YYYY-MM-DD or RFC 3339",
            input
        ))
    })?;

    let time = if end_of_day {
        date.and_hms_opt(23, 59, 59).unwrap()
    } else {
        date.and_hms_opt(0, 0, 0).unwrap()
    };
    Ok(time.and_utc())
}
