//! Application settings
//!
//! Settings are stored as JSON in the config directory and created with
//! defaults on first use.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use serde::{Deserialize, Serialize};

use crate::config::paths::TrailPaths;
use crate::error::{TrailError, TrailResult};

fn default_list_limit() -> usize {
    20
}

/// User-tunable settings for the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Default number of records shown by `list`
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, creating the file with defaults if absent
    pub fn load_or_create(paths: &TrailPaths) -> TrailResult<Self> {
        let path = paths.settings_file();

        if !path.exists() {
            paths.ensure_directories()?;
            let settings = Self::default();
            settings.save(paths)?;
            return Ok(settings);
        }

        let file = File::open(&path)
            .map_err(|e| TrailError::Config(format!("Failed to open settings: {}", e)))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| TrailError::Config(format!("Failed to parse settings: {}", e)))
    }

    /// Write settings to disk
    pub fn save(&self, paths: &TrailPaths) -> TrailResult<()> {
        let file = File::create(paths.settings_file())
            .map_err(|e| TrailError::Config(format!("Failed to create settings: {}", e)))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| TrailError::Config(format!("Failed to serialize settings: {}", e)))?;
        writer
            .flush()
            .map_err(|e| TrailError::Config(format!("Failed to flush settings: {}", e)))?;

        Ok(())
    }
}
