//! Path management for trailkeeper
//!
//! Provides XDG-compliant path resolution for the settings file and the
//! audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `TRAILKEEPER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/trailkeeper` or `~/.config/trailkeeper`
//! 3. Windows: `%APPDATA%\trailkeeper`

use std::path::PathBuf;

use crate::error::TrailError;

/// Manages all paths used by trailkeeper
#[derive(Debug, Clone)]
pub struct TrailPaths {
    /// Base directory for all trailkeeper data
    base_dir: PathBuf,
}

impl TrailPaths {
    /// Create a new TrailPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, TrailError> {
        let base_dir = if let Ok(custom) = std::env::var("TRAILKEEPER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create TrailPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/trailkeeper/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the append-only audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.jsonl")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), TrailError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TrailError::Io(format!("Failed to create base directory: {}", e)))?;
        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, TrailError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("trailkeeper"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, TrailError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| TrailError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("trailkeeper"))
}
