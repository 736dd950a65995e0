//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the query layer.

pub mod log;

pub use log::{handle_list, handle_show, handle_stats, ListArgs};
