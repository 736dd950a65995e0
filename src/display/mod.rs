//! Terminal display formatting
//!
//! Rendering of diff/snapshot payload tables and record listings for
//! human consumption.

pub mod record;
pub mod table;

pub use record::{format_record_details, format_record_list, format_record_row};
pub use table::{render_diff, render_snapshot};
