//! User interface module - terminal output for commands.
//!
//! Report bodies go to stdout untouched; everything here is status output
//! around them.

pub mod formatter;

pub use formatter::{display_error, display_status, display_success, display_sync_plan};
