pub mod analyzer;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod jira;
pub mod report;
pub mod status;
pub mod store;
pub mod sync;
pub mod ui;

pub use error::{Result, SiremError};
