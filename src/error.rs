use std::path::PathBuf;

use thiserror::Error;

/// Exit status when the requested version is not in the versions file
pub const EXIT_VERSION_NOT_FOUND: u8 = 1;
/// Exit status when the versions file cannot be parsed
pub const EXIT_BAD_VERSION_FILE: u8 = 2;
/// Exit status when creating a version that already exists
pub const EXIT_VERSION_EXISTS: u8 = 3;
/// Exit status when removing a milestone the version does not have
pub const EXIT_MILESTONE_NOT_FOUND: u8 = 4;
/// Exit status when a git query fails
pub const EXIT_QUERY_FAILED: u8 = 5;
/// Exit status when the issue tracker rejects or fails a request
pub const EXIT_TRACKER_FAILED: u8 = 6;
/// Exit status for every other failure
pub const EXIT_FAILURE: u8 = 7;

/// Unified error type for sirem operations
#[derive(Error, Debug)]
pub enum SiremError {
    #[error("Version '{tag}' not found")]
    VersionNotFound { tag: String },

    #[error("Version '{tag}' already exists")]
    VersionExists { tag: String },

    #[error("Milestone '{milestone}' not found in version '{tag}'")]
    MilestoneNotFound { tag: String, milestone: String },

    #[error("Malformed versions file {}: {reason}", path.display())]
    MalformedStore { path: PathBuf, reason: String },

    #[error("Git query failed: {0}")]
    Query(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Issue tracker error: {0}")]
    Tracker(String),

    #[error("Invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in sirem
pub type Result<T> = std::result::Result<T, SiremError>;

impl SiremError {
    pub fn version_not_found(tag: impl Into<String>) -> Self {
        SiremError::VersionNotFound { tag: tag.into() }
    }

    /// Create a malformed-store error for the given file
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SiremError::MalformedStore {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a query error with context
    pub fn query(msg: impl Into<String>) -> Self {
        SiremError::Query(msg.into())
    }

    /// Create a tracker error with context
    pub fn tracker(msg: impl Into<String>) -> Self {
        SiremError::Tracker(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SiremError::Config(msg.into())
    }

    /// Process exit status for this error.
    ///
    /// Not-found, malformed-file and already-exists keep the historical codes 1, 2 and 3.
    pub fn exit_code(&self) -> u8 {
        match self {
            SiremError::VersionNotFound { .. } => EXIT_VERSION_NOT_FOUND,
            SiremError::MalformedStore { .. } => EXIT_BAD_VERSION_FILE,
            SiremError::VersionExists { .. } => EXIT_VERSION_EXISTS,
            SiremError::MilestoneNotFound { .. } => EXIT_MILESTONE_NOT_FOUND,
            SiremError::Query(_) | SiremError::Git(_) => EXIT_QUERY_FAILED,
            SiremError::Tracker(_) => EXIT_TRACKER_FAILED,
            SiremError::InvalidRegex(_) | SiremError::Config(_) | SiremError::Io(_) => EXIT_FAILURE,
        }
    }
}

impl From<reqwest::Error> for SiremError {
    fn from(err: reqwest::Error) -> Self {
        SiremError::Tracker(err.to_string())
    }
}
