//! Domain logic - tracked versions, tags and release candidates, independent of git and Jira

pub mod release_candidate;
pub mod tag;
pub mod version;

pub use release_candidate::{CandidateOrder, CandidatePattern, CandidateStatus, ReleaseCandidate};
pub use tag::{TagInfo, VersionNameTemplate};
pub use version::{ScopeItem, Version, RELEASE_MILESTONE};
