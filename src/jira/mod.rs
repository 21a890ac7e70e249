//! Issue tracker abstraction
//!
//! Versions tracked in the versions file are mirrored into a Jira project,
//! and the issues fixed in a version are imported back as its scope.
//!
//! - [client::JiraClient]: Jira REST API over HTTP
//! - [mock::MockTracker]: In-memory implementation recording every mutating call

pub mod client;
pub mod mock;

pub use client::JiraClient;
pub use mock::{MockTracker, TrackerCall};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::ScopeItem;
use crate::error::Result;

/// An issue returned by a tracker search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    /// Priority name, empty when the issue has none
    pub priority: String,
}

impl From<Issue> for ScopeItem {
    fn from(issue: Issue) -> Self {
        ScopeItem {
            reference: issue.key,
            summary: issue.summary,
            priority: issue.priority,
        }
    }
}

/// A version as it exists in the tracker project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackerVersion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "releaseDate")]
    pub release_date: Option<NaiveDate>,
}

/// Operations sirem needs from an issue tracker
///
/// Every call is a single blocking request; failures are returned, never retried.
pub trait IssueTracker {
    /// Issues matching a JQL query
    fn search(&self, jql: &str) -> Result<Vec<Issue>>;

    /// Versions of a project keyed by name
    fn project_versions(&self, project: &str) -> Result<BTreeMap<String, TrackerVersion>>;

    fn create_version(
        &self,
        project: &str,
        name: &str,
        description: &str,
        release_date: Option<NaiveDate>,
    ) -> Result<()>;

    fn update_description(&self, version_id: &str, description: &str) -> Result<()>;

    fn update_release_date(&self, version_id: &str, release_date: NaiveDate) -> Result<()>;
}
