use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::Result;
use crate::jira::{Issue, IssueTracker, TrackerVersion};

/// A mutating call received by [MockTracker]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    Create {
        project: String,
        name: String,
        description: String,
        release_date: Option<NaiveDate>,
    },
    UpdateDescription {
        version_id: String,
        description: String,
    },
    UpdateReleaseDate {
        version_id: String,
        release_date: NaiveDate,
    },
}

/// Mock tracker for testing without network access
#[derive(Default)]
pub struct MockTracker {
    issues: Vec<Issue>,
    versions: BTreeMap<String, TrackerVersion>,
    searches: RefCell<Vec<String>>,
    calls: RefCell<Vec<TrackerCall>>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue returned by every search
    pub fn add_issue(&mut self, key: &str, summary: &str, priority: &str) {
        self.issues.push(Issue {
            key: key.to_string(),
            summary: summary.to_string(),
            priority: priority.to_string(),
        });
    }

    /// Version already present in the project
    pub fn add_version(
        &mut self,
        id: &str,
        name: &str,
        description: Option<&str>,
        release_date: Option<NaiveDate>,
    ) {
        self.versions.insert(
            name.to_string(),
            TrackerVersion {
                id: id.to_string(),
                name: name.to_string(),
                description: description.map(str::to_string),
                release_date,
            },
        );
    }

    /// Every JQL query received, in order
    pub fn searches(&self) -> Vec<String> {
        self.searches.borrow().clone()
    }

    /// Every mutating call received, in order
    pub fn calls(&self) -> Vec<TrackerCall> {
        self.calls.borrow().clone()
    }
}

impl IssueTracker for MockTracker {
    fn search(&self, jql: &str) -> Result<Vec<Issue>> {
        self.searches.borrow_mut().push(jql.to_string());
        Ok(self.issues.clone())
    }

    fn project_versions(&self, _project: &str) -> Result<BTreeMap<String, TrackerVersion>> {
        Ok(self.versions.clone())
    }

    fn create_version(
        &self,
        project: &str,
        name: &str,
        description: &str,
        release_date: Option<NaiveDate>,
    ) -> Result<()> {
        self.calls.borrow_mut().push(TrackerCall::Create {
            project: project.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            release_date,
        });
        Ok(())
    }

    fn update_description(&self, version_id: &str, description: &str) -> Result<()> {
        self.calls.borrow_mut().push(TrackerCall::UpdateDescription {
            version_id: version_id.to_string(),
            description: description.to_string(),
        });
        Ok(())
    }

    fn update_release_date(&self, version_id: &str, release_date: NaiveDate) -> Result<()> {
        self.calls.borrow_mut().push(TrackerCall::UpdateReleaseDate {
            version_id: version_id.to_string(),
            release_date,
        });
        Ok(())
    }
}
