use crate::domain::TagInfo;
use crate::error::{Result, SiremError};
use crate::git::Repository;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: BTreeMap<String, (NaiveDate, String)>,
    ranges: HashMap<(String, String), Vec<String>>,
    range_requests: RefCell<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: BTreeMap::new(),
            ranges: HashMap::new(),
            range_requests: RefCell::new(Vec::new()),
        }
    }

    /// Add a tag pointing at a commit id
    pub fn add_tag(&mut self, name: impl Into<String>, date: NaiveDate, commit: impl Into<String>) {
        self.tags.insert(name.into(), (date, commit.into()));
    }

    /// Register the commit subjects returned for `from..to`
    pub fn add_commits(
        &mut self,
        from_ref: impl Into<String>,
        to_ref: impl Into<String>,
        subjects: &[&str],
    ) {
        self.ranges.insert(
            (from_ref.into(), to_ref.into()),
            subjects.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Every `(from, to)` pair passed to `commits_between`, in call order
    pub fn range_requests(&self) -> Vec<(String, String)> {
        self.range_requests.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self, prefix: &str) -> Result<Vec<TagInfo>> {
        Ok(self
            .tags
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, (date, _))| TagInfo::new(name.clone(), *date))
            .collect())
    }

    fn resolve_commit(&self, reference: &str) -> Result<String> {
        self.tags
            .get(reference)
            .map(|(_, commit)| commit.clone())
            .ok_or_else(|| SiremError::query(format!("Cannot resolve '{}'", reference)))
    }

    fn commits_between(&self, from_ref: &str, to_ref: &str) -> Result<Vec<String>> {
        let key = (from_ref.to_string(), to_ref.to_string());
        self.range_requests.borrow_mut().push(key.clone());
        Ok(self.ranges.get(&key).cloned().unwrap_or_default())
    }
}
