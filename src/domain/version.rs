use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SiremError};

/// Milestone whose date is the official release date
pub const RELEASE_MILESTONE: &str = "release";

/// An issue imported from the tracker as part of a version's scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeItem {
    #[serde(default)]
    pub priority: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub summary: String,
}

/// A tracked release version as stored in the versions file
///
/// Milestone dates are parsed when the entry is read, so a loaded `Version`
/// always carries valid dates. Fields are declared in key order; keys sirem
/// does not know are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub milestones: BTreeMap<String, NaiveDate>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope: Vec<ScopeItem>,

    /// Date the scope was last imported from the tracker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoping_date: Option<NaiveDate>,

    pub tag: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Version {
    /// Create an unscheduled version with no description
    pub fn new(tag: impl Into<String>) -> Self {
        Version {
            tag: tag.into(),
            description: String::new(),
            milestones: BTreeMap::new(),
            scope: Vec::new(),
            scoping_date: None,
            extra: BTreeMap::new(),
        }
    }

    /// Date of the `release` milestone, if scheduled
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.milestones.get(RELEASE_MILESTONE).copied()
    }

    /// Set or clear the `release` milestone
    pub fn set_release_date(&mut self, date: Option<NaiveDate>) {
        match date {
            Some(date) => self.set_milestone(RELEASE_MILESTONE, date),
            None => {
                self.milestones.remove(RELEASE_MILESTONE);
            }
        }
    }

    pub fn set_milestone(&mut self, name: impl Into<String>, date: NaiveDate) {
        self.milestones.insert(name.into(), date);
    }

    /// Remove a milestone, failing if the version does not have it
    pub fn remove_milestone(&mut self, name: &str) -> Result<NaiveDate> {
        self.milestones
            .remove(name)
            .ok_or_else(|| SiremError::MilestoneNotFound {
                tag: self.tag.clone(),
                milestone: name.to_string(),
            })
    }
}
