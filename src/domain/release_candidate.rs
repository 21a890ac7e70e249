//! Release candidate tags and their approval status
//!
//! A release candidate of `v1.2.0` is a tag named `v1.2.0-rc.<N>`. The candidate
//! number is kept as the digit string found in the tag name, so ordering is a
//! choice made explicitly through [CandidateOrder].

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::TagInfo;
use crate::error::Result;

/// Outcome of a release candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    /// Latest candidate of a release that has not been tagged yet
    Pending,
    /// Latest candidate and the release tag point at the same commit
    Approved,
    /// Superseded by a later candidate, or released from a different commit
    Rejected,
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateStatus::Pending => write!(f, "pending"),
            CandidateStatus::Approved => write!(f, "approved"),
            CandidateStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// How candidate numbers are compared when ordering candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CandidateOrder {
    /// Compare the digit strings as text: "10" sorts before "2"
    #[default]
    Lexical,
    /// Compare the digit strings as numbers of any length
    Numeric,
}

impl CandidateOrder {
    /// Compare two candidate numbers under this ordering
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            CandidateOrder::Lexical => a.cmp(b),
            CandidateOrder::Numeric => {
                let a = a.trim_start_matches('0');
                let b = b.trim_start_matches('0');
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
        }
    }
}

/// Matches the candidate tags of one release tag
#[derive(Debug, Clone)]
pub struct CandidatePattern {
    regex: Regex,
}

impl CandidatePattern {
    /// Build the pattern `^<release_tag>-rc\.([0-9]+)$` with the release tag taken literally
    ///
    /// Only ASCII digits count; `\d` would also accept other Unicode digits.
    pub fn for_release(release_tag: &str) -> Result<Self> {
        let regex = Regex::new(&format!(r"^{}-rc\.([0-9]+)$", regex::escape(release_tag)))?;
        Ok(CandidatePattern { regex })
    }

    /// Extract the candidate number from a tag name, if the tag is a candidate
    ///
    /// # Examples
    /// ```ignore
    /// let pattern = CandidatePattern::for_release("v1.0.0")?;
    /// assert_eq!(pattern.candidate_number("v1.0.0-rc.3"), Some("3"));
    /// assert_eq!(pattern.candidate_number("v1.0.0"), None);
    /// ```
    pub fn candidate_number<'a>(&self, tag: &'a str) -> Option<&'a str> {
        self.regex
            .captures(tag)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }
}

/// A release candidate tag as reported
///
/// `commits` and `content` are only set for candidates that have a predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseCandidate {
    pub tag: String,
    pub date: NaiveDate,
    pub release_candidate_number: String,
    pub status: CandidateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeSet<String>>,
}

impl ReleaseCandidate {
    /// Create a candidate from its tag; candidates start out rejected
    pub fn new(tag: TagInfo, release_candidate_number: impl Into<String>) -> Self {
        ReleaseCandidate {
            tag: tag.name,
            date: tag.date,
            release_candidate_number: release_candidate_number.into(),
            status: CandidateStatus::Rejected,
            commits: None,
            content: None,
        }
    }
}
