use chrono::NaiveDate;
use serde::Serialize;

/// A git tag together with its date (tagger date, or committer date for lightweight tags)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    #[serde(rename = "tag")]
    pub name: String,
    pub date: NaiveDate,
}

impl TagInfo {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        TagInfo {
            name: name.into(),
            date,
        }
    }
}

/// Naming template for tracker versions (e.g., "{version}", "Release {version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionNameTemplate {
    pub template: String,
}

impl VersionNameTemplate {
    /// Create a new name template
    pub fn new(template: impl Into<String>) -> Self {
        VersionNameTemplate {
            template: template.into(),
        }
    }

    /// Format a tag according to the template
    /// Example: template="Release {version}", tag="v1.2.3" -> "Release v1.2.3"
    pub fn format(&self, tag: &str) -> String {
        self.template.replace("{version}", tag)
    }
}

impl Default for VersionNameTemplate {
    fn default() -> Self {
        VersionNameTemplate::new("{version}")
    }
}
