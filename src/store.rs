//! The versions file: every tracked version, loaded once and rewritten whole
//!
//! The file is a YAML document with a single `versions` sequence. Mutations
//! work on the in-memory collection and return before touching anything when
//! they fail; [VersionStore::save] then replaces the file in one rename.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tempfile::NamedTempFile;

use crate::domain::{ScopeItem, Version};
use crate::error::{Result, SiremError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct VersionsFile {
    #[serde(default)]
    versions: Vec<Version>,
}

/// Ordered collection of tracked versions backed by a YAML file
#[derive(Debug, Clone, PartialEq)]
pub struct VersionStore {
    path: PathBuf,
    versions: Vec<Version>,
}

impl VersionStore {
    /// Load the store from `path`
    ///
    /// A missing or empty file is an empty store. Unparsable YAML, an entry
    /// without a tag, an invalid date or a repeated tag is a malformed store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "versions file not found, starting empty");
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        let file = if contents.trim().is_empty() {
            VersionsFile::default()
        } else {
            serde_yaml::from_str::<VersionsFile>(&contents)
                .map_err(|e| SiremError::malformed(&path, e.to_string()))?
        };

        let store = Self::from_versions(path, file.versions)?;
        tracing::debug!(count = store.versions.len(), "loaded versions");
        Ok(store)
    }

    /// Build a store from already parsed versions, rejecting repeated tags
    pub fn from_versions(path: impl Into<PathBuf>, versions: Vec<Version>) -> Result<Self> {
        let path = path.into();

        for (i, version) in versions.iter().enumerate() {
            if versions[..i].iter().any(|v| v.tag == version.tag) {
                return Err(SiremError::malformed(
                    &path,
                    format!("version '{}' is listed more than once", version.tag),
                ));
            }
        }

        Ok(VersionStore { path, versions })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Versions in file order
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn get(&self, tag: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.tag == tag)
    }

    /// Look up a version, failing if it is not tracked
    pub fn require(&self, tag: &str) -> Result<&Version> {
        self.get(tag).ok_or_else(|| SiremError::version_not_found(tag))
    }

    fn require_mut(&mut self, tag: &str) -> Result<&mut Version> {
        self.versions
            .iter_mut()
            .find(|v| v.tag == tag)
            .ok_or_else(|| SiremError::version_not_found(tag))
    }

    /// Track a new version; the release date becomes its `release` milestone
    pub fn create(
        &mut self,
        tag: &str,
        description: Option<&str>,
        release_date: Option<NaiveDate>,
    ) -> Result<&Version> {
        if self.get(tag).is_some() {
            return Err(SiremError::VersionExists {
                tag: tag.to_string(),
            });
        }

        let mut version = Version::new(tag);
        if let Some(description) = description {
            version.description = description.to_string();
        }
        version.set_release_date(release_date);

        tracing::info!(tag, "creating version");
        self.versions.push(version);
        Ok(&self.versions[self.versions.len() - 1])
    }

    /// Stop tracking a version
    pub fn remove(&mut self, tag: &str) -> Result<Version> {
        let index = self
            .versions
            .iter()
            .position(|v| v.tag == tag)
            .ok_or_else(|| SiremError::version_not_found(tag))?;

        tracing::info!(tag, "removing version");
        Ok(self.versions.remove(index))
    }

    pub fn set_milestone(&mut self, tag: &str, milestone: &str, date: NaiveDate) -> Result<()> {
        tracing::info!(tag, milestone, %date, "setting milestone");
        self.require_mut(tag)?.set_milestone(milestone, date);
        Ok(())
    }

    pub fn remove_milestone(&mut self, tag: &str, milestone: &str) -> Result<NaiveDate> {
        let date = self.require_mut(tag)?.remove_milestone(milestone)?;
        tracing::info!(tag, milestone, "removed milestone");
        Ok(date)
    }

    pub fn set_description(&mut self, tag: &str, description: &str) -> Result<()> {
        tracing::info!(tag, "setting description");
        self.require_mut(tag)?.description = description.to_string();
        Ok(())
    }

    /// Replace the imported scope of a version
    pub fn set_scope(
        &mut self,
        tag: &str,
        scope: Vec<ScopeItem>,
        scoping_date: NaiveDate,
    ) -> Result<()> {
        let version = self.require_mut(tag)?;
        tracing::info!(tag, issues = scope.len(), "replacing scope");
        version.scope = scope;
        version.scoping_date = Some(scoping_date);
        Ok(())
    }

    /// Write the whole collection back to its file, every mapping sorted by key
    ///
    /// The YAML goes to a temporary file in the same directory which is then
    /// renamed over the target, so readers never see a partial file.
    pub fn save(&self) -> Result<()> {
        let value = serde_yaml::to_value(VersionsFile {
            versions: self.versions.clone(),
        })
        .map_err(std::io::Error::other)?;
        let yaml = serde_yaml::to_string(&sort_keys(value)).map_err(std::io::Error::other)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(metadata.permissions())?;
        }
        tmp.write_all(yaml.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), count = self.versions.len(), "saved versions");
        Ok(())
    }
}

// Unknown keys are flattened after the known fields, so order is only total after this pass
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut entries: Vec<(Value, Value)> = mapping
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            entries.sort_by(|(a, _), (b, _)| a.as_str().cmp(&b.as_str()));
            Value::Mapping(entries.into_iter().collect::<Mapping>())
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> VersionStore {
        VersionStore::from_versions("VERSIONS.yaml", vec![Version::new("v1.0.0")]).unwrap()
    }

    #[test]
    fn test_create_duplicate_fails() {
        let mut store = store();
        let err = store.create("v1.0.0", None, None).unwrap_err();
        assert!(matches!(err, SiremError::VersionExists { .. }));
        assert_eq!(store.versions().len(), 1);
    }

    #[test]
    fn test_create_with_release_date_and_description() {
        let mut store = store();
        let version = store
            .create("v1.1.0", Some("Summer"), Some(date(2024, 7, 1)))
            .unwrap();
        assert_eq!(version.description, "Summer");
        assert_eq!(version.release_date(), Some(date(2024, 7, 1)));

        let tags: Vec<&str> = store.versions().iter().map(|v| v.tag.as_str()).collect();
        assert_eq!(tags, vec!["v1.0.0", "v1.1.0"]);
    }

    #[test]
    fn test_remove_missing_fails() {
        let mut store = store();
        assert!(matches!(
            store.remove("v9.0.0").unwrap_err(),
            SiremError::VersionNotFound { .. }
        ));
        assert_eq!(store.remove("v1.0.0").unwrap().tag, "v1.0.0");
        assert!(store.versions().is_empty());
    }

    #[test]
    fn test_mutations_on_missing_version_fail() {
        let mut store = store();
        assert!(store.set_milestone("v2", "beta", date(2024, 1, 1)).is_err());
        assert!(store.remove_milestone("v2", "beta").is_err());
        assert!(store.set_description("v2", "text").is_err());
        assert!(store.set_scope("v2", Vec::new(), date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_remove_missing_milestone_fails() {
        let mut store = store();
        let err = store.remove_milestone("v1.0.0", "beta").unwrap_err();
        assert!(matches!(err, SiremError::MilestoneNotFound { .. }));
    }

    #[test]
    fn test_set_scope_records_date() {
        let mut store = store();
        let scope = vec![ScopeItem {
            reference: "REL-1".to_string(),
            summary: "Ship it".to_string(),
            priority: "Major".to_string(),
        }];
        store.set_scope("v1.0.0", scope.clone(), date(2024, 2, 2)).unwrap();

        let version = store.require("v1.0.0").unwrap();
        assert_eq!(version.scope, scope);
        assert_eq!(version.scoping_date, Some(date(2024, 2, 2)));
    }

    #[test]
    fn test_sort_keys_orders_nested_mappings() {
        let value: Value =
            serde_yaml::from_str("tag: v1\nowner: alice\nscope:\n- summary: s\n  ref: R-1\n")
                .unwrap();
        let Value::Mapping(sorted) = sort_keys(value) else {
            panic!("expected a mapping");
        };

        let keys: Vec<&str> = sorted.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["owner", "scope", "tag"]);

        let item = sorted.get("scope").and_then(|scope| scope.get(0)).unwrap();
        let item_keys: Vec<&str> = item
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(item_keys, vec!["ref", "summary"]);
    }

    #[test]
    fn test_duplicate_tags_are_malformed() {
        let result = VersionStore::from_versions(
            "VERSIONS.yaml",
            vec![Version::new("v1.0.0"), Version::new("v1.0.0")],
        );
        assert!(matches!(result, Err(SiremError::MalformedStore { .. })));
    }
}
