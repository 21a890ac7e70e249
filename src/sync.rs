//! Mirroring tracked versions into the issue tracker, and importing scope back

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::domain::{ScopeItem, Version, VersionNameTemplate};
use crate::error::Result;
use crate::jira::{IssueTracker, TrackerVersion};
use crate::store::VersionStore;

/// A change needed to bring the tracker in line with the versions file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// The version does not exist in the tracker yet
    Create {
        tag: String,
        name: String,
        description: String,
        release_date: Option<NaiveDate>,
    },
    /// The tracker version has a different description
    UpdateDescription {
        tag: String,
        version_id: String,
        from: String,
        to: String,
    },
    /// The tracker version has a different release date
    UpdateReleaseDate {
        tag: String,
        version_id: String,
        from: Option<NaiveDate>,
        to: NaiveDate,
    },
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Create {
                tag,
                name,
                release_date,
                ..
            } => {
                write!(f, "Create version '{}' for {}", name, tag)?;
                if let Some(date) = release_date {
                    write!(f, " (release {})", date)?;
                }
                Ok(())
            }
            SyncAction::UpdateDescription { tag, from, to, .. } => {
                write!(f, "Update description of {} from \"{}\" to \"{}\"", tag, from, to)
            }
            SyncAction::UpdateReleaseDate { tag, from, to, .. } => match from {
                Some(from) => write!(f, "Update release date of {} from {} to {}", tag, from, to),
                None => write!(f, "Set release date of {} to {}", tag, to),
            },
        }
    }
}

/// Compute the actions that bring `remote` in line with `versions`
///
/// A version missing from the tracker only gets a create action. A local
/// version without a release date never clears the tracker's date.
pub fn plan_sync(
    versions: &[Version],
    remote: &BTreeMap<String, TrackerVersion>,
    template: &VersionNameTemplate,
) -> Vec<SyncAction> {
    let mut actions = Vec::new();

    for version in versions {
        let name = template.format(&version.tag);

        let Some(existing) = remote.get(&name) else {
            actions.push(SyncAction::Create {
                tag: version.tag.clone(),
                name,
                description: version.description.clone(),
                release_date: version.release_date(),
            });
            continue;
        };

        let remote_description = existing.description.as_deref().unwrap_or_default();
        if remote_description != version.description {
            actions.push(SyncAction::UpdateDescription {
                tag: version.tag.clone(),
                version_id: existing.id.clone(),
                from: remote_description.to_string(),
                to: version.description.clone(),
            });
        }

        match (version.release_date(), existing.release_date) {
            (Some(local), remote_date) if remote_date != Some(local) => {
                actions.push(SyncAction::UpdateReleaseDate {
                    tag: version.tag.clone(),
                    version_id: existing.id.clone(),
                    from: remote_date,
                    to: local,
                });
            }
            (None, Some(remote_date)) => {
                tracing::warn!(
                    tag = %version.tag,
                    %remote_date,
                    "version has no release date locally, keeping the tracker's date"
                );
            }
            _ => {}
        }
    }

    actions
}

/// Execute planned actions against the tracker, in order
pub fn apply_sync<T: IssueTracker + ?Sized>(
    tracker: &T,
    project: &str,
    actions: &[SyncAction],
) -> Result<()> {
    for action in actions {
        tracing::info!("{}", action);
        match action {
            SyncAction::Create {
                name,
                description,
                release_date,
                ..
            } => tracker.create_version(project, name, description, *release_date)?,
            SyncAction::UpdateDescription { version_id, to, .. } => {
                tracker.update_description(version_id, to)?
            }
            SyncAction::UpdateReleaseDate { version_id, to, .. } => {
                tracker.update_release_date(version_id, *to)?
            }
        }
    }
    Ok(())
}

/// JQL selecting the issues fixed in a tracker version
pub fn scope_jql(version_name: &str, filter: &str) -> String {
    format!("fixVersion = \"{}\" and ({})", version_name, filter)
}

/// Replace the scope of `tag` with the issues the tracker lists for it
///
/// The version must already be tracked; this is checked before any request.
/// The store is modified in memory only. Returns the number of issues imported.
pub fn import_scope<T: IssueTracker + ?Sized>(
    tracker: &T,
    store: &mut VersionStore,
    tag: &str,
    filter: &str,
    template: &VersionNameTemplate,
    scoping_date: NaiveDate,
) -> Result<usize> {
    store.require(tag)?;

    let jql = scope_jql(&template.format(tag), filter);
    tracing::debug!(%jql, "importing scope");

    let issues = tracker.search(&jql)?;
    tracing::debug!(
        count = issues.len(),
        keys = ?issues.iter().map(|i| i.key.as_str()).collect::<Vec<_>>(),
        "found issues"
    );

    let scope: Vec<ScopeItem> = issues.into_iter().map(ScopeItem::from).collect();
    let count = scope.len();
    store.set_scope(tag, scope, scoping_date)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn remote(
        id: &str,
        name: &str,
        description: Option<&str>,
        release_date: Option<NaiveDate>,
    ) -> (String, TrackerVersion) {
        (
            name.to_string(),
            TrackerVersion {
                id: id.to_string(),
                name: name.to_string(),
                description: description.map(str::to_string),
                release_date,
            },
        )
    }

    #[test]
    fn test_scope_jql() {
        assert_eq!(
            scope_jql("Release v1.0.0", "issuetype != sub-task"),
            "fixVersion = \"Release v1.0.0\" and (issuetype != sub-task)"
        );
    }

    #[test]
    fn test_plan_create_uses_template() {
        let mut version = Version::new("v1.0.0");
        version.set_release_date(Some(date(6, 1)));

        let actions = plan_sync(
            &[version],
            &BTreeMap::new(),
            &VersionNameTemplate::new("App {version}"),
        );

        assert_eq!(
            actions,
            vec![SyncAction::Create {
                tag: "v1.0.0".to_string(),
                name: "App v1.0.0".to_string(),
                description: String::new(),
                release_date: Some(date(6, 1)),
            }]
        );
    }

    #[test]
    fn test_plan_in_sync_is_empty() {
        let mut version = Version::new("v1.0.0");
        version.set_release_date(Some(date(6, 1)));
        let remote: BTreeMap<_, _> = [remote("1", "v1.0.0", None, Some(date(6, 1)))].into();

        assert!(plan_sync(&[version], &remote, &VersionNameTemplate::default()).is_empty());
    }

    #[test]
    fn test_plan_updates_description_and_date() {
        let mut version = Version::new("v1.0.0");
        version.description = "Big one".to_string();
        version.set_release_date(Some(date(7, 1)));
        let remote: BTreeMap<_, _> =
            [remote("10", "v1.0.0", Some("old"), Some(date(6, 1)))].into();

        let actions = plan_sync(&[version], &remote, &VersionNameTemplate::default());
        assert_eq!(actions.len(), 2);
        assert!(matches!(
            &actions[0],
            SyncAction::UpdateDescription { version_id, from, to, .. }
                if version_id == "10" && from == "old" && to == "Big one"
        ));
        assert!(matches!(
            &actions[1],
            SyncAction::UpdateReleaseDate { from: Some(_), to, .. } if *to == date(7, 1)
        ));
    }

    #[test]
    fn test_plan_never_clears_remote_date() {
        let version = Version::new("v1.0.0");
        let remote: BTreeMap<_, _> = [remote("1", "v1.0.0", None, Some(date(6, 1)))].into();

        assert!(plan_sync(&[version], &remote, &VersionNameTemplate::default()).is_empty());
    }

    #[test]
    fn test_action_display() {
        let action = SyncAction::UpdateReleaseDate {
            tag: "v1.0.0".to_string(),
            version_id: "1".to_string(),
            from: None,
            to: date(3, 3),
        };
        assert_eq!(action.to_string(), "Set release date of v1.0.0 to 2024-03-03");
    }
}
