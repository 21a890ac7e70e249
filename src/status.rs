//! Per-version status composed for reports

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analyzer::ReleaseReconciler;
use crate::domain::{ReleaseCandidate, ScopeItem, Version};
use crate::error::Result;
use crate::git::Repository;
use crate::store::VersionStore;

/// Status of one tracked version at report time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionStatus {
    pub tag: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub milestones: BTreeMap<String, NaiveDate>,
    pub scope: Vec<ScopeItem>,
    pub released: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_candidates: Option<Vec<ReleaseCandidate>>,
}

/// Combine a stored version with what the repository says about its tag
pub fn version_status<R: Repository + ?Sized>(
    version: &Version,
    repo: &R,
    reconciler: &ReleaseReconciler,
) -> Result<VersionStatus> {
    let release = reconciler.reconcile(repo, &version.tag)?;

    Ok(VersionStatus {
        tag: version.tag.clone(),
        description: version.description.clone(),
        milestones: version.milestones.clone(),
        scope: version.scope.clone(),
        released: release.released,
        release_candidates: release.release_candidates,
    })
}

/// Status of the requested version, or of every stored version in file order
pub fn aggregate<R: Repository + ?Sized>(
    store: &VersionStore,
    repo: &R,
    reconciler: &ReleaseReconciler,
    tag: Option<&str>,
) -> Result<Vec<VersionStatus>> {
    match tag {
        Some(tag) => Ok(vec![version_status(store.require(tag)?, repo, reconciler)?]),
        None => store
            .versions()
            .iter()
            .map(|version| version_status(version, repo, reconciler))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CandidateOrder;
    use crate::error::SiremError;
    use crate::git::MockRepository;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    fn fixture() -> (VersionStore, MockRepository, ReleaseReconciler) {
        let mut store = VersionStore::from_versions("VERSIONS.yaml", Vec::new()).unwrap();
        store.create("v2.0.0", Some("Autumn"), Some(date(30))).unwrap();
        store.create("v1.0.0", None, None).unwrap();

        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", date(1), "c1");

        let reconciler = ReleaseReconciler::new("^.*$", CandidateOrder::Lexical).unwrap();
        (store, repo, reconciler)
    }

    #[test]
    fn test_aggregate_all_in_store_order() {
        let (store, repo, reconciler) = fixture();
        let statuses = aggregate(&store, &repo, &reconciler, None).unwrap();

        let tags: Vec<&str> = statuses.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(tags, vec!["v2.0.0", "v1.0.0"]);
        assert!(!statuses[0].released);
        assert!(statuses[1].released);
    }

    #[test]
    fn test_aggregate_single_passes_fields_through() {
        let (store, repo, reconciler) = fixture();
        let statuses = aggregate(&store, &repo, &reconciler, Some("v2.0.0")).unwrap();

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].description, "Autumn");
        assert_eq!(statuses[0].milestones.get("release"), Some(&date(30)));
        assert!(statuses[0].release_candidates.is_none());
    }

    #[test]
    fn test_aggregate_unknown_tag_fails() {
        let (store, repo, reconciler) = fixture();
        let err = aggregate(&store, &repo, &reconciler, Some("v3.0.0")).unwrap_err();
        assert!(matches!(err, SiremError::VersionNotFound { .. }));
    }

    #[test]
    fn test_status_without_candidates_omits_key() {
        let (store, repo, reconciler) = fixture();
        let statuses = aggregate(&store, &repo, &reconciler, Some("v1.0.0")).unwrap();
        let yaml = serde_yaml::to_string(&statuses).unwrap();
        assert!(yaml.contains("released: true"));
        assert!(!yaml.contains("release_candidates"));
    }
}
