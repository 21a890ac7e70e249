// tests/sync_test.rs
use chrono::NaiveDate;
use sirem::domain::VersionNameTemplate;
use sirem::jira::{IssueTracker, MockTracker, TrackerCall};
use sirem::store::VersionStore;
use sirem::sync::{apply_sync, import_scope, plan_sync, SyncAction};
use sirem::SiremError;
use tempfile::TempDir;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn store(dir: &TempDir) -> VersionStore {
    let mut store = VersionStore::load(dir.path().join("VERSIONS.yaml")).unwrap();
    store.create("v1.0.0", Some("First"), Some(date(6, 1))).unwrap();
    store.create("v1.1.0", None, None).unwrap();
    store.create("v2.0.0", Some("Next"), Some(date(9, 1))).unwrap();
    store
}

fn plan(tracker: &MockTracker, store: &VersionStore) -> Vec<SyncAction> {
    let remote = tracker.project_versions("REL").unwrap();
    plan_sync(store.versions(), &remote, &VersionNameTemplate::default())
}

#[test]
fn test_sync_creates_and_updates() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    let mut tracker = MockTracker::new();
    tracker.add_version("10", "v1.0.0", Some("First"), Some(date(5, 1)));
    tracker.add_version("11", "v1.1.0", Some("stale"), Some(date(7, 1)));

    let actions = plan(&tracker, &store);
    apply_sync(&tracker, "REL", &actions).unwrap();

    assert_eq!(
        tracker.calls(),
        vec![
            TrackerCall::UpdateReleaseDate {
                version_id: "10".to_string(),
                release_date: date(6, 1),
            },
            TrackerCall::UpdateDescription {
                version_id: "11".to_string(),
                description: String::new(),
            },
            TrackerCall::Create {
                project: "REL".to_string(),
                name: "v2.0.0".to_string(),
                description: "Next".to_string(),
                release_date: Some(date(9, 1)),
            },
        ]
    );
}

#[test]
fn test_planning_alone_makes_no_calls() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    let tracker = MockTracker::new();

    let actions = plan(&tracker, &store);
    assert_eq!(actions.len(), 3);
    assert!(actions
        .iter()
        .all(|action| matches!(action, SyncAction::Create { .. })));
    assert!(tracker.calls().is_empty());
}

#[test]
fn test_import_scope_replaces_scope() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);

    let mut tracker = MockTracker::new();
    tracker.add_issue("REL-1", "Login page", "Major");
    tracker.add_issue("REL-2", "Logout button", "");

    let count = import_scope(
        &tracker,
        &mut store,
        "v1.0.0",
        "issuetype != sub-task",
        &VersionNameTemplate::new("App {version}"),
        date(4, 2),
    )
    .unwrap();
    assert_eq!(count, 2);

    assert_eq!(
        tracker.searches(),
        vec!["fixVersion = \"App v1.0.0\" and (issuetype != sub-task)".to_string()]
    );

    let version = store.require("v1.0.0").unwrap();
    assert_eq!(version.scoping_date, Some(date(4, 2)));
    assert_eq!(version.scope.len(), 2);
    assert_eq!(version.scope[0].reference, "REL-1");
    assert_eq!(version.scope[1].priority, "");

    store.save().unwrap();
    let reloaded = VersionStore::load(store.path()).unwrap();
    assert_eq!(reloaded.require("v1.0.0").unwrap().scope, version.scope);
}

#[test]
fn test_import_scope_unknown_version_does_not_search() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);
    let tracker = MockTracker::new();

    let err = import_scope(
        &tracker,
        &mut store,
        "v9.9.9",
        "issuetype != sub-task",
        &VersionNameTemplate::default(),
        date(4, 2),
    )
    .unwrap_err();

    assert!(matches!(err, SiremError::VersionNotFound { .. }));
    assert!(tracker.searches().is_empty());
}
