// tests/store_test.rs
use chrono::NaiveDate;
use sirem::error::{SiremError, EXIT_BAD_VERSION_FILE};
use sirem::store::VersionStore;
use std::fs;
use tempfile::TempDir;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

#[test]
fn test_milestones_survive_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("VERSIONS.yaml");

    let mut store = VersionStore::load(&path).unwrap();
    store.create("v1.0.0", Some("First release"), None).unwrap();
    store.set_milestone("v1.0.0", "freeze", date(5, 1)).unwrap();
    store.set_milestone("v1.0.0", "release", date(6, 1)).unwrap();
    store.remove_milestone("v1.0.0", "freeze").unwrap();
    store.save().unwrap();

    let reloaded = VersionStore::load(&path).unwrap();
    let version = reloaded.require("v1.0.0").unwrap();
    assert_eq!(version.description, "First release");
    assert_eq!(version.milestones.len(), 1);
    assert_eq!(version.release_date(), Some(date(6, 1)));
}

#[test]
fn test_release_date_on_create() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("VERSIONS.yaml");

    let mut store = VersionStore::load(&path).unwrap();
    store.create("v2.0.0", None, Some(date(9, 30))).unwrap();
    store.save().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("tag: v2.0.0"));
    assert!(text.contains("release:"));
    assert!(text.contains("2024-09-30"));
}

#[test]
fn test_file_order_is_preserved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("VERSIONS.yaml");

    let mut store = VersionStore::load(&path).unwrap();
    for tag in ["v3.0.0", "v1.0.0", "v2.0.0"] {
        store.create(tag, None, None).unwrap();
    }
    store.save().unwrap();

    let reloaded = VersionStore::load(&path).unwrap();
    let tags: Vec<&str> = reloaded.versions().iter().map(|v| v.tag.as_str()).collect();
    assert_eq!(tags, vec!["v3.0.0", "v1.0.0", "v2.0.0"]);
}

#[test]
fn test_hand_written_file_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("VERSIONS.yaml");
    fs::write(
        &path,
        r#"versions:
- tag: v1.0.0
  description: Initial
  milestones:
    release: 2024-06-01
  scope:
  - ref: REL-1
    summary: Login page
    priority: Major
- tag: v1.1.0
"#,
    )
    .unwrap();

    let store = VersionStore::load(&path).unwrap();
    assert_eq!(store.versions().len(), 2);

    let first = store.require("v1.0.0").unwrap();
    assert_eq!(first.scope[0].reference, "REL-1");
    assert_eq!(first.scope[0].priority, "Major");
    assert_eq!(first.release_date(), Some(date(6, 1)));

    let second = store.require("v1.1.0").unwrap();
    assert!(second.milestones.is_empty());
    assert!(second.scope.is_empty());
}

#[test]
fn test_failed_mutation_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("VERSIONS.yaml");

    let mut store = VersionStore::load(&path).unwrap();
    store.create("v1.0.0", None, Some(date(6, 1))).unwrap();
    store.save().unwrap();
    let before = fs::read(&path).unwrap();

    let mut store = VersionStore::load(&path).unwrap();
    let err = store.remove_milestone("v1.0.0", "freeze").unwrap_err();
    assert!(matches!(err, SiremError::MilestoneNotFound { .. }));

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_malformed_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("VERSIONS.yaml");

    for content in [
        "versions: [",
        "versions:\n- description: no tag\n",
        "versions:\n- tag: v1\n  milestones:\n    release: someday\n",
        "versions:\n- tag: v1\n- tag: v1\n",
    ] {
        fs::write(&path, content).unwrap();
        let err = VersionStore::load(&path).unwrap_err();
        assert!(
            matches!(err, SiremError::MalformedStore { .. }),
            "expected malformed store for {:?}, got {:?}",
            content,
            err
        );
        assert_eq!(err.exit_code(), EXIT_BAD_VERSION_FILE);
    }
}

#[test]
fn test_unknown_keys_survive_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("VERSIONS.yaml");
    fs::write(
        &path,
        "versions:\n- tag: v1.0.0\n  owner: alice\n  milestones:\n    release: 2024-06-01\n",
    )
    .unwrap();

    let mut store = VersionStore::load(&path).unwrap();
    store.set_description("v1.0.0", "Launch").unwrap();
    store.save().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("owner: alice"));

    let reloaded = VersionStore::load(&path).unwrap();
    let version = reloaded.require("v1.0.0").unwrap();
    assert_eq!(version.description, "Launch");
    assert_eq!(version.release_date(), Some(date(6, 1)));
    assert_eq!(
        version.extra.get("owner").and_then(|v| v.as_str()),
        Some("alice")
    );
}

#[test]
fn test_saved_keys_are_sorted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("VERSIONS.yaml");
    fs::write(
        &path,
        "versions:\n- tag: v1.0.0\n  zone: eu\n  owner: alice\n  description: Launch\n",
    )
    .unwrap();

    let mut store = VersionStore::load(&path).unwrap();
    store.set_milestone("v1.0.0", "release", date(6, 1)).unwrap();
    store.save().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let position = |key: &str| text.find(key).unwrap();
    assert!(position("description:") < position("milestones:"));
    assert!(position("milestones:") < position("owner:"));
    assert!(position("owner:") < position("tag:"));
    assert!(position("tag:") < position("zone:"));
}
