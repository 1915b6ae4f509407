//! QA tests for history persistence.
//!
//! These tests verify the roll history survives a save/load cycle:
//! - Round trip through the versioned JSON blob
//! - Blob shape: single fixed file name, version field, optional tag
//! - Startup behavior with missing, corrupt, or mismatched blobs
//! - Capacity applied to loaded data
//!
//! Run with: `cargo test -p dicetray-core --test qa_persistence`

use dicetray_core::testing::FixedRolls;
use dicetray_core::{
    history_path, PersistError, RollHistory, RollSession, SessionError, HISTORY_FILE,
};
use tempfile::TempDir;

fn scripted_session(values: impl Into<Vec<u32>>) -> RollSession {
    RollSession::with_parts(
        Box::new(FixedRolls::new(values)),
        Box::new(RollHistory::new()),
    )
}

// =============================================================================
// ROUND TRIP
// =============================================================================

#[tokio::test]
async fn test_history_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = history_path(temp_dir.path());

    let mut session = scripted_session([3, 4, 1, 1, 1, 6, 6, 6]);
    session.roll("2d6+3").expect("roll should succeed");
    session.roll("3d6").expect("roll should succeed"); // fumble
    session.roll("3d6").expect("roll should succeed"); // critical
    session
        .save_history(&path)
        .await
        .expect("save should succeed");

    let mut restored = RollSession::default();
    let count = restored
        .load_history(&path)
        .await
        .expect("load should succeed");

    assert_eq!(count, 3);
    assert_eq!(
        restored.entries(),
        session.entries(),
        "Ids, totals, tags, and order should all survive the blob"
    );
    assert!(restored.entries()[0].is_critical());
    assert!(restored.entries()[1].is_fumble());
}

#[tokio::test]
async fn test_blob_shape_on_disk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = history_path(temp_dir.path());

    let mut session = scripted_session([2, 5]);
    session.roll("2d6").expect("roll should succeed");
    session
        .save_history(&path)
        .await
        .expect("save should succeed");

    assert!(
        path.ends_with(HISTORY_FILE),
        "Blob should live under the fixed file name"
    );

    let raw = std::fs::read_to_string(&path).expect("blob should be readable");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("blob should be JSON");

    assert_eq!(json["version"], 1);
    assert!(json["saved_at"].is_string());
    let entries = json["entries"].as_array().expect("entries should be a list");
    assert_eq!(entries.len(), 1);
    // Normal rolls carry no tag field at all.
    assert!(entries[0].get("tag").is_none());
    assert_eq!(entries[0]["formula"], "2d6");
}

#[tokio::test]
async fn test_saving_replaces_the_blob_wholesale() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = history_path(temp_dir.path());

    let mut first = scripted_session([1, 2]);
    first.roll("1d6").expect("roll should succeed");
    first.roll("1d6").expect("roll should succeed");
    first.save_history(&path).await.expect("save should succeed");

    let mut second = scripted_session([3]);
    second.roll("1d6").expect("roll should succeed");
    second
        .save_history(&path)
        .await
        .expect("save should succeed");

    let mut restored = RollSession::default();
    let count = restored
        .load_history(&path)
        .await
        .expect("load should succeed");
    assert_eq!(count, 1, "The older blob contents should be gone");
    assert_eq!(restored.entries()[0].total, 3);
}

// =============================================================================
// STARTUP EDGE CASES
// =============================================================================

#[tokio::test]
async fn test_missing_blob_is_an_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let mut session = RollSession::default();
    let err = session
        .load_history(history_path(temp_dir.path()))
        .await
        .expect_err("load should fail");

    assert!(matches!(
        err,
        SessionError::Persist(PersistError::Io(_))
    ));
    assert!(session.is_empty(), "A failed load leaves the history empty");
}

#[tokio::test]
async fn test_version_mismatch_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = history_path(temp_dir.path());
    std::fs::write(
        &path,
        r#"{"version": 99, "saved_at": "0", "entries": []}"#,
    )
    .expect("write should succeed");

    let mut session = RollSession::default();
    let err = session
        .load_history(&path)
        .await
        .expect_err("load should fail");

    match err {
        SessionError::Persist(PersistError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, 1);
            assert_eq!(found, 99);
        }
        other => panic!("Unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_corrupt_blob_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = history_path(temp_dir.path());
    std::fs::write(&path, "{ definitely not a blob").expect("write should succeed");

    let mut session = RollSession::default();
    let err = session
        .load_history(&path)
        .await
        .expect_err("load should fail");
    assert!(matches!(
        err,
        SessionError::Persist(PersistError::Json(_))
    ));
}

// =============================================================================
// CAPACITY ON LOAD
// =============================================================================

#[tokio::test]
async fn test_load_truncates_to_capacity() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = history_path(temp_dir.path());

    let mut session = scripted_session([1]);
    for i in 0..5 {
        session
            .roll(&format!("1d6+{i}"))
            .expect("roll should succeed");
    }
    session
        .save_history(&path)
        .await
        .expect("save should succeed");

    let mut small = RollSession::with_parts(
        Box::new(FixedRolls::new([1])),
        Box::new(RollHistory::with_capacity(2)),
    );
    let count = small.load_history(&path).await.expect("load should succeed");

    assert_eq!(count, 2);
    let totals: Vec<i64> = small.entries().iter().map(|e| e.total).collect();
    assert_eq!(totals, [5, 4], "Only the newest entries fit");
}
