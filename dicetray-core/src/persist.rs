//! History persistence.
//!
//! The roll log is stored as a single versioned JSON blob under a fixed file
//! name, so the history survives restarts without any notion of profiles or
//! multiple saves. Loading a blob written by a different format version
//! fails rather than guessing.

use crate::history::LogEntry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current history blob version.
const HISTORY_VERSION: u32 = 1;

/// Fixed file name the history blob lives under.
pub const HISTORY_FILE: &str = "dicetray_history.json";

/// The persisted roll history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedHistory {
    /// Blob format version for compatibility checking.
    pub version: u32,

    /// When the blob was written.
    pub saved_at: String,

    /// Log entries, newest first.
    pub entries: Vec<LogEntry>,
}

impl SavedHistory {
    /// Wrap log entries for writing.
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Self {
            version: HISTORY_VERSION,
            saved_at: timestamp_now(),
            entries,
        }
    }

    /// Save to a JSON file, creating the parent directory if needed.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        let saved: Self = serde_json::from_str(&content)?;

        if saved.version != HISTORY_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: HISTORY_VERSION,
                found: saved.version,
            });
        }

        Ok(saved)
    }
}

/// Where the history blob lives under a base directory.
pub fn history_path(base_dir: impl AsRef<Path>) -> PathBuf {
    base_dir.as_ref().join(HISTORY_FILE)
}

/// The platform data directory for this application.
///
/// Falls back to the working directory when the platform reports none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("dicetray"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Current Unix timestamp as a string.
fn timestamp_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    format!("{}", now.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::RollSpec;
    use crate::testing::FixedRolls;
    use tempfile::TempDir;

    fn sample_entries() -> Vec<LogEntry> {
        let spec = RollSpec::parse("2d6+3").unwrap();
        vec![
            LogEntry::new("2d6+3", &spec.roll_with(&mut FixedRolls::new([3, 4]))),
            LogEntry::new("2d6+3", &spec.roll_with(&mut FixedRolls::new([6, 6]))),
        ]
    }

    #[test]
    fn test_saved_history_creation() {
        let saved = SavedHistory::new(sample_entries());
        assert_eq!(saved.version, HISTORY_VERSION);
        assert!(!saved.saved_at.is_empty());
        assert_eq!(saved.entries.len(), 2);
    }

    #[test]
    fn test_history_path_uses_fixed_name() {
        let path = history_path("/data");
        assert!(path.ends_with(HISTORY_FILE));
    }

    #[test]
    fn test_default_data_dir_is_app_scoped() {
        let dir = default_data_dir();
        assert!(dir.ends_with("dicetray") || dir == Path::new("."));
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = history_path(temp_dir.path());

        let saved = SavedHistory::new(sample_entries());
        saved.save_json(&path).await.expect("Save should succeed");
        assert!(path.exists());

        let loaded = SavedHistory::load_json(&path)
            .await
            .expect("Load should succeed");
        assert_eq!(loaded.entries, saved.entries);
    }

    #[tokio::test]
    async fn test_save_creates_parent_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = history_path(temp_dir.path().join("nested").join("deeper"));

        let saved = SavedHistory::new(Vec::new());
        saved.save_json(&path).await.expect("Save should succeed");
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_load_rejects_version_mismatch() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = history_path(temp_dir.path());
        std::fs::write(
            &path,
            r#"{"version": 99, "saved_at": "0", "entries": []}"#,
        )
        .expect("Write should succeed");

        let err = SavedHistory::load_json(&path)
            .await
            .expect_err("Load should fail");
        match err {
            PersistError::VersionMismatch { expected, found } => {
                assert_eq!(expected, HISTORY_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("Unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = SavedHistory::load_json(history_path(temp_dir.path()))
            .await
            .expect_err("Load should fail");
        assert!(matches!(err, PersistError::Io(_)));
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_blob() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = history_path(temp_dir.path());
        std::fs::write(&path, "not json at all").expect("Write should succeed");

        let err = SavedHistory::load_json(&path)
            .await
            .expect_err("Load should fail");
        assert!(matches!(err, PersistError::Json(_)));
    }
}
