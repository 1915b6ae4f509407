//! RollSession - the primary public API for rolling dice.
//!
//! A session wires the notation engine to its two collaborators: a
//! [`RandomSource`] for the dice and a [`LogStore`] for the history. Front
//! ends talk to the session and never to the parts directly.

use crate::history::{EntryId, LogEntry, LogStore, RollHistory, HISTORY_CAPACITY};
use crate::notation::{NotationError, RollSpec};
use crate::persist::{PersistError, SavedHistory};
use crate::rng::{RandomSource, SeededRandom, ThreadRandom};
use std::path::Path;
use thiserror::Error;

/// Errors from RollSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Notation error: {0}")]
    Notation(#[from] NotationError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),
}

/// Configuration for creating a roll session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How many log entries the history retains.
    pub capacity: usize,

    /// Seed for a reproducible roll sequence; `None` uses the thread RNG.
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            capacity: HISTORY_CAPACITY,
            seed: None,
        }
    }

    /// Set how many entries the history retains.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Seed the session for a reproducible roll sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A dice-rolling session with a persisted history.
pub struct RollSession {
    source: Box<dyn RandomSource>,
    log: Box<dyn LogStore>,
}

impl RollSession {
    /// Create a session with the given configuration.
    pub fn new(config: SessionConfig) -> Self {
        let source: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(ThreadRandom),
        };
        Self {
            source,
            log: Box::new(RollHistory::with_capacity(config.capacity)),
        }
    }

    /// Create a session over custom collaborators.
    pub fn with_parts(source: Box<dyn RandomSource>, log: Box<dyn LogStore>) -> Self {
        Self { source, log }
    }

    /// Parse a formula, roll it, and record the outcome.
    ///
    /// Returns a copy of the entry appended to the log. On a parse failure
    /// nothing is rolled and nothing is recorded.
    pub fn roll(&mut self, formula: &str) -> Result<LogEntry, SessionError> {
        let spec: RollSpec = formula.parse()?;
        let outcome = spec.roll_with(self.source.as_mut());
        let entry = LogEntry::new(formula.trim(), &outcome);
        self.log.append(entry.clone());
        Ok(entry)
    }

    /// All retained entries, newest first.
    pub fn entries(&self) -> &[LogEntry] {
        self.log.list()
    }

    /// Remove one entry by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        self.log.remove(id)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.log.clear();
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Write the current history to a blob at `path`.
    pub async fn save_history(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        SavedHistory::new(self.entries().to_vec())
            .save_json(path)
            .await?;
        Ok(())
    }

    /// Replace the current history with the blob at `path`.
    ///
    /// Entries are re-appended oldest first, so the store's ordering and
    /// capacity rules apply to the loaded data too. Returns how many entries
    /// the history holds afterwards.
    pub async fn load_history(&mut self, path: impl AsRef<Path>) -> Result<usize, SessionError> {
        let saved = SavedHistory::load_json(path).await?;
        self.log.clear();
        for entry in saved.entries.into_iter().rev() {
            self.log.append(entry);
        }
        Ok(self.log.len())
    }
}

impl Default for RollSession {
    fn default() -> Self {
        Self::new(SessionConfig::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::history_path;
    use crate::testing::FixedRolls;
    use tempfile::TempDir;

    fn scripted(values: impl Into<Vec<u32>>, capacity: usize) -> RollSession {
        RollSession::with_parts(
            Box::new(FixedRolls::new(values)),
            Box::new(RollHistory::with_capacity(capacity)),
        )
    }

    #[test]
    fn test_roll_records_entry() {
        let mut session = scripted([3, 4], HISTORY_CAPACITY);
        let entry = session.roll("2d6+3").expect("roll should succeed");

        assert_eq!(entry.total, 10);
        assert_eq!(entry.formula, "2d6+3");
        assert_eq!(session.len(), 1);
        assert_eq!(session.entries()[0], entry);
    }

    #[test]
    fn test_roll_trims_recorded_formula() {
        let mut session = scripted([3, 4], HISTORY_CAPACITY);
        let entry = session.roll("  2D6+3  ").expect("roll should succeed");
        assert_eq!(entry.formula, "2D6+3");
    }

    #[test]
    fn test_parse_failure_records_nothing() {
        let mut session = scripted([1], HISTORY_CAPACITY);
        let err = session.roll("abc").expect_err("roll should fail");
        assert!(matches!(err, SessionError::Notation(_)));
        assert!(session.is_empty());
    }

    #[test]
    fn test_seeded_sessions_agree() {
        let mut a = RollSession::new(SessionConfig::new().with_seed(9));
        let mut b = RollSession::new(SessionConfig::new().with_seed(9));
        for _ in 0..5 {
            let left = a.roll("3d8+1").expect("roll should succeed");
            let right = b.roll("3d8+1").expect("roll should succeed");
            assert_eq!(left.rolls, right.rolls);
            assert_eq!(left.total, right.total);
        }
    }

    #[test]
    fn test_capacity_applies_to_rolls() {
        let mut session = scripted([1, 2, 3], 2);
        for _ in 0..3 {
            session.roll("1d6").expect("roll should succeed");
        }
        assert_eq!(session.len(), 2);
        let totals: Vec<i64> = session.entries().iter().map(|e| e.total).collect();
        assert_eq!(totals, [3, 2]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut session = scripted([1, 2], HISTORY_CAPACITY);
        let first = session.roll("1d6").expect("roll should succeed");
        session.roll("1d6").expect("roll should succeed");

        assert!(session.remove(&first.id));
        assert!(!session.remove(&first.id));
        assert_eq!(session.len(), 1);

        session.clear();
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = history_path(temp_dir.path());

        let mut session = scripted([3, 4, 6, 6], HISTORY_CAPACITY);
        session.roll("2d6+3").expect("roll should succeed");
        session.roll("2d6").expect("roll should succeed");
        session.save_history(&path).await.expect("save should succeed");

        let mut restored = RollSession::default();
        let count = restored
            .load_history(&path)
            .await
            .expect("load should succeed");

        assert_eq!(count, 2);
        assert_eq!(restored.entries(), session.entries());
    }

    #[tokio::test]
    async fn test_load_applies_capacity() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = history_path(temp_dir.path());

        let mut session = scripted([1, 2, 3, 4, 5], HISTORY_CAPACITY);
        for _ in 0..5 {
            session.roll("1d6").expect("roll should succeed");
        }
        session.save_history(&path).await.expect("save should succeed");

        let mut small = scripted([], 3);
        let count = small.load_history(&path).await.expect("load should succeed");

        assert_eq!(count, 3);
        let totals: Vec<i64> = small.entries().iter().map(|e| e.total).collect();
        // The three newest survive.
        assert_eq!(totals, [5, 4, 3]);
    }

    #[tokio::test]
    async fn test_load_missing_blob_is_persist_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut session = RollSession::default();
        let err = session
            .load_history(history_path(temp_dir.path()))
            .await
            .expect_err("load should fail");
        assert!(matches!(err, SessionError::Persist(PersistError::Io(_))));
    }
}
