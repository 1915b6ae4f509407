//! Testing utilities for the dice engine.
//!
//! This module provides tools for deterministic tests:
//! - `FixedRolls` for scripted die values
//! - `RecordingLog` for observing log traffic
//! - `RollHarness` for end-to-end roll scenarios
//! - Assertion helpers for verifying outcomes

use crate::history::{EntryId, LogEntry, LogStore, RollHistory};
use crate::notation::{Classification, RollSpec};
use crate::rng::RandomSource;
use crate::session::SessionError;

/// A scripted random source.
///
/// Returns queued values in order, cycling back to the start when the script
/// runs out. Values are clamped into the requested range so a mis-scripted
/// test cannot produce an impossible die; an empty script always returns the
/// range minimum.
#[derive(Debug, Clone)]
pub struct FixedRolls {
    values: Vec<u32>,
    index: usize,
}

impl FixedRolls {
    /// Create a source from scripted values.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            index: 0,
        }
    }

    /// Queue another value onto the script.
    pub fn push(&mut self, value: u32) {
        self.values.push(value);
    }

    /// Replay the script from the beginning.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

impl RandomSource for FixedRolls {
    fn next_in_range(&mut self, min: u32, max: u32) -> u32 {
        if self.values.is_empty() {
            return min;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value.clamp(min, max)
    }
}

/// One operation observed by a [`RecordingLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOp {
    Append(EntryId),
    Remove(EntryId),
    Clear,
}

/// A log store that records every operation for assertions.
///
/// Storage behavior is delegated to a real [`RollHistory`], so capacity and
/// ordering rules still apply.
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    inner: RollHistory,
    /// Operations in the order they happened.
    pub ops: Vec<LogOp>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RollHistory::with_capacity(capacity),
            ops: Vec::new(),
        }
    }
}

impl LogStore for RecordingLog {
    fn append(&mut self, entry: LogEntry) {
        self.ops.push(LogOp::Append(entry.id));
        self.inner.append(entry);
    }

    fn list(&self) -> &[LogEntry] {
        self.inner.list()
    }

    fn remove(&mut self, id: &EntryId) -> bool {
        self.ops.push(LogOp::Remove(*id));
        self.inner.remove(id)
    }

    fn clear(&mut self) {
        self.ops.push(LogOp::Clear);
        self.inner.clear();
    }
}

/// Test harness for running scripted roll scenarios.
///
/// Drives the real parse/roll/record pipeline over a [`FixedRolls`] source
/// and an in-memory history.
pub struct RollHarness {
    /// The scripted random source.
    pub source: FixedRolls,
    /// The history log.
    pub log: RollHistory,
}

impl RollHarness {
    /// Create a harness with an empty script and a default-sized log.
    pub fn new() -> Self {
        Self {
            source: FixedRolls::new(Vec::new()),
            log: RollHistory::new(),
        }
    }

    /// Create a harness whose log retains fewer entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            source: FixedRolls::new(Vec::new()),
            log: RollHistory::with_capacity(capacity),
        }
    }

    /// Queue die values for upcoming rolls.
    pub fn script(&mut self, values: impl IntoIterator<Item = u32>) -> &mut Self {
        for value in values {
            self.source.push(value);
        }
        self
    }

    /// Parse, roll, and record a formula through the full pipeline.
    pub fn roll(&mut self, formula: &str) -> Result<LogEntry, SessionError> {
        let spec: RollSpec = formula.parse()?;
        let outcome = spec.roll_with(&mut self.source);
        let entry = LogEntry::new(formula.trim(), &outcome);
        self.log.append(entry.clone());
        Ok(entry)
    }

    /// All recorded entries, newest first.
    pub fn entries(&self) -> &[LogEntry] {
        self.log.list()
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.log.list().first()
    }
}

impl Default for RollHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert an entry's total.
#[track_caller]
pub fn assert_total(entry: &LogEntry, expected: i64) {
    assert_eq!(
        entry.total, expected,
        "Expected total {expected} for '{}', got {}",
        entry.formula, entry.total
    );
}

/// Assert an entry's fumble/critical tag.
#[track_caller]
pub fn assert_tag(entry: &LogEntry, expected: Option<Classification>) {
    assert_eq!(
        entry.tag, expected,
        "Expected tag {expected:?} for '{}', got {:?}",
        entry.formula, entry.tag
    );
}

/// Assert how many entries a harness retains.
#[track_caller]
pub fn assert_log_len(harness: &RollHarness, expected: usize) {
    let actual = harness.log.len();
    assert_eq!(actual, expected, "Expected {expected} log entries, got {actual}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rolls_cycle() {
        let mut source = FixedRolls::new([1, 2]);
        let drawn: Vec<u32> = (0..4).map(|_| source.next_in_range(1, 6)).collect();
        assert_eq!(drawn, [1, 2, 1, 2]);
    }

    #[test]
    fn test_fixed_rolls_clamp_into_range() {
        let mut source = FixedRolls::new([99, 0]);
        assert_eq!(source.next_in_range(1, 6), 6);
        assert_eq!(source.next_in_range(1, 6), 1);
    }

    #[test]
    fn test_fixed_rolls_empty_script_returns_min() {
        let mut source = FixedRolls::new(Vec::new());
        assert_eq!(source.next_in_range(1, 20), 1);
    }

    #[test]
    fn test_fixed_rolls_reset_replays() {
        let mut source = FixedRolls::new([5, 6]);
        assert_eq!(source.next_in_range(1, 6), 5);
        source.reset();
        assert_eq!(source.next_in_range(1, 6), 5);
    }

    #[test]
    fn test_harness_scenario() {
        let mut harness = RollHarness::new();
        harness.script([3, 4]);

        let entry = harness.roll("2d6+3").expect("roll should succeed");
        assert_total(&entry, 10);
        assert_tag(&entry, None);
        assert_log_len(&harness, 1);
        assert_eq!(harness.latest().map(|e| e.total), Some(10));
    }

    #[test]
    fn test_harness_classification() {
        let mut harness = RollHarness::new();
        harness.script([1, 1, 1, 6, 6, 6]);

        let fumble = harness.roll("3d6").expect("roll should succeed");
        assert_tag(&fumble, Some(Classification::Fumble));

        let critical = harness.roll("3d6").expect("roll should succeed");
        assert_tag(&critical, Some(Classification::Critical));
    }

    #[test]
    fn test_harness_rejects_bad_formula() {
        let mut harness = RollHarness::new();
        assert!(harness.roll("not dice").is_err());
        assert_log_len(&harness, 0);
    }

    #[test]
    fn test_recording_log_tracks_ops() {
        let mut harness = RollHarness::new();
        harness.script([2]);
        let entry = harness.roll("1d6").expect("roll should succeed");

        let mut log = RecordingLog::new();
        log.append(entry.clone());
        log.remove(&entry.id);
        log.clear();

        assert_eq!(
            log.ops,
            vec![
                LogOp::Append(entry.id),
                LogOp::Remove(entry.id),
                LogOp::Clear,
            ]
        );
        assert!(log.is_empty());
    }
}
