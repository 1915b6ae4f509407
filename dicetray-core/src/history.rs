//! The roll history log.
//!
//! Every executed roll becomes a [`LogEntry`] appended to a [`LogStore`].
//! Entries are kept newest-first and the store truncates itself to a fixed
//! capacity, so the log never grows without bound.

use crate::notation::{Classification, RollOutcome};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// How many entries a default-sized history retains.
pub const HISTORY_CAPACITY: usize = 500;

/// Unique identifier for a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One die from a completed roll.
///
/// `negated` marks dice rolled under a negative dice count; their values
/// count against the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledDie {
    pub value: u32,
    pub negated: bool,
}

impl RolledDie {
    /// The die's contribution to the total.
    pub fn signed_value(&self) -> i64 {
        if self.negated {
            -i64::from(self.value)
        } else {
            i64::from(self.value)
        }
    }
}

/// A single roll as recorded in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: EntryId,
    /// The formula as the user typed it.
    pub formula: String,
    pub rolls: Vec<RolledDie>,
    pub total: i64,
    /// Unix epoch milliseconds at roll time.
    pub timestamp: u64,
    /// Present only for fumbles and criticals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<Classification>,
}

impl LogEntry {
    /// Record an outcome under the formula that produced it.
    pub fn new(formula: impl Into<String>, outcome: &RollOutcome) -> Self {
        let negated = outcome.spec.dice_count < 0;
        Self {
            id: EntryId::new(),
            formula: formula.into(),
            rolls: outcome
                .values
                .iter()
                .map(|&value| RolledDie { value, negated })
                .collect(),
            total: outcome.total,
            timestamp: epoch_millis(),
            tag: outcome.classification.tag(),
        }
    }

    pub fn is_fumble(&self) -> bool {
        self.tag == Some(Classification::Fumble)
    }

    pub fn is_critical(&self) -> bool {
        self.tag == Some(Classification::Critical)
    }
}

fn epoch_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ============================================================================
// Log store
// ============================================================================

/// Storage for the roll history, newest entries first.
///
/// Implementations keep at most their capacity of entries, silently dropping
/// the oldest on overflow.
pub trait LogStore {
    /// Insert a fresh entry at the front, truncating past capacity.
    fn append(&mut self, entry: LogEntry);

    /// All retained entries, newest first.
    fn list(&self) -> &[LogEntry];

    /// Remove one entry by id. Returns whether anything was removed.
    fn remove(&mut self, id: &EntryId) -> bool;

    /// Drop every entry.
    fn clear(&mut self);

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

/// The standard in-memory history log.
#[derive(Debug, Clone)]
pub struct RollHistory {
    entries: Vec<LogEntry>,
    capacity: usize,
}

impl RollHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RollHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl LogStore for RollHistory {
    fn append(&mut self, entry: LogEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    fn list(&self) -> &[LogEntry] {
        &self.entries
    }

    fn remove(&mut self, id: &EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != id);
        self.entries.len() != before
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::RollSpec;
    use crate::testing::FixedRolls;

    fn entry(formula: &str, total: i64) -> LogEntry {
        LogEntry {
            id: EntryId::new(),
            formula: formula.to_string(),
            rolls: Vec::new(),
            total,
            timestamp: 0,
            tag: None,
        }
    }

    #[test]
    fn test_append_is_newest_first() {
        let mut log = RollHistory::new();
        log.append(entry("1d6", 2));
        log.append(entry("1d8", 5));
        log.append(entry("1d20", 17));
        let formulas: Vec<&str> = log.list().iter().map(|e| e.formula.as_str()).collect();
        assert_eq!(formulas, ["1d20", "1d8", "1d6"]);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = RollHistory::with_capacity(3);
        for total in 1..=4 {
            log.append(entry("1d6", total));
        }
        assert_eq!(log.len(), 3);
        let totals: Vec<i64> = log.list().iter().map(|e| e.total).collect();
        assert_eq!(totals, [4, 3, 2]);
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(RollHistory::new().capacity(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_remove_by_id() {
        let mut log = RollHistory::new();
        let keep = entry("1d6", 2);
        let drop = entry("1d8", 5);
        let drop_id = drop.id;
        log.append(keep);
        log.append(drop);

        assert!(log.remove(&drop_id));
        assert_eq!(log.len(), 1);
        assert_eq!(log.list()[0].formula, "1d6");

        // A second removal finds nothing.
        assert!(!log.remove(&drop_id));
    }

    #[test]
    fn test_clear() {
        let mut log = RollHistory::new();
        log.append(entry("1d6", 2));
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_entry_from_outcome() {
        let spec = RollSpec::parse("-2d6+1").unwrap();
        let outcome = spec.roll_with(&mut FixedRolls::new([3, 4]));
        let entry = LogEntry::new("-2D6+1", &outcome);

        assert_eq!(entry.formula, "-2D6+1");
        assert_eq!(entry.total, -6);
        assert_eq!(entry.rolls.len(), 2);
        assert!(entry.rolls.iter().all(|d| d.negated));
        assert_eq!(entry.rolls[0].signed_value(), -3);
        assert_eq!(entry.tag, None);
    }

    #[test]
    fn test_entry_tag_serialization() {
        let spec = RollSpec::parse("3d6").unwrap();

        let normal = LogEntry::new("3d6", &spec.roll_with(&mut FixedRolls::new([1, 2, 3])));
        let json = serde_json::to_value(&normal).unwrap();
        assert!(json.get("tag").is_none());

        let fumble = LogEntry::new("3d6", &spec.roll_with(&mut FixedRolls::new([1, 1, 1])));
        let json = serde_json::to_value(&fumble).unwrap();
        assert_eq!(json["tag"], "fumble");
        assert!(fumble.is_fumble());

        let critical = LogEntry::new("3d6", &spec.roll_with(&mut FixedRolls::new([6, 6, 6])));
        assert!(critical.is_critical());
    }
}
