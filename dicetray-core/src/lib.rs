//! Dice notation engine with a persisted roll history.
//!
//! This crate provides:
//! - Parsing for `[+-]?NdM[+-K]` dice notation
//! - Pluggable random sources for reproducible rolls
//! - Fumble/critical classification of roll results
//! - A capped, newest-first history log persisted as a versioned JSON blob
//!
//! # Quick Start
//!
//! ```
//! use dicetray_core::testing::FixedRolls;
//! use dicetray_core::{RollHistory, RollSession};
//!
//! let mut session = RollSession::with_parts(
//!     Box::new(FixedRolls::new([3, 4])),
//!     Box::new(RollHistory::new()),
//! );
//!
//! let entry = session.roll("2d6+3")?;
//! assert_eq!(entry.total, 10);
//! assert_eq!(session.entries().len(), 1);
//! # Ok::<(), dicetray_core::SessionError>(())
//! ```

pub mod history;
pub mod notation;
pub mod persist;
pub mod presets;
pub mod rng;
pub mod session;
pub mod testing;

// Primary public API
pub use history::{EntryId, LogEntry, LogStore, RollHistory, RolledDie, HISTORY_CAPACITY};
pub use notation::{Classification, Evaluation, NotationError, RollOutcome, RollSpec};
pub use persist::{default_data_dir, history_path, PersistError, SavedHistory, HISTORY_FILE};
pub use presets::{preset_for_slot, Preset, PRESETS};
pub use rng::{RandomSource, SeededRandom, ThreadRandom};
pub use session::{RollSession, SessionConfig, SessionError};
