//! Random sources for roll execution.
//!
//! The notation engine stays pure: every draw goes through the
//! [`RandomSource`] capability, so callers can swap the process-wide RNG
//! for a seeded or scripted one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly-distributed integers for dice rolls.
///
/// Implementations must return a value in `[min, max]` (both inclusive).
/// Callers only ever request ranges with `min <= max`.
pub trait RandomSource {
    /// Draw the next integer in `[min, max]`.
    fn next_in_range(&mut self, min: u32, max: u32) -> u32;
}

/// The process-wide thread RNG.
///
/// This is the default source for interactive rolls. It is stateful but
/// unsynchronized, which is fine in the single-threaded event-driven
/// context the engine runs in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&mut self, min: u32, max: u32) -> u32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// A seeded RNG for reproducible roll sequences.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a source that replays the same sequence for the same seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }
}
