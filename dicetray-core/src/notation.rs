//! Dice notation: parsing, rolling, and result classification.
//!
//! The accepted grammar is `[+-]?NdM[+-K]`:
//! - `N` — signed dice count; empty or a lone `+` means 1, a lone `-` means -1
//! - `M` — side count, at least 1
//! - `K` — flat modifier, defaults to 0
//!
//! Parsing is case-insensitive and ignores surrounding (not interior)
//! whitespace. A parsed [`RollSpec`] is immutable; rolling it draws from a
//! [`RandomSource`] so callers control determinism.

use crate::rng::{RandomSource, ThreadRandom};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing dice notation.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NotationError {
    /// The input does not match `[+-]?NdM[+-K]`.
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    /// A numeric field was well-formed but out of range for its type.
    #[error("Number out of range in dice notation: {0}")]
    InvalidNumber(String),
    /// Dice need at least one side.
    #[error("Invalid side count: {0}")]
    InvalidSideCount(u32),
}

// ============================================================================
// Roll specification
// ============================================================================

/// A parsed dice formula such as `2d6+3`.
///
/// A negative `dice_count` means the dice total is subtracted rather than
/// added (`-1d6+2` rolls one die and negates it before applying the
/// modifier). `side_count >= 1` is guaranteed for specs obtained through
/// [`RollSpec::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollSpec {
    /// How many dice to roll; the sign flips the summed result.
    pub dice_count: i32,
    /// Faces per die.
    pub side_count: u32,
    /// Flat bonus or penalty applied after summing.
    pub modifier: i32,
}

impl RollSpec {
    /// Build a spec directly. Most callers parse instead; this skips the
    /// grammar but still expects `side_count >= 1`.
    pub fn new(dice_count: i32, side_count: u32, modifier: i32) -> Self {
        Self {
            dice_count,
            side_count,
            modifier,
        }
    }

    /// Parse dice notation into a spec.
    ///
    /// ```
    /// use dicetray_core::RollSpec;
    ///
    /// let spec = RollSpec::parse("2d6+3")?;
    /// assert_eq!(spec, RollSpec::new(2, 6, 3));
    ///
    /// // Count and modifier are optional.
    /// assert_eq!(RollSpec::parse("d20")?, RollSpec::new(1, 20, 0));
    /// # Ok::<(), dicetray_core::NotationError>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self, NotationError> {
        let trimmed = input.trim();
        let lowered = trimmed.to_lowercase();

        let d_pos = lowered
            .find('d')
            .ok_or_else(|| NotationError::InvalidNotation(trimmed.to_string()))?;
        let count_part = &lowered[..d_pos];
        let rest = &lowered[d_pos + 1..];

        // The modifier starts at the first sign after the `d`.
        let (sides_part, modifier_part) = match rest.find(|c| c == '+' || c == '-') {
            Some(pos) => (&rest[..pos], Some(&rest[pos..])),
            None => (rest, None),
        };

        let dice_count = parse_count(count_part, trimmed)?;
        let side_count = parse_sides(sides_part, trimmed)?;
        let modifier = match modifier_part {
            Some(text) => parse_modifier(text, trimmed)?,
            None => 0,
        };

        Ok(Self {
            dice_count,
            side_count,
            modifier,
        })
    }

    // ========================================================================
    // Rolling
    // ========================================================================

    /// Draw `|dice_count|` values, each uniform in `[1, side_count]`.
    pub fn roll_values<S: RandomSource + ?Sized>(&self, source: &mut S) -> Vec<u32> {
        (0..self.dice_count.unsigned_abs())
            .map(|_| source.next_in_range(1, self.side_count))
            .collect()
    }

    /// Roll against the given source and evaluate the outcome.
    pub fn roll_with<S: RandomSource + ?Sized>(&self, source: &mut S) -> RollOutcome {
        let values = self.roll_values(source);
        let Evaluation {
            total,
            classification,
        } = self.evaluate(&values);
        RollOutcome {
            spec: *self,
            values,
            total,
            classification,
        }
    }

    /// Roll using the process-wide thread RNG.
    pub fn roll(&self) -> RollOutcome {
        self.roll_with(&mut ThreadRandom)
    }

    // ========================================================================
    // Evaluation & classification
    // ========================================================================

    /// Compute the total and classification for a set of rolled values.
    ///
    /// `total = sign(dice_count) * sum(values) + modifier`, where the sign of
    /// a zero dice count is positive. Pure: the same inputs always produce
    /// the same evaluation.
    pub fn evaluate(&self, values: &[u32]) -> Evaluation {
        let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
        let sign: i64 = if self.dice_count < 0 { -1 } else { 1 };
        Evaluation {
            total: sign * sum + i64::from(self.modifier),
            classification: self.classify(values),
        }
    }

    /// Classify a set of rolled values as fumble, critical, or normal.
    ///
    /// A single common die (`|dice_count| == 1` with 1..=100 sides) never
    /// fumbles or crits, no matter what it rolled; larger oddity dice like a
    /// lone d1000 still can. With every die at its minimum the roll is a
    /// [`Classification::Fumble`]; with every die at its maximum, a
    /// [`Classification::Critical`]. Fumble wins the one-sided-die tie.
    pub fn classify(&self, values: &[u32]) -> Classification {
        if self.dice_count.unsigned_abs() == 1 && (1..=100).contains(&self.side_count) {
            return Classification::Normal;
        }
        if self.dice_count == 0 || values.is_empty() {
            return Classification::Normal;
        }
        if values.iter().all(|&v| v == 1) {
            return Classification::Fumble;
        }
        if values.iter().all(|&v| v == self.side_count) {
            return Classification::Critical;
        }
        Classification::Normal
    }
}

impl fmt::Display for RollSpec {
    /// Canonical notation: reparsing the rendered form yields the same spec.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.dice_count, self.side_count)?;
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        Ok(())
    }
}

impl FromStr for RollSpec {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_count(text: &str, original: &str) -> Result<i32, NotationError> {
    match text {
        "" | "+" => return Ok(1),
        "-" => return Ok(-1),
        _ => {}
    }
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NotationError::InvalidNotation(original.to_string()));
    }
    text.parse::<i32>()
        .map_err(|_| NotationError::InvalidNumber(text.to_string()))
}

fn parse_sides(text: &str, original: &str) -> Result<u32, NotationError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NotationError::InvalidNotation(original.to_string()));
    }
    let sides = text
        .parse::<u32>()
        .map_err(|_| NotationError::InvalidNumber(text.to_string()))?;
    if sides < 1 {
        return Err(NotationError::InvalidSideCount(sides));
    }
    Ok(sides)
}

fn parse_modifier(text: &str, original: &str) -> Result<i32, NotationError> {
    // `text` begins with the sign it was split on.
    let digits = &text[1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NotationError::InvalidNotation(original.to_string()));
    }
    text.parse::<i32>()
        .map_err(|_| NotationError::InvalidNumber(text.to_string()))
}

// ============================================================================
// Outcomes
// ============================================================================

/// How a roll's values relate to the extremes of its dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Nothing noteworthy.
    Normal,
    /// Every die came up 1.
    Fumble,
    /// Every die came up at its maximum.
    Critical,
}

impl Classification {
    /// The log-entry tag for this classification; `Normal` is untagged.
    pub fn tag(self) -> Option<Classification> {
        match self {
            Classification::Normal => None,
            other => Some(other),
        }
    }

    pub fn is_fumble(self) -> bool {
        self == Classification::Fumble
    }

    pub fn is_critical(self) -> bool {
        self == Classification::Critical
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Normal => "normal",
            Classification::Fumble => "fumble",
            Classification::Critical => "critical",
        };
        write!(f, "{}", name)
    }
}

/// The derived half of a roll: total plus classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub total: i64,
    pub classification: Classification,
}

/// A completed roll: the spec, the raw values, and their evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    pub spec: RollSpec,
    /// Per-die values in roll order, each in `[1, side_count]`.
    pub values: Vec<u32>,
    pub total: i64,
    pub classification: Classification,
}

impl RollOutcome {
    pub fn is_fumble(&self) -> bool {
        self.classification.is_fumble()
    }

    pub fn is_critical(&self) -> bool {
        self.classification.is_critical()
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.spec, self.values)?;
        if self.spec.modifier != 0 {
            write!(f, " {:+}", self.spec.modifier)?;
        }
        write!(f, " = {}", self.total)
    }
}
