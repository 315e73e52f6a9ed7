//! Core Score trait definition

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Neg, Sub};

use super::level::{ScoreLevel, ScoreNumber};

/// Core trait for all score types in StreamForge.
///
/// Scores represent the quality of a planning solution. They are used to:
/// - Compare solutions (better/worse/equal)
/// - Accumulate constraint impacts incrementally
/// - Determine feasibility
///
/// All score implementations must be:
/// - Immutable (operations return new instances)
/// - Thread-safe (Send + Sync)
/// - Comparable (total ordering)
///
/// # Score Levels
///
/// Scores are vectors of levels ordered from hardest to softest. Every score
/// also carries an init score: zero for an initialized solution, negative
/// (minus the number of uninitialized variables) otherwise. When comparing
/// scores the init score is compared first, then each level in order.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Numeric type of every level (`i32`, `i64` or `Decimal`).
    type Level: ScoreNumber;

    /// Returns true if this score represents a feasible solution.
    ///
    /// A solution is feasible when it is initialized and every hard level
    /// is `>= 0`.
    fn is_feasible(&self) -> bool;

    /// Returns the zero score (identity element for addition).
    fn zero() -> Self;

    /// Returns the number of score levels.
    ///
    /// For example:
    /// - SimpleScore: 1 level
    /// - HardSoftScore: 2 levels
    /// - HardMediumSoftScore: 3 levels
    /// - BendableScore<H, S>: H + S levels
    fn levels_count() -> usize;

    /// Returns the number of leading levels that are hard levels.
    fn hard_levels_count() -> usize;

    /// Returns the init score, `0` when the solution is initialized.
    fn init_score(&self) -> i32;

    /// Returns a copy of this score with another init score.
    fn with_init_score(&self, init_score: i32) -> Self;

    /// Returns the level values, highest priority first.
    fn to_level_numbers(&self) -> Vec<Self::Level>;

    /// Creates a score from an init score and level values.
    ///
    /// # Panics
    /// Panics if the number of levels doesn't match `levels_count()`.
    fn from_level_numbers(init_score: i32, levels: &[Self::Level]) -> Self;

    /// Multiplies every level by `factor`. The init score is left untouched.
    fn multiply(&self, factor: Self::Level) -> Self;

    /// Returns the absolute value of every level.
    fn abs(&self) -> Self;

    /// Returns the semantic label for the score level at the given index.
    ///
    /// Level indices follow the same order as `to_level_numbers()`:
    /// highest priority first.
    ///
    /// # Panics
    /// Panics if `index >= levels_count()`.
    fn level_label(index: usize) -> ScoreLevel;

    /// Returns the compact form: zero levels and a zero init score are
    /// omitted, and an all-zero score is `"0"`.
    fn to_short_string(&self) -> String;

    /// Returns true if the init score is not negative.
    fn is_solution_initialized(&self) -> bool {
        self.init_score() >= 0
    }

    /// Compares two scores, returning the ordering.
    ///
    /// Default implementation uses the Ord trait.
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    /// Returns true if this score is better than the other score.
    ///
    /// In optimization, "better" typically means higher score.
    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }

    /// Returns true if this score is worse than the other score.
    fn is_worse_than(&self, other: &Self) -> bool {
        self < other
    }

    /// Returns true if this score is equal to the other score.
    fn is_equal_to(&self, other: &Self) -> bool {
        self == other
    }
}

/// Marker trait for scores that can be parsed from a string.
pub trait ParseableScore: Score {
    /// Parses a score from a string representation.
    ///
    /// Both the full form written by `Display` and the short form written by
    /// [`Score::to_short_string`] are accepted.
    ///
    /// # Format
    /// - SimpleScore: "42", "-7init/42" or "-7init"
    /// - HardSoftScore: "0hard/-100soft", "-100soft" or "0"
    /// - HardMediumSoftScore: "-7init/0hard/0medium/-100soft"
    /// - BendableScore: "[0/-1]hard/[-5/0/-3]soft"
    fn parse(s: &str) -> Result<Self, ScoreParseError>;

    /// Returns the string representation of this score.
    fn to_string_repr(&self) -> String;
}

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreParseError {
    pub message: String,
}

impl ScoreParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ScoreParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score parse error: {}", self.message)
    }
}

impl std::error::Error for ScoreParseError {}
