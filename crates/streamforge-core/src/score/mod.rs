//! Score types for representing solution quality
//!
//! Scores are used to compare solutions and guide the optimization process.
//! All score types are immutable, `Copy`, and implement arithmetic operations.
//! Each layout exists with `i32`, `i64` (`Long`) and `Decimal` levels.

#[macro_use]
mod macros;

mod bendable;
pub(crate) mod format;
mod hard_medium_soft;
mod hard_soft;
mod level;
mod simple;
mod traits;

#[cfg(test)]
mod tests;

pub use bendable::{BendableDecimalScore, BendableLongScore, BendableScore};
pub use hard_medium_soft::{HardMediumSoftDecimalScore, HardMediumSoftLongScore, HardMediumSoftScore};
pub use hard_soft::{HardSoftDecimalScore, HardSoftLongScore, HardSoftScore};
pub use level::{ScoreLevel, ScoreNumber};
pub use simple::{SimpleDecimalScore, SimpleLongScore, SimpleScore};
pub use traits::{ParseableScore, Score, ScoreParseError};
