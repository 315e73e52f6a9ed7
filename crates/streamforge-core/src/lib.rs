//! StreamForge Core - Core types and traits for incremental scoring
//!
//! This crate provides the fundamental abstractions for StreamForge:
//! - Score types for representing solution quality, with exact string round trips
//! - Domain traits for defining planning problems
//! - Constraint identity types
//! - The shared error type

pub mod constraint;
pub mod domain;
pub mod error;
pub mod score;

pub use constraint::{ConstraintRef, ImpactType};
pub use domain::{PlanningId, PlanningSolution};
pub use error::{Result, StreamForgeError};
pub use score::{
    BendableDecimalScore, BendableLongScore, BendableScore, HardMediumSoftDecimalScore,
    HardMediumSoftLongScore, HardMediumSoftScore, HardSoftDecimalScore, HardSoftLongScore,
    HardSoftScore, ParseableScore, Score, ScoreParseError, SimpleDecimalScore, SimpleLongScore,
    SimpleScore,
};
