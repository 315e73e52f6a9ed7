//! StreamForge - Incremental Constraint Scoring in Rust
//!
//! Declare constraints as streams, feed facts into a session or a score
//! director and read the score after every change.
//!
//! # Example
//!
//! ```rust
//! use streamforge::prelude::*;
//!
//! // Score types are re-exported
//! let score = HardSoftScore::of(0, -100);
//! assert_eq!(score.hard(), 0);
//! assert_eq!(score.soft(), -100);
//! assert_eq!(HardSoftScore::parse("-100soft"), Ok(score));
//! ```

// Score types
pub use streamforge_core::score::{
    BendableDecimalScore, BendableLongScore, BendableScore, HardMediumSoftDecimalScore,
    HardMediumSoftLongScore, HardMediumSoftScore, HardSoftDecimalScore, HardSoftLongScore,
    HardSoftScore, ParseableScore, Score, ScoreParseError, SimpleDecimalScore, SimpleLongScore,
    SimpleScore,
};

// Domain traits and errors
pub use streamforge_core::{ConstraintRef, ImpactType, PlanningId, PlanningSolution, Result, StreamForgeError};

// Configuration
pub use streamforge_config::{ConfigError, EnvironmentMode, ScoreDirectorConfig, ScoringConfig};

// Constraint stream API
pub use streamforge_scoring::stream;

// Engine and score directors
pub use streamforge_scoring::{
    api, director, ConstraintGraph, ConstraintSession, ConstraintWeightOverrides, CorruptionReport, Fact,
    FactRef, ScoreDirector, ScoreDirectorFactory, SessionScoreDirector, SessionSolution, Value,
};

// Analysis
pub use streamforge_scoring::{ConstraintMatch, ConstraintMatchTotal, Indictment, IndictmentMap, ScoreExplanation};

pub mod prelude {
    pub use super::{
        BendableScore, HardMediumSoftScore, HardSoftDecimalScore, HardSoftLongScore, HardSoftScore,
        ParseableScore, Score, SimpleScore,
    };
    pub use super::stream::{collector, joiner, Constraint, ConstraintFactory, ConstraintProvider};
    pub use super::{
        ConstraintSession, FactRef, PlanningId, PlanningSolution, ScoreDirector, ScoreDirectorFactory,
        ScoringConfig, SessionSolution,
    };
}
