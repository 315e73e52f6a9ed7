//! Score analysis and constraint weight configuration.

pub mod analysis;
pub mod weight_overrides;


pub use analysis::{
    ConstraintAnalysis, ConstraintMatch, ConstraintMatchTotal, Indictment, IndictmentMap, ScoreExplanation,
};
pub use weight_overrides::{ConstraintWeightOverrides, WeightProvider};
