//! Incremental constraint scoring for StreamForge.
//!
//! Constraints are declared as streams over planning facts and compiled
//! into a shared node network:
//! - Constraint streams with joiners and collectors (`ConstraintFactory`)
//! - A deduplicated node topology (`ConstraintGraph`)
//! - Sessions that propagate fact changes incrementally (`ConstraintSession`)
//! - Score directors with corruption detection (`SessionScoreDirector`)
//!
//! # Architecture
//!
//! Every change runs to completion before the call returns: a fact insert,
//! update or retract flows through the filter, join, exists, group and map
//! nodes and ends in the score sinks, which keep the score up to date. Reading
//! the score never walks the network.
//!
//! ```
//! use std::sync::Arc;
//!
//! use streamforge_core::{PlanningId, SimpleScore};
//! use streamforge_scoring::stream::{Constraint, ConstraintFactory};
//! use streamforge_scoring::{ConstraintGraph, ConstraintSession, ConstraintWeightOverrides};
//!
//! #[derive(Debug, Clone)]
//! struct Lesson {
//!     id: u32,
//!     room: Option<u32>,
//! }
//!
//! impl PlanningId for Lesson {
//!     type Id = u32;
//!
//!     fn planning_id(&self) -> u32 {
//!         self.id
//!     }
//! }
//!
//! fn constraints(factory: &ConstraintFactory<SimpleScore>) -> Vec<Constraint> {
//!     vec![factory
//!         .for_each::<Lesson>()
//!         .filter(|lesson: &Lesson| lesson.room.is_none())
//!         .penalize(SimpleScore::ONE)
//!         .as_constraint("Lesson without room")]
//! }
//!
//! let graph = Arc::new(ConstraintGraph::build(&constraints).unwrap());
//! let mut session = ConstraintSession::new(graph, &ConstraintWeightOverrides::new(), false);
//! session.insert(Lesson { id: 1, room: None }).unwrap();
//! session.insert(Lesson { id: 2, room: Some(7) }).unwrap();
//! assert_eq!(session.calculate_score(), SimpleScore::of(-1));
//!
//! session.update(Lesson { id: 1, room: Some(3) }).unwrap();
//! assert_eq!(session.calculate_score(), SimpleScore::of(0));
//! ```

// Erased node closures have long signatures
#![allow(clippy::type_complexity)]

// Core modules
pub mod api;
pub mod director;
pub mod stream;

mod fact;
mod graph;
mod index;
mod inliner;
mod node;
mod session;
mod tuple;

// ============================================================================
// Facts and tuples
// ============================================================================

pub use fact::{Fact, FactRef, Value};
pub use index::{HashKey, OrdKey};
pub use tuple::{TupleId, TupleState, MAX_ARITY};

// ============================================================================
// Constraint network
// ============================================================================

pub use graph::{ConstraintDef, ConstraintGraph, NodeId};
pub use session::ConstraintSession;

// ============================================================================
// Constraint weights
// ============================================================================

pub use api::weight_overrides::{ConstraintWeightOverrides, WeightProvider};

// ============================================================================
// Score Directors
// ============================================================================

pub use director::{
    CorruptionReport, MatchDiff, ScoreDirector, ScoreDirectorFactory, SessionScoreDirector, SessionSolution,
};

// ============================================================================
// Analysis (for score explanation)
// ============================================================================

pub use api::analysis::{
    ConstraintAnalysis, ConstraintMatch, ConstraintMatchTotal, Indictment, IndictmentMap, ScoreExplanation,
};

// ============================================================================
// Fluent Constraint Stream API
// ============================================================================

pub use stream::{
    BiConstraintStream, Constraint, ConstraintBuilder, ConstraintFactory, ConstraintProvider,
    PentaConstraintStream, QuadConstraintStream, TriConstraintStream, UniConstraintStream,
};
