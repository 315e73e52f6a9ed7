//! Streams over single facts.
//!
//! # Example
//!
//! ```
//! use streamforge_core::{PlanningId, score::SimpleScore};
//! use streamforge_scoring::stream::collector::count;
//! use streamforge_scoring::{ConstraintFactory, ConstraintGraph, ConstraintSession, ConstraintWeightOverrides};
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct Shift { id: u32, employee: Option<u32> }
//!
//! impl PlanningId for Shift {
//!     type Id = u32;
//!     fn planning_id(&self) -> u32 { self.id }
//! }
//!
//! // Penalize every shift beyond the second per employee
//! let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
//!     vec![
//!         factory.for_each::<Shift>()
//!             .filter(|s: &Shift| s.employee.is_some())
//!             .group_by(|s: &Shift| s.employee, count())
//!             .filter(|_: &Option<u32>, shifts: &usize| *shifts > 2)
//!             .penalize_with(SimpleScore::of(1), |_: &Option<u32>, shifts: &usize| *shifts as i32 - 2)
//!             .as_constraint("Too many shifts"),
//!     ]
//! }).unwrap();
//!
//! let mut session = ConstraintSession::new(Arc::new(graph), &ConstraintWeightOverrides::new(), false);
//! for id in 0..4 {
//!     session.insert(Shift { id, employee: Some(7) }).unwrap();
//! }
//! assert_eq!(session.calculate_score(), SimpleScore::of(-2));
//! ```

impl_arity_stream!(UniConstraintStream, [A: 0], last A: 0, prefix []);

impl_stream_join!(UniConstraintStream, [A], BiConstraintStream);
