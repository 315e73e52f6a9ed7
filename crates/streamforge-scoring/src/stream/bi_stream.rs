//! Streams over pairs, produced by joins and `group_by`.
//!
//! # Example
//!
//! ```
//! use streamforge_core::{PlanningId, score::HardSoftScore};
//! use streamforge_scoring::stream::joiner::{equal_bi, less_than};
//! use streamforge_scoring::{ConstraintFactory, ConstraintGraph, ConstraintSession, ConstraintWeightOverrides};
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct Shift { id: u32, employee: u32, day: u32 }
//!
//! #[derive(Debug)]
//! struct Leave { id: u32, employee: u32, day: u32 }
//!
//! impl PlanningId for Shift {
//!     type Id = u32;
//!     fn planning_id(&self) -> u32 { self.id }
//! }
//!
//! impl PlanningId for Leave {
//!     type Id = u32;
//!     fn planning_id(&self) -> u32 { self.id }
//! }
//!
//! // A shift on the day of a leave of the same employee
//! let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<HardSoftScore>| {
//!     vec![
//!         factory.for_each::<Shift>()
//!             .join(equal_bi(|s: &Shift| (s.employee, s.day), |l: &Leave| (l.employee, l.day)))
//!             .penalize(HardSoftScore::of_hard(1))
//!             .as_constraint("Shift during leave"),
//!     ]
//! }).unwrap();
//!
//! let mut session = ConstraintSession::new(Arc::new(graph), &ConstraintWeightOverrides::new(), false);
//! session.insert(Shift { id: 1, employee: 3, day: 10 }).unwrap();
//! session.insert(Shift { id: 2, employee: 3, day: 11 }).unwrap();
//! session.insert(Leave { id: 1, employee: 3, day: 11 }).unwrap();
//! assert_eq!(session.calculate_score(), HardSoftScore::of(-1, 0));
//! ```

impl_arity_stream!(BiConstraintStream, [A: 0, B: 1], last B: 1, prefix [A]);

impl_stream_join!(BiConstraintStream, [A, B], TriConstraintStream);
