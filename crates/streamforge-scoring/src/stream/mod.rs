//! Fluent constraint stream API.
//!
//! Constraints are declared inside a [`ConstraintProvider`] as chains of
//! stream operations starting at [`ConstraintFactory::for_each`]. Every
//! operation resolves to a node of the shared [`ConstraintGraph`]: chains
//! that start with structurally equal operations end in the same nodes.
//!
//! ```text
//! factory.for_each::<A>()        -> UniConstraintStream<Sc, A>
//!     .filter(predicate)         -> UniConstraintStream<Sc, A>
//!     .join::<B>(joiner)         -> BiConstraintStream<Sc, A, B>
//!     .penalize(weight)          -> ConstraintBuilder<Sc>
//!     .as_constraint(name)       -> Constraint
//! ```
//!
//! Filter predicates, mappings and joiner functions that capture nothing are
//! identified by their closure type, so the same closure expression reached
//! twice (for example from a helper function) is shared. Capturing closures
//! always get a node of their own.
//!
//! [`ConstraintGraph`]: crate::ConstraintGraph

#[macro_use]
pub(crate) mod function;
#[macro_use]
mod arity_stream_macros;

pub mod collector;
pub mod joiner;

mod bi_stream;
mod constraint_builder;
mod factory;
mod penta_stream;
mod quad_stream;
mod tri_stream;
mod uni_stream;


use streamforge_core::Score;

pub use bi_stream::BiConstraintStream;
pub use constraint_builder::{Constraint, ConstraintBuilder};
pub use factory::ConstraintFactory;
pub use penta_stream::PentaConstraintStream;
pub use quad_stream::QuadConstraintStream;
pub use tri_stream::TriConstraintStream;
pub use uni_stream::UniConstraintStream;

/// Defines the constraints of a planning problem.
///
/// Implemented for any `Fn(&ConstraintFactory<Sc>) -> Vec<Constraint>`.
pub trait ConstraintProvider<Sc: Score> {
    fn define_constraints(&self, factory: &ConstraintFactory<Sc>) -> Vec<Constraint>;
}

impl<Sc, F> ConstraintProvider<Sc> for F
where
    Sc: Score,
    F: Fn(&ConstraintFactory<Sc>) -> Vec<Constraint>,
{
    fn define_constraints(&self, factory: &ConstraintFactory<Sc>) -> Vec<Constraint> {
        self(factory)
    }
}
