//! Domain model traits for defining planning problems
//!
//! These traits define the structure of a planning problem:
//! - `PlanningSolution`: The container for the complete problem and solution
//! - `PlanningId`: Stable identity for entities and problem facts

mod traits;

pub use traits::{PlanningId, PlanningSolution};
