//! Score director implementations.
//!
//! The score director manages the working solution and keeps a
//! [`ConstraintSession`](crate::ConstraintSession) in sync with it.
//!
//! - [`SessionScoreDirector`] - incremental scoring over a session
//! - [`ScoreDirectorFactory`] - builds directors that share one constraint graph
//! - [`CorruptionReport`] - difference between an incremental and a fresh score

mod corruption;
mod factory;
mod session;
mod traits;

#[cfg(test)]
mod tests;

pub use corruption::{CorruptionReport, MatchDiff};
pub use factory::ScoreDirectorFactory;
pub use session::SessionScoreDirector;
pub use traits::{ScoreDirector, SessionSolution};
