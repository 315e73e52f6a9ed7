//! Traits implemented by the user's planning model.

use std::fmt::Debug;
use std::hash::Hash;

use crate::score::Score;

/// The working state scored by a score director.
///
/// Holds the problem facts, the planning entities and the last calculated
/// score. Score directors clone and score independent copies, one per
/// worker thread, hence the `Send + Sync` bound.
///
/// ```
/// use streamforge_core::{PlanningSolution, SimpleScore};
///
/// #[derive(Clone)]
/// struct Timetable {
///     lesson_rooms: Vec<Option<u32>>,
///     score: Option<SimpleScore>,
/// }
///
/// impl PlanningSolution for Timetable {
///     type Score = SimpleScore;
///
///     fn score(&self) -> Option<SimpleScore> {
///         self.score
///     }
///
///     fn set_score(&mut self, score: Option<SimpleScore>) {
///         self.score = score;
///     }
/// }
///
/// let mut timetable = Timetable { lesson_rooms: vec![None], score: None };
/// timetable.set_score(Some(SimpleScore::of(-1)));
/// assert_eq!(timetable.score(), Some(SimpleScore::of(-1)));
/// ```
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    type Score: Score;

    /// The last score stored by a score director, `None` before the first calculation.
    fn score(&self) -> Option<Self::Score>;

    fn set_score(&mut self, score: Option<Self::Score>);
}

/// Stable identity of an entity or problem fact.
///
/// A session keys its live facts by concrete type and planning id: an
/// update replaces the fact with the same id, a retract removes it. The id
/// of a fact must not change while it is inside a session.
///
/// ```
/// use streamforge_core::PlanningId;
///
/// #[derive(Debug)]
/// struct Room {
///     code: &'static str,
///     capacity: u32,
/// }
///
/// impl PlanningId for Room {
///     type Id = &'static str;
///
///     fn planning_id(&self) -> &'static str {
///         self.code
///     }
/// }
///
/// let room = Room { code: "B-12", capacity: 30 };
/// assert_eq!(room.planning_id(), "B-12");
/// ```
///
/// Unique pairs (`for_each_unique_pair`) order their two facts by this id.
pub trait PlanningId {
    type Id: Eq + Hash + Ord + Clone + Debug + Send + Sync + 'static;

    fn planning_id(&self) -> Self::Id;
}
