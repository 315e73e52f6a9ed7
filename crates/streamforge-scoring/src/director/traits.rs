// Score director and session solution traits.

use streamforge_core::{PlanningSolution, Result};

use crate::api::analysis::{ConstraintMatchTotal, IndictmentMap, ScoreExplanation};
use crate::fact::FactRef;
use crate::session::ConstraintSession;

// A solution that can feed its entities and problem facts into a session.
//
// Entities are addressed like in the director: a descriptor index picks
// the entity collection, an entity index the entity within it.
pub trait SessionSolution: PlanningSolution {
    // Inserts every entity and problem fact into the session, once.
    fn insert_into(&self, session: &mut ConstraintSession<Self::Score>) -> Result<()>;

    // Returns the number of entities of a collection, `None` past the last one.
    fn entity_count(&self, descriptor_index: usize) -> Option<usize>;

    // Returns the current state of an entity as a fact.
    fn entity_fact(&self, descriptor_index: usize, entity_index: usize) -> Option<FactRef>;

    // Returns how many planning variables of an entity are unassigned.
    fn entity_uninitialized_count(&self, _descriptor_index: usize, _entity_index: usize) -> usize {
        0
    }

    // Returns the number of unassigned planning variables in the solution.
    fn uninitialized_variable_count(&self) -> usize {
        let mut total = 0;
        let mut descriptor_index = 0;
        while let Some(count) = self.entity_count(descriptor_index) {
            total += (0..count)
                .map(|entity_index| self.entity_uninitialized_count(descriptor_index, entity_index))
                .sum::<usize>();
            descriptor_index += 1;
        }
        total
    }
}

// The score director manages the working solution and its score.
//
// Every change to the working solution must be bracketed by the matching
// notifications, so the director can keep its session in sync:
// - `before_variable_changed` / `after_variable_changed` around a planning
//   variable change
// - `after_entity_added` / `before_entity_removed` for entities
// - `after_problem_fact_added` / `_changed` / `_removed` for problem facts
//
// Every method except `set_working_solution` fails with an invalid state
// error while no working solution is set.
pub trait ScoreDirector<S: PlanningSolution> {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> Result<&S>;

    // Returns a mutable reference to the working solution.
    //
    // Changes made through it must be announced with the notifications.
    fn working_solution_mut(&mut self) -> Result<&mut S>;

    // Replaces the working solution and rebuilds the score state from scratch.
    fn set_working_solution(&mut self, solution: S) -> Result<()>;

    // Calculates the current score and stores it in the working solution.
    fn calculate_score(&mut self) -> Result<S::Score>;

    // Called before a planning variable is changed.
    fn before_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) -> Result<()>;

    // Called after a planning variable is changed.
    fn after_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    ) -> Result<()>;

    // Simplified notification for entity change.
    fn before_entity_changed(&mut self, entity_index: usize) -> Result<()> {
        self.before_variable_changed(0, entity_index, "")
    }

    // Simplified notification for entity change.
    fn after_entity_changed(&mut self, entity_index: usize) -> Result<()> {
        self.after_variable_changed(0, entity_index, "")
    }

    // Called after an entity was added to the working solution.
    fn after_entity_added(&mut self, descriptor_index: usize, entity_index: usize) -> Result<()>;

    // Called before an entity is removed from the working solution.
    fn before_entity_removed(&mut self, descriptor_index: usize, entity_index: usize) -> Result<()>;

    fn after_problem_fact_added(&mut self, fact: FactRef) -> Result<()>;

    fn after_problem_fact_changed(&mut self, fact: FactRef) -> Result<()>;

    fn after_problem_fact_removed(&mut self, fact: &FactRef) -> Result<()>;

    // Returns the number of entities for a given descriptor index.
    fn entity_count(&self, descriptor_index: usize) -> Option<usize>;

    // Returns the match totals; needs constraint match tracking.
    fn constraint_match_totals(&self) -> Result<Vec<ConstraintMatchTotal<S::Score>>>;

    // Returns the indictments; needs constraint match tracking.
    fn indictment_map(&self) -> Result<IndictmentMap<S::Score>>;

    // Explains the current score; needs constraint match tracking.
    fn explain_score(&mut self) -> Result<ScoreExplanation<S::Score>>;

    // Returns true if scores are maintained incrementally.
    fn is_incremental(&self) -> bool {
        true
    }
}
