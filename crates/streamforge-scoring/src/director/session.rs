//! Incremental score director over a constraint session.

use std::sync::Arc;

use tracing::{debug, error};

use streamforge_core::{Result, Score, StreamForgeError};

use super::corruption::CorruptionReport;
use super::traits::{ScoreDirector, SessionSolution};
use crate::api::analysis::{ConstraintMatchTotal, IndictmentMap, ScoreExplanation};
use crate::api::weight_overrides::ConstraintWeightOverrides;
use crate::fact::FactRef;
use crate::graph::ConstraintGraph;
use crate::session::ConstraintSession;

struct Working<S: SessionSolution> {
    solution: S,
    session: ConstraintSession<S::Score>,
    uninitialized: usize,
    calculation_count: u64,
}

/// Score director keeping a [`ConstraintSession`] in sync with the working
/// solution.
///
/// The init score of every calculated score is minus the number of
/// unassigned planning variables. In asserted environment modes every
/// `assertion_interval`-th calculation is checked against a session
/// rebuilt from scratch; a difference fails the calculation with
/// [`StreamForgeError::ScoreCorruption`].
pub struct SessionScoreDirector<S: SessionSolution> {
    graph: Arc<ConstraintGraph<S::Score>>,
    weights: Arc<ConstraintWeightOverrides<S::Score>>,
    track_matches: bool,
    assertion_interval: Option<u64>,
    working: Option<Working<S>>,
}

impl<S: SessionSolution> SessionScoreDirector<S> {
    /// Creates a director without working solution.
    ///
    /// `assertion_interval` enables the corruption check; matches are
    /// tracked whenever it is set.
    pub fn new(
        graph: Arc<ConstraintGraph<S::Score>>,
        weights: Arc<ConstraintWeightOverrides<S::Score>>,
        track_matches: bool,
        assertion_interval: Option<u64>,
    ) -> Self {
        Self {
            graph,
            weights,
            track_matches: track_matches || assertion_interval.is_some(),
            assertion_interval: assertion_interval.map(|n| n.max(1)),
            working: None,
        }
    }

    pub fn graph(&self) -> &Arc<ConstraintGraph<S::Score>> {
        &self.graph
    }

    /// Returns the live session, if a working solution is set.
    pub fn session(&self) -> Option<&ConstraintSession<S::Score>> {
        self.working.as_ref().map(|working| &working.session)
    }

    /// Returns true if the director checks for score corruption.
    pub fn is_asserted(&self) -> bool {
        self.assertion_interval.is_some()
    }

    /// Replaces the constraint weights and rebuilds the session.
    pub fn after_constraint_configuration_changed(
        &mut self,
        weights: ConstraintWeightOverrides<S::Score>,
    ) -> Result<()> {
        self.weights = Arc::new(weights);
        if let Some(working) = self.working.take() {
            self.set_working_solution(working.solution)?;
        }
        Ok(())
    }

    fn fresh_session(&self, solution: &S, track_matches: bool) -> Result<ConstraintSession<S::Score>> {
        let mut session = ConstraintSession::new(Arc::clone(&self.graph), &self.weights, track_matches);
        solution.insert_into(&mut session)?;
        Ok(session)
    }

    fn working(&self) -> Result<&Working<S>> {
        self.working.as_ref().ok_or_else(not_set)
    }

    fn working_mut(&mut self) -> Result<&mut Working<S>> {
        self.working.as_mut().ok_or_else(not_set)
    }

    fn entity_fact(working: &Working<S>, descriptor_index: usize, entity_index: usize) -> Result<FactRef> {
        working
            .solution
            .entity_fact(descriptor_index, entity_index)
            .ok_or_else(|| {
                StreamForgeError::invalid_state(format!(
                    "there is no entity {} in collection {}",
                    entity_index, descriptor_index
                ))
            })
    }

    fn assert_not_corrupted(&self, working_score: S::Score) -> Result<()> {
        let working = self.working()?;
        let fresh = self.fresh_session(&working.solution, true)?;
        let fresh_init = -(working.solution.uninitialized_variable_count() as i32);
        let fresh_score = fresh.calculate_score().with_init_score(fresh_init);
        if fresh_score == working_score {
            return Ok(());
        }
        let report = CorruptionReport::compare(
            working_score,
            &working.session.constraint_match_totals()?,
            fresh_score,
            &fresh.constraint_match_totals()?,
        );
        error!(
            working_score = %working_score,
            fresh_score = %fresh_score,
            excess = report.excess.len(),
            missing = report.missing.len(),
            "Score corruption"
        );
        Err(StreamForgeError::ScoreCorruption(report.to_string()))
    }
}

fn not_set() -> StreamForgeError {
    StreamForgeError::invalid_state("the score director has no working solution, call set_working_solution first")
}

impl<S: SessionSolution> ScoreDirector<S> for SessionScoreDirector<S> {
    fn working_solution(&self) -> Result<&S> {
        Ok(&self.working()?.solution)
    }

    fn working_solution_mut(&mut self) -> Result<&mut S> {
        Ok(&mut self.working_mut()?.solution)
    }

    fn set_working_solution(&mut self, solution: S) -> Result<()> {
        let session = self.fresh_session(&solution, self.track_matches)?;
        let uninitialized = solution.uninitialized_variable_count();
        debug!(
            fact_count = session.fact_count(),
            tuple_count = session.tuple_count(),
            uninitialized,
            "Rebuilt session for working solution"
        );
        self.working = Some(Working {
            solution,
            session,
            uninitialized,
            calculation_count: 0,
        });
        Ok(())
    }

    fn calculate_score(&mut self) -> Result<S::Score> {
        let interval = self.assertion_interval;
        let working = self.working_mut()?;
        let score = working
            .session
            .calculate_score()
            .with_init_score(-(working.uninitialized as i32));
        working.calculation_count += 1;
        let check = interval.is_some_and(|n| working.calculation_count % n == 0);
        if check {
            self.assert_not_corrupted(score)?;
        }
        self.working_mut()?.solution.set_score(Some(score));
        Ok(score)
    }

    fn before_variable_changed(&mut self, descriptor_index: usize, entity_index: usize, _variable_name: &str) -> Result<()> {
        let working = self.working_mut()?;
        let count = working.solution.entity_uninitialized_count(descriptor_index, entity_index);
        working.uninitialized = working.uninitialized.saturating_sub(count);
        Ok(())
    }

    fn after_variable_changed(&mut self, descriptor_index: usize, entity_index: usize, _variable_name: &str) -> Result<()> {
        let working = self.working_mut()?;
        let fact = Self::entity_fact(working, descriptor_index, entity_index)?;
        working.uninitialized += working.solution.entity_uninitialized_count(descriptor_index, entity_index);
        working.session.update_fact(fact)
    }

    fn after_entity_added(&mut self, descriptor_index: usize, entity_index: usize) -> Result<()> {
        let working = self.working_mut()?;
        let fact = Self::entity_fact(working, descriptor_index, entity_index)?;
        working.uninitialized += working.solution.entity_uninitialized_count(descriptor_index, entity_index);
        working.session.insert_fact(fact)
    }

    fn before_entity_removed(&mut self, descriptor_index: usize, entity_index: usize) -> Result<()> {
        let working = self.working_mut()?;
        let fact = Self::entity_fact(working, descriptor_index, entity_index)?;
        let count = working.solution.entity_uninitialized_count(descriptor_index, entity_index);
        working.uninitialized = working.uninitialized.saturating_sub(count);
        working.session.retract_fact(&fact)
    }

    fn after_problem_fact_added(&mut self, fact: FactRef) -> Result<()> {
        self.working_mut()?.session.insert_fact(fact)
    }

    fn after_problem_fact_changed(&mut self, fact: FactRef) -> Result<()> {
        self.working_mut()?.session.update_fact(fact)
    }

    fn after_problem_fact_removed(&mut self, fact: &FactRef) -> Result<()> {
        self.working_mut()?.session.retract_fact(fact)
    }

    fn entity_count(&self, descriptor_index: usize) -> Option<usize> {
        self.working.as_ref()?.solution.entity_count(descriptor_index)
    }

    fn constraint_match_totals(&self) -> Result<Vec<ConstraintMatchTotal<S::Score>>> {
        self.working()?.session.constraint_match_totals()
    }

    fn indictment_map(&self) -> Result<IndictmentMap<S::Score>> {
        self.working()?.session.indictment_map()
    }

    fn explain_score(&mut self) -> Result<ScoreExplanation<S::Score>> {
        let score = self.calculate_score()?;
        let totals = self.constraint_match_totals()?;
        Ok(ScoreExplanation::from_totals(score, &totals))
    }
}

impl<S: SessionSolution> std::fmt::Debug for SessionScoreDirector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionScoreDirector")
            .field("track_matches", &self.track_matches)
            .field("assertion_interval", &self.assertion_interval)
            .field("session", &self.session())
            .finish()
    }
}
