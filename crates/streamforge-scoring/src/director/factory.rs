//! Score director factory for creating score directors.

use std::sync::Arc;

use tracing::debug;

use streamforge_config::ScoringConfig;
use streamforge_core::{ParseableScore, Result};

use super::session::SessionScoreDirector;
use super::traits::{ScoreDirector, SessionSolution};
use crate::api::weight_overrides::ConstraintWeightOverrides;
use crate::graph::ConstraintGraph;
use crate::stream::ConstraintProvider;

// Factory for creating score directors.
//
// The constraint graph is built once and shared by every director the
// factory creates.
pub struct ScoreDirectorFactory<S: SessionSolution> {
    graph: Arc<ConstraintGraph<S::Score>>,
    weights: Arc<ConstraintWeightOverrides<S::Score>>,
    track_matches: bool,
    assertion_interval: Option<u64>,
}

impl<S: SessionSolution> ScoreDirectorFactory<S> {
    // Creates a factory with default weights and no match tracking.
    pub fn new<P>(provider: &P) -> Result<Self>
    where
        P: ConstraintProvider<S::Score> + ?Sized,
    {
        Ok(Self {
            graph: Arc::new(ConstraintGraph::build(provider)?),
            weights: Arc::new(ConstraintWeightOverrides::new()),
            track_matches: false,
            assertion_interval: None,
        })
    }

    // Replaces the constraint weights used by new directors.
    pub fn with_weights(mut self, weights: ConstraintWeightOverrides<S::Score>) -> Self {
        self.weights = Arc::new(weights);
        self
    }

    pub fn with_constraint_match_enabled(mut self, enabled: bool) -> Self {
        self.track_matches = enabled;
        self
    }

    pub fn with_assertion_interval(mut self, interval: Option<u64>) -> Self {
        self.assertion_interval = interval;
        self
    }

    // Creates a new score director with the given working solution.
    pub fn build_score_director(&self, solution: S) -> Result<SessionScoreDirector<S>> {
        let mut director = SessionScoreDirector::new(
            Arc::clone(&self.graph),
            Arc::clone(&self.weights),
            self.track_matches,
            self.assertion_interval,
        );
        director.set_working_solution(solution)?;
        Ok(director)
    }

    // Returns the shared constraint graph.
    pub fn graph(&self) -> &Arc<ConstraintGraph<S::Score>> {
        &self.graph
    }

    pub fn weights(&self) -> &ConstraintWeightOverrides<S::Score> {
        &self.weights
    }
}

impl<S> ScoreDirectorFactory<S>
where
    S: SessionSolution,
    S::Score: ParseableScore,
{
    // Creates a factory from the scoring configuration.
    //
    // Weights come from `score_director.constraint_weights`; asserted
    // environment modes turn on match tracking and the corruption check.
    pub fn from_config<P>(provider: &P, config: &ScoringConfig) -> Result<Self>
    where
        P: ConstraintProvider<S::Score> + ?Sized,
    {
        let weights = ConstraintWeightOverrides::parse(config.score_director.constraint_weights.iter())?;
        let assertion_interval = config
            .score_director
            .effective_assertion_interval(config.environment_mode);
        debug!(
            environment_mode = ?config.environment_mode,
            weight_overrides = weights.len(),
            ?assertion_interval,
            "Configured score director factory"
        );
        Ok(Self::new(provider)?
            .with_weights(weights)
            .with_constraint_match_enabled(config.constraint_match_required())
            .with_assertion_interval(assertion_interval))
    }
}

impl<S: SessionSolution> Clone for ScoreDirectorFactory<S> {
    fn clone(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
            weights: Arc::clone(&self.weights),
            track_matches: self.track_matches,
            assertion_interval: self.assertion_interval,
        }
    }
}

impl<S: SessionSolution> std::fmt::Debug for ScoreDirectorFactory<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreDirectorFactory")
            .field("graph", &self.graph)
            .field("weights", &self.weights)
            .field("track_matches", &self.track_matches)
            .field("assertion_interval", &self.assertion_interval)
            .finish()
    }
}
