//! Score accumulation for the sinks of one session.
//!
//! Each constraint gets a weighted impacter when the session starts: its
//! weight, negated for penalties, or a no-op when the weight is zero. A
//! sink asks the inliner to impact the score once per tuple and keeps the
//! returned [`ImpactRecord`] to undo exactly that impact on retraction.

mod tracker;

#[cfg(test)]
mod tests;

use tracing::debug;

use streamforge_core::score::ScoreNumber;
use streamforge_core::Score;

use crate::api::weight_overrides::WeightProvider;
use crate::fact::FactRef;
use crate::graph::ConstraintGraph;

pub(crate) use tracker::MatchTracker;

enum WeightedImpacter<Sc: Score> {
    NoOp,
    Weighted(Sc),
}

/// What one tuple added to the score.
#[derive(Debug)]
pub(crate) struct ImpactRecord<Sc: Score> {
    constraint: usize,
    delta: Sc,
    match_id: Option<u64>,
}

pub(crate) struct ScoreInliner<Sc: Score> {
    score: Sc,
    impacters: Vec<WeightedImpacter<Sc>>,
    tracker: Option<MatchTracker<Sc>>,
}

impl<Sc: Score> ScoreInliner<Sc> {
    pub(crate) fn new(graph: &ConstraintGraph<Sc>, weights: &dyn WeightProvider<Sc>, track_matches: bool) -> Self {
        let mut impacters = Vec::with_capacity(graph.constraint_count());
        let mut signed_weights = Vec::with_capacity(graph.constraint_count());
        for def in graph.constraints() {
            let weight = def.resolve_weight(weights);
            if weight == Sc::zero() {
                debug!(constraint = %def.constraint_ref(), "Disabled constraint with zero weight");
                impacters.push(WeightedImpacter::NoOp);
                signed_weights.push(None);
                continue;
            }
            let signed = def.impact_type().apply(weight);
            impacters.push(WeightedImpacter::Weighted(signed));
            signed_weights.push(Some(signed));
        }
        let tracker = track_matches.then(|| {
            MatchTracker::new(
                graph
                    .constraints()
                    .iter()
                    .zip(signed_weights)
                    .map(|(def, weight)| weight.map(|w| (def.constraint_ref().clone(), w))),
            )
        });
        Self {
            score: Sc::zero(),
            impacters,
            tracker,
        }
    }

    /// Returns false for constraints whose weight is zero.
    pub(crate) fn is_enabled(&self, constraint: usize) -> bool {
        matches!(self.impacters.get(constraint), Some(WeightedImpacter::Weighted(_)))
    }

    pub(crate) fn impact(&mut self, constraint: usize, match_weight: Sc::Level, facts: &[FactRef]) -> ImpactRecord<Sc> {
        let delta = match self.impacters.get(constraint) {
            Some(WeightedImpacter::Weighted(weight)) if match_weight == <Sc::Level as ScoreNumber>::ONE => *weight,
            Some(WeightedImpacter::Weighted(weight)) => weight.multiply(match_weight),
            Some(WeightedImpacter::NoOp) | None => {
                return ImpactRecord {
                    constraint,
                    delta: Sc::zero(),
                    match_id: None,
                }
            }
        };
        self.score = self.score + delta;
        let match_id = self
            .tracker
            .as_mut()
            .map(|tracker| tracker.add(constraint, facts, delta));
        ImpactRecord {
            constraint,
            delta,
            match_id,
        }
    }

    pub(crate) fn undo(&mut self, record: ImpactRecord<Sc>) {
        self.score = self.score - record.delta;
        if let (Some(tracker), Some(id)) = (&mut self.tracker, record.match_id) {
            tracker.remove(record.constraint, id);
        }
    }

    /// The sum of every live impact, with a zero init score.
    pub(crate) fn score(&self) -> Sc {
        self.score
    }

    pub(crate) fn tracker(&self) -> Option<&MatchTracker<Sc>> {
        self.tracker.as_ref()
    }
}
