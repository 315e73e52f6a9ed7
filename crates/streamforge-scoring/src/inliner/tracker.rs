// Constraint match bookkeeping, only present when match tracking is on.

use streamforge_core::{ConstraintRef, Score};

use crate::api::analysis::{ConstraintMatch, ConstraintMatchTotal, IndictmentMap, MatchId};
use crate::fact::FactRef;

pub(crate) struct MatchTracker<Sc: Score> {
    // one slot per constraint, None for disabled constraints
    totals: Vec<Option<ConstraintMatchTotal<Sc>>>,
    indictments: IndictmentMap<Sc>,
    next_id: MatchId,
}

impl<Sc: Score> MatchTracker<Sc> {
    pub(crate) fn new<I>(constraints: I) -> Self
    where
        I: IntoIterator<Item = Option<(ConstraintRef, Sc)>>,
    {
        Self {
            totals: constraints
                .into_iter()
                .map(|constraint| constraint.map(|(constraint_ref, weight)| ConstraintMatchTotal::new(constraint_ref, weight)))
                .collect(),
            indictments: IndictmentMap::new(),
            next_id: 0,
        }
    }

    pub(crate) fn add(&mut self, constraint: usize, facts: &[FactRef], score: Sc) -> MatchId {
        let id = self.next_id;
        self.next_id += 1;
        if let Some(Some(total)) = self.totals.get_mut(constraint) {
            let constraint_match = ConstraintMatch::new(total.constraint_ref().clone(), facts.to_vec(), score);
            self.indictments.add_match(id, &constraint_match);
            total.add_match(id, constraint_match);
        }
        id
    }

    pub(crate) fn remove(&mut self, constraint: usize, id: MatchId) {
        if let Some(Some(total)) = self.totals.get_mut(constraint) {
            if let Some(removed) = total.remove_match(id) {
                self.indictments.remove_match(id, &removed);
            }
        }
    }

    pub(crate) fn totals(&self) -> impl Iterator<Item = &ConstraintMatchTotal<Sc>> {
        self.totals.iter().flatten()
    }

    pub(crate) fn indictments(&self) -> &IndictmentMap<Sc> {
        &self.indictments
    }
}
