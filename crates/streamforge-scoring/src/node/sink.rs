// Score sink: impacts the score once per tuple that reaches a constraint.

use std::collections::HashMap;

use streamforge_core::score::ScoreNumber;
use streamforge_core::{Result, Score, StreamForgeError};

use super::Ctx;
use crate::inliner::ImpactRecord;
use crate::stream::function::TupleFn;
use crate::tuple::TupleId;

pub(crate) struct SinkState<Sc: Score> {
    impacts: HashMap<TupleId, ImpactRecord<Sc>>,
}

impl<Sc: Score> Default for SinkState<Sc> {
    fn default() -> Self {
        Self {
            impacts: HashMap::new(),
        }
    }
}

impl<Sc: Score> SinkState<Sc> {
    pub(crate) fn len(&self) -> usize {
        self.impacts.len()
    }

    pub(crate) fn insert(
        &mut self,
        constraint: usize,
        weigher: Option<&TupleFn<Sc::Level>>,
        tuple: TupleId,
        ctx: &mut Ctx<'_, Sc>,
    ) -> Result<()> {
        if !ctx.inliner.is_enabled(constraint) {
            return Ok(());
        }
        let facts = ctx.arena.facts(tuple)?;
        let match_weight = match weigher {
            Some(weigher) => weigher(facts)?,
            None => <Sc::Level as ScoreNumber>::ONE,
        };
        let record = ctx.inliner.impact(constraint, match_weight, facts);
        if let Some(previous) = self.impacts.insert(tuple, record) {
            ctx.inliner.undo(previous);
            return Err(StreamForgeError::internal(format!(
                "{:?} reached the sink of constraint #{} twice",
                tuple, constraint
            )));
        }
        Ok(())
    }

    pub(crate) fn retract(&mut self, tuple: TupleId, ctx: &mut Ctx<'_, Sc>) {
        if let Some(record) = self.impacts.remove(&tuple) {
            ctx.inliner.undo(record);
        }
    }
}
