// Join node: pairs every left tuple with the right tuples its joiner accepts.

use std::collections::HashMap;

use streamforge_core::{Result, Score, StreamForgeError};

use super::Ctx;
use crate::index::{IndexEntry, JoinIndex, Side};
use crate::stream::joiner::CompiledJoiner;
use crate::tuple::{Facts, TupleId};

pub(crate) struct JoinState {
    left: JoinIndex,
    right: JoinIndex,
    left_entries: HashMap<TupleId, IndexEntry>,
    right_entries: HashMap<TupleId, IndexEntry>,
}

impl JoinState {
    pub(crate) fn new(joiner: &CompiledJoiner) -> Self {
        Self {
            left: JoinIndex::new(Side::Left, joiner.comparison()),
            right: JoinIndex::new(Side::Right, joiner.comparison()),
            left_entries: HashMap::new(),
            right_entries: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub(crate) fn insert<Sc: Score>(
        &mut self,
        joiner: &CompiledJoiner,
        side: Side,
        tuple: TupleId,
        ctx: &mut Ctx<'_, Sc>,
    ) -> Result<()> {
        let facts = ctx.facts(tuple)?;
        let entry = joiner.entry(side, &facts)?;

        let mut partners = Vec::new();
        match side {
            Side::Left => self.right.find(&entry, &mut partners),
            Side::Right => self.left.find(&entry, &mut partners),
        }
        for partner in partners {
            // dying partners are on their way out and must not gain children
            if !ctx.is_active(partner) {
                continue;
            }
            let partner_facts = ctx.facts(partner)?;
            let (left, right, left_facts, right_facts) = match side {
                Side::Left => (tuple, partner, &facts, &partner_facts),
                Side::Right => (partner, tuple, &partner_facts, &facts),
            };
            if joiner.residual_matches(left_facts, right_facts)? {
                let joined: Facts = left_facts.iter().chain(right_facts.iter()).cloned().collect();
                ctx.emit(joined, &[left, right])?;
            }
        }

        let (index, entries) = match side {
            Side::Left => (&mut self.left, &mut self.left_entries),
            Side::Right => (&mut self.right, &mut self.right_entries),
        };
        index.put(&entry, tuple);
        entries.insert(tuple, entry);
        Ok(())
    }

    pub(crate) fn retract(&mut self, side: Side, tuple: TupleId) -> Result<()> {
        let (index, entries) = match side {
            Side::Left => (&mut self.left, &mut self.left_entries),
            Side::Right => (&mut self.right, &mut self.right_entries),
        };
        let entry = entries.remove(&tuple).ok_or_else(|| {
            StreamForgeError::internal(format!("{:?} was never inserted on the {:?} side of a join", tuple, side))
        })?;
        index.remove(&entry, tuple);
        Ok(())
    }
}
