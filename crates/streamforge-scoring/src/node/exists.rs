// Existence node: passes a left tuple on while at least one (if_exists) or
// no (if_not_exists) right tuple matches it.
//
// The counter of a left tuple covers every indexed right tuple its joiner
// accepts, including right tuples that are dying. The counter therefore
// always agrees with the contents of the right index, whatever order
// retractions arrive in.

use std::collections::HashMap;

use streamforge_core::{Result, Score, StreamForgeError};

use super::Ctx;
use crate::index::{IndexEntry, JoinIndex, Side};
use crate::stream::joiner::CompiledJoiner;
use crate::tuple::TupleId;

struct Counter {
    matches: usize,
    output: Option<TupleId>,
}

pub(crate) struct ExistsState {
    left: JoinIndex,
    right: JoinIndex,
    left_entries: HashMap<TupleId, IndexEntry>,
    right_entries: HashMap<TupleId, IndexEntry>,
    counters: HashMap<TupleId, Counter>,
}

impl ExistsState {
    pub(crate) fn new(joiner: &CompiledJoiner) -> Self {
        Self {
            left: JoinIndex::new(Side::Left, joiner.comparison()),
            right: JoinIndex::new(Side::Right, joiner.comparison()),
            left_entries: HashMap::new(),
            right_entries: HashMap::new(),
            counters: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub(crate) fn insert<Sc: Score>(
        &mut self,
        joiner: &CompiledJoiner,
        should_exist: bool,
        side: Side,
        tuple: TupleId,
        ctx: &mut Ctx<'_, Sc>,
    ) -> Result<()> {
        let facts = ctx.facts(tuple)?;
        let entry = joiner.entry(side, &facts)?;
        match side {
            Side::Left => {
                let mut candidates = Vec::new();
                self.right.find(&entry, &mut candidates);
                let mut matches = 0;
                for right in candidates {
                    if joiner.residual_matches(&facts, ctx.arena.facts(right)?)? {
                        matches += 1;
                    }
                }
                let output = if (matches > 0) == should_exist {
                    Some(ctx.emit(facts, &[tuple])?)
                } else {
                    None
                };
                self.left.put(&entry, tuple);
                self.left_entries.insert(tuple, entry);
                self.counters.insert(tuple, Counter { matches, output });
            }
            Side::Right => {
                self.right.put(&entry, tuple);
                self.right_entries.insert(tuple, entry.clone());
                for left in self.matching_lefts(joiner, &entry, tuple, ctx)? {
                    let counter = self.counter(left)?;
                    counter.matches += 1;
                    if counter.matches == 1 {
                        Self::transition(counter, left, true, should_exist, ctx)?;
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn retract<Sc: Score>(
        &mut self,
        joiner: &CompiledJoiner,
        should_exist: bool,
        side: Side,
        tuple: TupleId,
        ctx: &mut Ctx<'_, Sc>,
    ) -> Result<()> {
        match side {
            Side::Left => {
                let entry = self.left_entries.remove(&tuple).ok_or_else(|| never_inserted(tuple, side))?;
                self.left.remove(&entry, tuple);
                // the output is a child of the left tuple and is already gone
                self.counters.remove(&tuple);
            }
            Side::Right => {
                let entry = self.right_entries.remove(&tuple).ok_or_else(|| never_inserted(tuple, side))?;
                self.right.remove(&entry, tuple);
                for left in self.matching_lefts(joiner, &entry, tuple, ctx)? {
                    let counter = self.counter(left)?;
                    counter.matches = counter.matches.checked_sub(1).ok_or_else(|| {
                        StreamForgeError::internal(format!("match counter of {:?} went below zero", left))
                    })?;
                    if counter.matches == 0 {
                        Self::transition(counter, left, false, should_exist, ctx)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn matching_lefts<Sc: Score>(
        &self,
        joiner: &CompiledJoiner,
        entry: &IndexEntry,
        right: TupleId,
        ctx: &Ctx<'_, Sc>,
    ) -> Result<Vec<TupleId>> {
        let right_facts = ctx.arena.facts(right)?;
        let mut candidates = Vec::new();
        self.left.find(entry, &mut candidates);
        let mut matching = Vec::with_capacity(candidates.len());
        for left in candidates {
            if joiner.residual_matches(ctx.arena.facts(left)?, right_facts)? {
                matching.push(left);
            }
        }
        Ok(matching)
    }

    fn counter(&mut self, left: TupleId) -> Result<&mut Counter> {
        self.counters
            .get_mut(&left)
            .ok_or_else(|| StreamForgeError::internal(format!("{:?} has no match counter", left)))
    }

    fn transition<Sc: Score>(
        counter: &mut Counter,
        left: TupleId,
        exists: bool,
        should_exist: bool,
        ctx: &mut Ctx<'_, Sc>,
    ) -> Result<()> {
        if exists == should_exist {
            if counter.output.is_none() && ctx.is_active(left) {
                let facts = ctx.facts(left)?;
                counter.output = Some(ctx.emit(facts, &[left])?);
            }
        } else if let Some(output) = counter.output.take() {
            ctx.kill(output);
        }
        Ok(())
    }
}

fn never_inserted(tuple: TupleId, side: Side) -> StreamForgeError {
    StreamForgeError::internal(format!(
        "{:?} was never inserted on the {:?} side of an existence check",
        tuple, side
    ))
}
