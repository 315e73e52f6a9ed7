// Group node: folds its input tuples into one output tuple per key.
//
// Outputs have no parent and hold the group's key facts followed by one
// result per collector. A group whose result changes retracts its old
// output and inserts a new one; a group that loses its last tuple
// retracts its output and disappears.

use std::collections::HashMap;

use indexmap::IndexMap;
use smallvec::SmallVec;

use streamforge_core::{Result, Score, StreamForgeError};

use super::Ctx;
use crate::fact::FactRef;
use crate::stream::collector::{Accumulator, AccumulatorSupplier};
use crate::stream::function::TupleFn;
use crate::tuple::{Facts, TupleId};

// The key facts of a group, empty when the node has no key.
type GroupKey = SmallVec<[FactRef; 2]>;

struct Group {
    accumulators: SmallVec<[Box<dyn Accumulator>; 2]>,
    size: usize,
    output: Option<(TupleId, Facts)>,
}

#[derive(Default)]
pub(crate) struct GroupState {
    groups: IndexMap<GroupKey, Group>,
    keys: HashMap<TupleId, GroupKey>,
}

impl GroupState {
    pub(crate) fn len(&self) -> usize {
        self.groups.len()
    }

    pub(crate) fn insert<Sc: Score>(
        &mut self,
        key_fns: &[TupleFn<FactRef>],
        collectors: &[AccumulatorSupplier],
        tuple: TupleId,
        ctx: &mut Ctx<'_, Sc>,
    ) -> Result<()> {
        let facts = ctx.arena.facts(tuple)?;
        let key = key_fns
            .iter()
            .map(|key_fn| key_fn(facts))
            .collect::<Result<GroupKey>>()?;
        let group = self.groups.entry(key.clone()).or_insert_with(|| Group {
            accumulators: collectors.iter().map(|supplier| supplier()).collect(),
            size: 0,
            output: None,
        });
        for accumulator in group.accumulators.iter_mut() {
            accumulator.insert(facts)?;
        }
        group.size += 1;
        self.keys.insert(tuple, key.clone());
        Self::refresh(group, &key, ctx)
    }

    pub(crate) fn retract<Sc: Score>(&mut self, tuple: TupleId, ctx: &mut Ctx<'_, Sc>) -> Result<()> {
        let key = self.keys.remove(&tuple).ok_or_else(|| {
            StreamForgeError::internal(format!("{:?} was never inserted into group node {}", tuple, ctx.node))
        })?;
        let group = self.groups.get_mut(&key).ok_or_else(|| {
            StreamForgeError::internal(format!("group {:?} of node {} is missing", key, ctx.node))
        })?;
        let facts = ctx.arena.facts(tuple)?;
        for accumulator in group.accumulators.iter_mut() {
            accumulator.retract(facts)?;
        }
        group.size -= 1;
        if group.size > 0 {
            return Self::refresh(group, &key, ctx);
        }
        if let Some(group) = self.groups.shift_remove(&key) {
            if let Some((output, _)) = group.output {
                ctx.kill(output);
            }
        }
        Ok(())
    }

    fn refresh<Sc: Score>(group: &mut Group, key: &GroupKey, ctx: &mut Ctx<'_, Sc>) -> Result<()> {
        let facts: Facts = key
            .iter()
            .cloned()
            .chain(group.accumulators.iter().map(|accumulator| accumulator.result()))
            .collect();
        if let Some((output, current)) = group.output.take() {
            if current == facts && ctx.arena.contains(output) {
                group.output = Some((output, current));
                return Ok(());
            }
            ctx.kill(output);
        }
        let output = ctx.emit(facts.clone(), &[])?;
        group.output = Some((output, facts));
        Ok(())
    }
}
