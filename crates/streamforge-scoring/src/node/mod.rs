//! Per-session node state and the operators that act on it.
//!
//! A node never propagates by itself: it allocates its output tuples in
//! the arena and records them as [`Effect`]s, which the session applies
//! after the node returns. Tuples a node produced from an input tuple are
//! children of that tuple and die with it, so only group outputs (which
//! have no parent) and existence-check transitions are ever retracted
//! through an effect.

mod exists;
mod group;
mod join;
mod sink;

#[cfg(test)]
mod tests;

use smallvec::smallvec;

use streamforge_core::{Result, Score, StreamForgeError};

use crate::graph::{NodeId, NodeKind, NodeSpec};
use crate::index::Side;
use crate::inliner::ScoreInliner;
use crate::tuple::{Facts, TupleArena, TupleId};

use exists::ExistsState;
use group::GroupState;
use join::JoinState;
use sink::SinkState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect {
    Insert(TupleId),
    Retract(TupleId),
}

/// What a node may touch while it processes one tuple.
pub(crate) struct Ctx<'a, Sc: Score> {
    pub(crate) arena: &'a mut TupleArena,
    pub(crate) inliner: &'a mut ScoreInliner<Sc>,
    pub(crate) effects: &'a mut Vec<Effect>,
    pub(crate) node: NodeId,
}

impl<Sc: Score> Ctx<'_, Sc> {
    /// Allocates an output tuple of the current node and schedules its insertion.
    pub(crate) fn emit(&mut self, facts: Facts, parents: &[TupleId]) -> Result<TupleId> {
        let id = self.arena.create(self.node, facts, parents)?;
        self.effects.push(Effect::Insert(id));
        Ok(id)
    }

    /// Schedules the retraction of an output tuple unless it is already gone.
    pub(crate) fn kill(&mut self, id: TupleId) {
        if self.arena.contains(id) {
            self.effects.push(Effect::Retract(id));
        }
    }

    pub(crate) fn facts(&self, id: TupleId) -> Result<Facts> {
        Ok(self.arena.facts(id)?.iter().cloned().collect())
    }

    pub(crate) fn is_active(&self, id: TupleId) -> bool {
        self.arena.state(id).is_active()
    }
}

pub(crate) enum NodeState<Sc: Score> {
    Stateless,
    Join(JoinState),
    Exists(ExistsState),
    Group(GroupState),
    Sink(SinkState<Sc>),
}

impl<Sc: Score> NodeState<Sc> {
    pub(crate) fn new(spec: &NodeSpec<Sc>) -> Self {
        match &spec.kind {
            NodeKind::Source { .. } | NodeKind::Filter(_) | NodeKind::Map(_) | NodeKind::Flatten(_) => {
                NodeState::Stateless
            }
            NodeKind::Join(joiner) => NodeState::Join(JoinState::new(joiner)),
            NodeKind::Exists { joiner, .. } => NodeState::Exists(ExistsState::new(joiner)),
            NodeKind::Group { .. } => NodeState::Group(GroupState::default()),
            NodeKind::Sink { .. } => NodeState::Sink(SinkState::default()),
        }
    }

    /// Number of tuples or groups this node currently remembers.
    pub(crate) fn size(&self) -> usize {
        match self {
            NodeState::Stateless => 0,
            NodeState::Join(state) => state.len(),
            NodeState::Exists(state) => state.len(),
            NodeState::Group(state) => state.len(),
            NodeState::Sink(state) => state.len(),
        }
    }

    pub(crate) fn insert(&mut self, spec: &NodeSpec<Sc>, side: Side, tuple: TupleId, ctx: &mut Ctx<'_, Sc>) -> Result<()> {
        match (&spec.kind, self) {
            (NodeKind::Filter(predicate), NodeState::Stateless) => {
                let facts = ctx.facts(tuple)?;
                if predicate(&facts[..])? {
                    ctx.emit(facts, &[tuple])?;
                }
                Ok(())
            }
            (NodeKind::Map(mapping), NodeState::Stateless) => {
                let value = mapping(ctx.arena.facts(tuple)?)?;
                ctx.emit(smallvec![value], &[tuple])?;
                Ok(())
            }
            (NodeKind::Flatten(mapping), NodeState::Stateless) => {
                let facts = ctx.facts(tuple)?;
                for value in mapping(&facts[..])? {
                    let mut out = facts.clone();
                    if let Some(last) = out.last_mut() {
                        *last = value;
                    }
                    ctx.emit(out, &[tuple])?;
                }
                Ok(())
            }
            (NodeKind::Join(joiner), NodeState::Join(state)) => state.insert(joiner, side, tuple, ctx),
            (NodeKind::Exists { joiner, should_exist }, NodeState::Exists(state)) => {
                state.insert(joiner, *should_exist, side, tuple, ctx)
            }
            (NodeKind::Group { keys, collectors }, NodeState::Group(state)) => {
                state.insert(keys, collectors, tuple, ctx)
            }
            (NodeKind::Sink { constraint, weigher }, NodeState::Sink(state)) => {
                state.insert(*constraint, weigher.as_ref(), tuple, ctx)
            }
            (kind, _) => Err(StreamForgeError::internal(format!(
                "{} node {} cannot receive tuples",
                kind.name(),
                ctx.node
            ))),
        }
    }

    /// Forgets a dying input tuple. Its children are already retracted.
    pub(crate) fn retract(&mut self, spec: &NodeSpec<Sc>, side: Side, tuple: TupleId, ctx: &mut Ctx<'_, Sc>) -> Result<()> {
        match (&spec.kind, self) {
            (NodeKind::Filter(_) | NodeKind::Map(_) | NodeKind::Flatten(_), NodeState::Stateless) => Ok(()),
            (NodeKind::Join(_), NodeState::Join(state)) => state.retract(side, tuple),
            (NodeKind::Exists { joiner, should_exist }, NodeState::Exists(state)) => {
                state.retract(joiner, *should_exist, side, tuple, ctx)
            }
            (NodeKind::Group { .. }, NodeState::Group(state)) => state.retract(tuple, ctx),
            (NodeKind::Sink { .. }, NodeState::Sink(state)) => {
                state.retract(tuple, ctx);
                Ok(())
            }
            (kind, _) => Err(StreamForgeError::internal(format!(
                "{} node {} cannot retract tuples",
                kind.name(),
                ctx.node
            ))),
        }
    }
}
