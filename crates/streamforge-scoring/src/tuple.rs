//! Tuples and the arena that owns them.
//!
//! Every tuple lives in one [`TupleArena`] slot and is addressed by a
//! [`TupleId`] carrying the slot's generation, so an id never resolves to a
//! tuple that reused the slot after the original was retracted.

use slab::Slab;
use smallvec::SmallVec;

use streamforge_core::{Result, StreamForgeError};

use crate::fact::FactRef;
use crate::graph::NodeId;

/// Maximum number of facts in a tuple.
pub const MAX_ARITY: usize = 5;

/// Stable handle on a tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TupleId {
    slot: usize,
    generation: u64,
}

/// Propagation state of a tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TupleState {
    /// Allocated, still propagating to its node's downstream edges.
    Creating,
    /// Propagated exactly once to every downstream edge.
    Ok,
    /// Source tuple whose fact is being replaced; retraction follows.
    Updating,
    /// Being retracted; its children are retracted before it dies.
    Dying,
    /// Fully retracted and removed from the arena.
    Dead,
}

impl TupleState {
    /// Returns true unless the tuple is being or has been retracted.
    pub fn is_active(self) -> bool {
        matches!(self, TupleState::Creating | TupleState::Ok | TupleState::Updating)
    }
}

pub(crate) type Facts = SmallVec<[FactRef; MAX_ARITY]>;

pub(crate) struct Tuple {
    pub(crate) facts: Facts,
    pub(crate) state: TupleState,
    pub(crate) node: NodeId,
    generation: u64,
    parents: SmallVec<[TupleId; 2]>,
    children: Vec<TupleId>,
}

#[derive(Default)]
pub(crate) struct TupleArena {
    tuples: Slab<Tuple>,
    next_generation: u64,
}

impl TupleArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.tuples.len()
    }

    /// Allocates a tuple in state `Creating` and registers it as a child of
    /// each distinct parent.
    pub(crate) fn create(&mut self, node: NodeId, facts: Facts, parents: &[TupleId]) -> Result<TupleId> {
        if facts.is_empty() || facts.len() > MAX_ARITY {
            return Err(StreamForgeError::internal(format!(
                "tuple arity {} is outside 1..={}",
                facts.len(),
                MAX_ARITY
            )));
        }
        let mut distinct: SmallVec<[TupleId; 2]> = SmallVec::new();
        for parent in parents {
            if !distinct.contains(parent) {
                self.get(*parent)?;
                distinct.push(*parent);
            }
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        let slot = self.tuples.insert(Tuple {
            facts,
            state: TupleState::Creating,
            node,
            generation,
            parents: distinct.clone(),
            children: Vec::new(),
        });
        let id = TupleId { slot, generation };
        for parent in distinct {
            self.get_mut(parent)?.children.push(id);
        }
        Ok(id)
    }

    pub(crate) fn contains(&self, id: TupleId) -> bool {
        self.tuples
            .get(id.slot)
            .is_some_and(|tuple| tuple.generation == id.generation)
    }

    pub(crate) fn get(&self, id: TupleId) -> Result<&Tuple> {
        match self.tuples.get(id.slot) {
            Some(tuple) if tuple.generation == id.generation => Ok(tuple),
            _ => Err(StreamForgeError::invalid_state(format!("{:?} is dead", id))),
        }
    }

    fn get_mut(&mut self, id: TupleId) -> Result<&mut Tuple> {
        match self.tuples.get_mut(id.slot) {
            Some(tuple) if tuple.generation == id.generation => Ok(tuple),
            _ => Err(StreamForgeError::invalid_state(format!("{:?} is dead", id))),
        }
    }

    pub(crate) fn facts(&self, id: TupleId) -> Result<&[FactRef]> {
        Ok(&self.get(id)?.facts)
    }

    /// Returns the state of a tuple, `Dead` once it left the arena.
    pub(crate) fn state(&self, id: TupleId) -> TupleState {
        self.get(id).map_or(TupleState::Dead, |tuple| tuple.state)
    }

    pub(crate) fn set_state(&mut self, id: TupleId, state: TupleState) -> Result<()> {
        self.get_mut(id)?.state = state;
        Ok(())
    }

    /// Detaches and returns the children of a tuple, oldest first.
    pub(crate) fn take_children(&mut self, id: TupleId) -> Result<Vec<TupleId>> {
        Ok(std::mem::take(&mut self.get_mut(id)?.children))
    }

    /// Removes a tuple, unlinking it from the parents that are still alive.
    ///
    /// The children must have been retracted before.
    pub(crate) fn remove(&mut self, id: TupleId) -> Result<()> {
        let tuple = self.get(id)?;
        if !tuple.children.is_empty() {
            return Err(StreamForgeError::internal(format!(
                "{:?} still has {} live children",
                id,
                tuple.children.len()
            )));
        }
        let parents = tuple.parents.clone();
        for parent in parents {
            if let Ok(parent) = self.get_mut(parent) {
                if let Some(position) = parent.children.iter().position(|child| *child == id) {
                    parent.children.remove(position);
                }
            }
        }
        self.tuples.remove(id.slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn facts(values: &[u32]) -> Facts {
        values.iter().map(|v| FactRef::value(*v)).collect()
    }

    #[test]
    fn test_create_links_children() {
        let mut arena = TupleArena::new();
        let left = arena.create(NodeId::new(0), facts(&[1]), &[]).unwrap();
        let right = arena.create(NodeId::new(1), facts(&[2]), &[]).unwrap();
        let joined = arena.create(NodeId::new(2), facts(&[1, 2]), &[left, right]).unwrap();

        assert_eq!(arena.state(joined), TupleState::Creating);
        assert_eq!(arena.take_children(left).unwrap(), vec![joined]);
        assert!(arena.remove(joined).is_ok());
        assert!(arena.take_children(right).unwrap().is_empty());
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_self_parent_registered_once() {
        let mut arena = TupleArena::new();
        let source = arena.create(NodeId::new(0), facts(&[1]), &[]).unwrap();
        let pair = arena.create(NodeId::new(1), facts(&[1, 1]), &[source, source]).unwrap();
        assert_eq!(arena.take_children(source).unwrap(), vec![pair]);
    }

    #[test]
    fn test_reused_slot_gets_new_generation() {
        let mut arena = TupleArena::new();
        let first = arena.create(NodeId::new(0), facts(&[1]), &[]).unwrap();
        arena.remove(first).unwrap();
        let second = arena.create(NodeId::new(0), facts(&[2]), &[]).unwrap();

        assert_ne!(first, second);
        assert!(!arena.contains(first));
        assert_eq!(arena.state(first), TupleState::Dead);
        assert!(arena.get(first).is_err());
        assert!(arena.contains(second));
    }

    #[test]
    fn test_remove_with_live_children_fails() {
        let mut arena = TupleArena::new();
        let parent = arena.create(NodeId::new(0), facts(&[1]), &[]).unwrap();
        arena.create(NodeId::new(1), facts(&[1]), &[parent]).unwrap();
        assert!(arena.remove(parent).is_err());
    }

    #[test]
    fn test_arity_limits() {
        let mut arena = TupleArena::new();
        assert!(arena.create(NodeId::new(0), smallvec![], &[]).is_err());
        assert!(arena.create(NodeId::new(0), facts(&[1, 2, 3, 4, 5, 6]), &[]).is_err());
        assert!(arena.create(NodeId::new(0), facts(&[1, 2, 3, 4, 5]), &[]).is_ok());
    }

    #[test]
    fn test_state_helpers() {
        assert!(TupleState::Updating.is_active());
        assert!(!TupleState::Dying.is_active());
        assert!(!TupleState::Dead.is_active());
    }
}
