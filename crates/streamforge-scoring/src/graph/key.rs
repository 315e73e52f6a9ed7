// Structural node identity used for node sharing.

use std::any::TypeId;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use super::NodeId;
use crate::stream::joiner::JoinerType;

static NEXT_UNIQUE: AtomicU64 = AtomicU64::new(0);

/// One parameter of a node's sharing key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Param {
    /// A closure without captures, identified by its type: every use of the
    /// same closure expression behaves identically.
    Closure(TypeId),
    /// A capturing closure, never considered equal to another.
    Unique(u64),
    /// A fact type.
    Type(TypeId),
    /// A joiner condition.
    Joiner(JoinerType),
    Tag(&'static str),
    Flag(bool),
}

impl Param {
    pub(crate) fn of_closure<F: 'static>(_closure: &F) -> Param {
        if std::mem::size_of::<F>() == 0 {
            Param::Closure(TypeId::of::<F>())
        } else {
            Param::unique()
        }
    }

    pub(crate) fn unique() -> Param {
        Param::Unique(NEXT_UNIQUE.fetch_add(1, Ordering::Relaxed))
    }
}

/// Operator kind of a node, the first component of its sharing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum NodeTag {
    Source,
    Filter,
    Join,
    IfExists,
    IfNotExists,
    Group,
    Map,
    Flatten,
}

/// `(kind, params, upstream)`: two nodes with equal keys are the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey {
    tag: NodeTag,
    params: Vec<Param>,
    upstream: SmallVec<[NodeId; 2]>,
}

impl NodeKey {
    pub(crate) fn new(tag: NodeTag, params: Vec<Param>, upstream: &[NodeId]) -> Self {
        Self {
            tag,
            params,
            upstream: upstream.iter().copied().collect(),
        }
    }
}
