//! The shared constraint graph.
//!
//! A [`ConstraintGraph`] is the node-deduplicated topology of a set of
//! constraints. It is built once from a [`ConstraintProvider`] and holds no
//! per-session state: every [`ConstraintSession`](crate::ConstraintSession)
//! instantiates fresh indexes, groups and score accumulators from it, so one
//! graph can back any number of sessions on any number of threads.

mod builder;
mod key;

#[cfg(test)]
mod tests;

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use streamforge_core::{ConstraintRef, ImpactType, Result, Score};

use crate::api::weight_overrides::WeightProvider;
use crate::fact::FactRef;
use crate::index::Side;
use crate::stream::collector::AccumulatorSupplier;
use crate::stream::function::TupleFn;
use crate::stream::joiner::CompiledJoiner;
use crate::stream::{ConstraintFactory, ConstraintProvider};

pub(crate) use builder::GraphBuilder;
pub(crate) use key::{NodeKey, NodeTag, Param};

/// Identifies a node of a constraint graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A downstream edge: the node and the input it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
    pub(crate) node: NodeId,
    pub(crate) side: Side,
}

pub(crate) enum NodeKind<Sc: Score> {
    Source {
        fact_type: TypeId,
    },
    Filter(TupleFn<bool>),
    Join(CompiledJoiner),
    Exists {
        joiner: CompiledJoiner,
        should_exist: bool,
    },
    Group {
        keys: Vec<TupleFn<FactRef>>,
        collectors: Vec<AccumulatorSupplier>,
    },
    Map(TupleFn<FactRef>),
    Flatten(TupleFn<Vec<FactRef>>),
    Sink {
        constraint: usize,
        weigher: Option<TupleFn<Sc::Level>>,
    },
}

impl<Sc: Score> NodeKind<Sc> {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            NodeKind::Source { .. } => "source",
            NodeKind::Filter(_) => "filter",
            NodeKind::Join(_) => "join",
            NodeKind::Exists { should_exist: true, .. } => "if_exists",
            NodeKind::Exists { should_exist: false, .. } => "if_not_exists",
            NodeKind::Group { .. } => "group",
            NodeKind::Map(_) => "map",
            NodeKind::Flatten(_) => "flatten",
            NodeKind::Sink { .. } => "sink",
        }
    }
}

pub(crate) struct NodeSpec<Sc: Score> {
    pub(crate) kind: NodeKind<Sc>,
    /// `[upstream]`, or `[left, right]` for joins and existence checks.
    pub(crate) inputs: SmallVec<[NodeId; 2]>,
    pub(crate) arity: usize,
    pub(crate) downstream: Vec<Edge>,
}

/// A constraint of the graph with its default weight.
pub struct ConstraintDef<Sc: Score> {
    constraint_ref: ConstraintRef,
    impact_type: ImpactType,
    weight: Option<Sc>,
    sink: NodeId,
}

impl<Sc: Score> ConstraintDef<Sc> {
    pub fn constraint_ref(&self) -> &ConstraintRef {
        &self.constraint_ref
    }

    pub fn impact_type(&self) -> ImpactType {
        self.impact_type
    }

    /// The weight given at definition time; `None` for configurable constraints.
    pub fn default_weight(&self) -> Option<Sc> {
        self.weight
    }

    /// Returns true if the weight is only read from the weight configuration.
    pub fn is_configurable(&self) -> bool {
        self.weight.is_none()
    }

    /// Reads the weight for a new session.
    ///
    /// An override for the constraint's full name wins over the default
    /// weight; a configurable constraint without override weighs zero.
    pub fn resolve_weight(&self, weights: &dyn WeightProvider<Sc>) -> Sc {
        weights
            .weight(&self.constraint_ref.full_name())
            .or(self.weight)
            .unwrap_or_else(Sc::zero)
    }
}

impl<Sc: Score> fmt::Debug for ConstraintDef<Sc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintDef")
            .field("constraint_ref", &self.constraint_ref)
            .field("impact_type", &self.impact_type)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Immutable, node-shared topology of a set of constraints.
///
/// # Example
///
/// ```
/// use streamforge_core::{PlanningId, score::SimpleScore};
/// use streamforge_scoring::{ConstraintFactory, ConstraintGraph};
///
/// #[derive(Debug)]
/// struct Queen { id: usize, row: Option<usize> }
///
/// impl PlanningId for Queen {
///     type Id = usize;
///     fn planning_id(&self) -> usize { self.id }
/// }
///
/// let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
///     vec![
///         factory.for_each::<Queen>()
///             .filter(|q: &Queen| q.row.is_none())
///             .penalize(SimpleScore::of(1))
///             .as_constraint("Unassigned"),
///     ]
/// }).unwrap();
///
/// // source, filter and sink
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.constraint_count(), 1);
/// ```
pub struct ConstraintGraph<Sc: Score> {
    nodes: Vec<NodeSpec<Sc>>,
    sources: HashMap<TypeId, NodeId>,
    constraints: Vec<ConstraintDef<Sc>>,
    shared_node_hits: usize,
}

impl<Sc: Score> ConstraintGraph<Sc> {
    /// Builds the graph of every constraint the provider returns.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed definitions, such as a
    /// join without joiner conditions or two constraints with the same id.
    pub fn build<P>(provider: &P) -> Result<Self>
    where
        P: ConstraintProvider<Sc> + ?Sized,
    {
        let factory = ConstraintFactory::new();
        let constraints = provider.define_constraints(&factory);
        let builder = factory.take_builder();
        let graph = builder.finish(&constraints)?;
        debug!(
            node_count = graph.node_count(),
            constraint_count = graph.constraint_count(),
            shared_node_hits = graph.shared_node_hits,
            "Built constraint graph"
        );
        Ok(graph)
    }

    /// Returns the number of nodes, sinks included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the constraints in the order the provider returned them.
    pub fn constraints(&self) -> &[ConstraintDef<Sc>] {
        &self.constraints
    }

    /// Returns how many node definitions resolved to an existing node.
    pub fn shared_node_hits(&self) -> usize {
        self.shared_node_hits
    }

    /// Returns the number of fact types the graph reads.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Counts the nodes of each operator kind, for diagnostics.
    pub fn node_kind_counts(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for node in &self.nodes {
            let name = node.kind.name();
            match counts.iter_mut().find(|(kind, _)| *kind == name) {
                Some((_, count)) => *count += 1,
                None => counts.push((name, 1)),
            }
        }
        counts
    }

    pub(crate) fn nodes(&self) -> &[NodeSpec<Sc>] {
        &self.nodes
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeSpec<Sc> {
        &self.nodes[id.index()]
    }

    pub(crate) fn source(&self, fact_type: TypeId) -> Option<NodeId> {
        self.sources.get(&fact_type).copied()
    }
}

impl<Sc: Score> fmt::Debug for ConstraintGraph<Sc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintGraph")
            .field("nodes", &self.nodes.len())
            .field("constraints", &self.constraints)
            .finish()
    }
}
