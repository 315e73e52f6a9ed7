// Mutable graph under construction, owned by a ConstraintFactory.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use smallvec::SmallVec;
use tracing::trace;

use streamforge_core::{ConstraintRef, ImpactType, Result, Score, StreamForgeError};

use super::{ConstraintDef, ConstraintGraph, Edge, NodeId, NodeKey, NodeKind, NodeSpec, NodeTag, Param};
use crate::fact::Fact;
use crate::index::Side;
use crate::stream::Constraint;

pub(crate) struct GraphBuilder<Sc: Score> {
    nodes: Vec<NodeSpec<Sc>>,
    shared: HashMap<NodeKey, NodeId>,
    constraints: Vec<ConstraintDef<Sc>>,
    errors: Vec<String>,
    shared_node_hits: usize,
}

impl<Sc: Score> Default for GraphBuilder<Sc> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            shared: HashMap::new(),
            constraints: Vec::new(),
            errors: Vec::new(),
            shared_node_hits: 0,
        }
    }
}

impl<Sc: Score> GraphBuilder<Sc> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn arity(&self, node: NodeId) -> usize {
        self.nodes[node.index()].arity
    }

    /// Returns the source node of fact type `T`, creating it once.
    pub(crate) fn source<T: Fact>(&mut self) -> NodeId {
        let key = NodeKey::new(NodeTag::Source, vec![Param::Type(TypeId::of::<T>())], &[]);
        self.node(
            key,
            NodeKind::Source {
                fact_type: TypeId::of::<T>(),
            },
            &[],
            1,
        )
    }

    /// Returns the node with this key, adding `kind` if there is none yet.
    pub(crate) fn node(&mut self, key: NodeKey, kind: NodeKind<Sc>, inputs: &[NodeId], arity: usize) -> NodeId {
        if let Some(existing) = self.shared.get(&key) {
            self.shared_node_hits += 1;
            trace!(node = %existing, kind = kind.name(), "Reusing shared node");
            return *existing;
        }
        let id = self.push(kind, inputs, arity);
        self.shared.insert(key, id);
        id
    }

    fn push(&mut self, kind: NodeKind<Sc>, inputs: &[NodeId], arity: usize) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeSpec {
            kind,
            inputs: inputs.iter().copied().collect(),
            arity,
            downstream: Vec::new(),
        });
        id
    }

    /// Records a definition error, reported when the graph is built.
    pub(crate) fn report(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Adds a constraint and its sink node, returning the constraint index.
    pub(crate) fn add_constraint(
        &mut self,
        input: NodeId,
        constraint_ref: ConstraintRef,
        impact_type: ImpactType,
        weight: Option<Sc>,
        weigher: Option<crate::stream::function::TupleFn<Sc::Level>>,
    ) -> usize {
        let index = self.constraints.len();
        let sink = self.push(
            NodeKind::Sink {
                constraint: index,
                weigher,
            },
            &[input],
            0,
        );
        self.constraints.push(ConstraintDef {
            constraint_ref,
            impact_type,
            weight,
            sink,
        });
        index
    }

    /// Validates the definitions and keeps the nodes the returned
    /// constraints depend on.
    pub(crate) fn finish(self, returned: &[Constraint]) -> Result<ConstraintGraph<Sc>> {
        if !self.errors.is_empty() {
            return Err(StreamForgeError::config(self.errors.join("; ")));
        }

        let mut names = HashSet::new();
        let mut kept = Vec::with_capacity(returned.len());
        for constraint in returned {
            if constraint.index >= self.constraints.len() {
                return Err(StreamForgeError::config(format!(
                    "constraint ({}) was defined by another constraint factory",
                    constraint.constraint_ref().full_name()
                )));
            }
            let full_name = self.constraints[constraint.index].constraint_ref.full_name();
            if !names.insert(full_name.clone()) {
                return Err(StreamForgeError::config(format!(
                    "two constraints share the id ({})",
                    full_name
                )));
            }
            kept.push(constraint.index);
        }

        // walk upstream from the kept sinks
        let mut reachable = vec![false; self.nodes.len()];
        let mut stack: Vec<NodeId> = kept.iter().map(|&i| self.constraints[i].sink).collect();
        while let Some(node) = stack.pop() {
            if reachable[node.index()] {
                continue;
            }
            reachable[node.index()] = true;
            stack.extend(self.nodes[node.index()].inputs.iter().copied());
        }

        let mut remap = vec![None; self.nodes.len()];
        let mut next = 0;
        for (old, keep) in reachable.iter().enumerate() {
            if *keep {
                remap[old] = Some(NodeId::new(next));
                next += 1;
            }
        }
        let mut constraint_slot = vec![None; self.constraints.len()];
        for (slot, &index) in kept.iter().enumerate() {
            constraint_slot[index] = Some(slot);
        }

        let pruned = self.nodes.len() - next;
        let mut nodes = Vec::with_capacity(next);
        for (old, mut spec) in self.nodes.into_iter().enumerate() {
            if !reachable[old] {
                continue;
            }
            let mut inputs: SmallVec<[NodeId; 2]> = SmallVec::new();
            for input in &spec.inputs {
                inputs.push(remapped(&remap, *input)?);
            }
            spec.inputs = inputs;
            if let NodeKind::Sink { constraint, .. } = &mut spec.kind {
                *constraint = constraint_slot[*constraint]
                    .ok_or_else(|| StreamForgeError::internal("reachable sink of a dropped constraint"))?;
            }
            nodes.push(spec);
        }

        let mut constraints: Vec<Option<ConstraintDef<Sc>>> = self.constraints.into_iter().map(Some).collect();
        let mut defs = Vec::with_capacity(kept.len());
        for index in kept {
            let mut def = constraints[index]
                .take()
                .ok_or_else(|| StreamForgeError::internal("constraint returned twice"))?;
            def.sink = remapped(&remap, def.sink)?;
            defs.push(def);
        }

        let mut sources = HashMap::new();
        for index in 0..nodes.len() {
            let id = NodeId::new(index);
            if let NodeKind::Source { fact_type, .. } = nodes[index].kind {
                sources.insert(fact_type, id);
            }
            let inputs = nodes[index].inputs.clone();
            for (position, input) in inputs.into_iter().enumerate() {
                let side = if position == 0 { Side::Left } else { Side::Right };
                nodes[input.index()].downstream.push(Edge { node: id, side });
            }
        }

        trace!(pruned, "Pruned nodes without a returned constraint downstream");
        Ok(ConstraintGraph {
            nodes,
            sources,
            constraints: defs,
            shared_node_hits: self.shared_node_hits,
        })
    }
}

fn remapped(remap: &[Option<NodeId>], id: NodeId) -> Result<NodeId> {
    remap[id.index()].ok_or_else(|| StreamForgeError::internal(format!("{} was pruned", id)))
}
