// Constraint factory for creating typed constraint streams.
//
// The factory is the entry point for the fluent constraint API. Every
// stream operation goes through it to find or create its node, so two
// constraints that start with the same operations share those nodes.

use std::cell::RefCell;
use std::rc::Rc;

use streamforge_core::Score;

use super::collector::AccumulatorSupplier;
use super::function::TupleFn;
use super::joiner::{less_than, CompiledJoiner, Joiner, JoinerPart};
use super::{BiConstraintStream, Constraint, UniConstraintStream};
use crate::fact::{Fact, FactRef};
use crate::graph::{GraphBuilder, NodeId, NodeKey, NodeKind, NodeTag, Param};

// Factory for creating constraint streams.
//
// A factory is handed to a `ConstraintProvider` while a `ConstraintGraph`
// is built; streams keep a handle on it until they end in a constraint.
//
// # Example
//
// ```
// use streamforge_core::{PlanningId, score::SimpleScore};
// use streamforge_scoring::stream::joiner::equal;
// use streamforge_scoring::{ConstraintFactory, ConstraintGraph};
//
// #[derive(Debug)]
// struct Task { id: u32, team: u32 }
//
// impl PlanningId for Task {
//     type Id = u32;
//     fn planning_id(&self) -> u32 { self.id }
// }
//
// let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
//     vec![
//         factory
//             .for_each_unique_pair_with(equal(|t: &Task| t.team))
//             .penalize(SimpleScore::of(1))
//             .as_constraint("Team conflict"),
//     ]
// }).unwrap();
// assert_eq!(graph.constraint_count(), 1);
// ```
pub struct ConstraintFactory<Sc: Score> {
    builder: Rc<RefCell<GraphBuilder<Sc>>>,
}

impl<Sc: Score> Clone for ConstraintFactory<Sc> {
    fn clone(&self) -> Self {
        Self {
            builder: Rc::clone(&self.builder),
        }
    }
}

impl<Sc: Score> std::fmt::Debug for ConstraintFactory<Sc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintFactory").finish_non_exhaustive()
    }
}

impl<Sc: Score> ConstraintFactory<Sc> {
    pub(crate) fn new() -> Self {
        Self {
            builder: Rc::new(RefCell::new(GraphBuilder::new())),
        }
    }

    pub(crate) fn take_builder(&self) -> GraphBuilder<Sc> {
        std::mem::take(&mut *self.builder.borrow_mut())
    }

    pub(crate) fn with_builder<R>(&self, f: impl FnOnce(&mut GraphBuilder<Sc>) -> R) -> R {
        f(&mut self.builder.borrow_mut())
    }

    // Starts a stream over every live fact of type `A`.
    pub fn for_each<A: Fact>(&self) -> UniConstraintStream<Sc, A> {
        UniConstraintStream::new(self.clone(), self.source_node::<A>())
    }

    // Starts a stream over every unordered pair of distinct `A` facts.
    //
    // Each pair appears once, with the lower planning id on the left.
    pub fn for_each_unique_pair<A: Fact>(&self) -> BiConstraintStream<Sc, A, A> {
        self.for_each_unique_pair_with(Joiner::all(Vec::new()))
    }

    // Like `for_each_unique_pair`, keeping only the pairs the joiner matches.
    pub fn for_each_unique_pair_with<A: Fact>(&self, joiner: Joiner<(A,), A>) -> BiConstraintStream<Sc, A, A> {
        let ordered = joiner.and(less_than(|a: &A| a.planning_id(), |b: &A| b.planning_id()));
        self.for_each::<A>().join(ordered)
    }

    pub(crate) fn source_node<A: Fact>(&self) -> NodeId {
        self.with_builder(|builder| builder.source::<A>())
    }

    pub(crate) fn filter_node(&self, upstream: NodeId, param: Param, predicate: TupleFn<bool>) -> NodeId {
        let key = NodeKey::new(NodeTag::Filter, vec![param], &[upstream]);
        self.with_builder(|builder| {
            let arity = builder.arity(upstream);
            builder.node(key, NodeKind::Filter(predicate), &[upstream], arity)
        })
    }

    pub(crate) fn join_node(&self, left: NodeId, right: NodeId, params: Vec<Param>, parts: Vec<JoinerPart>) -> NodeId {
        let key = NodeKey::new(NodeTag::Join, params, &[left, right]);
        self.with_builder(|builder| {
            if parts.is_empty() {
                builder.report(format!("the join at {} has no joiner conditions", left));
            }
            let arity = builder.arity(left) + builder.arity(right);
            builder.node(key, NodeKind::Join(CompiledJoiner::compile(parts)), &[left, right], arity)
        })
    }

    pub(crate) fn exists_node(
        &self,
        left: NodeId,
        right: NodeId,
        params: Vec<Param>,
        parts: Vec<JoinerPart>,
        should_exist: bool,
    ) -> NodeId {
        let tag = if should_exist {
            NodeTag::IfExists
        } else {
            NodeTag::IfNotExists
        };
        let key = NodeKey::new(tag, params, &[left, right]);
        self.with_builder(|builder| {
            let arity = builder.arity(left);
            let kind = NodeKind::Exists {
                joiner: CompiledJoiner::compile(parts),
                should_exist,
            };
            builder.node(key, kind, &[left, right], arity)
        })
    }

    // Every key param follows a "key" tag; collector params start with the
    // collector's own tag.
    pub(crate) fn group_node(
        &self,
        upstream: NodeId,
        keys: Vec<(Param, TupleFn<FactRef>)>,
        collectors: Vec<(Vec<Param>, AccumulatorSupplier)>,
    ) -> NodeId {
        let mut params = Vec::new();
        let keys: Vec<TupleFn<FactRef>> = keys
            .into_iter()
            .map(|(param, mapping)| {
                params.push(Param::Tag("key"));
                params.push(param);
                mapping
            })
            .collect();
        let collectors: Vec<AccumulatorSupplier> = collectors
            .into_iter()
            .map(|(collector_params, supplier)| {
                params.extend(collector_params);
                supplier
            })
            .collect();
        let arity = keys.len() + collectors.len();
        let node_key = NodeKey::new(NodeTag::Group, params, &[upstream]);
        self.with_builder(|builder| builder.node(node_key, NodeKind::Group { keys, collectors }, &[upstream], arity))
    }

    pub(crate) fn map_node(&self, upstream: NodeId, param: Param, mapping: TupleFn<FactRef>) -> NodeId {
        let key = NodeKey::new(NodeTag::Map, vec![param], &[upstream]);
        self.with_builder(|builder| builder.node(key, NodeKind::Map(mapping), &[upstream], 1))
    }

    pub(crate) fn flatten_node(&self, upstream: NodeId, param: Param, mapping: TupleFn<Vec<FactRef>>) -> NodeId {
        let key = NodeKey::new(NodeTag::Flatten, vec![param], &[upstream]);
        self.with_builder(|builder| {
            let arity = builder.arity(upstream);
            builder.node(key, NodeKind::Flatten(mapping), &[upstream], arity)
        })
    }

    pub(crate) fn add_constraint(&self, constraint: super::ConstraintBuilder<Sc>, package: &str, name: &str) -> Constraint {
        let constraint_ref = streamforge_core::ConstraintRef::new(package, name);
        let (node, impact_type, weight, weigher) = constraint.into_parts();
        let index = self.with_builder(|builder| {
            builder.add_constraint(node, constraint_ref.clone(), impact_type, weight, weigher)
        });
        Constraint::new(index, constraint_ref)
    }
}
