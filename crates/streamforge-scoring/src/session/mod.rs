//! Incremental scoring session over a compiled constraint graph.
//!
//! A [`ConstraintSession`] holds the working memory of one solution: the
//! live facts, the tuples derived from them and the node states. Inserting,
//! updating or retracting a fact propagates through the graph depth first,
//! so the score is always current when [`ConstraintSession::calculate_score`]
//! is called.


use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use smallvec::smallvec;
use tracing::{debug, trace};

use streamforge_core::{Result, Score, StreamForgeError};

use crate::api::analysis::{ConstraintMatchTotal, IndictmentMap, ScoreExplanation};
use crate::api::weight_overrides::WeightProvider;
use crate::fact::{Fact, FactRef};
use crate::graph::{ConstraintGraph, NodeId};
use crate::index::HashKey;
use crate::inliner::ScoreInliner;
use crate::node::{Ctx, Effect, NodeState};
use crate::tuple::{TupleArena, TupleId, TupleState};

struct LiveFact {
    fact: FactRef,
    tuple: Option<TupleId>,
}

// Live facts of one type. Types no constraint reads have no source node
// but are still tracked, so the insert/retract protocol holds for them too.
struct SourceIndex {
    node: Option<NodeId>,
    live: HashMap<HashKey, LiveFact>,
}

/// Working memory of one solution.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use streamforge_core::{PlanningId, SimpleScore};
/// use streamforge_scoring::{ConstraintGraph, ConstraintSession, ConstraintWeightOverrides};
///
/// #[derive(Debug, Clone)]
/// struct Queen { id: usize, row: Option<i64> }
///
/// impl PlanningId for Queen {
///     type Id = usize;
///     fn planning_id(&self) -> usize { self.id }
/// }
///
/// let graph = ConstraintGraph::build(&|factory: &streamforge_scoring::ConstraintFactory<SimpleScore>| {
///     vec![
///         factory.for_each::<Queen>()
///             .filter(|q: &Queen| q.row.is_none())
///             .penalize(SimpleScore::of(1))
///             .as_constraint("Unassigned queen"),
///     ]
/// }).unwrap();
///
/// let mut session = ConstraintSession::new(Arc::new(graph), &ConstraintWeightOverrides::new(), false);
/// for id in 0..3 {
///     session.insert(Queen { id, row: None }).unwrap();
/// }
/// assert_eq!(session.calculate_score(), SimpleScore::of(-3));
///
/// session.update(Queen { id: 1, row: Some(4) }).unwrap();
/// assert_eq!(session.calculate_score(), SimpleScore::of(-2));
/// ```
pub struct ConstraintSession<Sc: Score> {
    graph: Arc<ConstraintGraph<Sc>>,
    nodes: Vec<NodeState<Sc>>,
    arena: TupleArena,
    inliner: ScoreInliner<Sc>,
    sources: HashMap<TypeId, SourceIndex>,
}

impl<Sc: Score> ConstraintSession<Sc> {
    /// Creates an empty session.
    ///
    /// Constraint weights are resolved once, here: later changes to the
    /// weight provider need a new session.
    pub fn new(graph: Arc<ConstraintGraph<Sc>>, weights: &dyn WeightProvider<Sc>, track_matches: bool) -> Self {
        let nodes = graph.nodes().iter().map(NodeState::new).collect();
        let inliner = ScoreInliner::new(&graph, weights, track_matches);
        debug!(
            node_count = graph.node_count(),
            constraint_count = graph.constraint_count(),
            track_matches,
            "Created constraint session"
        );
        Self {
            graph,
            nodes,
            arena: TupleArena::new(),
            inliner,
            sources: HashMap::new(),
        }
    }

    /// Inserts a fact that is not in the session yet.
    pub fn insert<T: Fact>(&mut self, fact: T) -> Result<()> {
        self.insert_fact(FactRef::new(fact))
    }

    /// Replaces the fact with the same planning id.
    pub fn update<T: Fact>(&mut self, fact: T) -> Result<()> {
        self.update_fact(FactRef::new(fact))
    }

    /// Retracts the fact with the same planning id as `fact`.
    pub fn retract<T: Fact>(&mut self, fact: &T) -> Result<()> {
        self.retract_key(TypeId::of::<T>(), HashKey::new(fact.planning_id()), || format!("{:?}", fact))
    }

    /// Type-erased [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns an invalid state error if a fact of the same type and
    /// planning id is already in the session.
    pub fn insert_fact(&mut self, fact: FactRef) -> Result<()> {
        let key = fact.identity();
        let graph = Arc::clone(&self.graph);
        let source = self
            .sources
            .entry(fact.fact_type())
            .or_insert_with(|| SourceIndex {
                node: graph.source(fact.fact_type()),
                live: HashMap::new(),
            });
        if source.live.contains_key(&key) {
            return Err(StreamForgeError::invalid_state(format!(
                "{} {:?} was inserted twice",
                fact.short_type_name(),
                fact
            )));
        }
        let tuple = match source.node {
            Some(node) => Some(self.arena.create(node, smallvec![fact.clone()], &[])?),
            None => None,
        };
        trace!(fact = ?fact, "Inserted fact");
        source.live.insert(key, LiveFact { fact, tuple });
        match tuple {
            Some(tuple) => self.propagate_insert(tuple),
            None => Ok(()),
        }
    }

    /// Type-erased [`update`](Self::update).
    ///
    /// # Errors
    ///
    /// Returns an invalid state error if no fact with the same type and
    /// planning id was inserted.
    pub fn update_fact(&mut self, fact: FactRef) -> Result<()> {
        let key = fact.identity();
        let fact_type = fact.fact_type();
        let live = self
            .sources
            .get_mut(&fact_type)
            .and_then(|source| source.live.get_mut(&key))
            .ok_or_else(|| {
                StreamForgeError::invalid_state(format!(
                    "{} {:?} was updated but never inserted",
                    fact.short_type_name(),
                    fact
                ))
            })?;
        live.fact = fact.clone();
        let old = live.tuple;
        trace!(fact = ?fact, "Updated fact");

        let Some(old) = old else {
            return Ok(());
        };
        let node = self.arena.get(old)?.node;
        self.arena.set_state(old, TupleState::Updating)?;
        self.retract_tuple(old)?;
        let tuple = self.arena.create(node, smallvec![fact], &[])?;
        if let Some(live) = self
            .sources
            .get_mut(&fact_type)
            .and_then(|source| source.live.get_mut(&key))
        {
            live.tuple = Some(tuple);
        }
        self.propagate_insert(tuple)
    }

    /// Type-erased [`retract`](Self::retract).
    pub fn retract_fact(&mut self, fact: &FactRef) -> Result<()> {
        self.retract_key(fact.fact_type(), fact.identity(), || format!("{} {:?}", fact.short_type_name(), fact))
    }

    fn retract_key<D>(&mut self, fact_type: TypeId, key: HashKey, describe: D) -> Result<()>
    where
        D: FnOnce() -> String,
    {
        let live = self
            .sources
            .get_mut(&fact_type)
            .and_then(|source| source.live.remove(&key))
            .ok_or_else(|| {
                StreamForgeError::invalid_state(format!("{} was retracted but never inserted", describe()))
            })?;
        trace!(fact = ?live.fact, "Retracted fact");
        match live.tuple {
            Some(tuple) => self.retract_tuple(tuple),
            None => Ok(()),
        }
    }

    /// Returns true if a fact with the same type and planning id is live.
    pub fn contains_fact(&self, fact: &FactRef) -> bool {
        self.sources
            .get(&fact.fact_type())
            .is_some_and(|source| source.live.contains_key(&fact.identity()))
    }

    /// Returns the score of the live facts. The init score is always zero.
    pub fn calculate_score(&self) -> Sc {
        self.inliner.score()
    }

    /// Returns true if the session records individual constraint matches.
    pub fn is_match_tracking(&self) -> bool {
        self.inliner.tracker().is_some()
    }

    /// Returns a snapshot of the match totals of every enabled constraint.
    ///
    /// # Errors
    ///
    /// Returns [`StreamForgeError::Unsupported`] if the session was created
    /// without match tracking.
    pub fn constraint_match_totals(&self) -> Result<Vec<ConstraintMatchTotal<Sc>>> {
        Ok(self.tracker("constraint match totals")?.totals().cloned().collect())
    }

    /// Returns a snapshot of the indictment of every fact in a match.
    ///
    /// # Errors
    ///
    /// Returns [`StreamForgeError::Unsupported`] if the session was created
    /// without match tracking.
    pub fn indictment_map(&self) -> Result<IndictmentMap<Sc>> {
        Ok(self.tracker("the indictment map")?.indictments().clone())
    }

    /// Explains the current score constraint by constraint.
    pub fn explain_score(&self) -> Result<ScoreExplanation<Sc>> {
        let totals = self.constraint_match_totals()?;
        Ok(ScoreExplanation::from_totals(self.calculate_score(), &totals))
    }

    fn tracker(&self, what: &str) -> Result<&crate::inliner::MatchTracker<Sc>> {
        self.inliner.tracker().ok_or_else(|| {
            StreamForgeError::Unsupported(format!(
                "{} need a session created with match tracking enabled",
                what
            ))
        })
    }

    pub fn graph(&self) -> &Arc<ConstraintGraph<Sc>> {
        &self.graph
    }

    /// Returns the number of live facts.
    pub fn fact_count(&self) -> usize {
        self.sources.values().map(|source| source.live.len()).sum()
    }

    /// Returns the number of live tuples across all nodes.
    pub fn tuple_count(&self) -> usize {
        self.arena.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns how many tuples or groups each node currently holds.
    pub fn node_sizes(&self) -> Vec<(NodeId, usize)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, state)| (NodeId::new(index), state.size()))
            .collect()
    }

    fn propagate_insert(&mut self, tuple: TupleId) -> Result<()> {
        let graph = Arc::clone(&self.graph);
        let node = self.arena.get(tuple)?.node;
        for edge in &graph.node(node).downstream {
            if !self.arena.state(tuple).is_active() {
                break;
            }
            let mut effects = Vec::new();
            let mut ctx = Ctx {
                arena: &mut self.arena,
                inliner: &mut self.inliner,
                effects: &mut effects,
                node: edge.node,
            };
            self.nodes[edge.node.index()].insert(graph.node(edge.node), edge.side, tuple, &mut ctx)?;
            self.apply(effects)?;
        }
        if self.arena.state(tuple) == TupleState::Creating {
            self.arena.set_state(tuple, TupleState::Ok)?;
        }
        Ok(())
    }

    fn retract_tuple(&mut self, tuple: TupleId) -> Result<()> {
        if matches!(self.arena.state(tuple), TupleState::Dying | TupleState::Dead) {
            return Ok(());
        }
        self.arena.set_state(tuple, TupleState::Dying)?;

        // newest first, so derived tuples die before the ones they joined with
        let children = self.arena.take_children(tuple)?;
        for child in children.into_iter().rev() {
            self.retract_tuple(child)?;
        }

        let graph = Arc::clone(&self.graph);
        let node = self.arena.get(tuple)?.node;
        for edge in &graph.node(node).downstream {
            let mut effects = Vec::new();
            let mut ctx = Ctx {
                arena: &mut self.arena,
                inliner: &mut self.inliner,
                effects: &mut effects,
                node: edge.node,
            };
            self.nodes[edge.node.index()].retract(graph.node(edge.node), edge.side, tuple, &mut ctx)?;
            self.apply(effects)?;
        }
        self.arena.remove(tuple)
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::Insert(tuple) if self.arena.contains(tuple) => self.propagate_insert(tuple)?,
                Effect::Insert(_) => {}
                Effect::Retract(tuple) => self.retract_tuple(tuple)?,
            }
        }
        Ok(())
    }
}

impl<Sc: Score> fmt::Debug for ConstraintSession<Sc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintSession")
            .field("facts", &self.fact_count())
            .field("tuples", &self.tuple_count())
            .field("score", &self.calculate_score())
            .finish()
    }
}
