use std::sync::Arc;

use smallvec::smallvec;

use streamforge_core::SimpleScore;

use super::*;
use crate::api::ConstraintWeightOverrides;
use crate::fact::FactRef;
use crate::graph::ConstraintGraph;
use crate::stream::collector::{AccumulatorSupplier, CountAccumulator};
use crate::stream::joiner::{self, CompiledJoiner, Joiner};
use crate::stream::{Constraint, ConstraintFactory};
use crate::tuple::TupleState;

struct Harness {
    arena: TupleArena,
    inliner: ScoreInliner<SimpleScore>,
    effects: Vec<Effect>,
}

impl Harness {
    fn new() -> Self {
        let graph = ConstraintGraph::build(&|_: &ConstraintFactory<SimpleScore>| Vec::<Constraint>::new()).unwrap();
        Self {
            arena: TupleArena::new(),
            inliner: ScoreInliner::new(&graph, &ConstraintWeightOverrides::new(), false),
            effects: Vec::new(),
        }
    }

    fn ctx(&mut self) -> Ctx<'_, SimpleScore> {
        Ctx {
            arena: &mut self.arena,
            inliner: &mut self.inliner,
            effects: &mut self.effects,
            node: NodeId::new(1),
        }
    }

    fn source(&mut self, value: i32) -> TupleId {
        self.arena.create(NodeId::new(0), smallvec![FactRef::value(value)], &[]).unwrap()
    }

    fn drain(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn inserted_facts(&self, effects: &[Effect]) -> Vec<Vec<i32>> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Insert(id) => Some(
                    self.arena
                        .facts(*id)
                        .unwrap()
                        .iter()
                        .map(|f| *f.downcast_ref::<i32>().unwrap())
                        .collect(),
                ),
                Effect::Retract(_) => None,
            })
            .collect()
    }
}

fn equal_joiner() -> CompiledJoiner {
    let joiner: Joiner<(i32,), i32> = joiner::equal(|x: &i32| *x % 10);
    CompiledJoiner::compile(joiner.into_parts())
}

#[test]
fn test_join_emits_matching_pairs_from_both_sides() {
    let mut harness = Harness::new();
    let joiner = equal_joiner();
    let mut state = JoinState::new(&joiner);

    let l1 = harness.source(1);
    let l2 = harness.source(2);
    let r11 = harness.source(11);
    state.insert(&joiner, Side::Left, l1, &mut harness.ctx()).unwrap();
    state.insert(&joiner, Side::Left, l2, &mut harness.ctx()).unwrap();
    assert!(harness.drain().is_empty());

    state.insert(&joiner, Side::Right, r11, &mut harness.ctx()).unwrap();
    let effects = harness.drain();
    assert_eq!(harness.inserted_facts(&effects), vec![vec![1, 11]]);
    assert_eq!(state.len(), 3);

    state.retract(Side::Left, l1).unwrap();
    assert_eq!(state.len(), 2);
    assert!(state.retract(Side::Left, l1).is_err());
}

#[test]
fn test_join_skips_dying_partners() {
    let mut harness = Harness::new();
    let joiner = equal_joiner();
    let mut state = JoinState::new(&joiner);

    let left = harness.source(3);
    state.insert(&joiner, Side::Left, left, &mut harness.ctx()).unwrap();
    harness.arena.set_state(left, TupleState::Dying).unwrap();

    let right = harness.source(13);
    state.insert(&joiner, Side::Right, right, &mut harness.ctx()).unwrap();
    assert!(harness.drain().is_empty());
}

#[test]
fn test_if_exists_follows_match_count() {
    let mut harness = Harness::new();
    let joiner = equal_joiner();
    let mut state = ExistsState::new(&joiner);

    let left = harness.source(4);
    state.insert(&joiner, true, Side::Left, left, &mut harness.ctx()).unwrap();
    assert!(harness.drain().is_empty());

    let first = harness.source(14);
    let second = harness.source(24);
    state.insert(&joiner, true, Side::Right, first, &mut harness.ctx()).unwrap();
    let effects = harness.drain();
    assert_eq!(harness.inserted_facts(&effects), vec![vec![4]]);
    let Effect::Insert(output) = effects[0] else {
        panic!("expected an insert, got {:?}", effects[0]);
    };

    // a second match changes nothing
    state.insert(&joiner, true, Side::Right, second, &mut harness.ctx()).unwrap();
    assert!(harness.drain().is_empty());

    state.retract(&joiner, true, Side::Right, first, &mut harness.ctx()).unwrap();
    assert!(harness.drain().is_empty());
    state.retract(&joiner, true, Side::Right, second, &mut harness.ctx()).unwrap();
    assert_eq!(harness.drain(), vec![Effect::Retract(output)]);
}

#[test]
fn test_if_not_exists_emits_unmatched_left() {
    let mut harness = Harness::new();
    let joiner = equal_joiner();
    let mut state = ExistsState::new(&joiner);

    let blocker = harness.source(15);
    state.insert(&joiner, false, Side::Right, blocker, &mut harness.ctx()).unwrap();

    let blocked = harness.source(5);
    let free = harness.source(6);
    state.insert(&joiner, false, Side::Left, blocked, &mut harness.ctx()).unwrap();
    state.insert(&joiner, false, Side::Left, free, &mut harness.ctx()).unwrap();
    let effects = harness.drain();
    assert_eq!(harness.inserted_facts(&effects), vec![vec![6]]);

    state.retract(&joiner, false, Side::Right, blocker, &mut harness.ctx()).unwrap();
    let effects = harness.drain();
    assert_eq!(harness.inserted_facts(&effects), vec![vec![5]]);
}

#[test]
fn test_group_reemits_only_on_change() {
    let mut harness = Harness::new();
    let key: crate::stream::function::TupleFn<FactRef> =
        crate::stream::function::tuple_fn(|facts| Ok(FactRef::value(*crate::fact::fact_at::<i32>(facts, 0)? % 2)));
    let count: AccumulatorSupplier = Arc::new(|| Box::new(CountAccumulator::default()) as Box<dyn crate::stream::collector::Accumulator>);
    let keys = vec![key];
    let collectors = vec![count];
    let mut state = GroupState::default();

    let a = harness.source(1);
    let b = harness.source(3);
    state.insert(&keys, &collectors, a, &mut harness.ctx()).unwrap();
    let first = harness.drain();
    assert_eq!(first.len(), 1);
    let Effect::Insert(first_output) = first[0] else {
        panic!("expected an insert, got {:?}", first[0]);
    };

    state.insert(&keys, &collectors, b, &mut harness.ctx()).unwrap();
    let second = harness.drain();
    assert_eq!(second.len(), 2);
    assert_eq!(second[0], Effect::Retract(first_output));
    let Effect::Insert(second_output) = second[1] else {
        panic!("expected an insert, got {:?}", second[1]);
    };
    let facts = harness.arena.facts(second_output).unwrap();
    assert_eq!(facts[0].downcast_ref::<i32>(), Some(&1));
    assert_eq!(facts[1].downcast_ref::<usize>(), Some(&2));

    // keys alone do not change when the group grows
    let mut keys_only = GroupState::default();
    keys_only.insert(&keys, &[], a, &mut harness.ctx()).unwrap();
    keys_only.insert(&keys, &[], b, &mut harness.ctx()).unwrap();
    assert_eq!(harness.drain().len(), 1);

    state.retract(a, &mut harness.ctx()).unwrap();
    state.retract(b, &mut harness.ctx()).unwrap();
    assert_eq!(state.len(), 0);
    assert!(state.retract(a, &mut harness.ctx()).is_err());
}
