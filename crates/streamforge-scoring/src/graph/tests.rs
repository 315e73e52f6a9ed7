use streamforge_core::{SimpleScore, StreamForgeError};
use streamforge_test::{Queen, TestEntity};

use super::*;
use crate::stream::joiner::{equal, Joiner};
use crate::stream::{Constraint, ConstraintFactory, UniConstraintStream};

fn unassigned_queens(factory: &ConstraintFactory<SimpleScore>) -> UniConstraintStream<SimpleScore, Queen> {
    factory.for_each::<Queen>().filter(|q: &Queen| q.row.is_none())
}

fn beyond_column(factory: &ConstraintFactory<SimpleScore>, limit: i64) -> UniConstraintStream<SimpleScore, Queen> {
    factory.for_each::<Queen>().filter(move |q: &Queen| q.column > limit)
}

fn kind_count<Sc: Score>(graph: &ConstraintGraph<Sc>, kind: &str) -> usize {
    graph
        .node_kind_counts()
        .into_iter()
        .find(|(name, _)| *name == kind)
        .map_or(0, |(_, count)| count)
}

#[test]
fn test_equal_prefixes_share_nodes() {
    let ids = std::cell::RefCell::new(Vec::new());
    let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
        let first = unassigned_queens(factory);
        let second = unassigned_queens(factory);
        ids.borrow_mut().push((first.node_id(), second.node_id()));
        vec![
            first.penalize(SimpleScore::ONE).as_constraint("First"),
            second.penalize(SimpleScore::of(2)).as_constraint("Second"),
        ]
    });
    let graph = graph.unwrap();
    let (first, second) = ids.borrow()[0];

    assert_eq!(first, second);
    // source and filter are each reused once
    assert_eq!(graph.shared_node_hits(), 2);
    assert_eq!(graph.node_count(), 4);
    assert_eq!(kind_count(&graph, "filter"), 1);
    assert_eq!(kind_count(&graph, "sink"), 2);
}

#[test]
fn test_different_predicates_diverge() {
    let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
        vec![
            unassigned_queens(factory).penalize(SimpleScore::ONE).as_constraint("Unassigned"),
            factory
                .for_each::<Queen>()
                .filter(|q: &Queen| q.row.is_some())
                .reward(SimpleScore::ONE)
                .as_constraint("Assigned"),
        ]
    })
    .unwrap();

    assert_eq!(kind_count(&graph, "source"), 1);
    assert_eq!(kind_count(&graph, "filter"), 2);
    assert_eq!(graph.node_count(), 5);
}

#[test]
fn test_capturing_closures_are_never_shared() {
    let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
        vec![
            beyond_column(factory, 3).penalize(SimpleScore::ONE).as_constraint("Beyond 3"),
            beyond_column(factory, 3).penalize(SimpleScore::ONE).as_constraint("Also beyond 3"),
        ]
    })
    .unwrap();

    assert_eq!(kind_count(&graph, "filter"), 2);
    assert_eq!(graph.shared_node_hits(), 1);
}

#[test]
fn test_self_join_gets_both_edges() {
    let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
        vec![factory
            .for_each_unique_pair_with(equal(|q: &Queen| q.row))
            .penalize(SimpleScore::ONE)
            .as_constraint("Row conflict")]
    })
    .unwrap();

    let source = graph.source(TypeId::of::<Queen>()).unwrap();
    let sides: Vec<Side> = graph.node(source).downstream.iter().map(|edge| edge.side).collect();
    assert_eq!(sides, vec![Side::Left, Side::Right]);
    assert_eq!(graph.source_count(), 1);
}

#[test]
fn test_join_without_joiner_is_rejected() {
    let result = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
        vec![factory
            .for_each::<Queen>()
            .join::<TestEntity>(Joiner::all(Vec::new()))
            .penalize(SimpleScore::ONE)
            .as_constraint("Cross product")]
    });
    assert!(matches!(result, Err(StreamForgeError::Config(_))));
}

#[test]
fn test_exists_without_joiner_is_accepted() {
    let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
        vec![factory
            .for_each::<Queen>()
            .if_exists::<TestEntity>(Joiner::all(Vec::new()))
            .penalize(SimpleScore::ONE)
            .as_constraint("Any entity")]
    })
    .unwrap();
    assert_eq!(kind_count(&graph, "if_exists"), 1);
    assert_eq!(graph.source_count(), 2);
}

#[test]
fn test_duplicate_constraint_ids_are_rejected() {
    let result = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
        vec![
            unassigned_queens(factory).penalize(SimpleScore::ONE).as_constraint("Same"),
            factory.for_each::<Queen>().penalize(SimpleScore::ONE).as_constraint("Same"),
        ]
    });
    assert!(matches!(result, Err(StreamForgeError::Config(message)) if message.contains("(Same)")));

    // the package makes ids distinct
    let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
        vec![
            unassigned_queens(factory).penalize(SimpleScore::ONE).as_constraint_in("a", "Same"),
            factory.for_each::<Queen>().penalize(SimpleScore::ONE).as_constraint_in("b", "Same"),
        ]
    })
    .unwrap();
    assert_eq!(graph.constraints()[1].constraint_ref().full_name(), "b/Same");
}

#[test]
fn test_unreturned_constraints_are_pruned() {
    let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
        let _dropped: Constraint = factory
            .for_each::<TestEntity>()
            .penalize(SimpleScore::ONE)
            .as_constraint("Dropped");
        vec![unassigned_queens(factory).penalize(SimpleScore::ONE).as_constraint("Kept")]
    })
    .unwrap();

    assert_eq!(graph.constraint_count(), 1);
    assert_eq!(graph.node_count(), 3);
    assert!(graph.source(TypeId::of::<TestEntity>()).is_none());
    assert!(matches!(
        &graph.node(graph.constraints()[0].sink).kind,
        NodeKind::Sink { constraint: 0, .. }
    ));
}

#[test]
fn test_constraints_of_another_factory_are_rejected() {
    let result = ConstraintGraph::build(&|_: &ConstraintFactory<SimpleScore>| {
        let other = ConstraintFactory::<SimpleScore>::new();
        let _first = other.for_each::<Queen>().penalize(SimpleScore::ONE).as_constraint("First");
        vec![other.for_each::<Queen>().penalize(SimpleScore::ONE).as_constraint("Second")]
    });
    assert!(matches!(result, Err(StreamForgeError::Config(_))));
}

#[test]
fn test_weights_resolve_override_then_default() {
    let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
        vec![
            unassigned_queens(factory).penalize(SimpleScore::of(3)).as_constraint("Fixed"),
            factory.for_each::<Queen>().penalize_configurable().as_constraint("Configurable"),
        ]
    })
    .unwrap();
    let fixed = &graph.constraints()[0];
    let configurable = &graph.constraints()[1];
    assert!(!fixed.is_configurable());
    assert!(configurable.is_configurable());

    let mut overrides = crate::api::ConstraintWeightOverrides::new();
    assert_eq!(fixed.resolve_weight(&overrides), SimpleScore::of(3));
    assert_eq!(configurable.resolve_weight(&overrides), SimpleScore::ZERO);

    overrides.put("Fixed", SimpleScore::of(7));
    overrides.put("Configurable", SimpleScore::of(2));
    assert_eq!(fixed.resolve_weight(&overrides), SimpleScore::of(7));
    assert_eq!(configurable.resolve_weight(&overrides), SimpleScore::of(2));
}

fn queen_row(queen: &Queen) -> Option<i64> {
    queen.row
}

fn queen_column(queen: &Queen) -> i64 {
    queen.column
}

#[test]
fn test_group_nodes_share_by_keys_and_collectors() {
    let ids = std::cell::RefCell::new(Vec::new());
    let graph = ConstraintGraph::build(&|factory: &ConstraintFactory<SimpleScore>| {
        let by_row = factory.for_each::<Queen>().group_by_key(queen_row);
        let by_row_again = factory.for_each::<Queen>().group_by_key(queen_row);
        let by_row_and_column = factory.for_each::<Queen>().group_by_keys(queen_row, queen_column);
        let counted = factory
            .for_each::<Queen>()
            .group_by_keys_with(queen_row, queen_column, crate::stream::collector::count());
        ids.borrow_mut().extend([
            by_row.node_id(),
            by_row_again.node_id(),
            by_row_and_column.node_id(),
            counted.node_id(),
        ]);
        vec![
            by_row.penalize(SimpleScore::ONE).as_constraint("Rows"),
            by_row_again.penalize(SimpleScore::ONE).as_constraint("Rows again"),
            by_row_and_column.penalize(SimpleScore::ONE).as_constraint("Cells"),
            counted.penalize(SimpleScore::ONE).as_constraint("Counted cells"),
        ]
    })
    .unwrap();
    let ids = ids.borrow();

    assert_eq!(ids[0], ids[1]);
    assert_ne!(ids[0], ids[2]);
    assert_ne!(ids[2], ids[3]);
    assert_eq!(kind_count(&graph, "group"), 3);
}
