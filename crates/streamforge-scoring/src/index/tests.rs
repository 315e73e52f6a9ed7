use smallvec::smallvec;

use super::*;
use crate::fact::FactRef;
use crate::graph::NodeId;
use crate::stream::joiner::JoinerType;
use crate::tuple::{TupleArena, TupleId};

fn tuples(count: usize) -> (TupleArena, Vec<TupleId>) {
    let mut arena = TupleArena::new();
    let ids = (0..count)
        .map(|i| {
            arena
                .create(NodeId::new(0), smallvec![FactRef::value(i)], &[])
                .unwrap()
        })
        .collect();
    (arena, ids)
}

fn entry(group: &'static str, ordered: Option<i64>) -> IndexEntry {
    IndexEntry {
        equal: smallvec![HashKey::new(group)],
        ordered: ordered.map(OrdKey::new),
    }
}

fn found(index: &JoinIndex, query: &IndexEntry) -> Vec<TupleId> {
    let mut out = Vec::new();
    index.find(query, &mut out);
    out.sort();
    out
}

#[test]
fn test_flat_index_matches_equal_keys_only() {
    let (_arena, ids) = tuples(3);
    let mut index = JoinIndex::new(Side::Right, None);
    index.put(&entry("a", None), ids[0]);
    index.put(&entry("a", None), ids[1]);
    index.put(&entry("b", None), ids[2]);

    assert_eq!(index.len(), 3);
    assert_eq!(found(&index, &entry("a", None)), vec![ids[0], ids[1]]);
    assert_eq!(found(&index, &entry("b", None)), vec![ids[2]]);
    assert!(found(&index, &entry("c", None)).is_empty());
}

#[test]
fn test_remove_drops_empty_buckets() {
    let (_arena, ids) = tuples(2);
    let mut index = JoinIndex::new(Side::Left, None);
    index.put(&entry("a", None), ids[0]);

    assert!(!index.remove(&entry("b", None), ids[0]));
    assert!(!index.remove(&entry("a", None), ids[1]));
    assert!(index.remove(&entry("a", None), ids[0]));
    assert_eq!(index.len(), 0);
    assert!(found(&index, &entry("a", None)).is_empty());
}

#[test]
fn test_right_side_range_for_less_than() {
    // stored right values 1..=5, query left = 3: 3 < right
    let (_arena, ids) = tuples(5);
    let mut index = JoinIndex::new(Side::Right, Some(JoinerType::LessThan));
    for (value, id) in (1..=5).zip(&ids) {
        index.put(&entry("a", Some(value)), *id);
    }

    assert_eq!(found(&index, &entry("a", Some(3))), vec![ids[3], ids[4]]);
    assert!(found(&index, &entry("b", Some(3))).is_empty());

    let mut inclusive = JoinIndex::new(Side::Right, Some(JoinerType::LessThanOrEqual));
    for (value, id) in (1..=5).zip(&ids) {
        inclusive.put(&entry("a", Some(value)), *id);
    }
    assert_eq!(found(&inclusive, &entry("a", Some(3))), vec![ids[2], ids[3], ids[4]]);
}

#[test]
fn test_left_side_range_for_less_than() {
    // stored left values 1..=5, query right = 3: left < 3
    let (_arena, ids) = tuples(5);
    let mut index = JoinIndex::new(Side::Left, Some(JoinerType::LessThan));
    for (value, id) in (1..=5).zip(&ids) {
        index.put(&entry("a", Some(value)), *id);
    }
    assert_eq!(found(&index, &entry("a", Some(3))), vec![ids[0], ids[1]]);
}

#[test]
fn test_greater_than_ranges() {
    let (_arena, ids) = tuples(5);
    let mut right = JoinIndex::new(Side::Right, Some(JoinerType::GreaterThan));
    let mut left = JoinIndex::new(Side::Left, Some(JoinerType::GreaterThanOrEqual));
    for (value, id) in (1..=5).zip(&ids) {
        right.put(&entry("a", Some(value)), *id);
        left.put(&entry("a", Some(value)), *id);
    }

    // 3 > right
    assert_eq!(found(&right, &entry("a", Some(3))), vec![ids[0], ids[1]]);
    // left >= 3
    assert_eq!(found(&left, &entry("a", Some(3))), vec![ids[2], ids[3], ids[4]]);
}

#[test]
fn test_ranged_remove_keeps_other_keys() {
    let (_arena, ids) = tuples(2);
    let mut index = JoinIndex::new(Side::Right, Some(JoinerType::LessThan));
    index.put(&entry("a", Some(10)), ids[0]);
    index.put(&entry("a", Some(20)), ids[1]);

    assert!(!index.remove(&entry("a", Some(20)), ids[0]));
    assert!(index.remove(&entry("a", Some(10)), ids[0]));
    assert_eq!(found(&index, &entry("a", Some(0))), vec![ids[1]]);
    assert_eq!(index.len(), 1);
}
