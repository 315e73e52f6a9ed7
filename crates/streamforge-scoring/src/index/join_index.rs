// Hash-multimap index over the tuples of one join side.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use indexmap::IndexSet;

use super::{CompositeKey, OrdKey};
use crate::stream::joiner::JoinerType;
use crate::tuple::TupleId;

/// Which input of a join a tuple arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Side {
    Left,
    Right,
}

/// The keys a tuple was indexed under, kept so removal never re-extracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexEntry {
    pub(crate) equal: CompositeKey,
    pub(crate) ordered: Option<OrdKey>,
}

enum Bucket {
    Flat(IndexSet<TupleId>),
    Ranged(BTreeMap<OrdKey, IndexSet<TupleId>>),
}

impl Bucket {
    fn is_empty(&self) -> bool {
        match self {
            Bucket::Flat(tuples) => tuples.is_empty(),
            Bucket::Ranged(ranges) => ranges.is_empty(),
        }
    }
}

pub(crate) struct JoinIndex {
    side: Side,
    comparison: Option<JoinerType>,
    buckets: HashMap<CompositeKey, Bucket>,
    len: usize,
}

impl JoinIndex {
    /// Creates an index storing the tuples of `side`.
    ///
    /// `comparison` is the joiner type ordering each bucket, read as
    /// `left OP right`.
    pub(crate) fn new(side: Side, comparison: Option<JoinerType>) -> Self {
        Self {
            side,
            comparison,
            buckets: HashMap::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn put(&mut self, entry: &IndexEntry, tuple: TupleId) {
        let ranged = self.comparison.is_some();
        let bucket = self.buckets.entry(entry.equal.clone()).or_insert_with(|| {
            if ranged {
                Bucket::Ranged(BTreeMap::new())
            } else {
                Bucket::Flat(IndexSet::new())
            }
        });
        let inserted = match (bucket, &entry.ordered) {
            (Bucket::Flat(tuples), _) => tuples.insert(tuple),
            (Bucket::Ranged(ranges), Some(key)) => ranges.entry(key.clone()).or_default().insert(tuple),
            // a ranged index always receives an ordered key
            (Bucket::Ranged(_), None) => false,
        };
        if inserted {
            self.len += 1;
        }
    }

    /// Removes a tuple, returning false if it was not indexed under `entry`.
    pub(crate) fn remove(&mut self, entry: &IndexEntry, tuple: TupleId) -> bool {
        let Some(bucket) = self.buckets.get_mut(&entry.equal) else {
            return false;
        };
        let removed = match (&mut *bucket, &entry.ordered) {
            (Bucket::Flat(tuples), _) => tuples.swap_remove(&tuple),
            (Bucket::Ranged(ranges), Some(key)) => match ranges.get_mut(key) {
                Some(tuples) => {
                    let removed = tuples.swap_remove(&tuple);
                    if tuples.is_empty() {
                        ranges.remove(key);
                    }
                    removed
                }
                None => false,
            },
            (Bucket::Ranged(_), None) => false,
        };
        if bucket.is_empty() {
            self.buckets.remove(&entry.equal);
        }
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Collects the stored tuples matching a query entry from the opposite side.
    pub(crate) fn find(&self, query: &IndexEntry, out: &mut Vec<TupleId>) {
        let Some(bucket) = self.buckets.get(&query.equal) else {
            return;
        };
        match bucket {
            Bucket::Flat(tuples) => out.extend(tuples.iter().copied()),
            Bucket::Ranged(ranges) => {
                let (Some(comparison), Some(key)) = (self.comparison, query.ordered.as_ref()) else {
                    return;
                };
                for tuples in ranges.range(self.bounds(comparison, key)).map(|(_, tuples)| tuples) {
                    out.extend(tuples.iter().copied());
                }
            }
        }
    }

    // Bounds on the stored keys for `left OP right`, given the query key.
    fn bounds<'a>(&self, comparison: JoinerType, query: &'a OrdKey) -> (Bound<&'a OrdKey>, Bound<&'a OrdKey>) {
        use Bound::{Excluded, Included, Unbounded};
        match (self.side, comparison) {
            (Side::Right, JoinerType::LessThan) => (Excluded(query), Unbounded),
            (Side::Right, JoinerType::LessThanOrEqual) => (Included(query), Unbounded),
            (Side::Right, JoinerType::GreaterThan) => (Unbounded, Excluded(query)),
            (Side::Right, JoinerType::GreaterThanOrEqual) => (Unbounded, Included(query)),
            (Side::Left, JoinerType::LessThan) => (Unbounded, Excluded(query)),
            (Side::Left, JoinerType::LessThanOrEqual) => (Unbounded, Included(query)),
            (Side::Left, JoinerType::GreaterThan) => (Excluded(query), Unbounded),
            (Side::Left, JoinerType::GreaterThanOrEqual) => (Included(query), Unbounded),
            (_, JoinerType::Equal | JoinerType::Filtering) => (Unbounded, Unbounded),
        }
    }
}
