//! Join indexes.
//!
//! Every join and existence node owns one [`JoinIndex`] per side. The equal
//! joiners of a composite joiner form a hash key that selects a bucket; the
//! first comparison joiner, if any, orders the bucket so that a lookup only
//! visits the tuples on the opposite side that satisfy the comparison.

mod join_index;
mod keys;

#[cfg(test)]
mod tests;

pub(crate) use join_index::{IndexEntry, JoinIndex, Side};
pub use keys::{HashKey, OrdKey};

pub(crate) type CompositeKey = smallvec::SmallVec<[HashKey; 2]>;
