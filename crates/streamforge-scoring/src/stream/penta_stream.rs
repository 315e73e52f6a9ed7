//! Streams over quintuples, the widest tuples the network carries.
//!
//! Penta streams cannot be joined further.

impl_arity_stream!(
    PentaConstraintStream,
    [A: 0, B: 1, C: 2, D: 3, E: 4],
    last E: 4,
    prefix [A, B, C, D]
);
