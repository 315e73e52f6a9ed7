//! Streams over quadruples.

impl_arity_stream!(QuadConstraintStream, [A: 0, B: 1, C: 2, D: 3], last D: 3, prefix [A, B, C]);

impl_stream_join!(QuadConstraintStream, [A, B, C, D], PentaConstraintStream);
