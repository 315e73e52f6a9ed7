//! Streams over triples.

impl_arity_stream!(TriConstraintStream, [A: 0, B: 1, C: 2], last C: 2, prefix [A, B]);

impl_stream_join!(TriConstraintStream, [A, B, C], QuadConstraintStream);
