//! Joiners between a tri stream `(A, B, C)` and a fact `D`.

joiner_module!([A: 0, B: 1, C: 2], D);
