//! Joiners between a quad stream `(A, B, C, D)` and a fact `E`.

joiner_module!([A: 0, B: 1, C: 2, D: 3], E);
