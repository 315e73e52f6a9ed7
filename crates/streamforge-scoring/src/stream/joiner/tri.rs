//! Joiners between a bi stream `(A, B)` and a fact `C`.
//!
//! ```
//! use streamforge_scoring::stream::joiner::tri;
//!
//! struct Lesson { instructor: u32, slot: u32 }
//! struct Room { capacity: u32 }
//!
//! let joiner = tri::equal(|a: &Lesson, _: &Lesson| a.instructor, |r: &Room| r.capacity)
//!     .and(tri::filtering(|a: &Lesson, b: &Lesson, _: &Room| a.slot == b.slot));
//! assert_eq!(joiner.len(), 2);
//! ```

joiner_module!([A: 0, B: 1], C);
