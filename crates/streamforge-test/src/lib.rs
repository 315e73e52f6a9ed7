//! Shared test fixtures for StreamForge crates.
//!
//! This crate provides data types and pure functions for testing.
//! It does NOT depend on `streamforge-scoring`, so the scoring crate can use
//! it as a dev-dependency without a cycle.
//!
//! - [`entity`] - Entities with one optional value
//! - [`nqueens`] - N-Queens data types and a brute-force conflict count
//! - [`shift`] - Shift/employee scheduling data types
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! streamforge-test = { workspace = true }
//! ```

pub mod entity;
pub mod nqueens;
pub mod shift;

pub use entity::{TestEntity, TestSolution};
pub use nqueens::{NQueensSolution, Queen};
pub use shift::{Employee, Shift, ShiftSolution};
