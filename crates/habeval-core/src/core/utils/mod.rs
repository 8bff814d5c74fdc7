//! Geometric helpers shared by the validator and the scoring tasks.

pub mod geometry;
