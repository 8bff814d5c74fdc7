//! # Core Module
//!
//! Stateless building blocks of layout evaluation.
//!
//! - **Data Models** ([`models`]) - Habitat, placements, requests and evaluation results
//! - **Module Catalog** ([`catalog`]) - Module types, their minimum volumes and tags
//! - **Geometry** ([`utils`]) - Oriented-box vertices, containment and overlap tests
//! - **Utility Curves** ([`scoring`]) - Mappings from measurements to `[0, 100]` scores
//!
//! Nothing in this layer performs I/O during an evaluation; catalog files are
//! read once, up front.

pub mod catalog;
pub mod models;
pub mod scoring;
pub mod utils;
