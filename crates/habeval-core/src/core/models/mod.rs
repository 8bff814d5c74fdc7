//! # Core Models Module
//!
//! Plain data describing a layout evaluation: the habitat volume, the module
//! boxes placed inside it, the request that bundles them, and the result
//! values produced by the engine.
//!
//! All types are value types created fresh for each evaluation. They carry
//! `serde` derives whose field names match the JSON documents exchanged with
//! layout editors (`habitatDimensions`, `modulePlacements`, `moduleId`, ...).
//!
//! - [`ids`] - Module identifiers shared with the catalog
//! - [`habitat`] - Habitat interior dimensions
//! - [`placement`] - Oriented module boxes (center, extents, Euler rotation)
//! - [`request`] - The evaluation request and its well-formedness check
//! - [`evaluation`] - Validation verdict, scores, feedback and the final result

pub mod evaluation;
pub mod habitat;
pub mod ids;
pub mod placement;
pub mod request;
