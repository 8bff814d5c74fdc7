//! # Habeval Core Library
//!
//! Evaluates proposed 3-D arrangements of catalog equipment modules inside a
//! rectangular habitat. Each evaluation yields a validity verdict, a composite
//! score (space utilization, comfort, work efficiency) and human-readable
//! feedback.
//!
//! ## Architecture
//!
//! The library follows a three-layer layout.
//!
//! - **[`core`]: The Foundation.** Value types for habitats, placements, requests and
//!   results, the module catalog, oriented-box geometry and the pure utility curves
//!   the scores are built from.
//!
//! - **[`engine`]: The Logic Core.** Resolves placements against the catalog, runs the
//!   structural validation and the three scoring tasks, composes feedback, and hosts
//!   the optional context advisor (mission weighting, research notes).
//!
//! - **[`workflows`]: The Public API.** [`workflows::evaluate::run`] evaluates a single
//!   layout and never fails: faults become a `CalculationError` result.
//!   [`workflows::batch::run`] evaluates many layouts and reports progress.
//!   [`workflows::placement_check::run`] tests a single module against a partial layout.
//!
//! ## Example
//!
//! ```
//! use habeval::core::catalog::ModuleRegistry;
//! use habeval::core::models::habitat::HabitatDimensions;
//! use habeval::core::models::ids::ModuleId;
//! use habeval::core::models::placement::{PlacedModule, Position, Size};
//! use habeval::core::models::request::LayoutRequest;
//! use habeval::engine::config::EvaluationConfig;
//! use habeval::workflows::evaluate;
//!
//! let catalog = ModuleRegistry::builtin().unwrap();
//! let request = LayoutRequest::new(
//!     HabitatDimensions::new(20.0, 8.0, 3.0),
//!     vec![PlacedModule::new(
//!         ModuleId(1),
//!         Position::new(2.0, 2.0, 1.5),
//!         Size::new(1.5, 1.5, 1.5),
//!     )],
//! );
//!
//! let result = evaluate::run(&request, &catalog, &EvaluationConfig::default());
//! // A single module is not a complete layout.
//! assert!(!result.is_valid());
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
