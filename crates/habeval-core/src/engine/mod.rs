//! # Engine Module
//!
//! The evaluation engine: configuration, the per-request context, the
//! validation and scoring tasks, feedback composition, and the optional
//! context advisor.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Required module count, penalty score, overlap
//!   enforcement, catalog miss policy and score weights
//! - **Context** ([`context`]) - Placements resolved against the module catalog
//! - **Tasks** ([`tasks`]) - Constraint validation and the three sub-scores
//! - **Feedback** ([`feedback`]) - Threshold-based strengths, improvements and errors
//! - **Advisor** ([`advisor`]) - Mission weighting and research notes for valid layouts
//! - **Progress Monitoring** ([`progress`]) - Batch progress events
//! - **Error Handling** ([`error`]) - Faults that abort an evaluation

pub mod advisor;
pub mod config;
pub mod context;
pub mod error;
pub mod feedback;
pub mod progress;
pub mod tasks;
