//! Validation and scoring tasks run against an [`EvaluationContext`](super::context::EvaluationContext).
//!
//! Validation always runs first; the three scoring tasks only run for layouts
//! that passed it, and each produces one sub-score in `[0, 100]`.

pub mod comfort;
pub mod efficiency;
pub mod space_utilization;
pub mod validation;
