//! # Workflows Module
//!
//! Top-level entry points of the library.
//!
//! - **Evaluate** ([`evaluate`]) - Validates, scores and annotates one layout, with an
//!   optional context advisor applied to valid results.
//! - **Batch** ([`batch`]) - Evaluates many layouts, in parallel with the `parallel`
//!   feature, reporting progress as each one finishes.
//! - **Placement check** ([`placement_check`]) - Tests one candidate module against the
//!   habitat bounds and the modules already placed, for interactive layout editing.

pub mod batch;
pub mod evaluate;
pub mod placement_check;
