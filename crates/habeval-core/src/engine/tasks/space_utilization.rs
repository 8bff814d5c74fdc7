use crate::core::scoring::utility::{nhv_ratio_score, utilization_score};
use crate::engine::context::{EvaluationContext, ensure_finite};
use crate::engine::error::EngineError;
use tracing::{debug, instrument};

/// Equal blend of per-module NHV sizing and whole-habitat occupancy.
#[instrument(skip_all, name = "space_utilization_task")]
pub fn run(context: &EvaluationContext) -> Result<f64, EngineError> {
    let nhv_efficiency = nhv_efficiency(context);
    let percent = utilization_percent(context);
    let overall_utilization = utilization_score(percent);

    debug!(
        nhv_efficiency,
        utilization_percent = percent,
        overall_utilization,
        "Computed space utilization terms."
    );

    let score = 0.5 * nhv_efficiency + 0.5 * overall_utilization;
    ensure_finite("space utilization score", score).map(|s| s.clamp(0.0, 100.0))
}

/// Mean NHV ratio score over resolved placements, 0 when none resolved.
pub fn nhv_efficiency(context: &EvaluationContext) -> f64 {
    let resolved = context.resolved();
    if resolved.is_empty() {
        return 0.0;
    }
    resolved
        .iter()
        .map(|r| nhv_ratio_score(r.nhv_ratio()))
        .sum::<f64>()
        / resolved.len() as f64
}

/// Catalog minimum volumes of all placements as a percentage of the habitat volume.
///
/// Every placement entry counts, so a module placed twice contributes twice.
pub fn utilization_percent(context: &EvaluationContext) -> f64 {
    let total_nhv: f64 = context
        .resolved()
        .iter()
        .map(|r| r.entry.required_min_volume)
        .sum();
    total_nhv / context.habitat().volume() * 100.0
}
