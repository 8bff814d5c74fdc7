use crate::core::catalog::ModuleTag;
use crate::core::scoring::utility::distance_utility;
use crate::core::utils::geometry::distance;
use crate::engine::context::{EvaluationContext, ensure_finite};
use crate::engine::error::EngineError;
use itertools::Itertools;
use tracing::{debug, instrument};

/// Mean spacing below which work areas count as crowded, in meters.
pub const IDEAL_MIN_WORK_DISTANCE: f64 = 2.0;
/// Fraction of the habitat diagonal beyond which work areas are too spread out.
pub const ACCEPTABLE_MAX_DIAGONAL_FRACTION: f64 = 0.7;

const DISTANCE_WEIGHT: f64 = 0.4;
const MODULE_SIZE_WEIGHT: f64 = 0.6;

/// Task efficiency of the work areas.
///
/// Blends a closeness utility of the mean pairwise work-area distance with the
/// mean half of each work module's smallest extent (in meters, not
/// normalized), then clamps to `[0, 100]`.
#[instrument(skip_all, name = "efficiency_task")]
pub fn run(context: &EvaluationContext) -> Result<f64, EngineError> {
    let work = context.with_tag(ModuleTag::WorkSpace);
    if work.len() < 2 {
        debug!(
            work_modules = work.len(),
            "Fewer than two work modules; efficiency is maximal."
        );
        return Ok(100.0);
    }

    let distances: Vec<f64> = work
        .iter()
        .tuple_combinations()
        .map(|(a, b)| distance(a.placement, b.placement))
        .collect();
    let average_distance = distances.iter().sum::<f64>() / distances.len() as f64;

    let acceptable_max = context.habitat().diagonal() * ACCEPTABLE_MAX_DIAGONAL_FRACTION;
    let utility = distance_utility(average_distance, IDEAL_MIN_WORK_DISTANCE, acceptable_max);

    let average_d_good = work
        .iter()
        .map(|w| w.placement.size.min_extent() / 2.0)
        .sum::<f64>()
        / work.len() as f64;

    let raw = (DISTANCE_WEIGHT * utility + MODULE_SIZE_WEIGHT * average_d_good) * 100.0;
    debug!(
        average_distance,
        distance_utility = utility,
        average_d_good,
        raw,
        "Computed efficiency terms."
    );

    ensure_finite("efficiency score", raw).map(|s| s.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ModuleTag::*;
    use crate::engine::config::EvaluationConfig;
    use crate::engine::tasks::test_support::{catalog, cube, entry, request};

    const EPS: f64 = 1e-9;

    #[test]
    fn single_work_module_is_fully_efficient() {
        let catalog = catalog(vec![entry(1, 1.0, &[WorkSpace]), entry(2, 1.0, &[RestSpace])]);
        let config = EvaluationConfig::default();
        let layout = request(
            (20.0, 8.0, 3.0),
            vec![cube(1, (2.0, 2.0, 1.0), 0.5), cube(2, (18.0, 2.0, 1.0), 0.5)],
        );
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();
        assert_eq!(run(&ctx).unwrap(), 100.0);
    }

    #[test]
    fn crowded_small_work_modules_score_low() {
        // Two 0.2 m cubes 1 m apart: utility 0.25, d_good 0.1 -> (0.1 + 0.06) * 100.
        let catalog = catalog(vec![entry(1, 0.001, &[WorkSpace]), entry(2, 0.001, &[WorkSpace])]);
        let config = EvaluationConfig::default();
        let layout = request(
            (20.0, 8.0, 3.0),
            vec![cube(1, (2.0, 2.0, 1.0), 0.2), cube(2, (3.0, 2.0, 1.0), 0.2)],
        );
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();
        assert!((run(&ctx).unwrap() - 16.0).abs() < EPS);
    }

    #[test]
    fn large_work_modules_saturate_at_one_hundred() {
        let catalog = catalog(vec![entry(1, 1.0, &[WorkSpace]), entry(2, 1.0, &[WorkSpace])]);
        let config = EvaluationConfig::default();
        let layout = request(
            (20.0, 8.0, 3.0),
            vec![cube(1, (2.0, 2.0, 1.5), 3.0), cube(2, (6.0, 2.0, 1.5), 3.0)],
        );
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();
        assert_eq!(run(&ctx).unwrap(), 100.0);
    }

    #[test]
    fn sprawling_work_modules_lose_distance_credit() {
        // A 30x40x1 habitat allows about 35 m; 39 m apart earns no distance credit,
        // leaving only 0.6 * 0.25 m of module-size credit.
        let catalog = catalog(vec![entry(1, 0.01, &[WorkSpace]), entry(2, 0.01, &[WorkSpace])]);
        let config = EvaluationConfig::default();
        let layout = request(
            (30.0, 40.0, 1.0),
            vec![cube(1, (1.0, 0.5, 0.5), 0.5), cube(2, (1.0, 39.5, 0.5), 0.5)],
        );
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();
        assert!((run(&ctx).unwrap() - 15.0).abs() < EPS);
    }
}
