use crate::core::models::evaluation::ValidationResult;
use crate::core::models::ids::ModuleId;
use crate::core::utils::geometry::{boxes_overlap, rotated_vertices};
use crate::engine::context::EvaluationContext;
use itertools::Itertools;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// A placement whose box is smaller than its module's minimum volume.
#[derive(Debug, Clone, PartialEq)]
pub struct NhvShortfall {
    pub module_id: ModuleId,
    pub name: String,
    pub placed_volume: f64,
    pub required_volume: f64,
}

impl NhvShortfall {
    pub fn deficit(&self) -> f64 {
        self.required_volume - self.placed_volume
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapPair {
    pub first: ModuleId,
    pub second: ModuleId,
}

/// The validation verdict together with the details needed to explain it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub result: ValidationResult,
    pub distinct_modules: usize,
    pub nhv_shortfalls: Vec<NhvShortfall>,
    /// Overlapping pairs found by the vertex heuristic, whether or not the
    /// check was enforced.
    pub overlaps: Vec<OverlapPair>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }
}

#[instrument(skip_all, name = "validation_task")]
pub fn run(context: &EvaluationContext) -> ValidationReport {
    let distinct_modules = count_distinct_modules(context);
    let all_modules_used = distinct_modules == context.config.required_module_count;
    debug!(
        distinct = distinct_modules,
        required = context.config.required_module_count,
        "Checked module count."
    );

    let fit_in_habitat = check_fit_in_habitat(context);
    let nhv_shortfalls = find_nhv_shortfalls(context);
    let overlaps = find_overlaps(context);

    let no_overlapping = if context.config.enforce_overlap_check {
        overlaps.is_empty()
    } else {
        if !overlaps.is_empty() {
            debug!(
                count = overlaps.len(),
                "Overlapping modules detected; overlap check is not enforced."
            );
        }
        true
    };

    let result = ValidationResult::new(
        all_modules_used,
        no_overlapping,
        fit_in_habitat,
        nhv_shortfalls.is_empty(),
    );
    if !result.is_valid() {
        warn!(?result, "Layout failed validation.");
    }

    ValidationReport {
        result,
        distinct_modules,
        nhv_shortfalls,
        overlaps,
    }
}

fn count_distinct_modules(context: &EvaluationContext) -> usize {
    context
        .placements()
        .iter()
        .map(|p| p.module_id)
        .collect::<HashSet<_>>()
        .len()
}

fn check_fit_in_habitat(context: &EvaluationContext) -> bool {
    let habitat = context.habitat();
    for placement in context.placements() {
        if let Some(vertex) = rotated_vertices(placement)
            .into_iter()
            .find(|v| !habitat.contains(v))
        {
            debug!(
                module_id = %placement.module_id,
                x = vertex.x,
                y = vertex.y,
                z = vertex.z,
                "Module vertex lies outside the habitat."
            );
            return false;
        }
    }
    true
}

fn find_nhv_shortfalls(context: &EvaluationContext) -> Vec<NhvShortfall> {
    context
        .resolved()
        .iter()
        .filter(|r| r.placement.volume() < r.entry.required_min_volume)
        .map(|r| {
            let shortfall = NhvShortfall {
                module_id: r.placement.module_id,
                name: r.entry.name.clone(),
                placed_volume: r.placement.volume(),
                required_volume: r.entry.required_min_volume,
            };
            warn!(
                module_id = %shortfall.module_id,
                placed = shortfall.placed_volume,
                required = shortfall.required_volume,
                "Module is below its minimum NHV."
            );
            shortfall
        })
        .collect()
}

fn find_overlaps(context: &EvaluationContext) -> Vec<OverlapPair> {
    context
        .placements()
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| boxes_overlap(a, b))
        .map(|(a, b)| OverlapPair {
            first: a.module_id,
            second: b.module_id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ModuleRegistry;
    use crate::engine::config::EvaluationConfig;
    use crate::engine::tasks::test_support::{catalog, cube, entry, request};

    fn config_for(count: usize) -> EvaluationConfig {
        EvaluationConfig {
            required_module_count: count,
            ..EvaluationConfig::default()
        }
    }

    #[test]
    fn all_modules_used_counts_distinct_ids() {
        let catalog = ModuleRegistry::default();
        let config = EvaluationConfig::default();

        let exact = request(
            (100.0, 100.0, 10.0),
            (1..=18).map(|id| cube(id, (id as f64 * 5.0, 5.0, 5.0), 1.0)).collect(),
        );
        let ctx = EvaluationContext::resolve(&exact, &catalog, &config).unwrap();
        assert!(run(&ctx).result.all_modules_used);

        let short = request(
            (100.0, 100.0, 10.0),
            (1..=17).map(|id| cube(id, (id as f64 * 5.0, 5.0, 5.0), 1.0)).collect(),
        );
        let ctx = EvaluationContext::resolve(&short, &catalog, &config).unwrap();
        assert!(!run(&ctx).result.all_modules_used);

        let over = request(
            (100.0, 100.0, 10.0),
            (1..=19).map(|id| cube(id, (id as f64 * 5.0, 5.0, 5.0), 1.0)).collect(),
        );
        let ctx = EvaluationContext::resolve(&over, &catalog, &config).unwrap();
        let report = run(&ctx);
        assert!(!report.result.all_modules_used);
        assert_eq!(report.distinct_modules, 19);
    }

    #[test]
    fn duplicate_ids_do_not_count_twice() {
        let catalog = ModuleRegistry::default();
        let config = config_for(2);
        let layout = request(
            (20.0, 20.0, 5.0),
            vec![
                cube(1, (2.0, 2.0, 2.0), 1.0),
                cube(1, (5.0, 2.0, 2.0), 1.0),
                cube(2, (8.0, 2.0, 2.0), 1.0),
            ],
        );
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();
        let report = run(&ctx);
        assert_eq!(report.distinct_modules, 2);
        assert!(report.result.all_modules_used);
    }

    #[test]
    fn fit_in_habitat_uses_closed_interval() {
        let catalog = ModuleRegistry::default();
        let config = config_for(1);

        let flush = request((10.0, 10.0, 10.0), vec![cube(1, (9.0, 5.0, 5.0), 2.0)]);
        let ctx = EvaluationContext::resolve(&flush, &catalog, &config).unwrap();
        assert!(run(&ctx).result.fit_in_habitat);

        let beyond = request((10.0, 10.0, 10.0), vec![cube(1, (9.0001, 5.0, 5.0), 2.0)]);
        let ctx = EvaluationContext::resolve(&beyond, &catalog, &config).unwrap();
        assert!(!run(&ctx).result.fit_in_habitat);
    }

    #[test]
    fn fit_in_habitat_accounts_for_rotation() {
        use crate::core::models::placement::Rotation;
        let catalog = ModuleRegistry::default();
        let config = config_for(1);
        let mut placement = cube(1, (5.0, 5.0, 1.0), 2.0);
        placement.size.width = 8.0;
        placement.size.height = 1.0;

        let upright = request((10.0, 10.0, 2.0), vec![placement.clone()]);
        let ctx = EvaluationContext::resolve(&upright, &catalog, &config).unwrap();
        assert!(run(&ctx).result.fit_in_habitat);

        let tipped = request(
            (10.0, 10.0, 2.0),
            vec![placement.with_rotation(Rotation::new(0.0, 90.0, 0.0))],
        );
        let ctx = EvaluationContext::resolve(&tipped, &catalog, &config).unwrap();
        assert!(!run(&ctx).result.fit_in_habitat);
    }

    #[test]
    fn nhv_shortfall_reports_deficit() {
        let catalog = catalog(vec![entry(1, 8.0, &[]), entry(2, 1.0, &[])]);
        let config = config_for(2);
        let layout = request(
            (20.0, 20.0, 5.0),
            vec![cube(1, (2.0, 2.0, 2.0), 1.5), cube(2, (8.0, 2.0, 2.0), 1.0)],
        );
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();
        let report = run(&ctx);
        assert!(!report.result.nhv_satisfied);
        assert_eq!(report.nhv_shortfalls.len(), 1);
        let shortfall = &report.nhv_shortfalls[0];
        assert_eq!(shortfall.module_id, ModuleId(1));
        assert!((shortfall.deficit() - (8.0 - 3.375)).abs() < 1e-12);
    }

    #[test]
    fn overlaps_only_fail_validation_when_enforced() {
        let catalog = ModuleRegistry::default();
        let layout = request(
            (20.0, 20.0, 5.0),
            vec![cube(1, (2.0, 2.0, 2.0), 2.0), cube(2, (2.5, 2.5, 2.5), 2.0)],
        );

        let lenient = config_for(2);
        let ctx = EvaluationContext::resolve(&layout, &catalog, &lenient).unwrap();
        let report = run(&ctx);
        assert!(report.result.no_overlapping);
        assert_eq!(
            report.overlaps,
            vec![OverlapPair {
                first: ModuleId(1),
                second: ModuleId(2)
            }]
        );

        let strict = EvaluationConfig {
            enforce_overlap_check: true,
            ..config_for(2)
        };
        let ctx = EvaluationContext::resolve(&layout, &catalog, &strict).unwrap();
        assert!(!run(&ctx).result.no_overlapping);
    }
}
