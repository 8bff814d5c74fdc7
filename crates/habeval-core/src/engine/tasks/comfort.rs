use crate::core::catalog::ModuleTag;
use crate::core::scoring::utility::{noise_attenuation, noise_utility, separation_utility};
use crate::core::utils::geometry::distance;
use crate::engine::context::{EvaluationContext, ResolvedPlacement, ensure_finite};
use crate::engine::error::EngineError;
use tracing::{debug, instrument};

/// Mean of noise separation, privacy and cleanliness separation.
#[instrument(skip_all, name = "comfort_task")]
pub fn run(context: &EvaluationContext) -> Result<f64, EngineError> {
    let noise = noise_separation(context);
    let privacy = privacy(context);
    let cleanliness = cleanliness(context);
    debug!(noise, privacy, cleanliness, "Computed comfort terms.");

    let score = (noise + privacy + cleanliness) / 3.0;
    ensure_finite("comfortability score", score).map(|s| s.clamp(0.0, 100.0))
}

/// Mean noise utility over quiet modules, where each one's exposure is the
/// attenuated sum over every noise source.
pub fn noise_separation(context: &EvaluationContext) -> f64 {
    let sources = context.with_tag(ModuleTag::NoiseGenerating);
    let listeners = context.with_tag(ModuleTag::QuietRequired);
    if sources.is_empty() || listeners.is_empty() {
        return 100.0;
    }

    mean(listeners.iter().map(|quiet| {
        let exposure: f64 = sources
            .iter()
            .map(|noisy| noise_attenuation(distance(noisy.placement, quiet.placement)))
            .sum();
        noise_utility(exposure)
    }))
}

/// Distance from private quarters to the nearest common area.
pub fn privacy(context: &EvaluationContext) -> f64 {
    let private = context.with_tag(ModuleTag::PrivateSpace);
    if private.is_empty() {
        return 100.0;
    }
    let common = context.with_tag(ModuleTag::CommonSpace);
    separation_score(context, &private, &common)
}

/// Distance from clean zones to the nearest contamination zone.
pub fn cleanliness(context: &EvaluationContext) -> f64 {
    let clean = context.with_tag(ModuleTag::CleanZone);
    let dirty = context.with_tag(ModuleTag::ContaminationZone);
    if clean.is_empty() || dirty.is_empty() {
        return 100.0;
    }
    separation_score(context, &clean, &dirty)
}

/// Mean separation utility of each protected module from its nearest
/// offender. A protected module with no offenders at all scores full marks.
fn separation_score(
    context: &EvaluationContext,
    protected: &[&ResolvedPlacement],
    offenders: &[&ResolvedPlacement],
) -> f64 {
    let good_distance = context.habitat().min_extent() / 3.0;
    mean(protected.iter().map(|p| {
        let nearest = offenders
            .iter()
            .map(|o| distance(p.placement, o.placement))
            .fold(f64::INFINITY, f64::min);
        separation_utility(nearest, good_distance)
    }))
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 { 100.0 } else { sum / count as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ModuleTag::*;
    use crate::engine::config::EvaluationConfig;
    use crate::engine::tasks::test_support::{catalog, cube, entry, request};

    const EPS: f64 = 1e-9;

    #[test]
    fn layout_without_sensitive_modules_scores_full_comfort() {
        let catalog = catalog(vec![
            entry(1, 1.0, &[NoiseGenerating, CommonSpace]),
            entry(2, 1.0, &[WorkSpace]),
        ]);
        let config = EvaluationConfig::default();
        let layout = request(
            (10.0, 10.0, 3.0),
            vec![cube(1, (1.0, 1.0, 1.0), 1.0), cube(2, (1.5, 1.0, 1.0), 1.0)],
        );
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();
        assert_eq!(run(&ctx).unwrap(), 100.0);
    }

    #[test]
    fn noise_exposure_sums_over_sources() {
        // Two sources 10 m away: exposure 0.25 + 0.25 = 0.5, utility 0.
        let catalog = catalog(vec![
            entry(1, 1.0, &[QuietRequired]),
            entry(2, 1.0, &[NoiseGenerating]),
            entry(3, 1.0, &[NoiseGenerating]),
        ]);
        let config = EvaluationConfig::default();
        let layout = request(
            (30.0, 30.0, 3.0),
            vec![
                cube(1, (15.0, 15.0, 1.0), 1.0),
                cube(2, (25.0, 15.0, 1.0), 1.0),
                cube(3, (5.0, 15.0, 1.0), 1.0),
            ],
        );
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();
        assert!(noise_separation(&ctx).abs() < EPS);

        let single = request(
            (30.0, 30.0, 3.0),
            vec![cube(1, (15.0, 15.0, 1.0), 1.0), cube(2, (25.0, 15.0, 1.0), 1.0)],
        );
        let ctx = EvaluationContext::resolve(&single, &catalog, &config).unwrap();
        assert!((noise_separation(&ctx) - 50.0).abs() < EPS);
    }

    #[test]
    fn privacy_uses_nearest_common_module() {
        // Habitat min extent 6 gives a good distance of 2 m.
        let catalog = catalog(vec![
            entry(1, 1.0, &[PrivateSpace]),
            entry(2, 1.0, &[CommonSpace]),
            entry(3, 1.0, &[CommonSpace]),
        ]);
        let config = EvaluationConfig::default();
        let layout = request(
            (20.0, 20.0, 6.0),
            vec![
                cube(1, (5.0, 5.0, 1.0), 1.0),
                cube(2, (6.0, 5.0, 1.0), 1.0),
                cube(3, (15.0, 5.0, 1.0), 1.0),
            ],
        );
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();
        assert!((privacy(&ctx) - 50.0).abs() < EPS);
    }

    #[test]
    fn private_module_without_common_areas_is_fully_private() {
        let catalog = catalog(vec![entry(1, 1.0, &[PrivateSpace])]);
        let config = EvaluationConfig::default();
        let layout = request((10.0, 10.0, 3.0), vec![cube(1, (5.0, 5.0, 1.0), 1.0)]);
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();
        assert_eq!(privacy(&ctx), 100.0);
    }

    #[test]
    fn cleanliness_requires_both_zone_types() {
        let catalog = catalog(vec![
            entry(1, 1.0, &[CleanZone]),
            entry(2, 1.0, &[ContaminationZone]),
        ]);
        let config = EvaluationConfig::default();

        let only_clean = request((9.0, 9.0, 3.0), vec![cube(1, (4.0, 4.0, 1.0), 1.0)]);
        let ctx = EvaluationContext::resolve(&only_clean, &catalog, &config).unwrap();
        assert_eq!(cleanliness(&ctx), 100.0);

        // Good distance is 1 m; 0.5 m apart scores half.
        let close = request(
            (9.0, 9.0, 3.0),
            vec![cube(1, (4.0, 4.0, 1.0), 0.4), cube(2, (4.5, 4.0, 1.0), 0.4)],
        );
        let ctx = EvaluationContext::resolve(&close, &catalog, &config).unwrap();
        assert!((cleanliness(&ctx) - 50.0).abs() < EPS);
    }

    #[test]
    fn comfort_is_mean_of_three_terms() {
        let catalog = catalog(vec![
            entry(1, 1.0, &[QuietRequired]),
            entry(2, 1.0, &[NoiseGenerating]),
        ]);
        let config = EvaluationConfig::default();
        let layout = request(
            (30.0, 30.0, 3.0),
            vec![cube(1, (15.0, 15.0, 1.0), 1.0), cube(2, (25.0, 15.0, 1.0), 1.0)],
        );
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();
        assert!((run(&ctx).unwrap() - 250.0 / 3.0).abs() < EPS);
    }
}
