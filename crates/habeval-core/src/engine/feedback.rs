use super::context::EvaluationContext;
use super::tasks::validation::ValidationReport;
use crate::core::models::evaluation::{EvaluationFeedback, SubScores};
use crate::core::scoring::utility::{NHV_RATIO_OPTIMAL_MAX, is_optimal_nhv_ratio};

const SPACE_STRENGTH_MIN: f64 = 85.0;
const COMFORT_STRENGTH_MIN: f64 = 80.0;
const EFFICIENCY_STRENGTH_MIN: f64 = 80.0;
const SPACE_IMPROVEMENT_BELOW: f64 = 70.0;
const COMFORT_IMPROVEMENT_BELOW: f64 = 60.0;
const EFFICIENCY_IMPROVEMENT_BELOW: f64 = 60.0;

/// Strengths and improvements for a layout that passed validation.
pub fn compose(context: &EvaluationContext, scores: &SubScores) -> EvaluationFeedback {
    let mut feedback = EvaluationFeedback::new();
    let ratios: Vec<f64> = context.resolved().iter().map(|r| r.nhv_ratio()).collect();

    if scores.space_utilization >= SPACE_STRENGTH_MIN {
        feedback.add_strength(
            "Excellent space utilization. NHV optimization and overall space efficiency are outstanding.",
        );
    }
    if scores.comfortability >= COMFORT_STRENGTH_MIN {
        feedback.add_strength(
            "Comfortable module arrangement achieved. Well separated from noise and contamination sources.",
        );
    }
    if scores.efficiency >= EFFICIENCY_STRENGTH_MIN {
        feedback.add_strength("Excellent work efficiency. Related work spaces are well positioned.");
    }
    if ratios.iter().all(|&r| is_optimal_nhv_ratio(r)) {
        feedback.add_strength(
            "All modules are efficiently designed within the optimal NHV range (1.0~1.35x).",
        );
    }

    if scores.space_utilization < SPACE_IMPROVEMENT_BELOW {
        feedback.add_improvement("Try arranging modules more efficiently to improve space utilization.");
    }
    if scores.comfortability < COMFORT_IMPROVEMENT_BELOW {
        feedback.add_improvement(
            "Place noise-generating modules and private spaces further apart to improve comfort.",
        );
    }
    if scores.efficiency < EFFICIENCY_IMPROVEMENT_BELOW {
        feedback.add_improvement(
            "Position related work spaces closer together to improve work efficiency.",
        );
    }
    let oversized = ratios.iter().any(|&r| r > NHV_RATIO_OPTIMAL_MAX);
    let undersized = ratios.iter().any(|&r| r < 1.0);
    if oversized && !undersized {
        feedback.add_improvement(
            "Some modules are outside the optimal NHV range. Adjust module sizes within 1.0~1.35x range.",
        );
    }

    feedback
}

/// One error per failed check of a rejected layout.
pub fn validation_errors(report: &ValidationReport, required_module_count: usize) -> EvaluationFeedback {
    let mut feedback = EvaluationFeedback::new();
    let result = &report.result;

    if !result.all_modules_used {
        feedback.add_error(format!(
            "All {required_module_count} modules must be used. Currently missing modules."
        ));
    }
    if !result.no_overlapping {
        feedback.add_error("Modules must not overlap with each other.");
    }
    if !result.fit_in_habitat {
        feedback.add_error("All modules must be placed within the habitat space.");
    }
    if !result.nhv_satisfied {
        let lines = report
            .nhv_shortfalls
            .iter()
            .map(|s| {
                format!(
                    "Module{}({}): UserVolume={:.2}m³, RequiredNHV={:.2}m³, Deficit={:.2}m³",
                    s.module_id,
                    s.name,
                    s.placed_volume,
                    s.required_volume,
                    s.deficit()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        feedback.add_error(format!(
            "Some modules do not meet the minimum NHV (Net Habitable Volume) requirements:\n{lines}\n\nPlease increase module sizes."
        ));
    }

    feedback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::evaluation::ValidationResult;
    use crate::core::models::ids::ModuleId;
    use crate::engine::config::EvaluationConfig;
    use crate::engine::tasks::test_support::{catalog, cube, entry, request};
    use crate::engine::tasks::validation::NhvShortfall;

    fn scores(space: f64, comfort: f64, efficiency: f64) -> SubScores {
        SubScores {
            space_utilization: space,
            comfortability: comfort,
            efficiency,
            overall_score: 0.0,
        }
    }

    #[test]
    fn high_scores_produce_strengths_only() {
        let catalog = catalog(vec![entry(1, 1.0, &[])]);
        let config = EvaluationConfig::default();
        let layout = request((10.0, 10.0, 10.0), vec![cube(1, (5.0, 5.0, 5.0), 1.0)]);
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();

        let feedback = compose(&ctx, &scores(90.0, 85.0, 80.0));
        assert_eq!(feedback.strengths.len(), 4);
        assert!(feedback.improvements.is_empty());
        assert!(feedback.errors.is_empty());
        assert!(feedback.strengths[3].contains("optimal NHV range"));
    }

    #[test]
    fn low_scores_and_oversized_modules_produce_improvements() {
        let catalog = catalog(vec![entry(1, 0.5, &[])]);
        let config = EvaluationConfig::default();
        let layout = request((10.0, 10.0, 10.0), vec![cube(1, (5.0, 5.0, 5.0), 1.0)]);
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();

        let feedback = compose(&ctx, &scores(69.9, 59.9, 59.9));
        assert!(feedback.strengths.is_empty());
        assert_eq!(
            feedback.improvements,
            vec![
                "Try arranging modules more efficiently to improve space utilization.",
                "Place noise-generating modules and private spaces further apart to improve comfort.",
                "Position related work spaces closer together to improve work efficiency.",
                "Some modules are outside the optimal NHV range. Adjust module sizes within 1.0~1.35x range.",
            ]
        );
    }

    #[test]
    fn middling_scores_produce_no_score_feedback() {
        let catalog = catalog(vec![entry(1, 1.0, &[])]);
        let config = EvaluationConfig::default();
        let layout = request((10.0, 10.0, 10.0), vec![cube(1, (5.0, 5.0, 5.0), 1.0)]);
        let ctx = EvaluationContext::resolve(&layout, &catalog, &config).unwrap();

        let feedback = compose(&ctx, &scores(75.0, 70.0, 70.0));
        assert_eq!(feedback.strengths.len(), 1);
        assert!(feedback.improvements.is_empty());
    }

    #[test]
    fn validation_errors_describe_each_failed_check() {
        let report = ValidationReport {
            result: ValidationResult::new(false, false, false, false),
            distinct_modules: 17,
            nhv_shortfalls: vec![NhvShortfall {
                module_id: ModuleId(17),
                name: "Private Quarters".to_string(),
                placed_volume: 12.564,
                required_volume: 13.96,
            }],
            overlaps: Vec::new(),
        };
        let feedback = validation_errors(&report, 18);
        assert_eq!(feedback.errors.len(), 4);
        assert_eq!(
            feedback.errors[0],
            "All 18 modules must be used. Currently missing modules."
        );
        assert_eq!(feedback.errors[1], "Modules must not overlap with each other.");
        assert_eq!(
            feedback.errors[2],
            "All modules must be placed within the habitat space."
        );
        assert_eq!(
            feedback.errors[3],
            "Some modules do not meet the minimum NHV (Net Habitable Volume) requirements:\n\
             Module17(Private Quarters): UserVolume=12.56m³, RequiredNHV=13.96m³, Deficit=1.40m³\n\n\
             Please increase module sizes."
        );
    }
}
