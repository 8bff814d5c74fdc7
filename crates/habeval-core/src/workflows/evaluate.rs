use crate::core::catalog::ModuleCatalog;
use crate::core::models::evaluation::{EvaluationResult, SubScores};
use crate::core::models::request::LayoutRequest;
use crate::engine::advisor::ContextAdvisor;
use crate::engine::config::EvaluationConfig;
use crate::engine::context::EvaluationContext;
use crate::engine::error::EngineError;
use crate::engine::feedback;
use crate::engine::tasks;
use tracing::{debug, error, info, instrument};

/// Evaluates one layout: validation, then scoring and feedback for valid layouts.
///
/// Always returns a complete result. Faults that stop the evaluation are
/// reported as a calculation error with the configured penalty score.
#[instrument(skip_all, name = "evaluate_workflow", fields(placements = request.placements.len()))]
pub fn run<C: ModuleCatalog + ?Sized>(
    request: &LayoutRequest,
    catalog: &C,
    config: &EvaluationConfig,
) -> EvaluationResult {
    match try_run(request, catalog, config) {
        Ok(result) => result,
        Err(e) => {
            error!(error = %e, "Layout evaluation failed.");
            EvaluationResult::calculation_error(
                format!("An error occurred during score calculation: {e}"),
                config.penalty_score,
            )
        }
    }
}

/// Like [`run`], then lets the advisor adjust a valid result.
///
/// The baseline validation verdict and status are restored on the advisor's
/// output.
pub fn run_with_advisor<C: ModuleCatalog + ?Sized>(
    request: &LayoutRequest,
    catalog: &C,
    config: &EvaluationConfig,
    advisor: &dyn ContextAdvisor,
) -> EvaluationResult {
    let baseline = run(request, catalog, config);
    if !baseline.is_valid() {
        return baseline;
    }

    let mut enhanced = advisor.enhance(request, &baseline, request.mission_profile.as_deref());
    enhanced.validation = baseline.validation;
    enhanced.status = baseline.status;
    if enhanced.scores.sub_scores().is_none() {
        enhanced.scores = baseline.scores;
    }
    enhanced
}

fn try_run<C: ModuleCatalog + ?Sized>(
    request: &LayoutRequest,
    catalog: &C,
    config: &EvaluationConfig,
) -> Result<EvaluationResult, EngineError> {
    info!("Starting layout evaluation.");
    let context = EvaluationContext::resolve(request, catalog, config)?;

    let report = tasks::validation::run(&context);
    if !report.is_valid() {
        info!("Layout rejected; skipping scoring.");
        return Ok(EvaluationResult::rejected(
            report.result,
            feedback::validation_errors(&report, config.required_module_count),
            config.penalty_score,
        ));
    }

    let space_utilization = tasks::space_utilization::run(&context)?;
    let comfortability = tasks::comfort::run(&context)?;
    let efficiency = tasks::efficiency::run(&context)?;
    let overall_score = config
        .weights
        .combine(space_utilization, comfortability, efficiency);
    debug!(
        space_utilization,
        comfortability, efficiency, overall_score, "Computed sub-scores."
    );

    let scores = SubScores {
        space_utilization,
        comfortability,
        efficiency,
        overall_score,
    };
    let feedback = feedback::compose(&context, &scores);

    info!(overall_score, "Layout evaluation complete.");
    Ok(EvaluationResult::scored(report.result, scores, feedback))
}
