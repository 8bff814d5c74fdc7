use super::evaluate;
use crate::core::catalog::ModuleCatalog;
use crate::core::models::evaluation::{EvaluationResult, EvaluationStatus};
use crate::core::models::request::LayoutRequest;
use crate::engine::advisor::ContextAdvisor;
use crate::engine::config::EvaluationConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluates every request, returning results in request order.
pub fn run<C: ModuleCatalog + Sync + ?Sized>(
    requests: &[LayoutRequest],
    catalog: &C,
    config: &EvaluationConfig,
    reporter: &ProgressReporter,
) -> Vec<EvaluationResult> {
    run_batch(requests, catalog, config, None, reporter)
}

pub fn run_with_advisor<C: ModuleCatalog + Sync + ?Sized>(
    requests: &[LayoutRequest],
    catalog: &C,
    config: &EvaluationConfig,
    advisor: &dyn ContextAdvisor,
    reporter: &ProgressReporter,
) -> Vec<EvaluationResult> {
    run_batch(requests, catalog, config, Some(advisor), reporter)
}

#[instrument(skip_all, name = "batch_workflow", fields(layouts = requests.len()))]
fn run_batch<C: ModuleCatalog + Sync + ?Sized>(
    requests: &[LayoutRequest],
    catalog: &C,
    config: &EvaluationConfig,
    advisor: Option<&dyn ContextAdvisor>,
    reporter: &ProgressReporter,
) -> Vec<EvaluationResult> {
    info!("Evaluating {} layout(s).", requests.len());
    reporter.report(Progress::BatchStart {
        total: requests.len() as u64,
    });

    let evaluate_one = |(index, request): (usize, &LayoutRequest)| {
        let result = match advisor {
            Some(advisor) => evaluate::run_with_advisor(request, catalog, config, advisor),
            None => evaluate::run(request, catalog, config),
        };
        if result.status == EvaluationStatus::CalculationError {
            let reason = result
                .feedback
                .errors
                .first()
                .map(String::as_str)
                .unwrap_or("unknown error");
            reporter.report(Progress::Message(format!(
                "Layout #{} could not be evaluated: {}",
                index, reason
            )));
        }
        reporter.report(Progress::LayoutFinished {
            index,
            status: result.status,
        });
        result
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<EvaluationResult> = requests.iter().enumerate().map(evaluate_one).collect();

    #[cfg(feature = "parallel")]
    let results: Vec<EvaluationResult> = requests
        .par_iter()
        .enumerate()
        .map(evaluate_one)
        .collect();

    reporter.report(Progress::BatchFinish);
    let valid = results.iter().filter(|r| r.is_valid()).count();
    info!(valid, total = results.len(), "Batch evaluation complete.");
    results
}
