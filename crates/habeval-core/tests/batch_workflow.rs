mod common;

use common::{builtin_catalog, complete_layout, layout_with_ids};
use habeval::core::models::evaluation::EvaluationStatus;
use habeval::engine::advisor::MissionAdvisor;
use habeval::core::models::ids::ModuleId;
use habeval::engine::config::{EvaluationConfig, EvaluationConfigBuilder, MissingModulePolicy};
use habeval::engine::progress::{Progress, ProgressReporter};
use habeval::workflows::batch;
use std::sync::Mutex;

#[test]
fn batch_preserves_order_and_reports_progress() {
    let catalog = builtin_catalog();
    let requests = vec![
        complete_layout(&catalog),
        layout_with_ids(&catalog, 1..=4),
        complete_layout(&catalog),
    ];

    let events = Mutex::new(Vec::new());
    let reporter = ProgressReporter::with_callback(Box::new(|event| {
        events.lock().unwrap().push(event);
    }));
    let results = batch::run(&requests, &catalog, &EvaluationConfig::default(), &reporter);
    drop(reporter);

    let statuses: Vec<_> = results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            EvaluationStatus::Scored,
            EvaluationStatus::Rejected,
            EvaluationStatus::Scored
        ]
    );

    let events = events.into_inner().unwrap();
    assert_eq!(events.first(), Some(&Progress::BatchStart { total: 3 }));
    assert_eq!(events.last(), Some(&Progress::BatchFinish));
    let mut finished: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            Progress::LayoutFinished { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    finished.sort_unstable();
    assert_eq!(finished, vec![0, 1, 2]);
    assert!(!events.iter().any(|e| matches!(e, Progress::Message(_))));
}

#[test]
fn calculation_errors_are_announced_before_the_layout_finishes() {
    let catalog = builtin_catalog();
    let mut broken = complete_layout(&catalog);
    broken.placements[0].module_id = ModuleId(42);
    let requests = vec![complete_layout(&catalog), broken];
    let config = EvaluationConfigBuilder::new()
        .missing_module_policy(MissingModulePolicy::Fail)
        .build()
        .unwrap();

    let events = Mutex::new(Vec::new());
    let reporter = ProgressReporter::with_callback(Box::new(|event| {
        events.lock().unwrap().push(event);
    }));
    let results = batch::run(&requests, &catalog, &config, &reporter);
    drop(reporter);

    assert_eq!(results[1].status, EvaluationStatus::CalculationError);
    let events = events.into_inner().unwrap();
    let messages: Vec<(usize, &String)> = events
        .iter()
        .enumerate()
        .filter_map(|(pos, e)| match e {
            Progress::Message(msg) => Some((pos, msg)),
            _ => None,
        })
        .collect();
    assert_eq!(messages.len(), 1);
    let (pos, msg) = messages[0];
    assert!(msg.starts_with("Layout #1 could not be evaluated: "));
    assert!(msg.contains("Module 42"));
    let finished_at = events
        .iter()
        .position(|e| {
            *e == Progress::LayoutFinished {
                index: 1,
                status: EvaluationStatus::CalculationError,
            }
        })
        .unwrap();
    assert!(pos < finished_at);
}

#[test]
fn batch_with_advisor_matches_single_evaluations() {
    let catalog = builtin_catalog();
    let config = EvaluationConfig::default();
    let advisor = MissionAdvisor::default();
    let requests = vec![
        complete_layout(&catalog).with_mission_profile("MARS"),
        complete_layout(&catalog).with_mission_profile("LUNAR"),
    ];

    let results = batch::run_with_advisor(
        &requests,
        &catalog,
        &config,
        &advisor,
        &ProgressReporter::new(),
    );

    for (request, result) in requests.iter().zip(&results) {
        let single =
            habeval::workflows::evaluate::run_with_advisor(request, &catalog, &config, &advisor);
        assert_eq!(result, &single);
    }
}

#[test]
fn empty_batch_returns_no_results() {
    let catalog = builtin_catalog();
    let results = batch::run(&[], &catalog, &EvaluationConfig::default(), &ProgressReporter::new());
    assert!(results.is_empty());
}
