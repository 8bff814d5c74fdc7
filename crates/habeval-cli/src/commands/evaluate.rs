use crate::cli::{EvaluateArgs, OutputFormat};
use crate::commands::catalog::load_registry;
use crate::config::{AppConfig, build_config};
use crate::error::{CliError, Result};
use crate::report::{self, LabeledResult};
use crate::utils::progress::CliProgressHandler;
use habeval::core::models::evaluation::EvaluationStatus;
use habeval::core::models::request::LayoutRequest;
use habeval::engine::advisor::{MissionAdvisor, MissionProfile, StaticKnowledge};
use habeval::engine::progress::ProgressReporter;
use habeval::workflows::batch;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A layout file holds either one layout or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum LayoutFile {
    One(LayoutRequest),
    Many(Vec<LayoutRequest>),
}

pub fn run(args: EvaluateArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args)?;

    let registry = load_registry(config.catalog_path.as_deref())?;
    let advisor = build_advisor(&config)?;
    let (labels, requests) = load_layouts(&config.inputs, config.mission.as_deref())?;

    let handler = if requests.len() > 1 {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(handler.get_callback());

    info!("Evaluating {} layout(s)...", requests.len());
    let results =
        batch::run_with_advisor(&requests, &registry, &config.evaluation, &advisor, &reporter);

    let count = |status: EvaluationStatus| results.iter().filter(|r| r.status == status).count();
    let (rejected, failed) = (
        count(EvaluationStatus::Rejected),
        count(EvaluationStatus::CalculationError),
    );
    if rejected > 0 {
        warn!("{} of {} layout(s) did not pass validation.", rejected, results.len());
    }
    if failed > 0 {
        warn!("{} of {} layout(s) could not be evaluated.", failed, results.len());
    }

    let entries: Vec<LabeledResult> = labels
        .into_iter()
        .zip(results)
        .map(|(source, result)| LabeledResult { source, result })
        .collect();

    let rendered = match config.format {
        OutputFormat::Text => report::render_text(&entries),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&entries)
                .map_err(|e| CliError::Other(e.into()))?;
            json.push('\n');
            json
        }
    };
    write_report(config.output.as_deref(), &rendered)
}

fn build_advisor(config: &AppConfig) -> Result<MissionAdvisor> {
    if let Some(mission) = &config.mission {
        mission
            .parse::<MissionProfile>()
            .map_err(|e| CliError::Argument(e.to_string()))?;
    }

    let advisor = MissionAdvisor::new(config.advisor);
    Ok(match &config.knowledge_path {
        Some(path) => {
            info!("Loading knowledge file from {:?}", path);
            advisor.with_knowledge(Box::new(StaticKnowledge::load(path)?))
        }
        None => advisor,
    })
}

/// Reads every input file, labeling each layout with its origin.
fn load_layouts(
    inputs: &[PathBuf],
    mission: Option<&str>,
) -> Result<(Vec<String>, Vec<LayoutRequest>)> {
    let mut labels = Vec::new();
    let mut requests = Vec::new();

    for path in inputs {
        info!("Loading layouts from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let parsed: LayoutFile =
            serde_json::from_str(&content).map_err(|e| CliError::FileParsing {
                path: path.clone(),
                source: e.into(),
            })?;

        let file_requests = match parsed {
            LayoutFile::One(request) => vec![(path.display().to_string(), request)],
            LayoutFile::Many(list) => list
                .into_iter()
                .enumerate()
                .map(|(i, request)| (format!("{}[{}]", path.display(), i), request))
                .collect(),
        };

        for (label, mut request) in file_requests {
            request
                .check_well_formed()
                .map_err(|source| CliError::MalformedLayout {
                    label: label.clone(),
                    source,
                })?;
            if let Some(mission) = mission {
                request.mission_profile = Some(mission.to_string());
            }
            labels.push(label);
            requests.push(request);
        }
    }
    Ok((labels, requests))
}

fn write_report(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("Report written to {:?}", path);
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
