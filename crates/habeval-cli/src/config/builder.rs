use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::EvaluateArgs;
use crate::error::{CliError, Result};
use habeval::engine::config::{
    AdvisorConfig, AdvisorMode, EvaluationConfigBuilder, MissingModulePolicy, ScoreWeights,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Merges command-line flags, `--set` overrides, the config file and the
/// defaults, in that order of precedence.
pub fn build_config(args: &EvaluateArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let (file_config, base_dir) = match &args.config {
        Some(path) => (
            FileConfig::from_file(path)?,
            path.parent().map(Path::to_path_buf),
        ),
        None => (FileConfig::default(), None),
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let validation = file_config.validation.take().unwrap_or_default();
    let weights_file = file_config
        .scoring
        .take()
        .and_then(|s| s.weights)
        .unwrap_or_default();
    let advisor_file = file_config.advisor.take().unwrap_or_default();

    let enforce_overlap_check = args
        .overlap_check
        .as_override()
        .or(validation.enforce_overlap_check)
        .unwrap_or(defaults.enforce_overlap_check);
    let missing_module_policy = if args.strict_catalog {
        MissingModulePolicy::Fail
    } else {
        validation
            .missing_module_policy
            .unwrap_or(defaults.missing_module_policy)
    };
    let weights = ScoreWeights::new(
        weights_file.space.unwrap_or(defaults.space_weight),
        weights_file.comfort.unwrap_or(defaults.comfort_weight),
        weights_file.efficiency.unwrap_or(defaults.efficiency_weight),
    )?;

    let evaluation = EvaluationConfigBuilder::new()
        .required_module_count(
            validation
                .required_module_count
                .unwrap_or(defaults.required_module_count),
        )
        .penalty_score(validation.penalty_score.unwrap_or(defaults.penalty_score))
        .enforce_overlap_check(enforce_overlap_check)
        .missing_module_policy(missing_module_policy)
        .weights(weights)
        .build()?;

    let mode = if args.advanced {
        AdvisorMode::Advanced
    } else {
        advisor_file.mode.unwrap_or(defaults.advisor_mode)
    };

    let relative_to_file = |p: PathBuf| resolve_relative(p, base_dir.as_deref());
    let catalog_path = args
        .catalog
        .clone()
        .or_else(|| file_config.catalog.take().map(relative_to_file));
    let knowledge_path = args
        .knowledge
        .clone()
        .or_else(|| advisor_file.knowledge.map(relative_to_file));
    let mission = args.mission.clone().or(advisor_file.mission);

    debug!(
        ?evaluation,
        ?mode,
        ?catalog_path,
        ?knowledge_path,
        ?mission,
        "Resolved evaluation configuration."
    );

    Ok(AppConfig {
        inputs: args.inputs.clone(),
        output: args.output.clone(),
        format: args.format,
        catalog_path,
        mission,
        knowledge_path,
        evaluation,
        advisor: AdvisorConfig { mode },
    })
}

/// Paths inside a config file are relative to the file's directory.
fn resolve_relative(path: PathBuf, base_dir: Option<&Path>) -> PathBuf {
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "catalog" => config.catalog = Some(PathBuf::from(value_str.trim())),
            "validation.required-module-count" => {
                config
                    .validation
                    .get_or_insert_with(Default::default)
                    .required_module_count = Some(parse_value(key, value_str, "integer")?);
            }
            "validation.penalty-score" => {
                config.validation.get_or_insert_with(Default::default).penalty_score =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "validation.enforce-overlap-check" => {
                config
                    .validation
                    .get_or_insert_with(Default::default)
                    .enforce_overlap_check = Some(parse_value(key, value_str, "boolean")?);
            }
            "validation.missing-module-policy" => {
                let policy = match value_str.trim() {
                    "skip" => MissingModulePolicy::Skip,
                    "fail" => MissingModulePolicy::Fail,
                    other => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: '{}'. Expected 'skip' or 'fail'.",
                            key, other
                        )));
                    }
                };
                config
                    .validation
                    .get_or_insert_with(Default::default)
                    .missing_module_policy = Some(policy);
            }
            "scoring.weights.space" | "scoring.weights.comfort" | "scoring.weights.efficiency" => {
                let value = Some(parse_value(key, value_str, "float")?);
                let weights = config
                    .scoring
                    .get_or_insert_with(Default::default)
                    .weights
                    .get_or_insert_with(Default::default);
                match key {
                    "scoring.weights.space" => weights.space = value,
                    "scoring.weights.comfort" => weights.comfort = value,
                    _ => weights.efficiency = value,
                }
            }
            "advisor.mode" => {
                let mode = match value_str.trim() {
                    "basic" => AdvisorMode::Basic,
                    "advanced" => AdvisorMode::Advanced,
                    other => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: '{}'. Expected 'basic' or 'advanced'.",
                            key, other
                        )));
                    }
                };
                config
                    .advisor
                    .get_or_insert_with(Default::default)
                    .mode = Some(mode);
            }
            "advisor.mission" => {
                config
                    .advisor
                    .get_or_insert_with(Default::default)
                    .mission = Some(value_str.trim().to_string());
            }
            "advisor.knowledge" => {
                config
                    .advisor
                    .get_or_insert_with(Default::default)
                    .knowledge = Some(PathBuf::from(value_str.trim()));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
