use crate::error::{CliError, Result};
use habeval::engine::config::{AdvisorMode, MissingModulePolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Contents of a configuration file. Every field is optional; gaps are filled
/// from the command line and the defaults.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub catalog: Option<PathBuf>,
    pub validation: Option<FileValidationConfig>,
    pub scoring: Option<FileScoringConfig>,
    pub advisor: Option<FileAdvisorConfig>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileValidationConfig {
    pub required_module_count: Option<usize>,
    pub penalty_score: Option<u32>,
    pub enforce_overlap_check: Option<bool>,
    pub missing_module_policy: Option<MissingModulePolicy>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileScoringConfig {
    pub weights: Option<FileWeightsConfig>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileWeightsConfig {
    pub space: Option<f64>,
    pub comfort: Option<f64>,
    pub efficiency: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileAdvisorConfig {
    pub mode: Option<AdvisorMode>,
    pub mission: Option<String>,
    pub knowledge: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
