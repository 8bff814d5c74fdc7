use crate::cli::OutputFormat;
use habeval::engine::config::{AdvisorConfig, EvaluationConfig};
use std::path::PathBuf;

pub struct AppConfig {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    /// `None` selects the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    /// Overrides the mission profile named inside each layout.
    pub mission: Option<String>,
    pub knowledge_path: Option<PathBuf>,
    pub evaluation: EvaluationConfig,
    pub advisor: AdvisorConfig,
}
