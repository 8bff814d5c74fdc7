use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of distinct modules a complete layout must place.
pub const DEFAULT_REQUIRED_MODULE_COUNT: usize = 18;
/// Score reported in place of sub-scores when a layout is rejected.
pub const DEFAULT_PENALTY_SCORE: u32 = 100;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Score weight '{name}' must be a finite, non-negative number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("Score weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Relative weights of the three sub-scores in the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub space: f64,
    pub comfort: f64,
    pub efficiency: f64,
}

impl ScoreWeights {
    pub const DEFAULT: ScoreWeights = ScoreWeights {
        space: 0.4,
        comfort: 0.3,
        efficiency: 0.3,
    };

    pub fn new(space: f64, comfort: f64, efficiency: f64) -> Result<Self, ConfigError> {
        let weights = Self {
            space,
            comfort,
            efficiency,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("space", self.space),
            ("comfort", self.comfort),
            ("efficiency", self.efficiency),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        let sum = self.space + self.comfort + self.efficiency;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }
        Ok(())
    }

    #[inline]
    pub fn combine(&self, space: f64, comfort: f64, efficiency: f64) -> f64 {
        self.space * space + self.comfort * comfort + self.efficiency * efficiency
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What to do with a placement whose module id is not in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingModulePolicy {
    /// Ignore the placement in volume and tag based checks and scores.
    #[default]
    Skip,
    /// Abort the evaluation with a calculation error.
    Fail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub required_module_count: usize,
    pub penalty_score: u32,
    pub enforce_overlap_check: bool,
    pub missing_module_policy: MissingModulePolicy,
    pub weights: ScoreWeights,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            required_module_count: DEFAULT_REQUIRED_MODULE_COUNT,
            penalty_score: DEFAULT_PENALTY_SCORE,
            enforce_overlap_check: false,
            missing_module_policy: MissingModulePolicy::Skip,
            weights: ScoreWeights::DEFAULT,
        }
    }
}

#[derive(Default)]
pub struct EvaluationConfigBuilder {
    required_module_count: Option<usize>,
    penalty_score: Option<u32>,
    enforce_overlap_check: Option<bool>,
    missing_module_policy: Option<MissingModulePolicy>,
    weights: Option<ScoreWeights>,
}

impl EvaluationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required_module_count(mut self, count: usize) -> Self {
        self.required_module_count = Some(count);
        self
    }
    pub fn penalty_score(mut self, score: u32) -> Self {
        self.penalty_score = Some(score);
        self
    }
    pub fn enforce_overlap_check(mut self, enforce: bool) -> Self {
        self.enforce_overlap_check = Some(enforce);
        self
    }
    pub fn missing_module_policy(mut self, policy: MissingModulePolicy) -> Self {
        self.missing_module_policy = Some(policy);
        self
    }
    pub fn weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Fills unset fields with defaults and validates the result.
    pub fn build(self) -> Result<EvaluationConfig, ConfigError> {
        let defaults = EvaluationConfig::default();
        let required_module_count = self
            .required_module_count
            .unwrap_or(defaults.required_module_count);
        if required_module_count == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "required_module_count",
                reason: "must be at least 1".to_string(),
            });
        }
        let weights = self.weights.unwrap_or(defaults.weights);
        weights.validate()?;

        Ok(EvaluationConfig {
            required_module_count,
            penalty_score: self.penalty_score.unwrap_or(defaults.penalty_score),
            enforce_overlap_check: self
                .enforce_overlap_check
                .unwrap_or(defaults.enforce_overlap_check),
            missing_module_policy: self
                .missing_module_policy
                .unwrap_or(defaults.missing_module_policy),
            weights,
        })
    }
}

/// How much external research the context advisor folds into the feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvisorMode {
    /// Mission weighting and keyword bonuses only.
    #[default]
    Basic,
    /// Additionally asks the knowledge source about the final scores.
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvisorConfig {
    pub mode: AdvisorMode,
}
