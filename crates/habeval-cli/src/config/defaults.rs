use habeval::engine::config::{AdvisorMode, EvaluationConfig, MissingModulePolicy};

pub struct DefaultsConfig {
    pub required_module_count: usize,
    pub penalty_score: u32,
    pub enforce_overlap_check: bool,
    pub missing_module_policy: MissingModulePolicy,
    pub space_weight: f64,
    pub comfort_weight: f64,
    pub efficiency_weight: f64,
    pub advisor_mode: AdvisorMode,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let engine = EvaluationConfig::default();
        Self {
            required_module_count: engine.required_module_count,
            penalty_score: engine.penalty_score,
            enforce_overlap_check: engine.enforce_overlap_check,
            missing_module_policy: engine.missing_module_policy,
            space_weight: engine.weights.space,
            comfort_weight: engine.weights.comfort,
            efficiency_weight: engine.weights.efficiency,
            advisor_mode: AdvisorMode::Basic,
        }
    }
}
