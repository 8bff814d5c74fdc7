use serde::{Deserialize, Serialize};

/// Outcome of the four structural checks run before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub all_modules_used: bool,
    pub no_overlapping: bool,
    pub fit_in_habitat: bool,
    pub nhv_satisfied: bool,
}

impl ValidationResult {
    pub fn new(
        all_modules_used: bool,
        no_overlapping: bool,
        fit_in_habitat: bool,
        nhv_satisfied: bool,
    ) -> Self {
        Self {
            all_modules_used,
            no_overlapping,
            fit_in_habitat,
            nhv_satisfied,
        }
    }

    /// The verdict reported when the evaluation itself could not be completed.
    pub fn all_failed() -> Self {
        Self::new(false, false, false, false)
    }

    pub fn is_valid(&self) -> bool {
        self.all_modules_used && self.no_overlapping && self.fit_in_habitat && self.nhv_satisfied
    }
}

/// The three sub-scores of a valid layout and their weighted combination, all in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    pub space_utilization: f64,
    pub comfortability: f64,
    pub efficiency: f64,
    pub overall_score: f64,
}

/// Scores attached to an evaluation: either the computed sub-scores or a fixed penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvaluationScores {
    Scored(SubScores),
    #[serde(rename_all = "camelCase")]
    Penalty { penalty_score: u32 },
}

impl EvaluationScores {
    pub fn sub_scores(&self) -> Option<&SubScores> {
        match self {
            EvaluationScores::Scored(scores) => Some(scores),
            EvaluationScores::Penalty { .. } => None,
        }
    }

    pub fn penalty(&self) -> Option<u32> {
        match self {
            EvaluationScores::Scored(_) => None,
            EvaluationScores::Penalty { penalty_score } => Some(*penalty_score),
        }
    }
}

/// Human-readable feedback, grouped by kind and kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationFeedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub errors: Vec<String>,
}

impl EvaluationFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_strength(&mut self, message: impl Into<String>) {
        self.strengths.push(message.into());
    }

    pub fn add_improvement(&mut self, message: impl Into<String>) {
        self.improvements.push(message.into());
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty() && self.improvements.is_empty() && self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationStatus {
    /// The layout passed validation and was scored.
    Scored,
    /// The layout failed at least one structural check.
    Rejected,
    /// The evaluation could not be completed.
    CalculationError,
}

/// The complete answer to one evaluation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub status: EvaluationStatus,
    pub validation: ValidationResult,
    pub scores: EvaluationScores,
    pub feedback: EvaluationFeedback,
}

impl EvaluationResult {
    pub fn scored(
        validation: ValidationResult,
        scores: SubScores,
        feedback: EvaluationFeedback,
    ) -> Self {
        Self {
            status: EvaluationStatus::Scored,
            validation,
            scores: EvaluationScores::Scored(scores),
            feedback,
        }
    }

    pub fn rejected(
        validation: ValidationResult,
        feedback: EvaluationFeedback,
        penalty_score: u32,
    ) -> Self {
        Self {
            status: EvaluationStatus::Rejected,
            validation,
            scores: EvaluationScores::Penalty { penalty_score },
            feedback,
        }
    }

    pub fn calculation_error(message: impl Into<String>, penalty_score: u32) -> Self {
        let mut feedback = EvaluationFeedback::new();
        feedback.add_error(message);
        Self {
            status: EvaluationStatus::CalculationError,
            validation: ValidationResult::all_failed(),
            scores: EvaluationScores::Penalty { penalty_score },
            feedback,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn overall_score(&self) -> Option<f64> {
        self.scores.sub_scores().map(|s| s.overall_score)
    }
}
