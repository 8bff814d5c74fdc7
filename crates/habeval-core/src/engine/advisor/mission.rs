use super::ContextAdvisor;
use super::knowledge::{KnowledgeAnswer, KnowledgeQuery, KnowledgeSource};
use crate::core::models::evaluation::{EvaluationFeedback, EvaluationResult, EvaluationScores, SubScores};
use crate::core::models::ids::ModuleId;
use crate::core::models::request::LayoutRequest;
use crate::engine::config::{AdvisorConfig, AdvisorMode, ScoreWeights};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, instrument, warn};

// Built-in catalog ids the mission bonuses look for.
const COMPUTER_WORKSTATION: ModuleId = ModuleId::new(9);
const MAINTENANCE_WORKBENCH: ModuleId = ModuleId::new(10);
const MEDICAL_COMPUTER: ModuleId = ModuleId::new(13);
const MEDICAL_CARE: ModuleId = ModuleId::new(14);
const MISSION_CONTROL: ModuleId = ModuleId::new(15);
const PRIVATE_QUARTERS: ModuleId = ModuleId::new(17);

const REFERENCE_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionProfile {
    Mars,
    Lunar,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown mission profile: '{0}'")]
pub struct UnknownMissionError(pub String);

impl MissionProfile {
    pub fn name(self) -> &'static str {
        match self {
            MissionProfile::Mars => "MARS",
            MissionProfile::Lunar => "LUNAR",
        }
    }

    /// Sub-score weights used in place of the engine's configured weights.
    pub fn weights(self) -> ScoreWeights {
        match self {
            MissionProfile::Mars => ScoreWeights {
                space: 0.45,
                comfort: 0.35,
                efficiency: 0.20,
            },
            MissionProfile::Lunar => ScoreWeights {
                space: 0.30,
                comfort: 0.25,
                efficiency: 0.45,
            },
        }
    }
}

impl fmt::Display for MissionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MissionProfile {
    type Err = UnknownMissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MARS" => Ok(MissionProfile::Mars),
            "LUNAR" => Ok(MissionProfile::Lunar),
            _ => Err(UnknownMissionError(s.to_string())),
        }
    }
}

/// Points added to each sub-score before the mission weights are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MissionAdjustments {
    pub space: f64,
    pub comfort: f64,
    pub efficiency: f64,
}

#[derive(Debug, Clone, Copy)]
enum ScoreAxis {
    Space,
    Comfort,
    Efficiency,
}

#[derive(Debug, Clone, Copy)]
enum Note {
    Strength(&'static str),
    Improvement(&'static str),
}

/// A research finding recognized by two keywords appearing in retrieved text.
struct KeywordRule {
    mission: Option<MissionProfile>,
    keywords: [&'static str; 2],
    axis: ScoreAxis,
    bonus: f64,
    note: Note,
}

impl KeywordRule {
    fn applies(&self, mission: MissionProfile, context: &str) -> bool {
        self.mission.is_none_or(|m| m == mission)
            && self.keywords.iter().all(|k| context.contains(k))
    }
}

static KEYWORD_RULES: [KeywordRule; 8] = [
    KeywordRule {
        mission: Some(MissionProfile::Mars),
        keywords: ["privacy", "long-duration"],
        axis: ScoreAxis::Comfort,
        bonus: 5.0,
        note: Note::Strength(
            "Research indicates: Excellent privacy configuration for long-duration Mars missions. Crew psychological well-being is well addressed.",
        ),
    },
    KeywordRule {
        mission: Some(MissionProfile::Mars),
        keywords: ["resource", "efficiency"],
        axis: ScoreAxis::Space,
        bonus: 3.0,
        note: Note::Strength(
            "Research suggests: Good resource efficiency setup for Mars mission sustainability. Space utilization aligns with long-duration mission requirements.",
        ),
    },
    KeywordRule {
        mission: Some(MissionProfile::Mars),
        keywords: ["psychological", "isolation"],
        axis: ScoreAxis::Comfort,
        bonus: 4.0,
        note: Note::Improvement(
            "Research recommends: Consider additional psychological comfort measures for Mars mission isolation challenges.",
        ),
    },
    KeywordRule {
        mission: Some(MissionProfile::Lunar),
        keywords: ["eva", "operations"],
        axis: ScoreAxis::Efficiency,
        bonus: 8.0,
        note: Note::Strength(
            "Research indicates: Excellent EVA operations setup for lunar surface missions. Workstation clustering supports efficient extravehicular activities.",
        ),
    },
    KeywordRule {
        mission: Some(MissionProfile::Lunar),
        keywords: ["experiment", "laboratory"],
        axis: ScoreAxis::Efficiency,
        bonus: 5.0,
        note: Note::Strength(
            "Research suggests: Good laboratory configuration for lunar scientific experiments. Workflow efficiency is optimized for research activities.",
        ),
    },
    KeywordRule {
        mission: Some(MissionProfile::Lunar),
        keywords: ["emergency", "access"],
        axis: ScoreAxis::Efficiency,
        bonus: 3.0,
        note: Note::Improvement(
            "Research recommends: Ensure emergency access pathways are optimized for lunar mission safety protocols.",
        ),
    },
    KeywordRule {
        mission: None,
        keywords: ["radiation", "shielding"],
        axis: ScoreAxis::Comfort,
        bonus: 2.0,
        note: Note::Improvement(
            "Research indicates: Consider radiation shielding placement for crew protection. Medical facilities should be centrally located for optimal safety.",
        ),
    },
    KeywordRule {
        mission: None,
        keywords: ["contamination", "isolation"],
        axis: ScoreAxis::Comfort,
        bonus: 3.0,
        note: Note::Improvement(
            "Research suggests: Ensure proper contamination isolation between clean and dirty zones. This is critical for crew health and mission success.",
        ),
    },
];

/// Reweights valid evaluations for MARS or LUNAR missions and folds in
/// findings from an optional knowledge source.
#[derive(Default)]
pub struct MissionAdvisor {
    config: AdvisorConfig,
    knowledge: Option<Box<dyn KnowledgeSource>>,
}

impl MissionAdvisor {
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            config,
            knowledge: None,
        }
    }

    pub fn with_knowledge(mut self, source: Box<dyn KnowledgeSource>) -> Self {
        self.knowledge = Some(source);
        self
    }

    fn apply_mission(
        &self,
        mission: MissionProfile,
        request: &LayoutRequest,
        baseline: &EvaluationResult,
        scores: &SubScores,
    ) -> EvaluationResult {
        let query = KnowledgeQuery::new(layout_question(request, mission))
            .for_mission(Some(mission.name()));
        let context = self.ask(&query).map(|answer| answer.text).unwrap_or_default();

        let mut adjustments = built_in_bonuses(mission, request);
        let lowered = context.to_lowercase();
        let matched: Vec<&KeywordRule> = if context.is_empty() {
            Vec::new()
        } else {
            KEYWORD_RULES
                .iter()
                .filter(|rule| rule.applies(mission, &lowered))
                .collect()
        };
        for rule in &matched {
            match rule.axis {
                ScoreAxis::Space => adjustments.space += rule.bonus,
                ScoreAxis::Comfort => adjustments.comfort += rule.bonus,
                ScoreAxis::Efficiency => adjustments.efficiency += rule.bonus,
            }
        }
        debug!(%mission, ?adjustments, "Computed mission adjustments.");

        let space = (scores.space_utilization + adjustments.space).clamp(0.0, 100.0);
        let comfort = (scores.comfortability + adjustments.comfort).clamp(0.0, 100.0);
        let efficiency = (scores.efficiency + adjustments.efficiency).clamp(0.0, 100.0);
        let adjusted = SubScores {
            space_utilization: space,
            comfortability: comfort,
            efficiency,
            overall_score: mission.weights().combine(space, comfort, efficiency),
        };

        let mut feedback = baseline.feedback.clone();
        add_mission_notes(mission, &adjustments, &mut feedback);
        for rule in &matched {
            match rule.note {
                Note::Strength(text) => feedback.add_strength(text),
                Note::Improvement(text) => feedback.add_improvement(text),
            }
        }
        if !context.is_empty() {
            let excerpt: String = context.chars().take(REFERENCE_EXCERPT_CHARS).collect();
            feedback.add_improvement(format!("References: {excerpt}..."));
        }

        EvaluationResult {
            scores: EvaluationScores::Scored(adjusted),
            feedback,
            ..baseline.clone()
        }
    }

    fn add_research_notes(&self, mission_profile: Option<&str>, result: &mut EvaluationResult) {
        let Some(scores) = result.scores.sub_scores().copied() else {
            return;
        };
        let query = KnowledgeQuery::new(score_question(mission_profile, &scores))
            .for_mission(mission_profile);
        let Some(answer) = self.ask(&query) else {
            return;
        };
        if answer.is_blank() {
            return;
        }

        result.feedback.add_improvement(format!(
            "Additional considerations from research: {}",
            answer.text
        ));
        if !answer.sources.is_empty() {
            let references: String = answer
                .sources
                .iter()
                .map(|s| format!("{} (p{}); ", s.path, s.page))
                .collect();
            result.feedback.add_improvement(format!("References: {references}"));
        }
    }

    /// Queries the knowledge source, treating failures as an empty answer.
    fn ask(&self, query: &KnowledgeQuery) -> Option<KnowledgeAnswer> {
        let source = self.knowledge.as_ref()?;
        match source.query(query) {
            Ok(answer) => Some(answer),
            Err(e) => {
                warn!(error = %e, "Knowledge source query failed; continuing without context.");
                None
            }
        }
    }
}

impl ContextAdvisor for MissionAdvisor {
    #[instrument(skip_all, name = "mission_advisor", fields(mission = mission_profile))]
    fn enhance(
        &self,
        request: &LayoutRequest,
        baseline: &EvaluationResult,
        mission_profile: Option<&str>,
    ) -> EvaluationResult {
        let Some(scores) = baseline.scores.sub_scores() else {
            return baseline.clone();
        };

        let mut result = match mission_profile.map(str::parse::<MissionProfile>) {
            None => baseline.clone(),
            Some(Ok(mission)) => self.apply_mission(mission, request, baseline, scores),
            Some(Err(e)) => {
                warn!(error = %e, "Ignoring mission profile.");
                baseline.clone()
            }
        };

        if self.config.mode == AdvisorMode::Advanced {
            self.add_research_notes(mission_profile, &mut result);
        }
        result
    }
}

fn built_in_bonuses(mission: MissionProfile, request: &LayoutRequest) -> MissionAdjustments {
    let placed = |ids: &[ModuleId]| {
        request
            .placements
            .iter()
            .filter(|p| ids.contains(&p.module_id))
            .count()
    };

    match mission {
        MissionProfile::Mars => {
            let placed_volume: f64 = request.placements.iter().map(|p| p.volume()).sum();
            let occupancy = placed_volume / request.habitat.volume() * 100.0;
            MissionAdjustments {
                space: if (70.0..=85.0).contains(&occupancy) { 5.0 } else { 0.0 },
                comfort: if placed(&[PRIVATE_QUARTERS]) > 0 { 3.0 } else { 0.0 },
                efficiency: if placed(&[MEDICAL_COMPUTER, MEDICAL_CARE]) >= 2 { 2.0 } else { 0.0 },
            }
        }
        MissionProfile::Lunar => MissionAdjustments {
            space: 0.0,
            comfort: if placed(&[COMPUTER_WORKSTATION, MISSION_CONTROL]) >= 2 { 2.0 } else { 0.0 },
            efficiency: if placed(&[MAINTENANCE_WORKBENCH]) > 0 { 1.0 } else { 0.0 },
        },
    }
}

fn add_mission_notes(
    mission: MissionProfile,
    adjustments: &MissionAdjustments,
    feedback: &mut EvaluationFeedback,
) {
    match mission {
        MissionProfile::Mars => {
            if adjustments.space > 0.0 {
                feedback.add_strength(
                    "Excellent space utilization for long-duration Mars mission requirements.",
                );
            }
            if adjustments.comfort > 0.0 {
                feedback.add_strength(
                    "Good privacy and psychological comfort setup for Mars mission isolation.",
                );
            }
            if adjustments.efficiency > 0.0 {
                feedback.add_strength(
                    "Efficient resource management configuration for Mars mission sustainability.",
                );
            }
        }
        MissionProfile::Lunar => {
            if adjustments.comfort > 0.0 {
                feedback
                    .add_strength("Well-configured workstation clustering for lunar EVA operations.");
            }
            if adjustments.efficiency > 0.0 {
                feedback.add_strength("Good EVA support infrastructure for lunar surface operations.");
            }
        }
    }
}

fn layout_question(request: &LayoutRequest, mission: MissionProfile) -> String {
    let h = &request.habitat;
    format!(
        "Space habitat layout evaluation for {} mission. Habitat dimensions(w*d*h): {:?}x{:?}x{:?}m. Module count: {}. What are the key considerations for improving this layout?",
        mission.name().to_lowercase(),
        h.x,
        h.y,
        h.z,
        request.module_count()
    )
}

fn score_question(mission_profile: Option<&str>, scores: &SubScores) -> String {
    let mission = mission_profile
        .map(|m| format!("{} mission. ", m.to_lowercase()))
        .unwrap_or_default();
    format!(
        "Space habitat layout evaluation for {mission}Space utilization: {:.1}%, Comfortability: {:.1}%, Efficiency: {:.1}%. What are the key considerations for improving this layout?",
        scores.space_utilization, scores.comfortability, scores.efficiency
    )
}
