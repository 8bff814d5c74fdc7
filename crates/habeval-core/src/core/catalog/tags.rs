use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Descriptive label attached to a catalog module.
///
/// The scoring engine pairs tags into opposing groups (noise vs. quiet,
/// private vs. common, clean vs. contaminated) and measures distances
/// between the modules that carry them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum ModuleTag {
    NoiseGenerating,
    QuietRequired,
    PrivateSpace,
    CommonSpace,
    CleanZone,
    ContaminationZone,
    WorkSpace,
    RestSpace,
    ResourceConsuming,
    HealthMaintenance,
    OpennessImportant,
}

/// Grouping of tags by the aspect of the habitat they describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagCategory {
    /// Who uses the space (private vs. common).
    Usage,
    /// Effect on the surroundings (noise).
    Impact,
    /// Need for quiet.
    Privacy,
    /// Hygiene designation.
    Cleanliness,
    /// Consumption of water or power.
    Resource,
    /// Work or rest function.
    Function,
    /// Human-factors perception.
    Perception,
    /// Health benefits provided.
    Benefit,
}

// Keys are normalized: lowercase, words separated by single spaces.
static TAG_LABELS: phf::Map<&'static str, ModuleTag> = phf_map! {
    "noise generating" => ModuleTag::NoiseGenerating,
    "quiet required" => ModuleTag::QuietRequired,
    "private space" => ModuleTag::PrivateSpace,
    "common space" => ModuleTag::CommonSpace,
    "clean zone" => ModuleTag::CleanZone,
    "contamination zone" => ModuleTag::ContaminationZone,
    "work space" => ModuleTag::WorkSpace,
    "rest space" => ModuleTag::RestSpace,
    "resource consuming" => ModuleTag::ResourceConsuming,
    "health maintenance" => ModuleTag::HealthMaintenance,
    "openness important" => ModuleTag::OpennessImportant,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown module tag: '{0}'")]
pub struct UnknownTagError(pub String);

impl ModuleTag {
    pub const ALL: [ModuleTag; 11] = [
        ModuleTag::NoiseGenerating,
        ModuleTag::QuietRequired,
        ModuleTag::PrivateSpace,
        ModuleTag::CommonSpace,
        ModuleTag::CleanZone,
        ModuleTag::ContaminationZone,
        ModuleTag::WorkSpace,
        ModuleTag::RestSpace,
        ModuleTag::ResourceConsuming,
        ModuleTag::HealthMaintenance,
        ModuleTag::OpennessImportant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModuleTag::NoiseGenerating => "Noise Generating",
            ModuleTag::QuietRequired => "Quiet Required",
            ModuleTag::PrivateSpace => "Private Space",
            ModuleTag::CommonSpace => "Common Space",
            ModuleTag::CleanZone => "Clean Zone",
            ModuleTag::ContaminationZone => "Contamination Zone",
            ModuleTag::WorkSpace => "Work Space",
            ModuleTag::RestSpace => "Rest Space",
            ModuleTag::ResourceConsuming => "Resource Consuming",
            ModuleTag::HealthMaintenance => "Health Maintenance",
            ModuleTag::OpennessImportant => "Openness Important",
        }
    }

    pub fn category(self) -> TagCategory {
        match self {
            ModuleTag::PrivateSpace | ModuleTag::CommonSpace => TagCategory::Usage,
            ModuleTag::NoiseGenerating => TagCategory::Impact,
            ModuleTag::QuietRequired => TagCategory::Privacy,
            ModuleTag::CleanZone | ModuleTag::ContaminationZone => TagCategory::Cleanliness,
            ModuleTag::ResourceConsuming => TagCategory::Resource,
            ModuleTag::WorkSpace | ModuleTag::RestSpace => TagCategory::Function,
            ModuleTag::HealthMaintenance => TagCategory::Benefit,
            ModuleTag::OpennessImportant => TagCategory::Perception,
        }
    }
}

impl fmt::Display for ModuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModuleTag {
    type Err = UnknownTagError;

    /// Parses a tag label, ignoring case and treating `-` and `_` as spaces.
    ///
    /// Accepts the display labels ("Noise Generating") as well as
    /// identifier-like spellings ("noise_generating", "NOISE-GENERATING").
    /// Labels that differ by more than case or separators are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        TAG_LABELS
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| UnknownTagError(s.to_string()))
    }
}

impl TryFrom<String> for ModuleTag {
    type Error = UnknownTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModuleTag> for String {
    fn from(tag: ModuleTag) -> Self {
        tag.label().to_string()
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagCategory::Usage => "Usage",
            TagCategory::Impact => "Impact",
            TagCategory::Privacy => "Privacy",
            TagCategory::Cleanliness => "Cleanliness",
            TagCategory::Resource => "Resource",
            TagCategory::Function => "Function",
            TagCategory::Perception => "Perception",
            TagCategory::Benefit => "Benefit",
        };
        f.write_str(name)
    }
}
