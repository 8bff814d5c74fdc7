use super::habitat::{HabitatDimensions, MIN_HABITAT_EXTENT};
use super::ids::ModuleId;
use super::placement::{MIN_MODULE_EXTENT, PlacedModule};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest number of placements a single request may carry.
pub const MAX_PLACEMENTS: usize = 18;

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("Layout must contain at least one module placement")]
    NoPlacements,
    #[error("Layout contains {count} placements, at most {max} are allowed")]
    TooManyPlacements { count: usize, max: usize },
    #[error("Habitat {axis} extent must be a finite value of at least {min} m, got {value}")]
    HabitatExtent {
        axis: &'static str,
        value: f64,
        min: f64,
    },
    #[error("Placement #{index}: module id must be at least 1")]
    ModuleIdZero { index: usize },
    #[error("Placement #{index} (module {module_id}): {field} must be a finite value of at least {min}, got {value}")]
    PlacementField {
        index: usize,
        module_id: ModuleId,
        field: &'static str,
        value: f64,
        min: f64,
    },
    #[error("Placement #{index} (module {module_id}): rotation {axis} is not a finite angle")]
    RotationNotFinite {
        index: usize,
        module_id: ModuleId,
        axis: &'static str,
    },
}

/// A proposed habitat layout submitted for evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    #[serde(rename = "habitatDimensions")]
    pub habitat: HabitatDimensions,
    #[serde(rename = "modulePlacements")]
    pub placements: Vec<PlacedModule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_profile: Option<String>,
}

impl LayoutRequest {
    pub fn new(habitat: HabitatDimensions, placements: Vec<PlacedModule>) -> Self {
        Self {
            habitat,
            placements,
            mission_profile: None,
        }
    }

    pub fn with_mission_profile(mut self, profile: impl Into<String>) -> Self {
        self.mission_profile = Some(profile.into());
        self
    }

    pub fn module_count(&self) -> usize {
        self.placements.len()
    }

    /// Rejects requests that are not well-formed input for the evaluation engine.
    ///
    /// This is the caller-side input check: the engine itself assumes every
    /// request it receives already passed it.
    pub fn check_well_formed(&self) -> Result<(), RequestError> {
        if self.placements.is_empty() {
            return Err(RequestError::NoPlacements);
        }
        if self.placements.len() > MAX_PLACEMENTS {
            return Err(RequestError::TooManyPlacements {
                count: self.placements.len(),
                max: MAX_PLACEMENTS,
            });
        }

        for (axis, value) in [
            ("x", self.habitat.x),
            ("y", self.habitat.y),
            ("z", self.habitat.z),
        ] {
            if !value.is_finite() || value < MIN_HABITAT_EXTENT {
                return Err(RequestError::HabitatExtent {
                    axis,
                    value,
                    min: MIN_HABITAT_EXTENT,
                });
            }
        }

        for (index, placement) in self.placements.iter().enumerate() {
            check_placement(index, placement)?;
        }
        Ok(())
    }
}

fn check_placement(index: usize, placement: &PlacedModule) -> Result<(), RequestError> {
    let module_id = placement.module_id;
    if module_id.get() == 0 {
        return Err(RequestError::ModuleIdZero { index });
    }

    let fields = [
        ("position.x", placement.position.x, 0.0),
        ("position.y", placement.position.y, 0.0),
        ("position.z", placement.position.z, 0.0),
        ("size.width", placement.size.width, MIN_MODULE_EXTENT),
        ("size.height", placement.size.height, MIN_MODULE_EXTENT),
        ("size.depth", placement.size.depth, MIN_MODULE_EXTENT),
    ];
    for (field, value, min) in fields {
        if !value.is_finite() || value < min {
            return Err(RequestError::PlacementField {
                index,
                module_id,
                field,
                value,
                min,
            });
        }
    }

    for (axis, angle) in [
        ("x", placement.rotation.x),
        ("y", placement.rotation.y),
        ("z", placement.rotation.z),
    ] {
        if !angle.is_finite() {
            return Err(RequestError::RotationNotFinite {
                index,
                module_id,
                axis,
            });
        }
    }
    Ok(())
}
