use crate::core::catalog::ModuleCatalog;
use crate::core::models::habitat::HabitatDimensions;
use crate::core::models::ids::ModuleId;
use crate::core::models::placement::PlacedModule;
use crate::core::utils::geometry::{boxes_overlap, rotated_vertices};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// One candidate module to be dropped into a partially built layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementCheckRequest {
    pub habitat_dimensions: HabitatDimensions,
    pub new_module: PlacedModule,
    #[serde(default)]
    pub existing_modules: Vec<PlacedModule>,
}

/// Verdict for a single candidate placement.
///
/// `valid` is false when the candidate's center leaves the habitat or its box
/// overlaps an existing module; `conflicts` names those modules. `warnings`
/// never affect `valid` except for unusable coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementCheck {
    pub valid: bool,
    pub conflicts: Vec<ModuleId>,
    pub warnings: Vec<String>,
}

impl PlacementCheckRequest {
    pub fn run<C: ModuleCatalog + ?Sized>(&self, catalog: &C) -> PlacementCheck {
        run(
            &self.habitat_dimensions,
            &self.existing_modules,
            &self.new_module,
            catalog,
        )
    }
}

/// Checks `candidate` against the habitat and the modules already placed.
///
/// Uses the same closed-interval containment and vertex-overlap test as full
/// layout validation, but only the candidate's center must lie inside the
/// habitat; a box reaching past a wall is reported as a warning.
#[instrument(skip_all, name = "placement_check_workflow", fields(module_id = %candidate.module_id, existing = existing.len()))]
pub fn run<C: ModuleCatalog + ?Sized>(
    habitat: &HabitatDimensions,
    existing: &[PlacedModule],
    candidate: &PlacedModule,
    catalog: &C,
) -> PlacementCheck {
    let id = candidate.module_id;
    let mut warnings = Vec::new();

    let coordinates = [
        candidate.position.x,
        candidate.position.y,
        candidate.position.z,
        candidate.size.width,
        candidate.size.height,
        candidate.size.depth,
        candidate.rotation.x,
        candidate.rotation.y,
        candidate.rotation.z,
    ];
    if coordinates.iter().any(|v| !v.is_finite()) {
        warn!("Candidate placement has non-finite coordinates.");
        return PlacementCheck {
            valid: false,
            conflicts: Vec::new(),
            warnings: vec![format!("Module {} has non-finite position, size or rotation.", id)],
        };
    }

    let center_inside = habitat.contains(&candidate.center());
    if !center_inside {
        warnings.push(format!("Module {} is placed outside the habitat space.", id));
    } else if rotated_vertices(candidate).iter().any(|v| !habitat.contains(v)) {
        warnings.push(format!("Module {} extends beyond the habitat walls.", id));
    }

    let conflicts: Vec<ModuleId> = existing
        .iter()
        .filter(|other| boxes_overlap(other, candidate))
        .map(|other| other.module_id)
        .unique()
        .collect();
    if !conflicts.is_empty() {
        warnings.push(format!(
            "Module {} overlaps module(s) {}.",
            id,
            conflicts.iter().join(", ")
        ));
    }

    if existing.iter().any(|other| other.module_id == id) {
        warnings.push(format!("Module {} is already placed in this layout.", id));
    }

    match catalog.lookup(id) {
        Ok(Some(entry)) => {
            let volume = candidate.volume();
            if volume < entry.required_min_volume {
                warnings.push(format!(
                    "Module {}({}) is below its required NHV: {:.2}m³ < {:.2}m³.",
                    id, entry.name, volume, entry.required_min_volume
                ));
            }
        }
        Ok(None) => warnings.push(format!("Module {} is not in the module catalog.", id)),
        Err(e) => {
            warn!(error = %e, "Catalog lookup failed during placement check.");
            warnings.push(e.to_string());
        }
    }

    let valid = center_inside && conflicts.is_empty();
    debug!(valid, conflicts = conflicts.len(), "Placement check complete.");
    PlacementCheck {
        valid,
        conflicts,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{CatalogEntry, CatalogError, ModuleRegistry};
    use crate::core::models::placement::{Position, Rotation, Size};

    fn habitat() -> HabitatDimensions {
        HabitatDimensions::new(10.0, 6.0, 3.0)
    }

    fn catalog() -> ModuleRegistry {
        ModuleRegistry::from_entries([
            CatalogEntry::new(ModuleId(1), "Galley", 4.0, []),
            CatalogEntry::new(ModuleId(2), "Bunk", 2.0, []),
            CatalogEntry::new(ModuleId(3), "Console", 1.0, []),
        ])
        .unwrap()
    }

    fn module(id: u64, center: (f64, f64, f64), size: (f64, f64, f64)) -> PlacedModule {
        PlacedModule::new(
            ModuleId(id),
            Position::new(center.0, center.1, center.2),
            Size::new(size.0, size.1, size.2),
        )
    }

    #[test]
    fn free_spot_is_valid_without_warnings() {
        let existing = [module(1, (2.0, 2.0, 1.5), (2.0, 2.0, 2.0))];
        let candidate = module(2, (6.0, 2.0, 1.5), (1.0, 1.0, 2.0));

        let check = run(&habitat(), &existing, &candidate, &catalog());
        assert_eq!(
            check,
            PlacementCheck {
                valid: true,
                conflicts: vec![],
                warnings: vec![],
            }
        );
    }

    #[test]
    fn overlapping_modules_are_listed_once_each() {
        let existing = [
            module(1, (2.0, 2.0, 1.5), (2.0, 2.0, 2.0)),
            module(3, (4.0, 2.0, 1.5), (1.0, 1.0, 1.5)),
            module(1, (2.0, 4.0, 1.5), (2.0, 2.0, 2.0)),
            module(3, (8.0, 5.0, 1.5), (1.0, 1.0, 1.0)),
        ];
        let candidate = module(2, (3.0, 3.0, 1.5), (2.2, 2.2, 1.0));

        let check = run(&habitat(), &existing, &candidate, &catalog());
        assert!(!check.valid);
        assert_eq!(check.conflicts, vec![ModuleId(1), ModuleId(3)]);
        assert_eq!(check.warnings, vec!["Module 2 overlaps module(s) 1, 3.".to_string()]);
    }

    #[test]
    fn rotation_is_taken_into_account() {
        let existing = [module(1, (4.0, 2.0, 1.5), (2.0, 2.0, 2.0))];
        let mut candidate = module(2, (2.0, 2.0, 1.5), (1.6, 1.6, 1.0));
        assert!(run(&habitat(), &existing, &candidate, &catalog()).valid);

        candidate.rotation = Rotation::new(0.0, 0.0, 45.0);
        let check = run(&habitat(), &existing, &candidate, &catalog());
        assert!(!check.valid);
        assert_eq!(check.conflicts, vec![ModuleId(1)]);
    }

    #[test]
    fn center_outside_habitat_is_invalid() {
        let candidate = module(3, (10.5, 3.0, 1.5), (1.0, 1.0, 1.0));
        let check = run(&habitat(), &[], &candidate, &catalog());
        assert!(!check.valid);
        assert!(check.conflicts.is_empty());
        assert_eq!(
            check.warnings,
            vec!["Module 3 is placed outside the habitat space.".to_string()]
        );
    }

    #[test]
    fn box_past_a_wall_is_only_a_warning() {
        let candidate = module(3, (9.8, 3.0, 1.5), (1.0, 1.0, 1.0));
        let check = run(&habitat(), &[], &candidate, &catalog());
        assert!(check.valid);
        assert_eq!(
            check.warnings,
            vec!["Module 3 extends beyond the habitat walls.".to_string()]
        );
    }

    #[test]
    fn catalog_findings_are_warnings() {
        let small = module(1, (5.0, 3.0, 1.5), (1.0, 1.0, 1.0));
        let check = run(&habitat(), &[], &small, &catalog());
        assert!(check.valid);
        assert_eq!(
            check.warnings,
            vec!["Module 1(Galley) is below its required NHV: 1.00m³ < 4.00m³.".to_string()]
        );

        let unknown = module(9, (5.0, 3.0, 1.5), (1.0, 1.0, 1.0));
        let check = run(&habitat(), &[], &unknown, &catalog());
        assert!(check.valid);
        assert_eq!(
            check.warnings,
            vec!["Module 9 is not in the module catalog.".to_string()]
        );
    }

    #[test]
    fn duplicate_module_id_is_a_warning_not_a_conflict() {
        let existing = [module(2, (5.0, 3.0, 1.5), (2.0, 2.0, 2.0))];
        let candidate = module(2, (5.5, 3.0, 1.5), (1.0, 1.0, 2.0));
        let check = run(&habitat(), &existing, &candidate, &catalog());
        assert!(check.valid);
        assert!(check.conflicts.is_empty());
        assert_eq!(
            check.warnings,
            vec!["Module 2 is already placed in this layout.".to_string()]
        );
    }

    #[test]
    fn catalog_failure_is_reported_as_warning() {
        struct Offline;
        impl ModuleCatalog for Offline {
            fn lookup(&self, id: ModuleId) -> Result<Option<&CatalogEntry>, CatalogError> {
                Err(CatalogError::Backend {
                    id,
                    message: "connection refused".to_string(),
                })
            }
        }

        let candidate = module(2, (5.0, 3.0, 1.5), (1.0, 1.0, 1.0));
        let check = run(&habitat(), &[], &candidate, &Offline);
        assert!(check.valid);
        assert_eq!(check.warnings.len(), 1);
        assert!(check.warnings[0].contains("connection refused"));
    }

    #[test]
    fn non_finite_candidate_is_invalid() {
        let candidate = module(2, (f64::NAN, 3.0, 1.5), (1.0, 1.0, 1.0));
        let check = run(&habitat(), &[], &candidate, &catalog());
        assert!(!check.valid);
        assert_eq!(check.warnings.len(), 1);
    }

    #[test]
    fn request_deserializes_from_camel_case_json() {
        let json = r#"{
            "habitatDimensions": {"x": 10.0, "y": 6.0, "z": 3.0},
            "newModule": {
                "moduleId": 2,
                "position": {"x": 6.0, "y": 2.0, "z": 1.5},
                "size": {"width": 1.0, "height": 1.0, "depth": 2.0}
            }
        }"#;
        let request: PlacementCheckRequest = serde_json::from_str(json).unwrap();
        assert!(request.existing_modules.is_empty());
        assert!(request.run(&catalog()).valid);
    }
}
