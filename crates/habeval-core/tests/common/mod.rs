#![allow(dead_code)]

use habeval::core::catalog::ModuleRegistry;
use habeval::core::models::habitat::HabitatDimensions;
use habeval::core::models::ids::ModuleId;
use habeval::core::models::placement::{PlacedModule, Position, Size};
use habeval::core::models::request::LayoutRequest;

pub const HABITAT: (f64, f64, f64) = (20.0, 8.0, 3.0);

pub fn builtin_catalog() -> ModuleRegistry {
    ModuleRegistry::builtin().expect("built-in catalog must load")
}

/// A 2 m × 2 m cross-section box whose volume is `scale` times the module's NHV,
/// centered in the habitat.
pub fn scaled_placement(catalog: &ModuleRegistry, id: u64, scale: f64) -> PlacedModule {
    let nhv = catalog
        .get(ModuleId(id))
        .map(|e| e.required_min_volume)
        .unwrap_or(1.0);
    PlacedModule::new(
        ModuleId(id),
        Position::new(HABITAT.0 / 2.0, HABITAT.1 / 2.0, HABITAT.2 / 2.0),
        Size::new(nhv / 4.0 * scale, 2.0, 2.0),
    )
}

/// Every built-in module placed at exactly its minimum volume.
pub fn complete_layout(catalog: &ModuleRegistry) -> LayoutRequest {
    layout_with_ids(catalog, 1..=18)
}

pub fn layout_with_ids(
    catalog: &ModuleRegistry,
    ids: impl IntoIterator<Item = u64>,
) -> LayoutRequest {
    LayoutRequest::new(
        HabitatDimensions::new(HABITAT.0, HABITAT.1, HABITAT.2),
        ids.into_iter()
            .map(|id| scaled_placement(catalog, id, 1.0))
            .collect(),
    )
}

/// Cell box used by [`grid_layout`]: 24.1 m³, above every built-in NHV.
pub const GRID_BOX: (f64, f64, f64) = (3.2, 2.6, 2.9);

/// Every built-in module in its own cell of a 6 × 3 grid over the floor.
///
/// Module `k` sits in column `(k - 1) % 6`, row `(k - 1) / 6`. Neighbouring
/// boxes leave gaps of 0.13 m along x and 0.07 m along y, and nothing is
/// rotated.
pub fn grid_layout() -> LayoutRequest {
    let (cell_x, cell_y) = (HABITAT.0 / 6.0, HABITAT.1 / 3.0);
    let placements = (1..=18u64)
        .map(|id| {
            let (col, row) = ((id - 1) % 6, (id - 1) / 6);
            PlacedModule::new(
                ModuleId(id),
                Position::new(
                    (col as f64 + 0.5) * cell_x,
                    (row as f64 + 0.5) * cell_y,
                    HABITAT.2 / 2.0,
                ),
                Size::new(GRID_BOX.0, GRID_BOX.1, GRID_BOX.2),
            )
        })
        .collect();
    LayoutRequest::new(
        HabitatDimensions::new(HABITAT.0, HABITAT.1, HABITAT.2),
        placements,
    )
}
