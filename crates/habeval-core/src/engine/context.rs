use super::config::{EvaluationConfig, MissingModulePolicy};
use super::error::EngineError;
use crate::core::catalog::{CatalogEntry, ModuleCatalog, ModuleTag};
use crate::core::models::habitat::HabitatDimensions;
use crate::core::models::placement::PlacedModule;
use crate::core::models::request::LayoutRequest;
use tracing::warn;

/// A placement paired with the catalog entry of its module.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPlacement<'a> {
    pub index: usize,
    pub placement: &'a PlacedModule,
    pub entry: &'a CatalogEntry,
}

impl ResolvedPlacement<'_> {
    #[inline]
    pub fn has_tag(&self, tag: ModuleTag) -> bool {
        self.entry.has_tag(tag)
    }

    /// Placed volume over the catalog's minimum volume.
    #[inline]
    pub fn nhv_ratio(&self) -> f64 {
        self.placement.volume() / self.entry.required_min_volume
    }
}

/// Everything a validation or scoring task reads while evaluating one request.
#[derive(Debug, Clone)]
pub struct EvaluationContext<'a> {
    pub request: &'a LayoutRequest,
    pub config: &'a EvaluationConfig,
    resolved: Vec<ResolvedPlacement<'a>>,
}

impl<'a> EvaluationContext<'a> {
    /// Resolves every placement against the catalog and checks the numeric
    /// inputs the scoring formulas divide by or measure with.
    pub fn resolve<C: ModuleCatalog + ?Sized>(
        request: &'a LayoutRequest,
        catalog: &'a C,
        config: &'a EvaluationConfig,
    ) -> Result<Self, EngineError> {
        check_habitat(&request.habitat)?;

        let mut resolved = Vec::with_capacity(request.placements.len());
        for (index, placement) in request.placements.iter().enumerate() {
            check_placement(placement)?;
            match catalog.lookup(placement.module_id)? {
                Some(entry) => {
                    ensure_positive("catalog minimum volume", entry.required_min_volume)?;
                    resolved.push(ResolvedPlacement {
                        index,
                        placement,
                        entry,
                    });
                }
                None => match config.missing_module_policy {
                    MissingModulePolicy::Skip => {
                        warn!(
                            module_id = %placement.module_id,
                            index,
                            "Module not found in catalog; skipping placement."
                        );
                    }
                    MissingModulePolicy::Fail => {
                        return Err(EngineError::ModuleNotFound {
                            module_id: placement.module_id,
                            index,
                        });
                    }
                },
            }
        }

        Ok(Self {
            request,
            config,
            resolved,
        })
    }

    #[inline]
    pub fn habitat(&self) -> &'a HabitatDimensions {
        &self.request.habitat
    }

    #[inline]
    pub fn placements(&self) -> &'a [PlacedModule] {
        &self.request.placements
    }

    /// Placements whose module was found in the catalog, in request order.
    #[inline]
    pub fn resolved(&self) -> &[ResolvedPlacement<'a>] {
        &self.resolved
    }

    pub fn with_tag(&self, tag: ModuleTag) -> Vec<&ResolvedPlacement<'a>> {
        self.resolved.iter().filter(|r| r.has_tag(tag)).collect()
    }
}

fn check_habitat(habitat: &HabitatDimensions) -> Result<(), EngineError> {
    ensure_positive("habitat x extent", habitat.x)?;
    ensure_positive("habitat y extent", habitat.y)?;
    ensure_positive("habitat z extent", habitat.z)?;
    Ok(())
}

fn check_placement(placement: &PlacedModule) -> Result<(), EngineError> {
    let p = &placement.position;
    let r = &placement.rotation;
    for (quantity, value) in [
        ("module position x", p.x),
        ("module position y", p.y),
        ("module position z", p.z),
        ("module rotation x", r.x),
        ("module rotation y", r.y),
        ("module rotation z", r.z),
    ] {
        ensure_finite(quantity, value)?;
    }
    let s = &placement.size;
    ensure_positive("module width", s.width)?;
    ensure_positive("module height", s.height)?;
    ensure_positive("module depth", s.depth)?;
    Ok(())
}

#[inline]
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NumericDomain { quantity, value })
    }
}

#[inline]
fn ensure_positive(quantity: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::NumericDomain { quantity, value })
    }
}
