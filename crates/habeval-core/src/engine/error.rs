use thiserror::Error;

use crate::core::catalog::CatalogError;
use crate::core::models::ids::ModuleId;

/// Faults that prevent an evaluation from completing.
///
/// These never describe a bad layout; rejected layouts are reported through
/// the validation verdict instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Module {module_id} (placement #{index}) was not found in the module catalog")]
    ModuleNotFound { module_id: ModuleId, index: usize },

    #[error("Module catalog lookup failed: {source}")]
    Catalog {
        #[from]
        source: CatalogError,
    },

    #[error("Invalid numeric input for {quantity}: {value}")]
    NumericDomain { quantity: &'static str, value: f64 },
}
