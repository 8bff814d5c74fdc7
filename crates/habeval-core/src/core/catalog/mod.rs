//! # Module Catalog
//!
//! The catalog describes every module type a layout may place: its minimum net
//! habitable volume (NHV) and the tags the comfort and efficiency scores are
//! computed from. The engine only ever reads it, through the
//! [`ModuleCatalog`](registry::ModuleCatalog) trait, so evaluations can run
//! against the built-in catalog, a catalog file, or an external service.

pub mod registry;
pub mod tags;

pub use registry::{CatalogEntry, CatalogError, CatalogLoadError, ModuleCatalog, ModuleRegistry};
pub use tags::{ModuleTag, TagCategory, UnknownTagError};
