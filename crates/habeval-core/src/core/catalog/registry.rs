use super::tags::ModuleTag;
use crate::core::models::ids::ModuleId;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../../../data/modules.toml");

/// One module type of the catalog: its identity, minimum volume and tags.
///
/// The descriptive fields (`display_name`, `functions`, `design_guide`) are
/// informational and never enter scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: ModuleId,
    pub name: String,
    pub code: Option<String>,
    /// Equipment label when it differs from `name`.
    pub display_name: Option<String>,
    /// Minimum net habitable volume (NHV) in cubic meters.
    pub required_min_volume: f64,
    pub tags: BTreeSet<ModuleTag>,
    pub functions: Vec<String>,
    pub design_guide: Option<String>,
}

impl CatalogEntry {
    pub fn new(
        id: ModuleId,
        name: impl Into<String>,
        required_min_volume: f64,
        tags: impl IntoIterator<Item = ModuleTag>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            code: None,
            display_name: None,
            required_min_volume,
            tags: tags.into_iter().collect(),
            functions: Vec::new(),
            design_guide: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_functions(mut self, functions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.functions = functions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_design_guide(mut self, design_guide: impl Into<String>) -> Self {
        self.design_guide = Some(design_guide.into());
        self
    }

    /// `display_name` if set, otherwise `name`.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn has_tag(&self, tag: ModuleTag) -> bool {
        self.tags.contains(&tag)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Module catalog backend failed while looking up module {id}: {message}")]
    Backend { id: ModuleId, message: String },
}

/// Read-only access to the module catalog.
///
/// Unknown ids resolve to `Ok(None)`; `Err` is reserved for backend faults
/// that prevent answering at all.
pub trait ModuleCatalog {
    fn lookup(&self, id: ModuleId) -> Result<Option<&CatalogEntry>, CatalogError>;
}

impl<C: ModuleCatalog + ?Sized> ModuleCatalog for &C {
    fn lookup(&self, id: ModuleId) -> Result<Option<&CatalogEntry>, CatalogError> {
        (**self).lookup(id)
    }
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Unsupported catalog format for '{path}', expected a .toml or .csv file")]
    UnsupportedFormat { path: String },
    #[error("Invalid catalog entry for module {id}: {reason}")]
    InvalidEntry { id: u64, reason: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    module: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    id: u64,
    name: String,
    code: Option<String>,
    display_name: Option<String>,
    nhv: f64,
    #[serde(default)]
    tags: Vec<ModuleTag>,
    #[serde(default)]
    functions: Vec<String>,
    design_guide: Option<String>,
}

impl From<RawEntry> for CatalogEntry {
    fn from(raw: RawEntry) -> Self {
        let mut entry = CatalogEntry::new(ModuleId::from(raw.id), raw.name, raw.nhv, raw.tags)
            .with_functions(raw.functions);
        entry.code = raw.code;
        entry.display_name = raw.display_name;
        entry.design_guide = raw.design_guide;
        entry
    }
}

#[derive(Debug, Deserialize)]
struct CsvRecord {
    id: u64,
    name: String,
    code: Option<String>,
    nhv: f64,
    #[serde(default)]
    tags: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    functions: Option<String>,
    #[serde(default)]
    design_guide: Option<String>,
}

/// Splits a `;`-separated CSV cell, dropping blank items.
fn split_list(cell: Option<&str>) -> impl Iterator<Item = &str> {
    cell.unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

fn non_empty(cell: Option<String>) -> Option<String> {
    cell.filter(|c| !c.trim().is_empty())
}

/// In-memory module catalog keyed by module id.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    entries: BTreeMap<ModuleId, CatalogEntry>,
}

impl ModuleRegistry {
    /// The 18-module catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogLoadError> {
        Self::from_toml_str(BUILTIN_CATALOG, "<builtin>")
    }

    /// Loads a catalog from a `.toml` (`[[module]]` tables) or `.csv` file.
    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let display = path.to_string_lossy().to_string();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| CatalogLoadError::Io {
                        path: display.clone(),
                        source: e,
                    })?;
                Self::from_toml_str(&content, &display)
            }
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::load_csv(path),
            _ => Err(CatalogLoadError::UnsupportedFormat { path: display }),
        }
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = CatalogEntry>,
    ) -> Result<Self, CatalogLoadError> {
        let mut registry = Self::default();
        for entry in entries {
            registry.insert(entry)?;
        }
        Ok(registry)
    }

    fn from_toml_str(content: &str, path: &str) -> Result<Self, CatalogLoadError> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogLoadError::Toml {
            path: path.to_string(),
            source: e,
        })?;
        Self::from_entries(file.module.into_iter().map(CatalogEntry::from))
    }

    fn load_csv(path: &Path) -> Result<Self, CatalogLoadError> {
        let csv_error = |e: csv::Error| CatalogLoadError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        };
        let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;

        let mut registry = Self::default();
        for result in reader.deserialize::<CsvRecord>() {
            let record = result.map_err(csv_error)?;
            let tags = split_list(record.tags.as_deref())
                .map(|label| {
                    label
                        .parse::<ModuleTag>()
                        .map_err(|e| CatalogLoadError::InvalidEntry {
                            id: record.id,
                            reason: e.to_string(),
                        })
                })
                .collect::<Result<BTreeSet<_>, _>>()?;
            let mut entry =
                CatalogEntry::new(ModuleId::from(record.id), record.name, record.nhv, tags)
                    .with_functions(split_list(record.functions.as_deref()));
            if let Some(code) = non_empty(record.code) {
                entry = entry.with_code(code);
            }
            if let Some(display_name) = non_empty(record.display_name) {
                entry = entry.with_display_name(display_name);
            }
            if let Some(design_guide) = non_empty(record.design_guide) {
                entry = entry.with_design_guide(design_guide);
            }
            registry.insert(entry)?;
        }
        Ok(registry)
    }

    fn insert(&mut self, entry: CatalogEntry) -> Result<(), CatalogLoadError> {
        let id = entry.id.get();
        if id == 0 {
            return Err(CatalogLoadError::InvalidEntry {
                id,
                reason: "module ids start at 1".to_string(),
            });
        }
        if !entry.required_min_volume.is_finite() || entry.required_min_volume <= 0.0 {
            return Err(CatalogLoadError::InvalidEntry {
                id,
                reason: format!(
                    "minimum volume must be positive, got {}",
                    entry.required_min_volume
                ),
            });
        }
        if self.entries.contains_key(&entry.id) {
            return Err(CatalogLoadError::InvalidEntry {
                id,
                reason: "duplicate module id".to_string(),
            });
        }
        self.entries.insert(entry.id, entry);
        Ok(())
    }

    pub fn get(&self, id: ModuleId) -> Option<&CatalogEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}

impl ModuleCatalog for ModuleRegistry {
    fn lookup(&self, id: ModuleId) -> Result<Option<&CatalogEntry>, CatalogError> {
        Ok(self.entries.get(&id))
    }
}
