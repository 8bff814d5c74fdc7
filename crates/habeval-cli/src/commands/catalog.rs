use crate::cli::CatalogArgs;
use crate::error::{CliError, Result};
use habeval::core::catalog::{CatalogEntry, ModuleRegistry, TagCategory};
use habeval::core::models::ids::ModuleId;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;
use tracing::info;

pub fn run(args: CatalogArgs) -> Result<()> {
    let registry = load_registry(args.catalog.as_deref())?;

    let output = match args.id {
        Some(id) => {
            let entry = registry.get(ModuleId::from(id)).ok_or_else(|| {
                CliError::Argument(format!("Module {} is not in the catalog.", id))
            })?;
            render_details(entry)
        }
        None => render_entries(registry.iter()),
    };
    print!("{}", output);
    Ok(())
}

/// Loads the catalog at `path`, or the built-in catalog when no path is given.
pub fn load_registry(path: Option<&Path>) -> Result<ModuleRegistry> {
    let registry = match path {
        Some(path) => {
            info!("Loading module catalog from {:?}", path);
            ModuleRegistry::load(path)?
        }
        None => ModuleRegistry::builtin()?,
    };
    info!("Module catalog holds {} module(s).", registry.len());
    Ok(registry)
}

fn render_entries<'a>(entries: impl Iterator<Item = &'a CatalogEntry>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>3}  {:<28} {:<6} {:>8}  TAGS", "ID", "NAME", "CODE", "NHV(m³)");
    for entry in entries {
        let tags = entry
            .tags
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "{:>3}  {:<28} {:<6} {:>8.2}  {}",
            entry.id.get(),
            entry.name,
            entry.code.as_deref().unwrap_or("-"),
            entry.required_min_volume,
            tags
        );
    }
    out
}

/// Full description of one module, with its tags grouped by category.
fn render_details(entry: &CatalogEntry) -> String {
    let mut out = String::new();
    let _ = write!(out, "Module {}: {}", entry.id, entry.name);
    if let Some(code) = &entry.code {
        let _ = write!(out, " ({})", code);
    }
    out.push('\n');
    if let Some(display_name) = &entry.display_name {
        let _ = writeln!(out, "  Equipment:    {}", display_name);
    }
    let _ = writeln!(out, "  Minimum NHV:  {:.2} m³", entry.required_min_volume);

    let mut by_category: BTreeMap<TagCategory, Vec<&str>> = BTreeMap::new();
    for tag in &entry.tags {
        by_category.entry(tag.category()).or_default().push(tag.label());
    }
    if !by_category.is_empty() {
        let _ = writeln!(out, "  Tags:");
        for (category, labels) in &by_category {
            let _ = writeln!(out, "    {:<12} {}", format!("{}:", category), labels.join(", "));
        }
    }

    if !entry.functions.is_empty() {
        let _ = writeln!(out, "  Functions:");
        for function in &entry.functions {
            let _ = writeln!(out, "    - {}", function);
        }
    }
    if let Some(guide) = &entry.design_guide {
        let _ = writeln!(out, "  Design guide:");
        let _ = writeln!(out, "    {}", guide);
    }
    out
}
