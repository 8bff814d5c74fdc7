use crate::cli::{CheckArgs, OutputFormat};
use crate::commands::catalog::load_registry;
use crate::error::{CliError, Result};
use habeval::core::models::habitat::MIN_HABITAT_EXTENT;
use habeval::workflows::placement_check::{PlacementCheck, PlacementCheckRequest};
use std::fmt::Write;
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: CheckArgs) -> Result<()> {
    let request = load_request(&args.input)?;
    let registry = load_registry(args.catalog.as_deref())?;

    let check = request.run(&registry);
    if !check.valid {
        warn!(
            "Module {} cannot be placed here ({} conflict(s)).",
            request.new_module.module_id,
            check.conflicts.len()
        );
    }

    let rendered = match args.format {
        OutputFormat::Text => render_text(&request, &check),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&check).map_err(|e| CliError::Other(e.into()))?;
            json.push('\n');
            json
        }
    };
    print!("{}", rendered);
    Ok(())
}

fn load_request(path: &Path) -> Result<PlacementCheckRequest> {
    info!("Loading placement check from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let request: PlacementCheckRequest =
        serde_json::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

    let habitat = request.habitat_dimensions;
    if [habitat.x, habitat.y, habitat.z]
        .iter()
        .any(|v| !v.is_finite() || *v < MIN_HABITAT_EXTENT)
    {
        return Err(CliError::Argument(format!(
            "Habitat dimensions must be at least {} m on every axis, got {} x {} x {}.",
            MIN_HABITAT_EXTENT, habitat.x, habitat.y, habitat.z
        )));
    }
    Ok(request)
}

fn render_text(request: &PlacementCheckRequest, check: &PlacementCheck) -> String {
    let mut out = String::new();
    let verdict = if check.valid { "ok" } else { "REJECTED" };
    let _ = writeln!(
        out,
        "Placement of module {}: {}",
        request.new_module.module_id, verdict
    );
    if !check.conflicts.is_empty() {
        let ids: Vec<String> = check.conflicts.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "Conflicts with: {}", ids.join(", "));
    }
    for warning in &check.warnings {
        let _ = writeln!(out, "  ! {}", warning);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const CANDIDATE: &str = r#"{
        "habitatDimensions": {"x": 20.0, "y": 8.0, "z": 3.0},
        "existingModules": [
            {"moduleId": 4, "position": {"x": 4.0, "y": 4.0, "z": 1.5},
             "size": {"width": 4.0, "height": 3.0, "depth": 2.0}}
        ],
        "newModule": {"moduleId": 9, "position": {"x": 5.5, "y": 4.0, "z": 1.5},
                      "size": {"width": 1.5, "height": 2.0, "depth": 1.0}}
    }"#;

    #[test]
    fn overlapping_candidate_is_rendered_with_its_conflicts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candidate.json");
        fs::write(&path, CANDIDATE).unwrap();

        let request = load_request(&path).unwrap();
        let check = request.run(&load_registry(None).unwrap());
        assert!(!check.valid);

        let text = render_text(&request, &check);
        assert!(text.starts_with("Placement of module 9: REJECTED\nConflicts with: 4\n"));
        assert!(text.contains("  ! Module 9 overlaps module(s) 4.\n"));
        assert!(text.contains("below its required NHV"));
    }

    #[test]
    fn run_accepts_a_free_spot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candidate.json");
        fs::write(&path, CANDIDATE.replace("\"x\": 5.5", "\"x\": 12.0")).unwrap();

        let request = load_request(&path).unwrap();
        let check = request.run(&load_registry(None).unwrap());
        assert!(check.valid);
        assert!(check.conflicts.is_empty());

        run(CheckArgs {
            input: path,
            catalog: None,
            format: OutputFormat::Json,
        })
        .unwrap();
    }

    #[test]
    fn degenerate_habitat_is_an_argument_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candidate.json");
        fs::write(&path, CANDIDATE.replace("\"z\": 3.0", "\"z\": 0.0")).unwrap();

        assert!(matches!(load_request(&path), Err(CliError::Argument(_))));
    }

    #[test]
    fn missing_candidate_is_a_parsing_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candidate.json");
        fs::write(&path, r#"{"habitatDimensions": {"x": 1.0, "y": 1.0, "z": 1.0}}"#).unwrap();

        let result = run(CheckArgs {
            input: path.clone(),
            catalog: None,
            format: OutputFormat::Text,
        });
        match result {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a parsing error, got {other:?}"),
        }
    }
}
