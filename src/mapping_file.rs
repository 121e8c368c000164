// Mapping files: the parent form's value on disk
//
// A JSON array of `{ "column", "value", "auxiliaryInput" }` objects. The
// editor is seeded from one and its final list is written back as one.

use crate::model::Mapping;
use anyhow::{Context, Result};
use std::path::Path;

/// Read initial mappings; a missing path means an empty list
pub fn read_mappings(path: Option<&Path>) -> Result<Vec<Mapping>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read mappings from {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mappings: Vec<Mapping> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid mappings file {}", path.display()))?;
    tracing::debug!("Loaded {} mapping(s) from {}", mappings.len(), path.display());
    Ok(mappings)
}

/// Render mappings as pretty JSON with a trailing newline
pub fn to_json(mappings: &[Mapping]) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(mappings).context("Failed to serialize mappings")?;
    json.push('\n');
    Ok(json)
}

/// Write mappings to `path`, or stdout when no path is given
pub fn write_mappings(mappings: &[Mapping], path: Option<&Path>) -> Result<()> {
    let json = to_json(mappings)?;
    match path {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write mappings to {}", path.display()))?;
            tracing::info!("Wrote {} mapping(s) to {}", mappings.len(), path.display());
        }
        None => print!("{}", json),
    }
    Ok(())
}
