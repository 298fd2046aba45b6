//! Loading host-exported source records from disk

use anyhow::{Context, Result};
use std::path::Path;

use tessera_shared::{SkinSource, SourceMesh};

/// Load a flattened source mesh from a JSON file
pub fn load_source_mesh(path: &Path) -> Result<SourceMesh> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read source mesh: {:?}", path))?;
    let mesh: SourceMesh = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse source mesh: {:?}", path))?;

    tracing::debug!(
        "Loaded mesh '{}': {} vertices, {} loops, {} polygons",
        mesh.name,
        mesh.positions.len(),
        mesh.loops.len(),
        mesh.polygons.len()
    );
    Ok(mesh)
}

/// Load skeleton reference data from a JSON file
pub fn load_skin_source(path: &Path) -> Result<SkinSource> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read skin source: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse skin source: {:?}", path))
}
