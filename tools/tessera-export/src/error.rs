//! Error types for mesh export
//!
//! Input-contract violations are fatal for the mesh being exported. Nothing
//! in the processing passes themselves can fail once the input is valid.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("polygon {polygon} of mesh '{mesh}' has {loops} loops (need at least 3)")]
    DegeneratePolygon {
        mesh: String,
        polygon: usize,
        loops: u32,
    },

    #[error("polygon {polygon} of mesh '{mesh}' references loops past the end ({end} > {loop_count})")]
    LoopOutOfRange {
        mesh: String,
        polygon: usize,
        end: u64,
        loop_count: usize,
    },

    #[error("loop {loop_index} of mesh '{mesh}' references vertex {vertex} (mesh has {vertex_count})")]
    VertexOutOfRange {
        mesh: String,
        loop_index: usize,
        vertex: u32,
        vertex_count: usize,
    },

    #[error("mesh '{mesh}' {attribute} has {actual} entries, expected {expected}")]
    AttributeLength {
        mesh: String,
        attribute: String,
        expected: usize,
        actual: usize,
    },

    #[error("vertex {vertex} of mesh '{mesh}' references vertex group {group} (mesh has {group_count})")]
    GroupOutOfRange {
        mesh: String,
        vertex: usize,
        group: u32,
        group_count: usize,
    },
}

/// Non-fatal findings reported alongside a successful export
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportWarning {
    /// More source vertices than fit comfortably in 16-bit indices
    #[error(
        "{vertex_count} vertices exceeds {threshold}, split the mesh into smaller parts to fit into 16-bit indices"
    )]
    VertexCountExceeded { vertex_count: usize, threshold: usize },
}
