//! Vertex welding
//!
//! Turns a polygon mesh into a unified vertex buffer plus an index table
//! with three entries per triangle. Two strategies:
//!
//! - [`fast`]: one [`RawVertex`](crate::vertex::RawVertex) per mesh loop,
//!   merged through a hash map on position/normal/UVs.
//! - [`quality`]: every triangle corner becomes its own
//!   [`ExportVertex`], then corners are welded through power-of-two hash
//!   buckets on the full vertex (including colour).

pub mod fast;
pub mod quality;

use tessera_shared::{MaterialSlot, SourceMesh, SourceVertex};

use crate::config::WeldStrategy;
use crate::vertex::ExportVertex;

/// Output of either weld strategy
#[derive(Debug, Clone)]
pub struct WeldedMesh {
    /// Distinct vertices, in first-seen order
    pub vertices: Vec<ExportVertex>,
    /// Three entries per triangle, each an index into `vertices`
    pub index_table: Vec<u32>,
    /// Material slot per triangle, parallel to `index_table` chunks
    pub triangle_materials: Vec<MaterialSlot>,
}

impl WeldedMesh {
    pub fn triangle_count(&self) -> usize {
        self.triangle_materials.len()
    }

    /// Source vertex behind each unified vertex
    pub fn source_vertices(&self) -> Vec<SourceVertex> {
        self.vertices.iter().map(|v| v.source).collect()
    }
}

/// Weld `mesh` with the chosen strategy. `mesh` must already be validated.
pub fn weld(mesh: &SourceMesh, strategy: WeldStrategy) -> WeldedMesh {
    match strategy {
        WeldStrategy::Fast => fast::weld_fast(mesh),
        WeldStrategy::Quality => quality::weld_quality(mesh),
    }
}

/// Texture V is stored flipped on the primary layer only
#[inline]
pub(crate) fn flip_v(uv: [f32; 2]) -> [f32; 2] {
    [uv[0], 1.0 - uv[1]]
}


#[cfg(test)]
mod tests {
    use super::test_meshes::*;
    use super::*;

    /// Dedup invariant: two table entries share a slot iff their vertices are equal
    fn assert_weld_invariant(welded: &WeldedMesh) {
        for (i, &a) in welded.index_table.iter().enumerate() {
            for &b in &welded.index_table[i + 1..] {
                let same_slot = a == b;
                let same_vertex = welded.vertices[a as usize] == welded.vertices[b as usize];
                assert_eq!(same_slot, same_vertex);
            }
        }
    }

    #[test]
    fn test_both_strategies_share_edge_vertices() {
        for strategy in [WeldStrategy::Fast, WeldStrategy::Quality] {
            let welded = weld(&two_quads(), strategy);
            assert_eq!(welded.vertices.len(), 6, "{strategy}");
            assert_eq!(welded.triangle_count(), 4, "{strategy}");
            assert_eq!(welded.index_table.len(), 12, "{strategy}");
            assert_weld_invariant(&welded);
        }
    }

    #[test]
    fn test_flip_v() {
        assert_eq!(flip_v([0.3, 0.75]), [0.3, 0.25]);
    }
}
