//! Quality weld: deindex, then bucketed exact deduplication
//!
//! Slower than the fast weld, but welds on every exported field including
//! colour, so no corner is ever merged with one that differs in any way.

use tessera_shared::{MaterialSlot, SourceMesh};

use super::{WeldedMesh, flip_v};
use crate::triangulate::{split_corners, triangle_count};
use crate::vertex::ExportVertex;

/// Split every polygon into triangles and give each triangle corner its own
/// [`ExportVertex`].
///
/// Smooth polygons take the shared source vertex normal, flat ones the face
/// normal. Colour comes from the per-corner colour table. The primary UV
/// layer has V flipped (`1 - v`); the secondary layer is copied as is.
///
/// Returns the corners (three per triangle) and the material slot of each
/// triangle.
pub fn deindex(mesh: &SourceMesh) -> (Vec<ExportVertex>, Vec<MaterialSlot>) {
    let triangle_total: usize = mesh
        .polygons
        .iter()
        .map(|p| triangle_count(p.loop_total as usize))
        .sum();

    let mut corners = Vec::with_capacity(triangle_total * 3);
    let mut materials = Vec::with_capacity(triangle_total);

    let uv0 = mesh.uv_layers.first();
    let uv1 = mesh.uv_layers.get(1);

    for poly in &mesh.polygons {
        for tri in split_corners(poly.loop_total as usize) {
            for corner in tri {
                let l = poly.loop_start as usize + corner;
                let source = mesh.loops[l].vertex;

                let normal = if poly.smooth {
                    mesh.vertex_normals[source.index()]
                } else {
                    poly.normal
                };

                let mut v = ExportVertex::new(source, mesh.positions[source.index()], normal);
                if let Some(colors) = &mesh.colors {
                    v.color = colors[l];
                }
                if let Some(layer) = uv0 {
                    v.texcoord0 = flip_v(layer[l]);
                }
                if let Some(layer) = uv1 {
                    v.texcoord1 = layer[l];
                }
                v.rehash();

                corners.push(v);
            }
            materials.push(poly.material);
        }
    }

    (corners, materials)
}

/// Number of hash buckets for `vertex_count` exploded vertices: the largest
/// power of two not above `vertex_count / 8`, at least 1.
pub fn bucket_count(vertex_count: usize) -> usize {
    let target = vertex_count >> 3;
    if target > 1 {
        1 << target.ilog2()
    } else {
        1
    }
}

/// Bucket a hash falls into; `bucket_count` must be a power of two
#[inline]
pub fn bucket_of(hash: u64, bucket_count: usize) -> usize {
    (hash & (bucket_count as u64 - 1)) as usize
}

/// Result of [`unify`]
#[derive(Debug, Clone)]
pub struct Unified {
    pub vertices: Vec<ExportVertex>,
    /// One entry per exploded vertex, pointing into `vertices`
    pub index_table: Vec<u32>,
    pub bucket_count: usize,
}

/// Collapse equal exploded vertices.
///
/// Each vertex only scans its own hash bucket. A bucket holds indices of
/// exploded vertices that started a new unified slot.
pub fn unify(exploded: &[ExportVertex]) -> Unified {
    let bucket_count = bucket_count(exploded.len());
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); bucket_count];
    let mut vertices: Vec<ExportVertex> = Vec::new();
    let mut index_table: Vec<u32> = Vec::with_capacity(exploded.len());

    for (i, ev) in exploded.iter().enumerate() {
        let bucket = &mut buckets[bucket_of(ev.hash(), bucket_count)];

        match bucket.iter().copied().find(|&b| exploded[b] == *ev) {
            Some(b) => index_table.push(index_table[b]),
            None => {
                index_table.push(vertices.len() as u32);
                vertices.push(*ev);
                bucket.push(i);
            }
        }
    }

    Unified {
        vertices,
        index_table,
        bucket_count,
    }
}

pub fn weld_quality(mesh: &SourceMesh) -> WeldedMesh {
    let (exploded, triangle_materials) = deindex(mesh);
    let unified = unify(&exploded);

    tracing::debug!(
        "Quality weld '{}': {} corners -> {} vertices ({} buckets)",
        mesh.name,
        exploded.len(),
        unified.vertices.len(),
        unified.bucket_count
    );

    WeldedMesh {
        vertices: unified.vertices,
        index_table: unified.index_table,
        triangle_materials,
    }
}
