//! Input contract checks
//!
//! The welding and triangulation passes index straight into the mesh
//! arrays. [`validate`] runs once up front so those passes never see a
//! polygon with fewer than three corners or a dangling reference.

use tessera_shared::SourceMesh;

use crate::error::ExportError;

/// Check that every reference and parallel array in `mesh` is consistent
pub fn validate(mesh: &SourceMesh) -> Result<(), ExportError> {
    let name = || mesh.name.clone();
    let vertex_count = mesh.positions.len();
    let loop_count = mesh.loops.len();

    check_len(mesh, "vertex_normals", vertex_count, mesh.vertex_normals.len())?;

    for (i, layer) in mesh.uv_layers.iter().enumerate() {
        check_len(mesh, &format!("uv layer {}", i), loop_count, layer.len())?;
    }
    if let Some(colors) = &mesh.colors {
        check_len(mesh, "colors", loop_count, colors.len())?;
    }

    for (polygon, poly) in mesh.polygons.iter().enumerate() {
        if poly.loop_total < 3 {
            return Err(ExportError::DegeneratePolygon {
                mesh: name(),
                polygon,
                loops: poly.loop_total,
            });
        }
        let end = poly.loop_start as u64 + poly.loop_total as u64;
        if end > loop_count as u64 {
            return Err(ExportError::LoopOutOfRange {
                mesh: name(),
                polygon,
                end,
                loop_count,
            });
        }
    }

    for (loop_index, l) in mesh.loops.iter().enumerate() {
        if l.vertex.index() >= vertex_count {
            return Err(ExportError::VertexOutOfRange {
                mesh: name(),
                loop_index,
                vertex: l.vertex.0,
                vertex_count,
            });
        }
    }

    if !mesh.vertex_weights.is_empty() {
        check_len(mesh, "vertex_weights", vertex_count, mesh.vertex_weights.len())?;

        let group_count = mesh.vertex_groups.len();
        for (vertex, weights) in mesh.vertex_weights.iter().enumerate() {
            if let Some(w) = weights.iter().find(|w| w.group as usize >= group_count) {
                return Err(ExportError::GroupOutOfRange {
                    mesh: name(),
                    vertex,
                    group: w.group,
                    group_count,
                });
            }
        }
    }

    Ok(())
}

fn check_len(
    mesh: &SourceMesh,
    attribute: &str,
    expected: usize,
    actual: usize,
) -> Result<(), ExportError> {
    if expected != actual {
        return Err(ExportError::AttributeLength {
            mesh: mesh.name.clone(),
            attribute: attribute.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_shared::{GroupWeight, MaterialSlot, MeshLoop, Polygon, SourceVertex};

    fn triangle() -> SourceMesh {
        SourceMesh {
            name: "tri".into(),
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vertex_normals: vec![[0.0, 0.0, 1.0]; 3],
            loops: (0..3)
                .map(|v| MeshLoop {
                    vertex: SourceVertex(v),
                    normal: [0.0, 0.0, 1.0],
                })
                .collect(),
            polygons: vec![Polygon {
                loop_start: 0,
                loop_total: 3,
                material: MaterialSlot(0),
                smooth: true,
                normal: [0.0, 0.0, 1.0],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_triangle() {
        assert_eq!(validate(&triangle()), Ok(()));
    }

    #[test]
    fn test_two_loop_polygon_rejected() {
        let mut mesh = triangle();
        mesh.polygons[0].loop_total = 2;
        assert!(matches!(
            validate(&mesh),
            Err(ExportError::DegeneratePolygon { polygon: 0, loops: 2, .. })
        ));
    }

    #[test]
    fn test_loop_range_rejected() {
        let mut mesh = triangle();
        mesh.polygons[0].loop_start = 1;
        assert!(matches!(
            validate(&mesh),
            Err(ExportError::LoopOutOfRange { end: 4, .. })
        ));
    }

    #[test]
    fn test_dangling_vertex_rejected() {
        let mut mesh = triangle();
        mesh.loops[2].vertex = SourceVertex(9);
        assert!(matches!(
            validate(&mesh),
            Err(ExportError::VertexOutOfRange { loop_index: 2, vertex: 9, .. })
        ));
    }

    #[test]
    fn test_uv_layer_length_rejected() {
        let mut mesh = triangle();
        mesh.uv_layers = vec![vec![[0.0, 0.0]; 2]];
        assert!(matches!(
            validate(&mesh),
            Err(ExportError::AttributeLength { expected: 3, actual: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_group_rejected() {
        let mut mesh = triangle();
        mesh.vertex_groups = vec!["root".into()];
        mesh.vertex_weights = vec![
            vec![GroupWeight { group: 0, weight: 1.0 }],
            vec![GroupWeight { group: 1, weight: 1.0 }],
            vec![],
        ];
        assert!(matches!(
            validate(&mesh),
            Err(ExportError::GroupOutOfRange { vertex: 1, group: 1, .. })
        ));
    }
}
