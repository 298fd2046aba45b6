//! Mesh export entry point
//!
//! Runs one mesh through validation, welding, material partitioning,
//! tangent generation and skin binding, and assembles the [`MeshRecord`].

use tessera_shared::{
    Attrib, MeshRecord, SkinSource, SourceMesh, SourceVertex, VertexArray, safe_mesh_name,
};

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportWarning};
use crate::partition::partition_by_material;
use crate::skin::{bind_skin, group_remap, skin_record};
use crate::tangent::generate_tangents;
use crate::validate::validate;
use crate::vertex::ExportVertex;
use crate::weld::weld;

pub const PRIMITIVE_TRIANGLES: &str = "triangles";

/// Result of exporting one mesh
#[derive(Debug, Clone)]
pub struct MeshExport {
    pub record: MeshRecord,
    /// Source vertex of each unified vertex
    pub source_vertices: Vec<SourceVertex>,
    pub warnings: Vec<ExportWarning>,
}

/// Export one mesh.
///
/// Fails only when `mesh` breaks the input contract (see
/// [`validate`](crate::validate::validate)). Meshes with more source
/// vertices than `config.vertex_warning_threshold` still export, with a
/// warning.
pub fn export_mesh(
    mesh: &SourceMesh,
    skin: Option<&SkinSource>,
    config: &ExportConfig,
) -> Result<MeshExport, ExportError> {
    validate(mesh)?;

    let mut warnings = Vec::new();
    if mesh.vertex_count() > config.vertex_warning_threshold {
        let warning = ExportWarning::VertexCountExceeded {
            vertex_count: mesh.vertex_count(),
            threshold: config.vertex_warning_threshold,
        };
        tracing::warn!("Mesh '{}': {}", mesh.name, warning);
        warnings.push(warning);
    }

    if mesh.uv_layers.len() > 2 {
        tracing::warn!(
            "Mesh '{}': {} UV layers, only the first two are exported",
            mesh.name,
            mesh.uv_layers.len()
        );
    }

    let welded = weld(mesh, config.strategy);
    let index_arrays = partition_by_material(&welded.index_table, &welded.triangle_materials);

    let uv_layers = mesh.exported_uv_layers();
    let mut vertex_arrays = vec![
        flatten3(Attrib::Position, &welded.vertices, |v| v.position),
        flatten3(Attrib::Normal, &welded.vertices, |v| v.normal),
    ];
    if mesh.has_colors() {
        vertex_arrays.push(flatten3(Attrib::Color, &welded.vertices, |v| v.color));
    }
    if uv_layers > 0 {
        vertex_arrays.push(flatten2(Attrib::Texcoord, &welded.vertices, |v| v.texcoord0));
    }
    if uv_layers > 1 {
        vertex_arrays.push(flatten2(Attrib::Texcoord1, &welded.vertices, |v| v.texcoord1));
    }

    // Tangents follow the first index array only, using the stored (flipped) UVs.
    if config.export_tangents && uv_layers > 0 {
        let values = generate_tangents(
            &vertex_arrays[0].values,
            &vertex_arrays[1].values,
            &flatten2(Attrib::Texcoord, &welded.vertices, |v| v.texcoord0).values,
            &index_arrays[0].values,
        );
        vertex_arrays.push(VertexArray::new(Attrib::Tangent, values));
    }

    let source_vertices = welded.source_vertices();

    let skin = skin.map(|skin| {
        let remap = group_remap(&mesh.vertex_groups, skin);
        let unresolved = remap.iter().filter(|bone| bone.is_none()).count();
        if unresolved > 0 {
            tracing::warn!(
                "Mesh '{}': {} vertex groups have no matching bone and are ignored",
                mesh.name,
                unresolved
            );
        }
        let binding = bind_skin(&source_vertices, &mesh.vertex_weights, &remap);
        skin_record(skin, binding)
    });

    let record = MeshRecord {
        name: safe_mesh_name(&mesh.name),
        primitive: PRIMITIVE_TRIANGLES.to_string(),
        vertex_arrays,
        index_arrays,
        skin,
        static_usage: mesh.static_usage,
        instance_offsets: mesh.instance_offsets.clone(),
    };

    tracing::info!(
        "Exported mesh '{}' ({}): {} source vertices -> {} vertices, {} triangles, {} index arrays",
        record.name,
        config.strategy,
        mesh.vertex_count(),
        record.vertex_count(),
        welded.triangle_count(),
        record.index_arrays.len()
    );

    Ok(MeshExport {
        record,
        source_vertices,
        warnings,
    })
}

fn flatten3(
    attrib: Attrib,
    vertices: &[ExportVertex],
    field: impl Fn(&ExportVertex) -> [f32; 3],
) -> VertexArray {
    VertexArray::new(attrib, vertices.iter().flat_map(field).collect())
}

fn flatten2(
    attrib: Attrib,
    vertices: &[ExportVertex],
    field: impl Fn(&ExportVertex) -> [f32; 2],
) -> VertexArray {
    VertexArray::new(attrib, vertices.iter().flat_map(field).collect())
}
