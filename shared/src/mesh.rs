//! Flattened mesh description handed to the exporter by the host scene.
//!
//! Everything here is plain data: no references back into a modelling
//! application. Per-face-corner tables (UVs, colours) are stored per loop,
//! so corner `k` of a polygon is loop `loop_start + k`.

use serde::{Deserialize, Serialize};

use crate::ids::{MaterialSlot, SourceVertex};
use crate::math::Matrix4;

/// One polygon corner: which source vertex it uses and its split normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshLoop {
    pub vertex: SourceVertex,
    pub normal: [f32; 3],
}

/// A polygon as a contiguous run of loops
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub loop_start: u32,
    pub loop_total: u32,
    #[serde(default)]
    pub material: MaterialSlot,
    /// Smooth-shaded polygons use shared vertex normals, flat ones the face normal
    #[serde(default = "default_true")]
    pub smooth: bool,
    pub normal: [f32; 3],
}

impl Polygon {
    /// Loop indices of this polygon, in winding order
    pub fn loops(&self) -> std::ops::Range<u32> {
        self.loop_start..self.loop_start + self.loop_total
    }
}

/// Weight of a source vertex in one vertex group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupWeight {
    pub group: u32,
    pub weight: f32,
}

/// Flattened mesh data for one export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMesh {
    pub name: String,

    /// Source vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Source vertex normals (used by smooth polygons in the quality path)
    pub vertex_normals: Vec<[f32; 3]>,

    pub loops: Vec<MeshLoop>,
    pub polygons: Vec<Polygon>,

    /// UV layers, each parallel to `loops`. Only the first two are exported.
    #[serde(default)]
    pub uv_layers: Vec<Vec<[f32; 2]>>,
    /// Vertex colour layer, parallel to `loops`
    #[serde(default)]
    pub colors: Option<Vec<[f32; 3]>>,

    /// Vertex group names, indexed by `GroupWeight::group`
    #[serde(default)]
    pub vertex_groups: Vec<String>,
    /// Group memberships per source vertex (empty or parallel to `positions`)
    #[serde(default)]
    pub vertex_weights: Vec<Vec<GroupWeight>>,

    #[serde(default = "default_true")]
    pub static_usage: bool,
    #[serde(default)]
    pub instance_offsets: Option<Vec<f32>>,
}

impl SourceMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of UV layers that make it into the output (at most two)
    pub fn exported_uv_layers(&self) -> usize {
        self.uv_layers.len().min(2)
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }
}

/// A bone of the armature deforming a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneSource {
    pub name: String,
    /// Name of the exported scene node for this bone, if it was exported
    #[serde(default)]
    pub node_ref: Option<String>,
    /// Bind pose in armature space, already composed by the host
    #[serde(default)]
    pub bind_transform: Matrix4,
}

/// Skeleton reference data for a skinned mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinSource {
    /// World transform of the mesh object at bind time
    #[serde(default)]
    pub object_transform: Matrix4,
    pub bones: Vec<BoneSource>,
}

fn default_true() -> bool {
    true
}
