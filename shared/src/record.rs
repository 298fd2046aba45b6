//! Export records produced by the mesh pipeline
//!
//! These are the in-memory structures handed to a serializer: vertex
//! attribute arrays tagged by semantic name, per-material index arrays and
//! an optional skin payload. All numeric, all owned.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Semantic name of a vertex attribute array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "lowercase")]
pub enum Attrib {
    Position,
    Normal,
    Color,
    Texcoord,
    Texcoord1,
    Tangent,
}

impl Attrib {
    /// Components per vertex
    pub const fn size(self) -> u32 {
        match self {
            Attrib::Position | Attrib::Normal | Attrib::Color | Attrib::Tangent => 3,
            Attrib::Texcoord | Attrib::Texcoord1 => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Attrib::Position => "position",
            Attrib::Normal => "normal",
            Attrib::Color => "color",
            Attrib::Texcoord => "texcoord",
            Attrib::Texcoord1 => "texcoord1",
            Attrib::Tangent => "tangent",
        }
    }
}

/// One vertex attribute, flattened (`size` floats per vertex)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct VertexArray {
    pub attrib: Attrib,
    pub size: u32,
    pub values: Vec<f32>,
}

impl VertexArray {
    pub fn new(attrib: Attrib, values: Vec<f32>) -> Self {
        Self {
            attrib,
            size: attrib.size(),
            values,
        }
    }

    /// Number of vertices described by this array
    pub fn len(&self) -> usize {
        self.values.len() / self.size as usize
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Triangle list for one material slot (`size` is always 3)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct IndexArray {
    pub material: u32,
    pub size: u32,
    pub values: Vec<u32>,
}

impl IndexArray {
    pub fn new(material: u32, values: Vec<u32>) -> Self {
        Self {
            material,
            size: 3,
            values,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.values.len() / 3
    }
}

/// Bone references and bind poses, copied from the skin source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct SkeletonRecord {
    /// Exported node name per bone, "null" when the bone has no node
    pub bone_ref_array: Vec<String>,
    /// Bind pose per bone, 16 floats row-major
    pub transforms: Vec<[f32; 16]>,
}

/// Skinning payload
///
/// `bone_index_array` and `bone_weight_array` hold the influences of all
/// vertices back to back; `bone_count_array[v]` says how many belong to
/// vertex `v`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct SkinRecord {
    pub transform: [f32; 16],
    pub skeleton: SkeletonRecord,
    pub bone_count_array: Vec<u32>,
    pub bone_index_array: Vec<u32>,
    pub bone_weight_array: Vec<f32>,
}

/// Exported mesh data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct MeshRecord {
    pub name: String,
    pub primitive: String,
    pub vertex_arrays: Vec<VertexArray>,
    pub index_arrays: Vec<IndexArray>,
    pub skin: Option<SkinRecord>,
    pub static_usage: bool,
    pub instance_offsets: Option<Vec<f32>>,
}

impl MeshRecord {
    pub fn vertex_array(&self, attrib: Attrib) -> Option<&VertexArray> {
        self.vertex_arrays.iter().find(|a| a.attrib == attrib)
    }

    /// Number of unified vertices (from the position array)
    pub fn vertex_count(&self) -> usize {
        self.vertex_array(Attrib::Position)
            .map(VertexArray::len)
            .unwrap_or(0)
    }

    pub fn triangle_count(&self) -> usize {
        self.index_arrays.iter().map(IndexArray::triangle_count).sum()
    }
}

/// Several mesh records written as one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct MeshDatas {
    pub mesh_datas: Vec<MeshRecord>,
}
