//! Shared types for the Tessera mesh pipeline.
//!
//! Used by `tessera-export` (processing + CLI) and by whatever host-side
//! tool flattens a scene into [`SourceMesh`] descriptions.
//!
//! # Modules
//!
//! - [`mesh`] - flattened input meshes and skeleton sources
//! - [`record`] - export records (vertex/index arrays, skin payload)
//! - [`ids`] - integer id newtypes and name sanitizing
//! - [`math`] - POD matrix type

pub mod ids;
pub mod math;
pub mod mesh;
pub mod record;

pub use ids::{BoneIndex, MaterialSlot, SourceVertex, safe_mesh_name};
pub use math::Matrix4;
pub use mesh::{BoneSource, GroupWeight, MeshLoop, Polygon, SkinSource, SourceMesh};
pub use record::{
    Attrib, IndexArray, MeshDatas, MeshRecord, SkeletonRecord, SkinRecord, VertexArray,
};
