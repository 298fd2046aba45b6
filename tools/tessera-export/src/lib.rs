//! tessera-export library
//!
//! Turns flattened polygon meshes into GPU-ready vertex/index buffers:
//! vertex welding, per-material index arrays, optional tangents and skin
//! binding. The binary wraps this with manifest builds and single-mesh export.

pub mod config;
pub mod error;
pub mod formats;
pub mod input;
pub mod manifest;
pub mod partition;
pub mod pipeline;
pub mod skin;
pub mod tangent;
pub mod triangulate;
pub mod validate;
pub mod vertex;
pub mod weld;

pub use config::{ConfigOverrides, ExportConfig, WeldStrategy};
pub use error::{ExportError, ExportWarning};
pub use pipeline::{MeshExport, export_mesh};

// Re-export the record types from shared
pub use tessera_shared::{
    Attrib, IndexArray, MeshDatas, MeshRecord, SkinRecord, SkinSource, SourceMesh, VertexArray,
};
