//! Math types for Tessera
//!
//! Provides POD (Plain Old Data) math types that are serializable and
//! can be shared across crates without requiring glam as a dependency.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// 4x4 transform matrix (row-major storage, POD type)
///
/// Used for object world transforms and bone bind poses. The exporter never
/// composes these; they are carried from the host scene into the skin record.
///
/// Memory layout (64 bytes): four rows of four floats, translation in the
/// last column.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Encode, Decode)]
#[repr(C)]
pub struct Matrix4 {
    pub rows: [[f32; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Pure translation
    pub const fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            rows: [
                [1.0, 0.0, 0.0, x],
                [0.0, 1.0, 0.0, y],
                [0.0, 0.0, 1.0, z],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Flatten to 16 floats, row after row
    pub fn to_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (row, chunk) in self.rows.iter().zip(out.chunks_exact_mut(4)) {
            chunk.copy_from_slice(row);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let m = Matrix4::IDENTITY;
        assert_eq!(m.rows[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(m.rows[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Matrix4::default(), m);
    }

    #[test]
    fn test_to_array_is_row_major() {
        let m = Matrix4::from_translation(4.0, 5.0, 6.0);
        let arr = m.to_array();
        assert_eq!(arr[3], 4.0);
        assert_eq!(arr[7], 5.0);
        assert_eq!(arr[11], 6.0);
        assert_eq!(arr[15], 1.0);
    }
}
