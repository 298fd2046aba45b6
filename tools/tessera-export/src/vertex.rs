//! Vertex keys used for welding
//!
//! [`ExportVertex`] is the quality-path vertex: every field takes part in
//! equality, and a precomputed hash lets most comparisons bail out early.
//! [`RawVertex`] is the fast-path vertex: one per mesh loop, keyed on
//! position, normal and UVs only.
//!
//! Floats are compared and hashed by bit pattern. Two vertices merge only if
//! every compared field is bit-for-bit identical; there is no epsilon.

use smallvec::SmallVec;

use tessera_shared::{SourceMesh, SourceVertex};

/// Multiplier folding each field into [`ExportVertex::hash`]
pub const HASH_MULTIPLIER: u64 = 21737;

pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

#[inline]
fn hash_f32(value: f32) -> u64 {
    value.to_bits() as u64
}

#[inline]
fn bits_eq<const N: usize>(a: &[f32; N], b: &[f32; N]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

/// A triangle corner, ready for deduplication
#[derive(Debug, Clone, Copy)]
pub struct ExportVertex {
    /// Source vertex this corner came from (needed for skin weights)
    pub source: SourceVertex,
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub texcoord0: [f32; 2],
    pub texcoord1: [f32; 2],
    hash: u64,
}

impl ExportVertex {
    /// Corner with default white colour and zero texcoords
    pub fn new(source: SourceVertex, position: [f32; 3], normal: [f32; 3]) -> Self {
        let mut v = Self {
            source,
            position,
            normal,
            color: WHITE,
            texcoord0: [0.0; 2],
            texcoord1: [0.0; 2],
            hash: 0,
        };
        v.rehash();
        v
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self.rehash();
        self
    }

    pub fn with_texcoord0(mut self, uv: [f32; 2]) -> Self {
        self.texcoord0 = uv;
        self.rehash();
        self
    }

    pub fn with_texcoord1(mut self, uv: [f32; 2]) -> Self {
        self.texcoord1 = uv;
        self.rehash();
        self
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Recompute the cached hash; required after mutating a field directly
    pub fn rehash(&mut self) {
        self.hash = compute_hash(self);
    }
}

/// Fold every compared field into one 64-bit value.
///
/// Seeded with the hash of `position.x`, then `h = h * 21737 + hash(field)`
/// for position.y/z, normal.xyz, color.rgb, texcoord0.xy, texcoord1.xy.
pub fn compute_hash(v: &ExportVertex) -> u64 {
    let fields = [
        v.position[1],
        v.position[2],
        v.normal[0],
        v.normal[1],
        v.normal[2],
        v.color[0],
        v.color[1],
        v.color[2],
        v.texcoord0[0],
        v.texcoord0[1],
        v.texcoord1[0],
        v.texcoord1[1],
    ];

    fields.iter().fold(hash_f32(v.position[0]), |h, &f| {
        h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(hash_f32(f))
    })
}

impl PartialEq for ExportVertex {
    /// Hash first, then position, normal, texcoord0, color, texcoord1.
    /// The source vertex is bookkeeping and does not take part.
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && bits_eq(&self.position, &other.position)
            && bits_eq(&self.normal, &other.normal)
            && bits_eq(&self.texcoord0, &other.texcoord0)
            && bits_eq(&self.color, &other.color)
            && bits_eq(&self.texcoord1, &other.texcoord1)
    }
}

impl Eq for ExportVertex {}

/// A loop-level vertex for the fast weld
///
/// Identity covers position, normal and UV layers. Colour rides along with
/// whichever loop is seen first for a given key.
#[derive(Debug, Clone)]
pub struct RawVertex {
    pub source: SourceVertex,
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Up to two UV layers, as stored in the source mesh
    pub uvs: SmallVec<[[f32; 2]; 2]>,
    pub color: [f32; 3],
    /// Mesh loops merged into this vertex, in visit order
    pub loops: Vec<u32>,
}

impl RawVertex {
    /// Build the raw vertex for mesh loop `loop_index`
    pub fn from_loop(mesh: &SourceMesh, loop_index: u32) -> Self {
        let l = loop_index as usize;
        let mesh_loop = &mesh.loops[l];
        let source = mesh_loop.vertex;

        Self {
            source,
            position: mesh.positions[source.index()],
            normal: mesh_loop.normal,
            uvs: mesh
                .uv_layers
                .iter()
                .take(2)
                .map(|layer| layer[l])
                .collect(),
            color: mesh.colors.as_ref().map(|c| c[l]).unwrap_or(WHITE),
            loops: vec![loop_index],
        }
    }

    /// Identity key for hash-map lookups
    pub fn key(&self) -> RawVertexKey {
        RawVertexKey {
            position: self.position.map(f32::to_bits),
            normal: self.normal.map(f32::to_bits),
            uvs: self.uvs.iter().map(|uv| uv.map(f32::to_bits)).collect(),
        }
    }
}

/// Identity of a [`RawVertex`]: position, normal and UVs by bit pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawVertexKey {
    position: [u32; 3],
    normal: [u32; 3],
    uvs: SmallVec<[[u32; 2]; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn corner(position: [f32; 3]) -> ExportVertex {
        ExportVertex::new(SourceVertex(0), position, [0.0, 0.0, 1.0])
    }

    #[test]
    fn test_defaults() {
        let v = corner([1.0, 2.0, 3.0]);
        assert_eq!(v.color, WHITE);
        assert_eq!(v.texcoord0, [0.0, 0.0]);
        assert_eq!(v.texcoord1, [0.0, 0.0]);
    }

    #[test]
    fn test_hash_fold_order() {
        let v = ExportVertex::new(SourceVertex(0), [1.0, 0.0, 0.0], [0.0; 3])
            .with_color([0.0; 3]);

        // Only position.x is non-zero, so the seed is multiplied 12 times.
        let expected = (1.0f32.to_bits() as u64).wrapping_mul(HASH_MULTIPLIER.wrapping_pow(12));
        assert_eq!(v.hash(), expected);

        // Last field (texcoord1.y) is added without a further multiply.
        let w = v.with_texcoord1([0.0, 2.0]);
        assert_eq!(w.hash(), expected.wrapping_add(2.0f32.to_bits() as u64));
    }

    #[test]
    fn test_equal_vertices_share_hash() {
        let a = corner([0.5, 0.25, 1.0]).with_texcoord0([0.3, 0.2]);
        let b = corner([0.5, 0.25, 1.0]).with_texcoord0([0.3, 0.2]);
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a, b);
    }

    #[test]
    fn test_one_ulp_apart_is_not_equal() {
        let x = 0.5f32;
        let next = f32::from_bits(x.to_bits() + 1);
        let a = corner([x, 0.0, 0.0]);
        let b = corner([next, 0.0, 0.0]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_each_field_breaks_equality() {
        let base = corner([0.0, 0.0, 0.0]);
        assert_ne!(base, corner([0.0, 1.0, 0.0]));
        assert_ne!(
            base,
            ExportVertex::new(SourceVertex(0), [0.0; 3], [1.0, 0.0, 0.0])
        );
        assert_ne!(base, base.with_color([1.0, 0.0, 0.0]));
        assert_ne!(base, base.with_texcoord0([0.0, 1.0]));
        assert_ne!(base, base.with_texcoord1([1.0, 0.0]));
    }

    #[test]
    fn test_source_vertex_ignored() {
        let a = ExportVertex::new(SourceVertex(1), [1.0; 3], [0.0; 3]);
        let b = ExportVertex::new(SourceVertex(7), [1.0; 3], [0.0; 3]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_signed_zero_is_distinct() {
        let a = corner([0.0, 0.0, 0.0]);
        let b = corner([-0.0, 0.0, 0.0]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_raw_key_ignores_color() {
        let a = RawVertex {
            source: SourceVertex(0),
            position: [1.0, 2.0, 3.0],
            normal: [0.0, 1.0, 0.0],
            uvs: smallvec![[0.5, 0.5]],
            color: [1.0, 0.0, 0.0],
            loops: vec![0],
        };
        let mut b = a.clone();
        b.color = [0.0, 0.0, 1.0];
        b.loops = vec![5];
        assert_eq!(a.key(), b.key());

        let mut c = a.clone();
        c.uvs = smallvec![[0.5, 0.25]];
        assert_ne!(a.key(), c.key());
    }
}
