//! Per-vertex tangent generation
//!
//! Tangents are accumulated per triangle from position and UV deltas, then
//! Gram-Schmidt orthogonalized against the vertex normal. Only the index
//! array handed in is walked; vertices referenced solely by other arrays
//! keep a zero tangent.

use glam::{Vec2, Vec3};

/// Unnormalized tangent of one triangle.
///
/// A zero UV determinant falls back to `r = 1` instead of dividing by zero.
pub fn triangle_tangent(v0: Vec3, v1: Vec3, v2: Vec3, uv0: Vec2, uv1: Vec2, uv2: Vec2) -> Vec3 {
    let d1 = v1 - v0;
    let d2 = v2 - v0;
    let du1 = uv1 - uv0;
    let du2 = uv2 - uv0;

    let det = du1.x * du2.y - du1.y * du2.x;
    let r = if det != 0.0 { 1.0 / det } else { 1.0 };

    (d1 * du2.y - d2 * du1.y) * r
}

/// Compute one tangent per vertex.
///
/// `positions` and `normals` are flat xyz arrays, `uvs` a flat uv array and
/// `indices` a triangle list, all over the same unified vertices. Returns a
/// flat xyz array. Vertices whose accumulated tangent is zero (or parallel
/// to the normal) get a zero vector.
pub fn generate_tangents(positions: &[f32], normals: &[f32], uvs: &[f32], indices: &[u32]) -> Vec<f32> {
    let vertex_count = positions.len() / 3;
    let position = |i: usize| Vec3::from_slice(&positions[i * 3..i * 3 + 3]);
    let uv = |i: usize| Vec2::from_slice(&uvs[i * 2..i * 2 + 2]);

    let mut accumulated = vec![Vec3::ZERO; vertex_count];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let t = triangle_tangent(position(i0), position(i1), position(i2), uv(i0), uv(i1), uv(i2));

        accumulated[i0] += t;
        accumulated[i1] += t;
        accumulated[i2] += t;
    }

    let mut out = Vec::with_capacity(vertex_count * 3);
    for (i, t) in accumulated.into_iter().enumerate() {
        let n = Vec3::from_slice(&normals[i * 3..i * 3 + 3]);
        let orthogonal = (t - n * n.dot(t)).normalize_or_zero();
        out.extend_from_slice(&orthogonal.to_array());
    }
    out
}
