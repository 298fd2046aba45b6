//! Polygon triangulation
//!
//! Two rules are in use, and they are not interchangeable:
//! - [`fan_from_last`]: fast path. Pivot on the *last* corner.
//! - [`split_corners`]: quality path. Pivot on the first corner, so a quad
//!   becomes corners (0,1,2) and (0,2,3).
//!
//! Both take polygons of at least three corners; fewer is a caller error.

/// Triangulate a polygon given as loop indices, pivoting on the last loop.
///
/// For `[l0, .., l(n-1)]` this emits `(l(n-1), l0, l1), (l(n-1), l1, l2), ..,
/// (l(n-1), l(n-3), l(n-2))`. Triangles pass through unchanged as
/// `(l0, l1, l2)` rather than the formula's literal `(l2, l0, l1)`; both
/// orderings share the same winding.
pub fn fan_from_last<T: Copy>(corners: &[T]) -> Vec<[T; 3]> {
    debug_assert!(corners.len() >= 3, "polygon needs at least 3 corners");

    if let [a, b, c] = *corners {
        return vec![[a, b, c]];
    }

    let pivot = corners[corners.len() - 1];
    corners
        .windows(2)
        .take(corners.len() - 2)
        .map(|w| [pivot, w[0], w[1]])
        .collect()
}

/// Corner positions (0-based, within the polygon) of each triangle when a
/// polygon with `corner_count` corners is split from its first corner.
///
/// Triangle: `(0,1,2)`. Quad: `(0,1,2), (0,2,3)`. Larger polygons continue
/// the same fan.
pub fn split_corners(corner_count: usize) -> impl Iterator<Item = [usize; 3]> {
    debug_assert!(corner_count >= 3, "polygon needs at least 3 corners");
    (1..corner_count - 1).map(|i| [0, i, i + 1])
}

/// Number of triangles a polygon with `corner_count` corners produces
#[inline]
pub const fn triangle_count(corner_count: usize) -> usize {
    corner_count - 2
}
