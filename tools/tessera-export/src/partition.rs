//! Material partitioning
//!
//! Splits the woven index table into one triangle list per material slot.

use std::collections::BTreeMap;

use tessera_shared::{IndexArray, MaterialSlot};

/// Split `index_table` (three entries per triangle) by the material of each
/// triangle.
///
/// - A mesh using a single material (or no triangles) yields one array
///   tagged material 0, whatever the slot number was.
/// - Otherwise one array per used slot in ascending order, each keeping
///   the original triangle order. Slots with no triangles get no array.
pub fn partition_by_material(
    index_table: &[u32],
    triangle_materials: &[MaterialSlot],
) -> Vec<IndexArray> {
    debug_assert_eq!(index_table.len(), triangle_materials.len() * 3);

    // Keyed by slot, so sparse slot ids cost nothing
    let mut buffers: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for (triangle, m) in index_table.chunks_exact(3).zip(triangle_materials) {
        buffers.entry(m.0).or_default().extend_from_slice(triangle);
    }

    if buffers.len() <= 1 {
        return vec![IndexArray::new(0, index_table.to_vec())];
    }

    buffers
        .into_iter()
        .map(|(slot, values)| IndexArray::new(slot, values))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(ids: &[u32]) -> Vec<MaterialSlot> {
        ids.iter().copied().map(MaterialSlot).collect()
    }

    #[test]
    fn test_single_material() {
        let arrays = partition_by_material(&[0, 1, 2, 0, 2, 3], &slots(&[0, 0]));
        assert_eq!(arrays, vec![IndexArray::new(0, vec![0, 1, 2, 0, 2, 3])]);
    }

    #[test]
    fn test_single_nonzero_material_retagged_to_zero() {
        let arrays = partition_by_material(&[0, 1, 2], &slots(&[5]));
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays[0].material, 0);
        assert_eq!(arrays[0].values, vec![0, 1, 2]);
    }

    #[test]
    fn test_unused_slots_omitted_and_order_kept() {
        let table = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
        let arrays = partition_by_material(&table, &slots(&[2, 0, 2, 0]));

        assert_eq!(arrays.len(), 2);
        assert_eq!(arrays[0].material, 0);
        assert_eq!(arrays[0].values, vec![3, 4, 5, 9, 10, 11]);
        assert_eq!(arrays[1].material, 2);
        assert_eq!(arrays[1].values, vec![0, 1, 2, 6, 7, 8]);
    }

    #[test]
    fn test_completeness() {
        let materials = slots(&[1, 3, 3, 0, 1, 1, 3]);
        let table: Vec<u32> = (0..materials.len() as u32 * 3).collect();
        let arrays = partition_by_material(&table, &materials);

        let total: usize = arrays.iter().map(|a| a.values.len()).sum();
        assert_eq!(total, materials.len() * 3);
        assert!(arrays.iter().all(|a| a.size == 3));
    }

    #[test]
    fn test_sparse_slot_ids() {
        let arrays = partition_by_material(&[0, 1, 2, 3, 4, 5], &slots(&[4_000_000_000, 0]));
        assert_eq!(
            arrays,
            vec![
                IndexArray::new(0, vec![3, 4, 5]),
                IndexArray::new(4_000_000_000, vec![0, 1, 2]),
            ]
        );
    }

    #[test]
    fn test_empty() {
        let arrays = partition_by_material(&[], &[]);
        assert_eq!(arrays, vec![IndexArray::new(0, Vec::new())]);
    }
}
