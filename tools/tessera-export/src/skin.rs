//! Skin binding
//!
//! Converts per-source-vertex vertex-group weights into per-unified-vertex
//! bone influences. Skeleton data (bone references, bind poses, object
//! transform) is copied from the [`SkinSource`] unchanged.

use smallvec::SmallVec;
use tessera_shared::{
    BoneIndex, GroupWeight, SkeletonRecord, SkinRecord, SkinSource, SourceVertex,
};

/// Bone reference written for bones that have no exported node
pub const NULL_BONE_REF: &str = "null";

/// Per-vertex bone influences, flattened in vertex order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinBinding {
    pub bone_count_array: Vec<u32>,
    pub bone_index_array: Vec<u32>,
    pub bone_weight_array: Vec<f32>,
}

impl SkinBinding {
    /// Influences of unified vertex `vertex` as (bone, weight) pairs
    pub fn influences(&self, vertex: usize) -> impl Iterator<Item = (u32, f32)> + '_ {
        let start: usize = self.bone_count_array[..vertex]
            .iter()
            .map(|&c| c as usize)
            .sum();
        let end = start + self.bone_count_array[vertex] as usize;
        self.bone_index_array[start..end]
            .iter()
            .copied()
            .zip(self.bone_weight_array[start..end].iter().copied())
    }
}

/// Resolve each vertex group to the bone with the same name.
/// Groups with no matching bone map to `None` and are ignored when binding.
pub fn group_remap(groups: &[String], skin: &SkinSource) -> Vec<Option<BoneIndex>> {
    groups
        .iter()
        .map(|name| {
            skin.bones
                .iter()
                .position(|b| &b.name == name)
                .map(|i| BoneIndex(i as u32))
        })
        .collect()
}

/// Build bone influences for every unified vertex.
///
/// `sources` maps unified vertices to source vertices; `vertex_weights` is
/// indexed by source vertex (an empty slice means no vertex has weights).
/// For each vertex, influences with a resolved bone and a non-zero weight
/// are kept and divided by their total; a zero total leaves them as is.
/// Vertices with no influences get a bone count of 0.
pub fn bind_skin(
    sources: &[SourceVertex],
    vertex_weights: &[Vec<GroupWeight>],
    remap: &[Option<BoneIndex>],
) -> SkinBinding {
    let mut binding = SkinBinding {
        bone_count_array: Vec::with_capacity(sources.len()),
        ..Default::default()
    };

    for source in sources {
        let groups = vertex_weights
            .get(source.index())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let influences: SmallVec<[(u32, f32); 4]> = groups
            .iter()
            .filter_map(|g| {
                let bone = remap.get(g.group as usize).copied().flatten()?;
                (g.weight != 0.0).then_some((bone.0, g.weight))
            })
            .collect();

        let total: f32 = influences.iter().map(|&(_, w)| w).sum();

        binding.bone_count_array.push(influences.len() as u32);
        for (bone, weight) in influences {
            binding.bone_index_array.push(bone);
            binding
                .bone_weight_array
                .push(if total != 0.0 { weight / total } else { weight });
        }
    }

    binding
}

/// Assemble the skin payload from the skeleton source and a binding
pub fn skin_record(skin: &SkinSource, binding: SkinBinding) -> SkinRecord {
    SkinRecord {
        transform: skin.object_transform.to_array(),
        skeleton: SkeletonRecord {
            bone_ref_array: skin
                .bones
                .iter()
                .map(|b| b.node_ref.clone().unwrap_or_else(|| NULL_BONE_REF.to_string()))
                .collect(),
            transforms: skin.bones.iter().map(|b| b.bind_transform.to_array()).collect(),
        },
        bone_count_array: binding.bone_count_array,
        bone_index_array: binding.bone_index_array,
        bone_weight_array: binding.bone_weight_array,
    }
}
