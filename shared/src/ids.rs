//! Integer identifiers and helpers for names used in output paths.

use serde::{Deserialize, Serialize};

/// Material slot index on a polygon (0-based, as assigned by the host mesh)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialSlot(pub u32);

/// Index of a bone in the skeleton's bone list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoneIndex(pub u32);

/// Index of a vertex in the source mesh (before any loop splitting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceVertex(pub u32);

impl SourceVertex {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Turns an arbitrary object name into an identifier usable as a single file
/// name component.
///
/// Rules:
/// - '.', '-', ' ', path separators and Windows-reserved characters become '_'
/// - control characters are dropped
/// - a leading digit gets a '_' prefix
/// - an empty result becomes "_"
pub fn safe_mesh_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);

    for c in name.chars() {
        if c.is_control() {
            continue;
        }
        if matches!(
            c,
            '.' | '-' | ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'
        ) {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    if out.is_empty() {
        return "_".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
