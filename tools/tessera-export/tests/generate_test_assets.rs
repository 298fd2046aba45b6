//! Programmatic source-mesh generation for integration tests.
//!
//! Writes host-side JSON records (the exporter's input format) for a few
//! small meshes with known expected output.

use serde_json::{Value, json};
use std::path::Path;

/// Corner positions of the unit cube
const CUBE_POSITIONS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Cube faces as (corners, face normal, material)
const CUBE_FACES: [([u32; 4], [f32; 3], u32); 6] = [
    ([0, 3, 2, 1], [0.0, 0.0, -1.0], 0),
    ([4, 5, 6, 7], [0.0, 0.0, 1.0], 0),
    ([0, 1, 5, 4], [0.0, -1.0, 0.0], 1),
    ([2, 3, 7, 6], [0.0, 1.0, 0.0], 1),
    ([1, 2, 6, 5], [1.0, 0.0, 0.0], 2),
    ([0, 4, 7, 3], [-1.0, 0.0, 0.0], 2),
];

const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Flat-shaded unit cube: 6 quads over 3 materials, one UV layer
pub fn cube_mesh() -> Value {
    let mut loops = Vec::new();
    let mut polygons = Vec::new();
    let mut uvs = Vec::new();

    for (corners, normal, material) in CUBE_FACES {
        polygons.push(json!({
            "loop_start": loops.len(),
            "loop_total": 4,
            "material": material,
            "smooth": false,
            "normal": normal,
        }));
        for (k, vertex) in corners.into_iter().enumerate() {
            loops.push(json!({ "vertex": vertex, "normal": normal }));
            uvs.push(QUAD_UVS[k]);
        }
    }

    let vertex_normals: Vec<[f32; 3]> = CUBE_POSITIONS
        .iter()
        .map(|p| {
            let c = [p[0] - 0.5, p[1] - 0.5, p[2] - 0.5];
            let len = (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt();
            [c[0] / len, c[1] / len, c[2] / len]
        })
        .collect();

    // Lower corners belong to "lower", upper corners are split evenly
    let vertex_weights: Vec<Value> = CUBE_POSITIONS
        .iter()
        .map(|p| {
            if p[2] < 0.5 {
                json!([{ "group": 0, "weight": 1.0 }])
            } else {
                json!([{ "group": 0, "weight": 0.5 }, { "group": 1, "weight": 0.5 }])
            }
        })
        .collect();

    json!({
        "name": "Test.Cube",
        "positions": CUBE_POSITIONS,
        "vertex_normals": vertex_normals,
        "loops": loops,
        "polygons": polygons,
        "uv_layers": [uvs],
        "vertex_groups": ["lower", "upper"],
        "vertex_weights": vertex_weights,
    })
}

/// Two-bone skeleton matching the cube's vertex groups
pub fn cube_skin() -> Value {
    let identity = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    let raised = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.5],
        [0.0, 0.0, 0.0, 1.0],
    ];
    json!({
        "object_transform": { "rows": identity },
        "bones": [
            { "name": "lower", "node_ref": "Bone_Lower", "bind_transform": { "rows": identity } },
            { "name": "upper", "bind_transform": { "rows": raised } },
        ],
    })
}

/// Single triangle with no optional layers
pub fn triangle_mesh() -> Value {
    json!({
        "name": "tri",
        "positions": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        "vertex_normals": [[0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
        "loops": [
            { "vertex": 0, "normal": [0.0, 0.0, 1.0] },
            { "vertex": 1, "normal": [0.0, 0.0, 1.0] },
            { "vertex": 2, "normal": [0.0, 0.0, 1.0] },
        ],
        "polygons": [{ "loop_start": 0, "loop_total": 3, "normal": [0.0, 0.0, 1.0] }],
    })
}

/// Write a JSON value to `path`
pub fn write_json(path: &Path, value: &Value) -> std::io::Result<()> {
    std::fs::write(path, serde_json::to_vec_pretty(value)?)
}
