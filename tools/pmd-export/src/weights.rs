//! Per-vertex bone influence resolution
//!
//! For every canonical vertex, every bone's skin weight is queried and the
//! two strongest influences are kept. This is one scene query per
//! (vertex, bone) pair and dominates export time on dense skins; the query
//! interface is per-pair, so there is nothing to batch here.

use pmd_common::formats::PmdBone;

use crate::error::ExportError;
use crate::scene::SceneQuery;
use crate::vertex::VertexData;

/// Resolved influences for one canonical vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInfluence {
    /// Primary and secondary bone index
    pub bones: [u16; 2],
    /// Primary bone weight fraction
    pub weight: f32,
}

impl Default for VertexInfluence {
    fn default() -> Self {
        // Unskinned: full weight on bone 0
        Self {
            bones: [0, 0],
            weight: 1.0,
        }
    }
}

/// Resolve the top-2 bone influences for every canonical vertex
///
/// Weights are sorted descending with ties keeping bone-array order. A
/// vertex with no weight pairs at all (no bones selected) gets the default
/// full-weight influence.
pub fn resolve_weights<S: SceneQuery + ?Sized>(
    scene: &S,
    model: &str,
    vertices: &VertexData,
    bones: &[PmdBone],
) -> Result<Vec<VertexInfluence>, ExportError> {
    let mut influences = Vec::with_capacity(vertices.count);

    for slot in 0..vertices.count {
        let source = vertices.source_vertex[slot];

        let mut pairs: Vec<(u16, f32)> = Vec::with_capacity(bones.len());
        for (index, bone) in bones.iter().enumerate() {
            pairs.push((index as u16, scene.skin_weight(model, source, &bone.name)?));
        }
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));

        let influence = match pairs.first() {
            Some(&(primary, weight)) => VertexInfluence {
                bones: [primary, pairs.get(1).map(|pair| pair.0).unwrap_or(0)],
                weight,
            },
            None => VertexInfluence::default(),
        };
        influences.push(influence);
    }

    Ok(influences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::snapshot::{ModelSnapshot, SceneSnapshot};
    use pmd_common::formats::NO_PARENT;

    fn pmd_bone(name: &str) -> PmdBone {
        PmdBone {
            name: name.to_string(),
            parent: NO_PARENT,
            position: [0.0; 3],
        }
    }

    fn one_vertex_data() -> VertexData {
        VertexData {
            count: 1,
            positions: vec![[0.0; 3]],
            normals: vec![[0.0, 1.0, 0.0]],
            uvs: vec![[0.0; 2]],
            source_vertex: vec![0],
        }
    }

    fn scene_with_weights(weights: &[(&str, f32)]) -> SceneSnapshot {
        let mut model = ModelSnapshot {
            positions: vec![[0.0; 3]],
            ..Default::default()
        };
        for (bone, weight) in weights {
            model.weights.insert(bone.to_string(), vec![*weight]);
        }
        let mut scene = SceneSnapshot::default();
        scene.models.insert("m".to_string(), model);
        scene
    }

    #[test]
    fn test_top_two_selection() {
        let scene = scene_with_weights(&[("a", 0.2), ("b", 0.7), ("c", 0.1)]);
        let bones = vec![pmd_bone("a"), pmd_bone("b"), pmd_bone("c")];

        let influences = resolve_weights(&scene, "m", &one_vertex_data(), &bones).unwrap();
        assert_eq!(influences[0].weight, 0.7);
        assert_eq!(influences[0].bones, [1, 0]);
    }

    #[test]
    fn test_ties_keep_bone_order() {
        let scene = scene_with_weights(&[("a", 0.5), ("b", 0.5)]);
        let bones = vec![pmd_bone("a"), pmd_bone("b")];

        let influences = resolve_weights(&scene, "m", &one_vertex_data(), &bones).unwrap();
        assert_eq!(influences[0].bones, [0, 1]);
        assert_eq!(influences[0].weight, 0.5);
    }

    #[test]
    fn test_single_bone_secondary_defaults_to_zero() {
        let scene = scene_with_weights(&[("a", 1.0)]);
        let bones = vec![pmd_bone("a")];

        let influences = resolve_weights(&scene, "m", &one_vertex_data(), &bones).unwrap();
        assert_eq!(influences[0].bones, [0, 0]);
        assert_eq!(influences[0].weight, 1.0);
    }

    #[test]
    fn test_no_bones_defaults_to_full_weight() {
        let scene = scene_with_weights(&[]);
        let influences = resolve_weights(&scene, "m", &one_vertex_data(), &[]).unwrap();
        assert_eq!(influences[0].bones, [0, 0]);
        assert_eq!(influences[0].weight, 1.0);
    }

    #[test]
    fn test_shared_source_vertex_shares_weights() {
        // two canonical slots backed by the same raw vertex
        let scene = scene_with_weights(&[("a", 0.9), ("b", 0.1)]);
        let bones = vec![pmd_bone("a"), pmd_bone("b")];
        let vertices = VertexData {
            count: 2,
            positions: vec![[0.0; 3]; 2],
            normals: vec![[0.0, 1.0, 0.0]; 2],
            uvs: vec![[0.0; 2]; 2],
            source_vertex: vec![0, 0],
        };

        let influences = resolve_weights(&scene, "m", &vertices, &bones).unwrap();
        assert_eq!(influences[0], influences[1]);
        assert_eq!(influences[0].bones, [0, 1]);
    }
}
