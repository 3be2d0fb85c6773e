//! Sparse skin pose delta construction
//!
//! A skin pose is a sculpted sub-mesh whose vertex `i` corresponds to base
//! vertex `i`, offset by the pose object's own translation. Per pose, only
//! deltas exceeding a small epsilon on some axis are kept. All poses then
//! share one base index set (the sorted union of every kept index) and each
//! pose's indices are remapped to positions within that set.

use hashbrown::{HashMap, HashSet};
use pmd_common::formats::{SkinData, SkinEntry, SkinTarget};

use crate::error::ExportError;
use crate::scene::SceneQuery;

/// Minimum per-axis displacement for a delta to be kept
pub const DELTA_EPSILON: f32 = 1e-5;

/// Build the shared base index set and per-pose delta targets
///
/// `base_positions` are the canonical vertex positions of the exported
/// model. Pose vertices beyond the base vertex count are ignored.
pub fn build_skin<S: SceneQuery + ?Sized>(
    scene: &S,
    base_positions: &[[f32; 3]],
    poses: &[String],
) -> Result<SkinData, ExportError> {
    // Per pose: kept (raw index, delta) pairs, ascending by construction
    let mut raw_targets: Vec<(String, Vec<(usize, [f32; 3])>)> = Vec::with_capacity(poses.len());
    for pose in poses {
        let translation = scene.object_translation(pose)?;
        let count = scene.vertex_count(pose)?.min(base_positions.len());

        let mut kept = Vec::new();
        for index in 0..count {
            let position = scene.vertex_position(pose, index)?;
            let base = base_positions[index];
            let delta = [
                position[0] - translation[0] - base[0],
                position[1] - translation[1] - base[1],
                position[2] - translation[2] - base[2],
            ];
            if delta.iter().any(|axis| axis.abs() > DELTA_EPSILON) {
                kept.push((index, delta));
            }
        }
        raw_targets.push((pose.clone(), kept));
    }

    // Union of every referenced index, deduplicated and sorted
    let referenced: HashSet<usize> = raw_targets
        .iter()
        .flat_map(|(_, kept)| kept.iter().map(|(index, _)| *index))
        .collect();
    let mut base_indices: Vec<usize> = referenced.into_iter().collect();
    base_indices.sort_unstable();

    let base: Vec<SkinEntry> = base_indices
        .iter()
        .map(|&index| SkinEntry {
            index: index as u32,
            vector: base_positions[index],
        })
        .collect();

    // Remap raw indices to their position within the base set
    let slot: HashMap<usize, u32> = base_indices
        .iter()
        .enumerate()
        .map(|(position, &raw)| (raw, position as u32))
        .collect();

    let targets = raw_targets
        .into_iter()
        .map(|(name, kept)| SkinTarget {
            name,
            entries: kept
                .into_iter()
                .map(|(raw, delta)| SkinEntry {
                    index: slot[&raw],
                    vector: delta,
                })
                .collect(),
        })
        .collect();

    Ok(SkinData { base, targets })
}
