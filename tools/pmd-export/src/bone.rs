//! Skeleton linearization
//!
//! The bone hierarchy is flattened into an array in the scene's native
//! traversal order; that order is the index space used both for parent
//! references and for skin-weight joint ordering. Parents are resolved by
//! identity search over the collected array; a parent outside the traversed
//! set (or an absent parent) stores the [`NO_PARENT`] sentinel.

use pmd_common::formats::{PmdBone, NO_PARENT};

use crate::error::ExportError;
use crate::scene::SceneQuery;

/// Build the bone array rooted at `root`
pub fn build_bones<S: SceneQuery + ?Sized>(
    scene: &S,
    root: &str,
) -> Result<Vec<PmdBone>, ExportError> {
    let names = scene.bone_hierarchy(root)?;
    if names.len() > u16::MAX as usize {
        return Err(ExportError::TooManyBones { count: names.len() });
    }

    let mut bones = Vec::with_capacity(names.len());
    for name in &names {
        let parent = match scene.bone_parent(name)? {
            Some(parent_name) => names
                .iter()
                .position(|candidate| candidate == &parent_name)
                .map(|index| index as u16)
                .unwrap_or(NO_PARENT),
            None => NO_PARENT,
        };
        bones.push(PmdBone {
            name: name.clone(),
            parent,
            position: scene.bone_world_position(name)?,
        });
    }
    Ok(bones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::snapshot::{BoneSnapshot, SceneSnapshot};

    fn bone(name: &str, parent: Option<&str>, position: [f32; 3]) -> BoneSnapshot {
        BoneSnapshot {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            world_position: position,
        }
    }

    #[test]
    fn test_parent_indices_follow_traversal_order() {
        let scene = SceneSnapshot {
            bones: vec![
                bone("root", None, [0.0, 0.0, 0.0]),
                bone("spine", Some("root"), [0.0, 1.0, 0.0]),
                bone("head", Some("spine"), [0.0, 2.0, 0.0]),
            ],
            ..Default::default()
        };

        let bones = build_bones(&scene, "root").unwrap();
        assert_eq!(bones.len(), 3);
        assert_eq!(bones[0].parent, NO_PARENT);
        assert_eq!(bones[1].parent, 0);
        assert_eq!(bones[2].parent, 1);
        assert_eq!(bones[2].position, [0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_parent_outside_traversed_set_is_sentinel() {
        let scene = SceneSnapshot {
            bones: vec![
                bone("pelvis", None, [0.0; 3]),
                bone("leg", Some("pelvis"), [0.0, -1.0, 0.0]),
                bone("foot", Some("leg"), [0.0, -2.0, 0.0]),
            ],
            ..Default::default()
        };

        // Exporting from "leg" leaves "pelvis" outside the set
        let bones = build_bones(&scene, "leg").unwrap();
        assert_eq!(bones[0].name, "leg");
        assert_eq!(bones[0].parent, NO_PARENT);
        assert_eq!(bones[1].parent, 0);
    }
}
