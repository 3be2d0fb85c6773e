//! Material record construction
//!
//! Materials are ordered by lexicographic scene identifier, which makes the
//! output independent of creation order. Transparency is collapsed from the
//! per-channel triple into a single luminance-weighted scalar; absent
//! specular and texture attributes fall back to defaults instead of failing
//! the export.

use pmd_common::formats::{PmdMaterial, TOON_UNUSED};

use crate::error::ExportError;
use crate::face::FaceData;
use crate::scene::SceneQuery;

/// Luminance weights for collapsing RGB transparency into one scalar
const TRANSPARENCY_LUMA: [f32; 3] = [0.298912, 0.586611, 0.114478];

/// Build the material records for a model
pub fn build_materials<S: SceneQuery + ?Sized>(
    scene: &S,
    model: &str,
    faces: &FaceData,
) -> Result<Vec<PmdMaterial>, ExportError> {
    let mut names = scene.model_materials(model)?;
    names.sort();
    names.dedup();

    let mut materials = Vec::with_capacity(names.len());
    for name in &names {
        let diffuse = scene.material_color(name)?;
        let transparency = luminance(scene.material_transparency(name)?);

        let specular = match scene.material_specular_color(name)? {
            Some(color) => color,
            None => {
                tracing::debug!("Material '{}' has no specular color, using black", name);
                [0.0, 0.0, 0.0]
            }
        };
        let specularity = scene.material_specularity(name)?.unwrap_or(0.0);
        let texture_file = scene.material_texture_file(name)?.unwrap_or_default();

        // Exact name match against the post-sort face list
        let face_count = faces
            .face_materials
            .iter()
            .filter(|material| *material == name)
            .count() as u32;

        materials.push(PmdMaterial {
            diffuse,
            transparency,
            specularity,
            specular,
            ambient: [1.0, 1.0, 1.0],
            toon_index: TOON_UNUSED,
            edge_flag: 1,
            face_count,
            texture_file,
        });
    }

    Ok(materials)
}

#[inline]
fn luminance(channels: [f32; 3]) -> f32 {
    TRANSPARENCY_LUMA[0] * channels[0]
        + TRANSPARENCY_LUMA[1] * channels[1]
        + TRANSPARENCY_LUMA[2] * channels[2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::snapshot::{FaceSnapshot, MaterialSnapshot, ModelSnapshot, SceneSnapshot};

    fn scene_with_materials() -> SceneSnapshot {
        let mut scene = SceneSnapshot::default();
        scene.models.insert(
            "m".to_string(),
            ModelSnapshot {
                positions: vec![[0.0; 3]; 3],
                normals: vec![[0.0, 0.0, 1.0]; 3],
                faces: vec![
                    FaceSnapshot {
                        corners: vec![0, 1, 2],
                        material: "zinc".to_string(),
                    },
                    FaceSnapshot {
                        corners: vec![0, 2, 1],
                        material: "alabaster".to_string(),
                    },
                ],
                ..Default::default()
            },
        );
        scene.materials.insert(
            "zinc".to_string(),
            MaterialSnapshot {
                color: [0.3, 0.3, 0.35],
                transparency: [0.5, 0.5, 0.5],
                specular_color: Some([1.0, 1.0, 1.0]),
                specularity: Some(12.0),
                texture_file: Some("zinc.bmp".to_string()),
            },
        );
        scene.materials.insert(
            "alabaster".to_string(),
            MaterialSnapshot {
                color: [0.9, 0.9, 0.85],
                transparency: [0.0, 0.0, 0.0],
                specular_color: None,
                specularity: None,
                texture_file: None,
            },
        );
        scene
    }

    fn faces_for(scene: &SceneSnapshot) -> FaceData {
        let mut diagnostics = Default::default();
        let vertices = crate::vertex::build_vertices(scene, "m", &mut diagnostics).unwrap();
        crate::face::build_faces(scene, "m", &vertices, &mut diagnostics).unwrap()
    }

    #[test]
    fn test_lexicographic_order() {
        let scene = scene_with_materials();
        let faces = faces_for(&scene);
        let materials = build_materials(&scene, "m", &faces).unwrap();
        assert_eq!(materials.len(), 2);
        assert_eq!(materials[0].texture_file, "");
        assert_eq!(materials[1].texture_file, "zinc.bmp");
    }

    #[test]
    fn test_luminance_transparency() {
        let scene = scene_with_materials();
        let faces = faces_for(&scene);
        let materials = build_materials(&scene, "m", &faces).unwrap();
        // uniform 0.5 channels collapse to 0.5 * sum(weights)
        let expected = 0.5 * (0.298912 + 0.586611 + 0.114478);
        assert!((materials[1].transparency - expected).abs() < 1e-6);
    }

    #[test]
    fn test_missing_attributes_default() {
        let scene = scene_with_materials();
        let faces = faces_for(&scene);
        let materials = build_materials(&scene, "m", &faces).unwrap();
        assert_eq!(materials[0].specular, [0.0, 0.0, 0.0]);
        assert_eq!(materials[0].specularity, 0.0);
        assert_eq!(materials[0].ambient, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_face_counts_match_grouping() {
        let scene = scene_with_materials();
        let faces = faces_for(&scene);
        let materials = build_materials(&scene, "m", &faces).unwrap();
        assert_eq!(materials[0].face_count, 1);
        assert_eq!(materials[1].face_count, 1);

        let total: u32 = materials.iter().map(|m| m.face_count).sum();
        assert_eq!(total as usize, faces.triangles.len());
    }
}
