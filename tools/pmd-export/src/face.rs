//! Triangle assembly, material grouping, and winding correction
//!
//! The target engine batches draw calls per material, so triangles sharing a
//! material must be contiguous: faces are stable-sorted by material name,
//! ties keeping original face order. Winding is then corrected per triangle
//! by checking the geometric face normal against the stored vertex normals.

use glam::Vec3;

use crate::error::{Diagnostics, ExportError};
use crate::scene::{SceneError, SceneQuery};
use crate::vertex::VertexData;

/// Material-sorted, winding-corrected triangle list
#[derive(Debug, Clone, Default)]
pub struct FaceData {
    pub triangles: Vec<[u16; 3]>,
    /// Material of each triangle, same order as `triangles`
    pub face_materials: Vec<String>,
}

/// Build the triangle list for a model
pub fn build_faces<S: SceneQuery + ?Sized>(
    scene: &S,
    model: &str,
    vertices: &VertexData,
    diagnostics: &mut Diagnostics,
) -> Result<FaceData, ExportError> {
    let face_count = scene.face_count(model)?;

    let mut raw = Vec::with_capacity(face_count);
    let mut materials = Vec::with_capacity(face_count);
    for face in 0..face_count {
        let corners = scene.face_corners(model, face)?;
        if corners.len() < 3 {
            return Err(ExportError::NotTriangulated {
                face,
                count: corners.len(),
            });
        }
        if corners.len() > 3 {
            return Err(ExportError::TooManyCorners {
                face,
                count: corners.len(),
            });
        }
        for &corner in &corners {
            if corner >= vertices.count {
                return Err(ExportError::Scene(SceneError::IndexOutOfRange {
                    object: model.to_string(),
                    what: "face corner",
                    index: corner,
                }));
            }
        }
        raw.push([corners[0] as u16, corners[1] as u16, corners[2] as u16]);
        materials.push(scene.face_material(model, face)?);
    }

    // Stable sort keeps original order within a material
    let mut order: Vec<usize> = (0..raw.len()).collect();
    order.sort_by(|&a, &b| materials[a].cmp(&materials[b]));

    let mut triangles: Vec<[u16; 3]> = order.iter().map(|&i| raw[i]).collect();
    let face_materials: Vec<String> = order.iter().map(|&i| materials[i].clone()).collect();

    for triangle in &mut triangles {
        correct_winding(triangle, vertices, diagnostics);
    }

    Ok(FaceData {
        triangles,
        face_materials,
    })
}

/// Flip a triangle whose geometric normal disagrees with its vertex normals
///
/// The geometric normal is the normalized cross product of the first two
/// edges; agreement is the sum of its dot products with the three stored
/// corner normals. Disagreement swaps the first and last index, reversing
/// winding without changing the vertex set.
fn correct_winding(triangle: &mut [u16; 3], vertices: &VertexData, diagnostics: &mut Diagnostics) {
    let p0 = Vec3::from(vertices.positions[triangle[0] as usize]);
    let p1 = Vec3::from(vertices.positions[triangle[1] as usize]);
    let p2 = Vec3::from(vertices.positions[triangle[2] as usize]);

    let geometric = match (p1 - p0).cross(p2 - p1).try_normalize() {
        Some(normal) => normal,
        None => {
            diagnostics.degenerate_triangles += 1;
            tracing::warn!(
                "Degenerate triangle {:?} has no geometric normal, assuming +X",
                triangle
            );
            Vec3::X
        }
    };

    let agreement: f32 = triangle
        .iter()
        .map(|&i| geometric.dot(Vec3::from(vertices.normals[i as usize])))
        .sum();
    if agreement < 0.0 {
        triangle.swap(0, 2);
    }
}
