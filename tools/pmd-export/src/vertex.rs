//! Canonical vertex construction
//!
//! Mesh positions/normals and UV coordinates live in different index spaces:
//! many UV corners can reference one raw vertex. The exported vertex array is
//! indexed by corner when the model has UV corners, and by raw vertex
//! otherwise. Each canonical slot carries the owning raw vertex id so the
//! skin-weight queries later run in the right space.

use crate::error::{Diagnostics, ExportError};
use crate::scene::SceneQuery;

/// Largest vertex array addressable with u16 face indices
const MAX_VERTEX_COUNT: usize = u16::MAX as usize + 1;

/// Parallel per-canonical-vertex arrays
#[derive(Debug, Clone, Default)]
pub struct VertexData {
    pub count: usize,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    /// Owning raw vertex per canonical slot
    pub source_vertex: Vec<usize>,
}

/// Build the canonical vertex array for a model
///
/// A corner with no resolvable owning vertex reuses the most recently
/// resolved vertex's data and is counted in the diagnostics; this keeps the
/// export alive on meshes with stray UV corners.
pub fn build_vertices<S: SceneQuery + ?Sized>(
    scene: &S,
    model: &str,
    diagnostics: &mut Diagnostics,
) -> Result<VertexData, ExportError> {
    let vertex_count = scene.vertex_count(model)?;
    let corner_count = scene.corner_count(model)?;

    let mut data = VertexData::default();

    if corner_count == 0 {
        // No UV topology: canonical space is the raw vertex space
        for vertex in 0..vertex_count {
            data.positions.push(scene.vertex_position(model, vertex)?);
            data.normals.push(scene.vertex_normal(model, vertex)?);
            data.uvs.push([0.0, 0.0]);
            data.source_vertex.push(vertex);
        }
    } else {
        let mut last_resolved: Option<usize> = None;
        for corner in 0..corner_count {
            let resolved = scene.corner_source_vertex(model, corner)?;
            let vertex = match resolved {
                Some(vertex) => {
                    last_resolved = Some(vertex);
                    vertex
                }
                None => {
                    diagnostics.unresolved_corners += 1;
                    tracing::warn!(
                        "Corner {} of '{}' has no owning vertex, substituting neighbor data",
                        corner,
                        model
                    );
                    last_resolved.unwrap_or(0)
                }
            };

            if vertex < vertex_count {
                data.positions.push(scene.vertex_position(model, vertex)?);
                data.normals.push(scene.vertex_normal(model, vertex)?);
                data.source_vertex.push(vertex);
            } else {
                data.positions.push([0.0, 0.0, 0.0]);
                data.normals.push([0.0, 0.0, 0.0]);
                data.source_vertex.push(0);
            }
            data.uvs.push(scene.corner_uv(model, corner)?);
        }
    }

    data.count = data.positions.len();
    if data.count > MAX_VERTEX_COUNT {
        return Err(ExportError::TooManyVertices { count: data.count });
    }

    debug_assert_eq!(data.count, data.normals.len());
    debug_assert_eq!(data.count, data.uvs.len());
    Ok(data)
}
