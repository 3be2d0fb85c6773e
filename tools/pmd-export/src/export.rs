//! Export pipeline entry points
//!
//! One export is one pass: build every block of the model in memory from the
//! scene queries, then open the output stream and encode the fixed block
//! sequence. Building first means every precondition and geometry error
//! fires before any bytes are written; only a genuine write failure can
//! leave a truncated file, and the caller must discard it.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pmd_common::formats::{write_pmd_model, PmdHeader, PmdModel, PmdVertex};

use crate::bone::build_bones;
use crate::error::{Diagnostics, ExportError};
use crate::face::build_faces;
use crate::material::build_materials;
use crate::scene::{SceneQuery, Selection};
use crate::skin::build_skin;
use crate::vertex::build_vertices;
use crate::weights::resolve_weights;

/// Header field overrides
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Model name stored in the header; defaults to the selected model's
    /// scene name
    pub model_name: Option<String>,
    /// Free-text caption stored in the header
    pub comment: String,
}

/// Counts and diagnostics from one export
#[derive(Debug, Clone, Copy)]
pub struct ExportSummary {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub material_count: usize,
    pub bone_count: usize,
    pub skin_target_count: usize,
    pub diagnostics: Diagnostics,
}

/// Build a complete model from the scene without writing anything
pub fn build_model<S: SceneQuery + ?Sized>(
    scene: &S,
    selection: &Selection,
    options: &ExportOptions,
) -> Result<(PmdModel, Diagnostics), ExportError> {
    if !scene.model_exists(&selection.model) {
        return Err(ExportError::ModelNotFound(selection.model.clone()));
    }

    let mut diagnostics = Diagnostics::default();

    let vertices = build_vertices(scene, &selection.model, &mut diagnostics)?;
    let faces = build_faces(scene, &selection.model, &vertices, &mut diagnostics)?;
    let materials = build_materials(scene, &selection.model, &faces)?;
    let bones = match &selection.root_bone {
        Some(root) => build_bones(scene, root)?,
        None => Vec::new(),
    };
    let influences = resolve_weights(scene, &selection.model, &vertices, &bones)?;
    let skin = build_skin(scene, &vertices.positions, &selection.poses)?;

    let header = PmdHeader::new(
        options
            .model_name
            .clone()
            .unwrap_or_else(|| selection.model.clone()),
        options.comment.clone(),
    );

    let pmd_vertices: Vec<PmdVertex> = (0..vertices.count)
        .map(|i| PmdVertex {
            position: vertices.positions[i],
            normal: vertices.normals[i],
            uv: vertices.uvs[i],
            bones: influences[i].bones,
            weight: influences[i].weight,
            edge_flag: 1,
        })
        .collect();

    let model = PmdModel {
        header,
        vertices: pmd_vertices,
        triangles: faces.triangles,
        materials,
        bones,
        skin,
    };
    Ok((model, diagnostics))
}

/// Build a model and write it to `output`
pub fn export_model<S: SceneQuery + ?Sized>(
    scene: &S,
    selection: &Selection,
    options: &ExportOptions,
    output: &Path,
) -> Result<ExportSummary> {
    let (model, diagnostics) = build_model(scene, selection, options)?;

    let file =
        File::create(output).with_context(|| format!("Failed to create output: {:?}", output))?;
    let mut writer = BufWriter::new(file);
    write_pmd_model(&mut writer, &model)?;
    writer.flush()?;

    let summary = ExportSummary {
        vertex_count: model.vertices.len(),
        triangle_count: model.triangles.len(),
        material_count: model.materials.len(),
        bone_count: model.bones.len(),
        skin_target_count: model.skin.targets.len(),
        diagnostics,
    };

    tracing::info!(
        "Exported model: {} vertices, {} triangles, {} materials, {} bones, {} skin targets",
        summary.vertex_count,
        summary.triangle_count,
        summary.material_count,
        summary.bone_count,
        summary.skin_target_count
    );
    if !diagnostics.is_clean() {
        tracing::warn!(
            "Export degraded: {} unresolved corners, {} degenerate triangles",
            diagnostics.unresolved_corners,
            diagnostics.degenerate_triangles
        );
    }

    Ok(summary)
}
