//! Complete PMD model assembly
//!
//! [`write_pmd_model`] emits the full fixed block sequence over any `Write`
//! sink in a single pass:
//!
//! ```text
//! Header -> Vertices -> Faces -> Materials -> Bones -> IK -> Skins -> trailer
//! ```
//!
//! The writer is sequential and non-restartable; a failure mid-stream leaves
//! the sink truncated and the caller is expected to discard it.

use anyhow::Result;
use std::io::Write;

use super::{
    write_bone_block, write_face_block, write_ik_block, write_material_block, write_skin_block,
    write_vertex_block, PmdBone, PmdHeader, PmdMaterial, PmdVertex, SkinData, TRAILER,
};

/// A fully built model, ready for encoding
#[derive(Debug, Clone, Default)]
pub struct PmdModel {
    pub header: PmdHeader,
    pub vertices: Vec<PmdVertex>,
    /// Material-sorted triangles in canonical vertex indices
    pub triangles: Vec<[u16; 3]>,
    /// Lexicographically ordered materials
    pub materials: Vec<PmdMaterial>,
    /// Hierarchy-traversal-ordered bones
    pub bones: Vec<PmdBone>,
    pub skin: SkinData,
}

/// Write a complete PMD model file
pub fn write_pmd_model<W: Write>(w: &mut W, model: &PmdModel) -> Result<()> {
    w.write_all(&model.header.to_bytes())?;
    write_vertex_block(w, &model.vertices)?;
    write_face_block(w, &model.triangles)?;
    write_material_block(w, &model.materials)?;
    write_bone_block(w, &model.bones)?;
    write_ik_block(w)?;
    write_skin_block(w, &model.skin)?;
    w.write_all(&TRAILER)?;
    Ok(())
}
