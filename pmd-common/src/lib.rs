//! Shared PMD model format definitions
//!
//! This crate provides the binary layout of PMD model files shared between:
//! - `pmd-export` (scene-to-model export pipeline)
//! - downstream tools that assemble or inspect model data
//!
//! # Modules
//!
//! - [`strings`] - Fixed-width padded string field encoding
//! - [`formats`] - PMD block records and stream writers

pub mod formats;
pub mod strings;

// Re-export commonly used string-field items
pub use strings::{encode_name_field, encode_text_field, PAD_BYTE};

// Re-export commonly used format items
pub use formats::{
    write_bone_block,
    write_face_block,
    write_ik_block,
    write_material_block,
    write_pmd_model,
    write_skin_block,
    write_vertex_block,
    // Constants
    COMMENT_FIELD_LEN,
    NAME_FIELD_LEN,
    NO_PARENT,
    NO_TAIL,
    PMD_MAGIC,
    PMD_VERSION,
    SKIN_KIND_BASE,
    SKIN_KIND_TARGET,
    TOON_UNUSED,
    // Records
    PmdBone,
    PmdHeader,
    PmdMaterial,
    PmdModel,
    PmdVertex,
    SkinData,
    SkinEntry,
    SkinTarget,
};
