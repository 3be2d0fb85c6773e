//! pmd-export library
//!
//! Converts live scene geometry (mesh, materials, bone hierarchy, skin pose
//! deltas) into engine-ready PMD model files. The host application supplies
//! scene data through the [`scene::SceneQuery`] trait; [`export::build_model`]
//! normalizes it into one consistent indexed model and
//! [`export::export_model`] encodes it.

pub mod bone;
pub mod error;
pub mod export;
pub mod face;
pub mod material;
pub mod scene;
pub mod skin;
pub mod vertex;
pub mod weights;

// Re-export the pipeline surface
pub use error::{Diagnostics, ExportError};
pub use export::{build_model, export_model, ExportOptions, ExportSummary};
pub use scene::{SceneQuery, SceneSnapshot, Selection};

// Re-export the format crate for consumers driving the encoder directly
pub use pmd_common::formats::{write_pmd_model, PmdModel};
