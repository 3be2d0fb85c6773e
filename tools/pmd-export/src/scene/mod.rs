//! Scene query contract between the export pipeline and the host application
//!
//! The pipeline never talks to a live 3D application directly; it consumes
//! the narrow capability set below. The host supplies an implementation
//! backed by its command layer; [`snapshot::SceneSnapshot`] supplies one
//! backed by a serialized scene dump, used by the CLI and as the canned
//! test double.

pub mod snapshot;

pub use snapshot::SceneSnapshot;

use thiserror::Error;

use crate::error::ExportError;

/// Errors surfaced by a scene query implementation
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("scene object '{0}' not found")]
    NotFound(String),

    #[error("'{object}': {what} index {index} out of range")]
    IndexOutOfRange {
        object: String,
        what: &'static str,
        index: usize,
    },
}

/// The export selection: one model, an optional skeleton root, and the
/// ordered list of skin pose targets
///
/// Replaces any notion of ambient "current selection" state; built once and
/// passed immutably through the pipeline.
#[derive(Debug, Clone)]
pub struct Selection {
    pub model: String,
    pub root_bone: Option<String>,
    pub poses: Vec<String>,
}

impl Selection {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            root_bone: None,
            poses: Vec::new(),
        }
    }

    pub fn with_root_bone(mut self, root_bone: impl Into<String>) -> Self {
        self.root_bone = Some(root_bone.into());
        self
    }

    pub fn with_poses(mut self, poses: Vec<String>) -> Self {
        self.poses = poses;
        self
    }

    /// Build a selection from the host's ordered selection list:
    /// model first, then the skeleton root, then pose targets.
    pub fn from_ordered_names(names: &[String]) -> Result<Self, ExportError> {
        let mut names = names.iter();
        let model = names.next().ok_or(ExportError::SelectionTooShort)?;
        let mut selection = Selection::new(model);
        selection.root_bone = names.next().cloned();
        selection.poses = names.cloned().collect();
        Ok(selection)
    }
}

/// Blocking query capabilities the host scene must provide
///
/// Mesh elements live in two index spaces: raw vertex indices (positions,
/// normals, skin weights) and UV corner indices (texture coordinates, face
/// connectivity). Many corners may map to one vertex. Implementations whose
/// UV topology matches the vertex topology report an identity mapping.
///
/// Optional attributes (specular, texture file) return `Ok(None)` when the
/// scene has nothing to report; `Err` is reserved for unknown objects and
/// out-of-range element indices.
pub trait SceneQuery {
    fn model_exists(&self, model: &str) -> bool;

    fn vertex_count(&self, model: &str) -> Result<usize, SceneError>;
    fn corner_count(&self, model: &str) -> Result<usize, SceneError>;
    fn face_count(&self, model: &str) -> Result<usize, SceneError>;

    fn vertex_position(&self, model: &str, vertex: usize) -> Result<[f32; 3], SceneError>;
    /// Averaged normal over all face-corners incident to the vertex
    fn vertex_normal(&self, model: &str, vertex: usize) -> Result<[f32; 3], SceneError>;
    fn corner_uv(&self, model: &str, corner: usize) -> Result<[f32; 2], SceneError>;
    /// Raw vertex owning the given UV corner, `None` if unresolvable
    fn corner_source_vertex(&self, model: &str, corner: usize)
        -> Result<Option<usize>, SceneError>;

    /// Corner indices of one face, in canonical index space (corner space
    /// when the model has UV corners, raw vertex space otherwise)
    fn face_corners(&self, model: &str, face: usize) -> Result<Vec<usize>, SceneError>;
    fn face_material(&self, model: &str, face: usize) -> Result<String, SceneError>;
    /// Every material assigned to the model, order unspecified
    fn model_materials(&self, model: &str) -> Result<Vec<String>, SceneError>;

    fn material_color(&self, material: &str) -> Result<[f32; 3], SceneError>;
    /// Per-channel transparency triple
    fn material_transparency(&self, material: &str) -> Result<[f32; 3], SceneError>;
    fn material_specular_color(&self, material: &str) -> Result<Option<[f32; 3]>, SceneError>;
    fn material_specularity(&self, material: &str) -> Result<Option<f32>, SceneError>;
    /// Filename of the file texture driving the material's diffuse channel
    fn material_texture_file(&self, material: &str) -> Result<Option<String>, SceneError>;

    /// Root bone plus every descendant, in the scene's native hierarchy
    /// traversal order; this order is the exported bone index space
    fn bone_hierarchy(&self, root: &str) -> Result<Vec<String>, SceneError>;
    fn bone_parent(&self, bone: &str) -> Result<Option<String>, SceneError>;
    fn bone_world_position(&self, bone: &str) -> Result<[f32; 3], SceneError>;

    /// Skin-cluster weight of `bone` on `vertex` (raw vertex space);
    /// 0.0 when the bone has no influence
    fn skin_weight(&self, model: &str, vertex: usize, bone: &str) -> Result<f32, SceneError>;

    /// Translation of a scene object (used to localize pose sub-meshes)
    fn object_translation(&self, object: &str) -> Result<[f32; 3], SceneError>;
}
