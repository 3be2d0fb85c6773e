//! Export error taxonomy and degraded-geometry diagnostics

use thiserror::Error;

use crate::scene::SceneError;

/// Fatal export errors
///
/// Every variant aborts the whole export; there is no partial-success mode.
/// The model is fully built in memory before the output stream opens, so all
/// of these fire before any bytes are written.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("selection too short: no model selected")]
    SelectionTooShort,

    #[error("model '{0}' not found in scene")]
    ModelNotFound(String),

    #[error("face {face} has {count} corners, model is not triangulated")]
    NotTriangulated { face: usize, count: usize },

    #[error("face {face} resolved to {count} corner indices (expected 3)")]
    TooManyCorners { face: usize, count: usize },

    #[error("mesh has {count} vertices, exceeding the 16-bit index range")]
    TooManyVertices { count: usize },

    #[error("skeleton has {count} bones, exceeding the 16-bit index range")]
    TooManyBones { count: usize },

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Counters for non-fatal degradations encountered while building
///
/// These substitute documented defaults and continue; they are surfaced to
/// the caller rather than silently dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    /// UV corners whose owning vertex could not be resolved; a neighbor's
    /// data was substituted
    pub unresolved_corners: u32,
    /// Triangles whose edge cross product was zero-length during winding
    /// correction; a unit X axis was substituted
    pub degenerate_triangles: u32,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.unresolved_corners == 0 && self.degenerate_triangles == 0
    }
}
