//! Serialized scene snapshots
//!
//! A `SceneSnapshot` is a JSON dump of exactly the scene state the pipeline
//! queries: per-model geometry arrays, material attributes, and a bone list
//! in the scene's declaration order. It implements [`SceneQuery`], which
//! makes it both the CLI's input format and the canned-geometry double the
//! builder tests run against.

use anyhow::{Context, Result};
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{SceneError, SceneQuery};

/// Full scene dump
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Models and pose sub-meshes, by name
    #[serde(default)]
    pub models: HashMap<String, ModelSnapshot>,
    #[serde(default)]
    pub materials: HashMap<String, MaterialSnapshot>,
    /// Declaration order doubles as the hierarchy traversal order
    #[serde(default)]
    pub bones: Vec<BoneSnapshot>,
}

/// One polygonal object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub positions: Vec<[f32; 3]>,
    #[serde(default)]
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates in corner index space
    #[serde(default)]
    pub uvs: Vec<[f32; 2]>,
    /// Corner -> owning raw vertex; empty means identity mapping
    #[serde(default)]
    pub corner_source: Vec<Option<usize>>,
    #[serde(default)]
    pub faces: Vec<FaceSnapshot>,
    /// Object translation (pose sub-meshes are compared in local frame)
    #[serde(default)]
    pub translation: [f32; 3],
    /// Skin-cluster weights: bone name -> per-raw-vertex weight
    #[serde(default)]
    pub weights: HashMap<String, Vec<f32>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaceSnapshot {
    /// Canonical-space corner indices
    pub corners: Vec<usize>,
    #[serde(default)]
    pub material: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialSnapshot {
    pub color: [f32; 3],
    #[serde(default)]
    pub transparency: [f32; 3],
    #[serde(default)]
    pub specular_color: Option<[f32; 3]>,
    #[serde(default)]
    pub specularity: Option<f32>,
    #[serde(default)]
    pub texture_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoneSnapshot {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub world_position: [f32; 3],
}

impl SceneSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open scene: {:?}", path))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse scene: {:?}", path))
    }

    fn model(&self, name: &str) -> Result<&ModelSnapshot, SceneError> {
        self.models
            .get(name)
            .ok_or_else(|| SceneError::NotFound(name.to_string()))
    }

    fn material(&self, name: &str) -> Result<&MaterialSnapshot, SceneError> {
        self.materials
            .get(name)
            .ok_or_else(|| SceneError::NotFound(name.to_string()))
    }

    fn bone(&self, name: &str) -> Result<&BoneSnapshot, SceneError> {
        self.bones
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| SceneError::NotFound(name.to_string()))
    }
}

fn element<T: Copy>(
    items: &[T],
    object: &str,
    what: &'static str,
    index: usize,
) -> Result<T, SceneError> {
    items.get(index).copied().ok_or(SceneError::IndexOutOfRange {
        object: object.to_string(),
        what,
        index,
    })
}

impl SceneQuery for SceneSnapshot {
    fn model_exists(&self, model: &str) -> bool {
        self.models.contains_key(model)
    }

    fn vertex_count(&self, model: &str) -> Result<usize, SceneError> {
        Ok(self.model(model)?.positions.len())
    }

    fn corner_count(&self, model: &str) -> Result<usize, SceneError> {
        Ok(self.model(model)?.uvs.len())
    }

    fn face_count(&self, model: &str) -> Result<usize, SceneError> {
        Ok(self.model(model)?.faces.len())
    }

    fn vertex_position(&self, model: &str, vertex: usize) -> Result<[f32; 3], SceneError> {
        element(&self.model(model)?.positions, model, "vertex", vertex)
    }

    fn vertex_normal(&self, model: &str, vertex: usize) -> Result<[f32; 3], SceneError> {
        element(&self.model(model)?.normals, model, "normal", vertex)
    }

    fn corner_uv(&self, model: &str, corner: usize) -> Result<[f32; 2], SceneError> {
        element(&self.model(model)?.uvs, model, "corner", corner)
    }

    fn corner_source_vertex(
        &self,
        model: &str,
        corner: usize,
    ) -> Result<Option<usize>, SceneError> {
        let m = self.model(model)?;
        if corner >= m.uvs.len() {
            return Err(SceneError::IndexOutOfRange {
                object: model.to_string(),
                what: "corner",
                index: corner,
            });
        }
        if m.corner_source.is_empty() {
            // UV topology matches vertex topology
            return Ok((corner < m.positions.len()).then_some(corner));
        }
        Ok(m.corner_source.get(corner).copied().flatten())
    }

    fn face_corners(&self, model: &str, face: usize) -> Result<Vec<usize>, SceneError> {
        let m = self.model(model)?;
        let f = m.faces.get(face).ok_or(SceneError::IndexOutOfRange {
            object: model.to_string(),
            what: "face",
            index: face,
        })?;
        Ok(f.corners.clone())
    }

    fn face_material(&self, model: &str, face: usize) -> Result<String, SceneError> {
        let m = self.model(model)?;
        let f = m.faces.get(face).ok_or(SceneError::IndexOutOfRange {
            object: model.to_string(),
            what: "face",
            index: face,
        })?;
        Ok(f.material.clone())
    }

    fn model_materials(&self, model: &str) -> Result<Vec<String>, SceneError> {
        let m = self.model(model)?;
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for face in &m.faces {
            if seen.insert(face.material.as_str()) {
                names.push(face.material.clone());
            }
        }
        Ok(names)
    }

    fn material_color(&self, material: &str) -> Result<[f32; 3], SceneError> {
        Ok(self.material(material)?.color)
    }

    fn material_transparency(&self, material: &str) -> Result<[f32; 3], SceneError> {
        Ok(self.material(material)?.transparency)
    }

    fn material_specular_color(&self, material: &str) -> Result<Option<[f32; 3]>, SceneError> {
        Ok(self.material(material)?.specular_color)
    }

    fn material_specularity(&self, material: &str) -> Result<Option<f32>, SceneError> {
        Ok(self.material(material)?.specularity)
    }

    fn material_texture_file(&self, material: &str) -> Result<Option<String>, SceneError> {
        Ok(self.material(material)?.texture_file.clone())
    }

    fn bone_hierarchy(&self, root: &str) -> Result<Vec<String>, SceneError> {
        self.bone(root)?;

        // Depth-first over declaration-ordered children, cycle-guarded
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![root.to_string()];
        while let Some(name) = stack.pop() {
            if !visited.insert(name.clone()) {
                continue;
            }
            for child in self
                .bones
                .iter()
                .rev()
                .filter(|b| b.parent.as_deref() == Some(name.as_str()))
            {
                stack.push(child.name.clone());
            }
            out.push(name);
        }
        Ok(out)
    }

    fn bone_parent(&self, bone: &str) -> Result<Option<String>, SceneError> {
        Ok(self.bone(bone)?.parent.clone())
    }

    fn bone_world_position(&self, bone: &str) -> Result<[f32; 3], SceneError> {
        Ok(self.bone(bone)?.world_position)
    }

    fn skin_weight(&self, model: &str, vertex: usize, bone: &str) -> Result<f32, SceneError> {
        let m = self.model(model)?;
        Ok(m.weights
            .get(bone)
            .and_then(|per_vertex| per_vertex.get(vertex))
            .copied()
            .unwrap_or(0.0))
    }

    fn object_translation(&self, object: &str) -> Result<[f32; 3], SceneError> {
        Ok(self.model(object)?.translation)
    }
}
