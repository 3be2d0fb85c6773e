//! PMD vertex and face blocks
//!
//! # Vertex block layout
//! ```text
//! 0x00: vertex_count u32
//! then per vertex (38 bytes):
//!   position f32x3 (Z negated on write)
//!   normal   f32x3
//!   uv       f32x2 (V written as 1-v)
//!   bone influence pair u16x2
//!   weight byte (round(weight*100), percent of primary bone)
//!   edge flag byte
//! ```
//!
//! # Face block layout
//! ```text
//! 0x00: index_count u32 (triangle_count * 3)
//! then per triangle: u16x3, first and last index swapped on write to match
//! the engine's winding convention
//! ```
//!
//! The target engine is left-handed while scene space is right-handed, hence
//! the Z negation on positions and the V flip on texture coordinates.

use anyhow::Result;
use std::io::Write;

/// One canonical vertex record (encoded 38 bytes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PmdVertex {
    /// Position in model space (scene handedness; Z negated on write)
    pub position: [f32; 3],
    /// Averaged vertex normal
    pub normal: [f32; 3],
    /// Texture coordinate (scene V; flipped on write)
    pub uv: [f32; 2],
    /// Primary and secondary bone influence
    pub bones: [u16; 2],
    /// Primary bone weight fraction in [0, 1]
    pub weight: f32,
    /// Edge rendering flag (1 = enabled)
    pub edge_flag: u8,
}

impl PmdVertex {
    pub const SIZE: usize = 38;

    /// Write vertex to bytes, applying the handedness and UV conversions
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.position[0].to_le_bytes());
        bytes[4..8].copy_from_slice(&self.position[1].to_le_bytes());
        bytes[8..12].copy_from_slice(&(-self.position[2]).to_le_bytes());
        bytes[12..16].copy_from_slice(&self.normal[0].to_le_bytes());
        bytes[16..20].copy_from_slice(&self.normal[1].to_le_bytes());
        bytes[20..24].copy_from_slice(&self.normal[2].to_le_bytes());
        bytes[24..28].copy_from_slice(&self.uv[0].to_le_bytes());
        bytes[28..32].copy_from_slice(&(1.0 - self.uv[1]).to_le_bytes());
        bytes[32..34].copy_from_slice(&self.bones[0].to_le_bytes());
        bytes[34..36].copy_from_slice(&self.bones[1].to_le_bytes());
        bytes[36] = weight_byte(self.weight);
        bytes[37] = self.edge_flag;
        bytes
    }
}

/// Encode a weight fraction as an integer percent byte
#[inline]
pub fn weight_byte(weight: f32) -> u8 {
    (weight * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Write the vertex block
pub fn write_vertex_block<W: Write>(w: &mut W, vertices: &[PmdVertex]) -> Result<()> {
    w.write_all(&(vertices.len() as u32).to_le_bytes())?;
    for vertex in vertices {
        w.write_all(&vertex.to_bytes())?;
    }
    Ok(())
}

/// Write the face block
///
/// The count field is in indices, not triangles. Each triangle's first and
/// last index are swapped here; winding agreement was already resolved
/// against the vertex normals upstream, so the two corrections compose.
pub fn write_face_block<W: Write>(w: &mut W, triangles: &[[u16; 3]]) -> Result<()> {
    w.write_all(&((triangles.len() * 3) as u32).to_le_bytes())?;
    for triangle in triangles {
        for index in [triangle[2], triangle[1], triangle[0]] {
            w.write_all(&index.to_le_bytes())?;
        }
    }
    Ok(())
}
