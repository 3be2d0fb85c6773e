//! PMD material block
//!
//! # Layout
//! ```text
//! 0x00: material_count u32
//! then per material (70 bytes):
//!   diffuse f32x3
//!   alpha f32 (1.0 - transparency)
//!   specularity f32 (specular exponent)
//!   specular f32x3
//!   ambient f32x3
//!   toon index byte (0xFF, unused slot)
//!   edge flag byte
//!   face index count u32 (faces * 3)
//!   texture filename (20-byte name field)
//! ```

use anyhow::Result;
use std::io::Write;

use crate::strings::encode_name_field;

use super::NAME_FIELD_LEN;

/// One material record (encoded 70 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct PmdMaterial {
    /// Diffuse color, channels in [0, 1]
    pub diffuse: [f32; 3],
    /// Transparency scalar in [0, 1]; written as alpha = 1 - transparency
    pub transparency: f32,
    /// Specular exponent
    pub specularity: f32,
    /// Specular color
    pub specular: [f32; 3],
    /// Ambient color
    pub ambient: [f32; 3],
    /// Toon texture index (unused slot, 0xFF)
    pub toon_index: u8,
    /// Edge rendering flag
    pub edge_flag: u8,
    /// Number of triangles assigned to this material; encoded in indices
    pub face_count: u32,
    /// Filename of the texture driving the diffuse channel, empty if none
    pub texture_file: String,
}

impl PmdMaterial {
    pub const SIZE: usize = 70;

    /// Write material to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.diffuse[0].to_le_bytes());
        bytes[4..8].copy_from_slice(&self.diffuse[1].to_le_bytes());
        bytes[8..12].copy_from_slice(&self.diffuse[2].to_le_bytes());
        bytes[12..16].copy_from_slice(&(1.0 - self.transparency).to_le_bytes());
        bytes[16..20].copy_from_slice(&self.specularity.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.specular[0].to_le_bytes());
        bytes[24..28].copy_from_slice(&self.specular[1].to_le_bytes());
        bytes[28..32].copy_from_slice(&self.specular[2].to_le_bytes());
        bytes[32..36].copy_from_slice(&self.ambient[0].to_le_bytes());
        bytes[36..40].copy_from_slice(&self.ambient[1].to_le_bytes());
        bytes[40..44].copy_from_slice(&self.ambient[2].to_le_bytes());
        bytes[44] = self.toon_index;
        bytes[45] = self.edge_flag;
        bytes[46..50].copy_from_slice(&(self.face_count * 3).to_le_bytes());
        bytes[50..70].copy_from_slice(&encode_name_field(&self.texture_file, NAME_FIELD_LEN));
        bytes
    }
}

/// Write the material block
pub fn write_material_block<W: Write>(w: &mut W, materials: &[PmdMaterial]) -> Result<()> {
    w.write_all(&(materials.len() as u32).to_le_bytes())?;
    for material in materials {
        w.write_all(&material.to_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::TOON_UNUSED;
    use crate::strings::PAD_BYTE;

    fn material() -> PmdMaterial {
        PmdMaterial {
            diffuse: [0.5, 0.25, 1.0],
            transparency: 0.25,
            specularity: 8.0,
            specular: [1.0, 1.0, 1.0],
            ambient: [1.0, 1.0, 1.0],
            toon_index: TOON_UNUSED,
            edge_flag: 1,
            face_count: 12,
            texture_file: String::new(),
        }
    }

    #[test]
    fn test_material_size() {
        assert_eq!(material().to_bytes().len(), PmdMaterial::SIZE);
    }

    #[test]
    fn test_alpha_is_one_minus_transparency() {
        let bytes = material().to_bytes();
        assert_eq!(&bytes[12..16], &0.75f32.to_le_bytes());
    }

    #[test]
    fn test_face_count_encoded_in_indices() {
        let bytes = material().to_bytes();
        assert_eq!(&bytes[46..50], &36u32.to_le_bytes());
    }

    #[test]
    fn test_unused_slots() {
        let bytes = material().to_bytes();
        assert_eq!(bytes[44], 0xFF);
        assert_eq!(bytes[45], 1);
    }

    #[test]
    fn test_texture_filename_field() {
        let mut m = material();
        m.texture_file = "skin.bmp".to_string();
        let bytes = m.to_bytes();
        assert_eq!(&bytes[50..58], b"skin.bmp");
        assert!(bytes[58..70].iter().all(|&b| b == PAD_BYTE));
    }

    #[test]
    fn test_block_count() {
        let mut out = Vec::new();
        write_material_block(&mut out, &[material(), material()]).unwrap();
        assert_eq!(&out[0..4], &2u32.to_le_bytes());
        assert_eq!(out.len(), 4 + 2 * PmdMaterial::SIZE);
    }
}
