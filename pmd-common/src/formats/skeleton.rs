//! PMD bone and IK blocks
//!
//! # Bone block layout
//! ```text
//! 0x00: bone_count u16
//! then per bone (39 bytes):
//!   name (20-byte name field)
//!   parent index u16 (0xFFFF = no parent in the exported set)
//!   tail position index u16 (0xFFFF, unused slot)
//!   bone type byte (0)
//!   IK parent index u16 (0, no IK support)
//!   position f32x3 (world space, Z negated on write)
//! ```
//!
//! # IK block layout
//! ```text
//! 0x00: chain_count u16 (always 0, no IK chains exported)
//! ```

use anyhow::{bail, Result};
use std::io::Write;

use crate::strings::encode_name_field;

use super::{NAME_FIELD_LEN, NO_TAIL};

/// One bone record (encoded 39 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct PmdBone {
    /// Bone name, truncated into the 20-byte field on write
    pub name: String,
    /// Index of the immediate parent within the exported bone array,
    /// or [`super::NO_PARENT`]
    pub parent: u16,
    /// World-space position (Z negated on write)
    pub position: [f32; 3],
}

impl PmdBone {
    pub const SIZE: usize = 39;

    /// Write bone to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..20].copy_from_slice(&encode_name_field(&self.name, NAME_FIELD_LEN));
        bytes[20..22].copy_from_slice(&self.parent.to_le_bytes());
        bytes[22..24].copy_from_slice(&NO_TAIL.to_le_bytes());
        bytes[24] = 0; // bone type
        bytes[25..27].copy_from_slice(&0u16.to_le_bytes()); // IK parent
        bytes[27..31].copy_from_slice(&self.position[0].to_le_bytes());
        bytes[31..35].copy_from_slice(&self.position[1].to_le_bytes());
        bytes[35..39].copy_from_slice(&(-self.position[2]).to_le_bytes());
        bytes
    }
}

/// Write the bone block
pub fn write_bone_block<W: Write>(w: &mut W, bones: &[PmdBone]) -> Result<()> {
    if bones.len() > u16::MAX as usize {
        bail!("Skeleton has {} bones, exceeding the u16 count field", bones.len());
    }
    w.write_all(&(bones.len() as u16).to_le_bytes())?;
    for bone in bones {
        w.write_all(&bone.to_bytes())?;
    }
    Ok(())
}

/// Write the (empty) IK block
pub fn write_ik_block<W: Write>(w: &mut W) -> Result<()> {
    w.write_all(&0u16.to_le_bytes())?;
    Ok(())
}
