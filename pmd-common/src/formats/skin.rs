//! PMD skin block
//!
//! Sparse morph-style corrective deltas. All skin targets share one base
//! index set: the deduplicated, ascending union of every vertex index any
//! target displaces. The base block stores (raw vertex index, base position)
//! pairs; each target block stores (position within the base set, delta)
//! pairs.
//!
//! # Layout
//! ```text
//! 0x00: skin_count u16 (target_count + 1 for the base block, or 0)
//! then per block:
//!   name (20-byte name field; "base" for the base block)
//!   entry_count u32
//!   kind byte (0 = base, 1 = target)
//!   entries: { index u32, vector f32x3 }
//! ```
//!
//! An empty base set writes `skin_count = 0` and no blocks. Positions and
//! deltas are written unmodified (no handedness conversion in this block).

use anyhow::Result;
use std::io::Write;

use crate::strings::encode_name_field;

use super::{NAME_FIELD_LEN, SKIN_KIND_BASE, SKIN_KIND_TARGET};

/// One skin block entry: an index paired with a position or delta vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinEntry {
    pub index: u32,
    pub vector: [f32; 3],
}

/// One named sparse delta target
#[derive(Debug, Clone, PartialEq)]
pub struct SkinTarget {
    pub name: String,
    /// (base-set position, delta) pairs, ascending by index
    pub entries: Vec<SkinEntry>,
}

/// Base index set plus all delta targets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinData {
    /// (raw vertex index, base position) pairs, ascending by index
    pub base: Vec<SkinEntry>,
    pub targets: Vec<SkinTarget>,
}

impl SkinData {
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

/// Write the skin block sequence
pub fn write_skin_block<W: Write>(w: &mut W, skin: &SkinData) -> Result<()> {
    if skin.is_empty() {
        w.write_all(&0u16.to_le_bytes())?;
        return Ok(());
    }

    w.write_all(&((skin.targets.len() + 1) as u16).to_le_bytes())?;
    write_one_block(w, "base", SKIN_KIND_BASE, &skin.base)?;
    for target in &skin.targets {
        write_one_block(w, &target.name, SKIN_KIND_TARGET, &target.entries)?;
    }
    Ok(())
}

fn write_one_block<W: Write>(w: &mut W, name: &str, kind: u8, entries: &[SkinEntry]) -> Result<()> {
    w.write_all(&encode_name_field(name, NAME_FIELD_LEN))?;
    w.write_all(&(entries.len() as u32).to_le_bytes())?;
    w.write_all(&[kind])?;
    for entry in entries {
        w.write_all(&entry.index.to_le_bytes())?;
        w.write_all(&entry.vector[0].to_le_bytes())?;
        w.write_all(&entry.vector[1].to_le_bytes())?;
        w.write_all(&entry.vector[2].to_le_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::PAD_BYTE;

    #[test]
    fn test_empty_skin_writes_zero_count() {
        let mut out = Vec::new();
        write_skin_block(&mut out, &SkinData::default()).unwrap();
        assert_eq!(out, vec![0, 0]);
    }

    #[test]
    fn test_skin_count_includes_base() {
        let skin = SkinData {
            base: vec![SkinEntry {
                index: 1,
                vector: [1.0, 1.0, 1.0],
            }],
            targets: vec![SkinTarget {
                name: "smile".to_string(),
                entries: vec![SkinEntry {
                    index: 0,
                    vector: [0.1, 0.0, 0.0],
                }],
            }],
        };
        let mut out = Vec::new();
        write_skin_block(&mut out, &skin).unwrap();
        assert_eq!(&out[0..2], &2u16.to_le_bytes());
    }

    #[test]
    fn test_base_block_layout() {
        let skin = SkinData {
            base: vec![SkinEntry {
                index: 7,
                vector: [1.0, 2.0, 3.0],
            }],
            targets: Vec::new(),
        };
        let mut out = Vec::new();
        write_skin_block(&mut out, &skin).unwrap();

        assert_eq!(&out[2..6], b"base");
        assert!(out[6..22].iter().all(|&b| b == PAD_BYTE));
        assert_eq!(&out[22..26], &1u32.to_le_bytes());
        assert_eq!(out[26], 0); // kind
        assert_eq!(&out[27..31], &7u32.to_le_bytes());
        assert_eq!(&out[31..35], &1.0f32.to_le_bytes());
        // position written unmodified, no Z negation in this block
        assert_eq!(&out[39..43], &3.0f32.to_le_bytes());
        assert_eq!(out.len(), 43);
    }

    #[test]
    fn test_target_block_follows_base() {
        let skin = SkinData {
            base: vec![SkinEntry {
                index: 3,
                vector: [0.0, 0.0, 0.0],
            }],
            targets: vec![SkinTarget {
                name: "blink".to_string(),
                entries: Vec::new(),
            }],
        };
        let mut out = Vec::new();
        write_skin_block(&mut out, &skin).unwrap();

        // base block ends at 2 + 25 + 16 = 43
        assert_eq!(&out[43..48], b"blink");
        assert_eq!(&out[63..67], &0u32.to_le_bytes());
        assert_eq!(out[67], 1); // kind
        assert_eq!(out.len(), 68);
    }
}
