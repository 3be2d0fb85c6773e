//! PMD binary model format
//!
//! Single-file little-endian model format consumed by the character
//! rendering/animation engine. One model file is a fixed block sequence:
//!
//! ```text
//! Header -> Vertices -> Faces -> Materials -> Bones -> IK -> Skins -> trailer
//! ```
//!
//! All multi-byte fields are little-endian. String fields are fixed-width
//! byte arrays padded per `crate::strings`. Each block writer is a stateless
//! "encode given data" step; [`write_pmd_model`] composes them in order.

pub mod header;
pub mod material;
pub mod mesh;
pub mod model;
pub mod skeleton;
pub mod skin;

pub use header::PmdHeader;
pub use material::{write_material_block, PmdMaterial};
pub use mesh::{write_face_block, write_vertex_block, PmdVertex};
pub use model::{write_pmd_model, PmdModel};
pub use skeleton::{write_bone_block, write_ik_block, PmdBone};
pub use skin::{write_skin_block, SkinData, SkinEntry, SkinTarget};

/// Magic literal at offset 0
pub const PMD_MAGIC: [u8; 3] = *b"Pmd";

/// Format version stored as f32 in the header
pub const PMD_VERSION: f32 = 1.0;

/// Width of the header model-name field, material texture filename field,
/// bone name field, and skin target name field
pub const NAME_FIELD_LEN: usize = 20;

/// Width of the header free-text caption field
pub const COMMENT_FIELD_LEN: usize = 256;

/// Parent index sentinel for bones with no parent inside the exported set
pub const NO_PARENT: u16 = 0xFFFF;

/// Tail-position index sentinel (slot unused by this exporter)
pub const NO_TAIL: u16 = 0xFFFF;

/// Toon texture index sentinel (slot unused by this exporter)
pub const TOON_UNUSED: u8 = 0xFF;

/// Skin block kind: shared base vertex set
pub const SKIN_KIND_BASE: u8 = 0;

/// Skin block kind: sparse delta target
pub const SKIN_KIND_TARGET: u8 = 1;

/// Trailing reserved bytes (display-list counts, always zero)
pub const TRAILER: [u8; 3] = [0, 0, 0];
