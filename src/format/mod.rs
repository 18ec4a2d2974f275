//! # The .bmf Binary Format
//!
//! A compact, hand-specified serialization of a flattened mesh list. All
//! integers and floats are little-endian, floats are 4-byte IEEE 754
//! single precision, and there is no padding anywhere:
//!
//! ```text
//! u64 mesh_count
//! repeat mesh_count:
//!   f32 diffuse.x,y,z
//!   f32 specular.x,y,z        (pre-scaled by shininess strength)
//!   f32 emissive.x,y,z
//!   f32 shininess             (material block: 10 floats, 40 bytes)
//!   u64 vertex_count
//!   u64 index_count
//!   repeat vertex_count:
//!     f32 pos.x,y,z
//!     f32 normal.x,y,z        (24 bytes per vertex, interleaved)
//!   repeat index_count:
//!     u32 index               (4 bytes per index)
//! ```
//!
//! There is no magic number, version tag, or checksum: the layout above is
//! the whole contract, and any field change breaks every existing file.
//! Every field is encoded and decoded explicitly, one at a time, never by
//! dumping struct memory, so compiler layout and host endianness cannot
//! leak into the stream.
//!
//! The decoder checks every declared count against the bytes actually
//! remaining before it allocates or reads, so truncated or corrupted input
//! surfaces as [`crate::error::DecodeError`] rather than garbage data.

pub mod decode;
pub mod encode;

pub use decode::{decode, read_file};
pub use encode::{encode, encoded_len, write_file};

/// Size of the per-file header (`mesh_count`), in bytes.
pub const HEADER_BYTES: usize = 8;
/// Size of the material block, in bytes.
pub const MATERIAL_BYTES: usize = 40;
/// Size of the two per-mesh counts, in bytes.
pub const MESH_COUNTS_BYTES: usize = 16;
/// Size of one interleaved position + normal vertex record, in bytes.
pub const VERTEX_BYTES: usize = 24;
/// Size of one index, in bytes.
pub const INDEX_BYTES: usize = 4;
