//! # Decoding
//!
//! Parses the layout documented in [`crate::format`] back into a
//! [`Model`]. Decoding works over an in-memory byte slice with a
//! bounds-checked cursor: every declared count is validated against the
//! bytes actually remaining *before* anything is allocated or read, so a
//! truncated or corrupted file can never cause an out-of-bounds read or a
//! runaway allocation: it surfaces as [`DecodeError::Truncated`] or
//! [`DecodeError::CountOutOfBounds`] instead.

use std::fs;
use std::path::Path;

use cgmath::Vector3;
use log::debug;

use super::{INDEX_BYTES, VERTEX_BYTES};
use crate::error::DecodeError;
use crate::material::Material;
use crate::model::{Mesh, Model};

/// Parse a .bmf byte stream into a model.
///
/// Trailing bytes after the last mesh are tolerated and ignored, matching
/// the write-side contract that only the declared payload is meaningful.
pub fn decode(bytes: &[u8]) -> Result<Model, DecodeError> {
    let mut reader = Reader::new(bytes);

    let mesh_count = reader.read_u64("mesh count")?;
    let mut meshes = Vec::new();
    for _ in 0..mesh_count {
        meshes.push(read_mesh(&mut reader)?);
    }
    if reader.remaining() > 0 {
        debug!(
            "ignoring {} trailing bytes after the last mesh",
            reader.remaining()
        );
    }
    Ok(Model::from_meshes(meshes))
}

/// Load and parse a .bmf file.
///
/// The file is read once, up front; the handle is released before parsing
/// begins.
pub fn read_file(path: &Path) -> Result<Model, DecodeError> {
    let bytes = fs::read(path).map_err(|source| DecodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes)
}

fn read_mesh(reader: &mut Reader<'_>) -> Result<Mesh, DecodeError> {
    let material = read_material(reader)?;
    let vertex_count = reader.read_count("vertex count", VERTEX_BYTES)?;
    let index_count = reader.read_count("index count", INDEX_BYTES)?;

    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        positions.push(reader.read_vec3("vertex position")?);
        normals.push(reader.read_vec3("vertex normal")?);
    }

    let mut indices = Vec::with_capacity(index_count);
    for _ in 0..index_count {
        indices.push(reader.read_u32("index")?);
    }

    Ok(Mesh {
        positions,
        normals,
        indices,
        material,
    })
}

fn read_material(reader: &mut Reader<'_>) -> Result<Material, DecodeError> {
    Ok(Material {
        diffuse: reader.read_vec3("diffuse color")?,
        specular: reader.read_vec3("specular color")?,
        emissive: reader.read_vec3("emissive color")?,
        shininess: reader.read_f32("shininess")?,
    })
}

/// Cursor over the input slice. Every read states what it was after, so
/// truncation errors name the field that fell off the end.
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take(&mut self, len: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::Truncated {
                context,
                needed: len - self.remaining(),
                available: self.remaining(),
            });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn take_array<const N: usize>(
        &mut self,
        context: &'static str,
    ) -> Result<[u8; N], DecodeError> {
        let slice = self.take(N, context)?;
        let mut array = [0u8; N];
        array.copy_from_slice(slice);
        Ok(array)
    }

    fn read_u64(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.take_array(context)?))
    }

    fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.take_array(context)?))
    }

    fn read_f32(&mut self, context: &'static str) -> Result<f32, DecodeError> {
        Ok(f32::from_le_bytes(self.take_array(context)?))
    }

    fn read_vec3(&mut self, context: &'static str) -> Result<Vector3<f32>, DecodeError> {
        Ok(Vector3::new(
            self.read_f32(context)?,
            self.read_f32(context)?,
            self.read_f32(context)?,
        ))
    }

    /// Read a u64 count and check that `count * record_bytes` fits in the
    /// remaining input before it is used for allocation.
    fn read_count(
        &mut self,
        context: &'static str,
        record_bytes: usize,
    ) -> Result<usize, DecodeError> {
        let value = self.read_u64(context)?;
        let payload = value.checked_mul(record_bytes as u64);
        match payload {
            Some(payload) if payload <= self.remaining() as u64 => Ok(value as usize),
            _ => Err(DecodeError::CountOutOfBounds {
                context,
                value,
                available: self.remaining(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::encode::encode;

    fn triangle_mesh() -> Mesh {
        Mesh {
            positions: vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::new(0.0, 0.0, 1.0); 3],
            indices: vec![0, 1, 2],
            material: Material {
                diffuse: Vector3::new(0.8, 0.1, 0.1),
                specular: Vector3::new(0.25, 0.25, 0.25),
                emissive: Vector3::new(0.0, 0.0, 0.0),
                shininess: 16.0,
            },
        }
    }

    fn encoded(meshes: &[Mesh]) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode(meshes, &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_empty_file_decodes_to_empty_model() {
        let model = decode(&encoded(&[])).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_round_trip_is_exact() {
        let meshes = vec![triangle_mesh(), triangle_mesh()];
        let model = decode(&encoded(&meshes)).unwrap();
        assert_eq!(model.meshes(), &meshes[..]);
    }

    #[test]
    fn test_single_triangle_decodes_field_by_field() {
        let model = decode(&encoded(&[triangle_mesh()])).unwrap();
        assert_eq!(model.len(), 1);
        let mesh = &model.meshes()[0];
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
        assert_eq!(mesh.positions[1], Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.normals[2], Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.material.shininess, 16.0);
    }

    #[test]
    fn test_empty_input_is_truncated_not_panic() {
        let result = decode(&[]);
        assert!(matches!(
            result,
            Err(DecodeError::Truncated {
                context: "mesh count",
                ..
            })
        ));
    }

    #[test]
    fn test_truncation_in_every_region_is_reported() {
        let bytes = encoded(&[triangle_mesh()]);
        // Cut inside the material block, the counts, the vertex data, and
        // the index data in turn.
        for cut in [4, 20, 50, 70, 140] {
            let result = decode(&bytes[..cut]);
            assert!(
                matches!(
                    result,
                    Err(DecodeError::Truncated { .. }) | Err(DecodeError::CountOutOfBounds { .. })
                ),
                "cut at {} should fail cleanly, got {:?}",
                cut,
                result
            );
        }
    }

    #[test]
    fn test_overdeclared_vertex_count_is_rejected_before_allocation() {
        let mut bytes = encoded(&[triangle_mesh()]);
        // Claim u64::MAX vertices; a naive decoder would try to allocate.
        bytes[48..56].copy_from_slice(&u64::MAX.to_le_bytes());
        let result = decode(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::CountOutOfBounds {
                context: "vertex count",
                ..
            })
        ));
    }

    #[test]
    fn test_overdeclared_index_count_is_rejected() {
        let mut bytes = encoded(&[triangle_mesh()]);
        bytes[56..64].copy_from_slice(&1_000_000u64.to_le_bytes());
        let result = decode(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::CountOutOfBounds {
                context: "index count",
                ..
            })
        ));
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let mut bytes = encoded(&[triangle_mesh()]);
        bytes.extend_from_slice(&[0xAB; 7]);
        let model = decode(&bytes).unwrap();
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_missing_file_reports_open_error() {
        let result = read_file(Path::new("/definitely/not/here.bmf"));
        assert!(matches!(result, Err(DecodeError::Open { .. })));
    }
}
