//! # Encoding
//!
//! Serializes a flattened mesh list into the layout documented in
//! [`crate::format`]. The encoder is generic over [`io::Write`] so it can
//! target files, buffers, and test vectors alike; [`write_file`] wraps it
//! with buffered file creation.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use cgmath::Vector3;
use log::info;

use super::{HEADER_BYTES, INDEX_BYTES, MATERIAL_BYTES, MESH_COUNTS_BYTES, VERTEX_BYTES};
use crate::error::EncodeError;
use crate::material::Material;
use crate::model::Mesh;

/// Exact size in bytes of the encoding of `meshes`.
pub fn encoded_len(meshes: &[Mesh]) -> usize {
    HEADER_BYTES
        + meshes
            .iter()
            .map(|mesh| {
                MATERIAL_BYTES
                    + MESH_COUNTS_BYTES
                    + mesh.vertex_count() * VERTEX_BYTES
                    + mesh.index_count() * INDEX_BYTES
            })
            .sum::<usize>()
}

/// Serialize a mesh list into `writer`.
///
/// Meshes are written in slice order, so the same input always produces
/// byte-identical output. Every mesh must pair its normals one-to-one with
/// its positions; a mismatch is rejected before anything is written for
/// that mesh, since the declared vertex count would otherwise disagree
/// with the records that follow it.
pub fn encode<W: Write>(meshes: &[Mesh], writer: &mut W) -> Result<(), EncodeError> {
    write_u64(writer, meshes.len() as u64)?;
    for (mesh_index, mesh) in meshes.iter().enumerate() {
        if mesh.positions.len() != mesh.normals.len() {
            return Err(EncodeError::NormalCountMismatch {
                mesh: mesh_index,
                positions: mesh.positions.len(),
                normals: mesh.normals.len(),
            });
        }
        write_material(writer, &mesh.material)?;
        write_u64(writer, mesh.vertex_count() as u64)?;
        write_u64(writer, mesh.index_count() as u64)?;
        for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
            write_vec3(writer, position)?;
            write_vec3(writer, normal)?;
        }
        for &index in &mesh.indices {
            writer.write_all(&index.to_le_bytes())?;
        }
    }
    Ok(())
}

/// Serialize a mesh list to a file, creating or overwriting it.
///
/// The file handle lives only for the duration of this call and is closed
/// on every exit path. Returns the number of bytes written.
pub fn write_file(meshes: &[Mesh], path: &Path) -> Result<u64, EncodeError> {
    let file = File::create(path).map_err(|source| EncodeError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    encode(meshes, &mut writer)?;
    writer.flush()?;
    let bytes = encoded_len(meshes) as u64;
    info!(
        "wrote {} meshes ({} bytes) to {}",
        meshes.len(),
        bytes,
        path.display()
    );
    Ok(bytes)
}

fn write_material<W: Write>(writer: &mut W, material: &Material) -> io::Result<()> {
    write_vec3(writer, &material.diffuse)?;
    write_vec3(writer, &material.specular)?;
    write_vec3(writer, &material.emissive)?;
    writer.write_all(&material.shininess.to_le_bytes())
}

fn write_vec3<W: Write>(writer: &mut W, v: &Vector3<f32>) -> io::Result<()> {
    writer.write_all(&v.x.to_le_bytes())?;
    writer.write_all(&v.y.to_le_bytes())?;
    writer.write_all(&v.z.to_le_bytes())
}

fn write_u64<W: Write>(writer: &mut W, value: u64) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh {
        Mesh {
            positions: vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::new(0.0, 0.0, 1.0); 3],
            indices: vec![0, 1, 2],
            material: Material::default(),
        }
    }

    #[test]
    fn test_empty_list_encodes_to_eight_zero_bytes() {
        let mut bytes = Vec::new();
        encode(&[], &mut bytes).unwrap();
        assert_eq!(bytes, vec![0u8; 8]);
        assert_eq!(encoded_len(&[]), 8);
    }

    #[test]
    fn test_single_triangle_encoded_size() {
        let meshes = vec![unit_triangle()];
        let mut bytes = Vec::new();
        encode(&meshes, &mut bytes).unwrap();
        // 8 header + 40 material + 16 counts + 3 * 24 vertices + 3 * 4 indices
        assert_eq!(bytes.len(), 148);
        assert_eq!(encoded_len(&meshes), 148);
    }

    #[test]
    fn test_layout_of_single_triangle() {
        let mut bytes = Vec::new();
        encode(&[unit_triangle()], &mut bytes).unwrap();

        // mesh_count
        assert_eq!(u64::from_le_bytes(bytes[0..8].try_into().unwrap()), 1);
        // default material: 10 zero floats
        assert_eq!(&bytes[8..48], &[0u8; 40]);
        // vertex_count, index_count
        assert_eq!(u64::from_le_bytes(bytes[48..56].try_into().unwrap()), 3);
        assert_eq!(u64::from_le_bytes(bytes[56..64].try_into().unwrap()), 3);
        // second vertex record: pos (1,0,0), normal (0,0,1)
        let x = f32::from_le_bytes(bytes[88..92].try_into().unwrap());
        assert_eq!(x, 1.0);
        let nz = f32::from_le_bytes(bytes[108..112].try_into().unwrap());
        assert_eq!(nz, 1.0);
        // indices 0, 1, 2 at the tail
        assert_eq!(u32::from_le_bytes(bytes[136..140].try_into().unwrap()), 0);
        assert_eq!(u32::from_le_bytes(bytes[140..144].try_into().unwrap()), 1);
        assert_eq!(u32::from_le_bytes(bytes[144..148].try_into().unwrap()), 2);
    }

    #[test]
    fn test_material_block_is_field_ordered() {
        let mut mesh = unit_triangle();
        mesh.material = Material {
            diffuse: Vector3::new(0.1, 0.2, 0.3),
            specular: Vector3::new(0.4, 0.5, 0.6),
            emissive: Vector3::new(0.7, 0.8, 0.9),
            shininess: 32.0,
        };
        let mut bytes = Vec::new();
        encode(&[mesh], &mut bytes).unwrap();
        let float_at = |offset: usize| -> f32 {
            f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
        };
        assert_eq!(float_at(8), 0.1);
        assert_eq!(float_at(20), 0.4);
        assert_eq!(float_at(32), 0.7);
        assert_eq!(float_at(44), 32.0);
    }

    #[test]
    fn test_mismatched_normals_are_rejected_not_truncated() {
        let mut mesh = unit_triangle();
        mesh.normals.pop();
        let mut bytes = Vec::new();
        let result = encode(&[mesh], &mut bytes);
        assert!(matches!(
            result,
            Err(EncodeError::NormalCountMismatch {
                mesh: 0,
                positions: 3,
                normals: 2,
            })
        ));
    }

    #[test]
    fn test_write_file_rejects_mismatched_normals() {
        let mut mesh = unit_triangle();
        mesh.normals.push(Vector3::new(0.0, 0.0, 1.0));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.bmf");
        let result = write_file(&[mesh], &path);
        assert!(matches!(
            result,
            Err(EncodeError::NormalCountMismatch { .. })
        ));
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let meshes = vec![unit_triangle(), unit_triangle()];
        let mut first = Vec::new();
        let mut second = Vec::new();
        encode(&meshes, &mut first).unwrap();
        encode(&meshes, &mut second).unwrap();
        assert_eq!(first, second);
    }
}
