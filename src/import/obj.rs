//! # Wavefront OBJ Adapter
//!
//! Imports `.obj` files through `tobj`, loading with triangulation and a
//! single unified index per vertex so positions and normals line up
//! one-to-one. OBJ has no node hierarchy, so the adapter produces a flat
//! graph: one root node referencing every mesh in file order.
//!
//! MTL materials map onto [`SourceMaterial`] directly (`Kd`, `Ks`, `Ns`);
//! the emissive color comes from the non-standard but widely written `Ke`
//! statement when present. MTL has no shininess-strength concept, so that
//! property is always absent here and the extractor's 0.0 default applies.

use std::path::Path;

use cgmath::{InnerSpace, Vector3};
use log::{debug, info, warn};

use crate::error::ImportError;
use crate::scene::{Face, SceneGraph, SceneNode, SourceMaterial, SourceMesh};

/// Import an OBJ file (and its MTL, if any) into a scene graph.
pub fn import(path: &Path) -> Result<SceneGraph, ImportError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|e| ImportError::Backend {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let materials = materials.unwrap_or_else(|e| {
        warn!("no usable MTL file for {}: {}", path.display(), e);
        Vec::new()
    });

    let mut materials: Vec<SourceMaterial> = materials
        .iter()
        .enumerate()
        .map(|(i, mtl)| convert_material(i, mtl))
        .collect();
    // Meshes with no usemtl statement share an explicit all-absent slot at
    // the end of the table rather than borrowing slot 0's real material.
    let default_slot = materials.len();
    let mut uses_default_material = false;

    let meshes: Vec<SourceMesh> = models
        .iter()
        .map(|model| {
            let material_index = match model.mesh.material_id {
                Some(index) => index,
                None => {
                    uses_default_material = true;
                    default_slot
                }
            };
            convert_mesh(&model.name, &model.mesh, material_index)
        })
        .collect();

    if uses_default_material {
        materials.push(SourceMaterial {
            name: "obj-default".to_string(),
            ..Default::default()
        });
    }

    info!(
        "imported {}: {} meshes, {} materials",
        path.display(),
        meshes.len(),
        materials.len()
    );

    // OBJ is flat; every mesh hangs off the root in file order.
    let root = SceneNode::with_meshes((0..meshes.len()).collect());
    Ok(SceneGraph {
        root,
        meshes,
        materials,
    })
}

fn convert_material(index: usize, mtl: &tobj::Material) -> SourceMaterial {
    let name = if mtl.name.is_empty() {
        format!("material_{}", index)
    } else {
        mtl.name.clone()
    };
    SourceMaterial {
        name,
        diffuse: mtl.diffuse.map(Vector3::from),
        specular: mtl.specular.map(Vector3::from),
        emissive: mtl.emissive.map(Vector3::from),
        shininess: mtl.shininess,
        // MTL has no shininess-strength statement.
        shininess_strength: None,
    }
}

fn convert_mesh(name: &str, mesh: &tobj::Mesh, material_index: usize) -> SourceMesh {
    let positions: Vec<Vector3<f32>> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| Vector3::new(p[0], p[1], p[2]))
        .collect();

    let normals = if !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len() {
        Some(
            mesh.normals
                .chunks_exact(3)
                .map(|n| Vector3::new(n[0], n[1], n[2]))
                .collect(),
        )
    } else {
        debug!("mesh {}: no normals in source, generating", name);
        Some(generate_normals(&positions, &mesh.indices))
    };

    let faces = mesh
        .indices
        .chunks(3)
        .map(|triangle| Face {
            indices: triangle.to_vec(),
        })
        .collect();

    SourceMesh {
        positions,
        normals,
        faces,
        material_index,
    }
}

/// Generate smooth per-vertex normals from face geometry.
///
/// Each triangle's unnormalized cross product is accumulated onto its
/// vertices (larger faces weigh more) and the sums are normalized at the
/// end. Degenerate vertices that accumulate a zero vector keep it.
fn generate_normals(positions: &[Vector3<f32>], indices: &[u32]) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::new(0.0, 0.0, 0.0); positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }
        let edge1 = positions[i1] - positions[i0];
        let edge2 = positions[i2] - positions[i0];
        let face_normal = edge1.cross(edge2);
        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    for normal in &mut normals {
        if normal.magnitude2() > 0.0 {
            *normal = normal.normalize();
        }
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn write_model(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_import_single_triangle_obj() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(
            dir.path(),
            "tri.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );

        let scene = import(&path).unwrap();
        assert_eq!(scene.mesh_count(), 1);
        assert_eq!(scene.root.mesh_indices, vec![0]);
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.faces.len(), 1);
        assert_eq!(mesh.faces[0].indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_normals_are_generated_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(
            dir.path(),
            "tri.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );

        let scene = import(&path).unwrap();
        let normals = scene.meshes[0].normals.as_ref().unwrap();
        assert_eq!(normals.len(), 3);
        // Counter-clockwise triangle in the XY plane faces +Z.
        for normal in normals {
            assert!((normal.z - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_quads_are_triangulated_by_the_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(
            dir.path(),
            "quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );

        let scene = import(&path).unwrap();
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.faces.len(), 2);
        assert!(mesh.faces.iter().all(|f| f.indices.len() == 3));
    }

    #[test]
    fn test_mtl_material_maps_onto_source_material() {
        let dir = tempfile::tempdir().unwrap();
        write_model(
            dir.path(),
            "tri.mtl",
            "newmtl red\nKd 1 0 0\nKs 0.5 0.5 0.5\nNs 32\nKe 0 0 0.25\n",
        );
        let path = write_model(
            dir.path(),
            "tri.obj",
            "mtllib tri.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl red\nf 1 2 3\n",
        );

        let scene = import(&path).unwrap();
        assert_eq!(scene.materials.len(), 1);
        let material = &scene.materials[0];
        assert_eq!(material.name, "red");
        assert_eq!(material.diffuse, Some(Vector3::new(1.0, 0.0, 0.0)));
        assert_eq!(material.specular, Some(Vector3::new(0.5, 0.5, 0.5)));
        assert_eq!(material.emissive, Some(Vector3::new(0.0, 0.0, 0.25)));
        assert_eq!(material.shininess, Some(32.0));
        assert_eq!(material.shininess_strength, None);
        assert_eq!(scene.meshes[0].material_index, 0);
    }

    #[test]
    fn test_emissive_comes_from_ke_statement() {
        let dir = tempfile::tempdir().unwrap();
        write_model(dir.path(), "glow.mtl", "newmtl glow\nKd 0 0 0\nKe 0 0 0.25\n");
        let path = write_model(
            dir.path(),
            "glow.obj",
            "mtllib glow.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl glow\nf 1 2 3\n",
        );

        let scene = import(&path).unwrap();
        // The source supplies an emissive color, so it must survive as
        // present rather than being defaulted to zero downstream.
        assert_eq!(
            scene.materials[0].emissive,
            Some(Vector3::new(0.0, 0.0, 0.25))
        );
    }

    #[test]
    fn test_mesh_without_usemtl_gets_its_own_default_slot() {
        let dir = tempfile::tempdir().unwrap();
        write_model(dir.path(), "tri.mtl", "newmtl red\nKd 1 0 0\n");
        let path = write_model(
            dir.path(),
            "tri.obj",
            "mtllib tri.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );

        let scene = import(&path).unwrap();
        // Slot 0 holds the red material; the unassigned mesh references an
        // appended all-absent slot instead of borrowing it.
        assert_eq!(scene.materials.len(), 2);
        assert_eq!(scene.meshes[0].material_index, 1);
        assert_eq!(scene.materials[1].diffuse, None);
        assert_eq!(scene.materials[1].name, "obj-default");
    }

    #[test]
    fn test_missing_file_reports_backend_error() {
        let result = import(Path::new("/nope/missing.obj"));
        assert!(matches!(result, Err(ImportError::Backend { .. })));
    }
}
