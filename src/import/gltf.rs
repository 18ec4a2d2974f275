//! # glTF 2.0 Adapter
//!
//! Imports `.gltf` and `.glb` files through the `gltf` crate. Unlike OBJ,
//! glTF carries a real node hierarchy, which maps straight onto
//! [`SceneNode`]: children become children and a node's mesh reference
//! expands to the indices of that mesh's primitives (each glTF primitive
//! becomes one [`SourceMesh`], since a primitive is the unit that carries a
//! material slot).
//!
//! Material mapping is lossy by nature: glTF is metallic-roughness PBR, so
//! the base color factor becomes the diffuse color and the emissive factor
//! carries over, while specular, shininess, and shininess strength have no
//! glTF counterpart and stay absent for the extractor to default.

use std::path::Path;

use cgmath::Vector3;
use log::{info, warn};

use crate::error::ImportError;
use crate::scene::{Face, SceneGraph, SceneNode, SourceMaterial, SourceMesh};

/// Import a glTF or GLB file into a scene graph.
pub fn import(path: &Path) -> Result<SceneGraph, ImportError> {
    let (document, buffers, _images) =
        gltf::import(path).map_err(|e| ImportError::Backend {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut materials: Vec<SourceMaterial> =
        document.materials().map(|m| convert_material(&m)).collect();
    // Primitives without an explicit material use glTF's implicit default;
    // give it a real slot at the end of the table when anything needs it.
    let default_slot = materials.len();
    let mut uses_default_material = false;

    // One SourceMesh per primitive; remember which slots belong to each
    // glTF mesh so nodes can be resolved below.
    let mut meshes = Vec::new();
    let mut primitive_slots: Vec<Vec<usize>> = Vec::new();
    for mesh in document.meshes() {
        let mut slots = Vec::new();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                warn!(
                    "mesh {:?}: skipping primitive with non-triangle mode {:?}",
                    mesh.name().unwrap_or("unnamed"),
                    primitive.mode()
                );
                continue;
            }
            let material_index = match primitive.material().index() {
                Some(index) => index,
                None => {
                    uses_default_material = true;
                    default_slot
                }
            };
            slots.push(meshes.len());
            meshes.push(convert_primitive(&primitive, &buffers, material_index));
        }
        primitive_slots.push(slots);
    }

    if uses_default_material {
        materials.push(SourceMaterial {
            name: "gltf-default".to_string(),
            diffuse: Some(Vector3::new(1.0, 1.0, 1.0)),
            emissive: Some(Vector3::new(0.0, 0.0, 0.0)),
            ..Default::default()
        });
    }

    let root = build_root(&document, &primitive_slots);

    info!(
        "imported {}: {} primitives, {} materials",
        path.display(),
        meshes.len(),
        materials.len()
    );

    Ok(SceneGraph {
        root,
        meshes,
        materials,
    })
}

fn convert_material(material: &gltf::Material<'_>) -> SourceMaterial {
    let pbr = material.pbr_metallic_roughness();
    let base = pbr.base_color_factor();
    SourceMaterial {
        name: material.name().unwrap_or("unnamed").to_string(),
        diffuse: Some(Vector3::new(base[0], base[1], base[2])),
        emissive: Some(Vector3::from(material.emissive_factor())),
        // No specular/shininess in metallic-roughness PBR.
        specular: None,
        shininess: None,
        shininess_strength: None,
    }
}

fn convert_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
    material_index: usize,
) -> SourceMesh {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &**data));

    let positions: Vec<Vector3<f32>> = reader
        .read_positions()
        .map(|iter| iter.map(Vector3::from).collect())
        .unwrap_or_default();

    let normals: Option<Vec<Vector3<f32>>> = reader
        .read_normals()
        .map(|iter| iter.map(Vector3::from).collect());

    // Non-indexed primitives get sequential indices so everything
    // downstream stays indexed.
    let indices: Vec<u32> = reader
        .read_indices()
        .map(|iter| iter.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    let faces = indices
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

fn build_root(document: &gltf::Document, primitive_slots: &[Vec<usize>]) -> SceneNode {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next());
    let Some(scene) = scene else {
        warn!("document has no scenes, exporting nothing");
        return SceneNode::default();
    };

    let mut roots: Vec<SceneNode> = scene
        .nodes()
        .map(|node| build_node(&node, primitive_slots))
        .collect();

    // A single scene root is used as-is; several get a synthetic parent.
    if roots.len() == 1 {
        roots.remove(0)
    } else {
        SceneNode {
            mesh_indices: Vec::new(),
            children: roots,
        }
    }
}

fn build_node(node: &gltf::Node<'_>, primitive_slots: &[Vec<usize>]) -> SceneNode {
    let mesh_indices = node
        .mesh()
        .and_then(|mesh| primitive_slots.get(mesh.index()).cloned())
        .unwrap_or_default();
    let children = node
        .children()
        .map(|child| build_node(&child, primitive_slots))
        .collect();
    SceneNode {
        mesh_indices,
        children,
    }
}
