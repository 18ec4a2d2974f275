//! # Mesh Flattening
//!
//! Converts the hierarchical scene graph into the flat, order-independent
//! mesh list the binary format persists. Traversal is depth-first and
//! processes a node's own meshes before descending into its children; the
//! order carries no meaning beyond determinism, but it must be stable so
//! that re-exporting the same input produces a byte-identical file.
//!
//! Every `(node, mesh-index)` occurrence emits one record. A mesh
//! referenced from several nodes therefore appears several times unless
//! [`FlattenOptions::deduplicate`] is set; upstream scene optimization
//! usually removes true duplicates before this stage, but nothing
//! guarantees it.
//!
//! All accumulation happens in state local to one [`flatten`] call, so the
//! flattener is re-entrant and separate runs never observe each other.

use std::collections::HashSet;

use cgmath::Vector3;
use log::{debug, warn};

use crate::error::FlattenError;
use crate::material::Material;
use crate::model::Mesh;
use crate::scene::{SceneGraph, SceneNode, SourceMesh};

/// How to react to a face that does not have exactly three indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacePolicy {
    /// Abort flattening with [`FlattenError::NonTriangleFace`].
    #[default]
    Strict,
    /// Drop the offending face, log a warning, keep the rest of the mesh.
    Skip,
}

/// Configuration for [`flatten`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenOptions {
    /// Policy for faces that are not triangles (and for indices outside the
    /// mesh's vertex range).
    pub face_policy: FacePolicy,
    /// Emit each source mesh at most once, even when several nodes
    /// reference it.
    pub deduplicate: bool,
}

/// Flatten a scene graph into an ordered mesh list.
///
/// `materials` is the extracted table indexed by material slot; each
/// emitted [`Mesh`] embeds a copy of its slot's record. A slot index
/// outside the table falls back to the all-default material with a
/// warning.
pub fn flatten(
    scene: &SceneGraph,
    materials: &[Material],
    options: &FlattenOptions,
) -> Result<Vec<Mesh>, FlattenError> {
    let mut meshes = Vec::new();
    let mut emitted = HashSet::new();
    visit_node(&scene.root, scene, materials, options, &mut meshes, &mut emitted)?;
    debug!(
        "flattened {} source meshes into {} records",
        scene.mesh_count(),
        meshes.len()
    );
    Ok(meshes)
}

fn visit_node(
    node: &SceneNode,
    scene: &SceneGraph,
    materials: &[Material],
    options: &FlattenOptions,
    meshes: &mut Vec<Mesh>,
    emitted: &mut HashSet<usize>,
) -> Result<(), FlattenError> {
    for &mesh_index in &node.mesh_indices {
        if options.deduplicate && !emitted.insert(mesh_index) {
            debug!("mesh {} already emitted, skipping duplicate", mesh_index);
            continue;
        }
        let Some(source) = scene.meshes.get(mesh_index) else {
            warn!(
                "node references mesh {} but the scene has only {}, skipping",
                mesh_index,
                scene.mesh_count()
            );
            continue;
        };
        meshes.push(flatten_mesh(mesh_index, source, materials, options)?);
    }
    for child in &node.children {
        visit_node(child, scene, materials, options, meshes, emitted)?;
    }
    Ok(())
}

/// Flatten a single source mesh into a self-contained record.
///
/// Vertex order and triangle winding pass through untouched; normals are
/// never recomputed here. If the source carries no normals at all the
/// record is padded with zero normals to keep positions and normals the
/// same length, which the format requires.
fn flatten_mesh(
    mesh_index: usize,
    source: &SourceMesh,
    materials: &[Material],
    options: &FlattenOptions,
) -> Result<Mesh, FlattenError> {
    let positions = source.positions.clone();
    let normals = match &source.normals {
        Some(normals) => normals.clone(),
        None => {
            warn!(
                "mesh {} has no normals, padding with zero vectors",
                mesh_index
            );
            vec![Vector3::new(0.0, 0.0, 0.0); positions.len()]
        }
    };

    let vertex_count = positions.len();
    let mut indices = Vec::with_capacity(source.faces.len() * 3);
    for (face_index, face) in source.faces.iter().enumerate() {
        if face.indices.len() != 3 {
            match options.face_policy {
                FacePolicy::Strict => {
                    return Err(FlattenError::NonTriangleFace {
                        mesh: mesh_index,
                        face: face_index,
                        arity: face.indices.len(),
                    })
                }
                FacePolicy::Skip => {
                    warn!(
                        "mesh {}: face {} has {} indices, skipping",
                        mesh_index,
                        face_index,
                        face.indices.len()
                    );
                    continue;
                }
            }
        }
        if let Some(&bad) = face.indices.iter().find(|&&i| i as usize >= vertex_count) {
            match options.face_policy {
                FacePolicy::Strict => {
                    return Err(FlattenError::IndexOutOfRange {
                        mesh: mesh_index,
                        face: face_index,
                        index: bad,
                        vertex_count,
                    })
                }
                FacePolicy::Skip => {
                    warn!(
                        "mesh {}: face {} references vertex {} of {}, skipping",
                        mesh_index, face_index, bad, vertex_count
                    );
                    continue;
                }
            }
        }
        indices.extend_from_slice(&face.indices);
    }

    let material = match materials.get(source.material_index) {
        Some(material) => *material,
        None => {
            warn!(
                "mesh {} references material slot {} but only {} exist, using defaults",
                mesh_index,
                source.material_index,
                materials.len()
            );
            Material::default()
        }
    };

    Ok(Mesh {
        positions,
        normals,
        indices,
        material,
    })
}
