//! # Imported Scene Representation
//!
//! This module defines the transient, import-side view of a model: a scene
//! graph of nodes plus flat mesh and material tables. Importer adapters
//! (see [`crate::import`]) produce this structure, the flattener consumes
//! it, and nothing here outlives a single export run.
//!
//! ## Structure
//!
//! - [`SceneGraph`]: the root node together with the mesh and material tables
//! - [`SceneNode`]: an owned tree node with mesh-index references
//! - [`SourceMesh`]: raw per-vertex data and polygonal faces for one mesh
//! - [`SourceMaterial`]: raw material properties, each optional
//!
//! Nodes reference meshes by index into [`SceneGraph::meshes`], and meshes
//! reference materials by index into [`SceneGraph::materials`]. Several
//! nodes may reference the same mesh; whether those repeats are emitted or
//! collapsed is the flattener's decision, not the scene's.

use cgmath::Vector3;

/// A node in the imported scene hierarchy.
///
/// Owns its children outright; the graph is a tree, so plain ownership is
/// enough and no arena or reference counting is needed.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// Indices into the scene's mesh table for the meshes attached here.
    pub mesh_indices: Vec<usize>,
    /// Child nodes, in source order.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create a leaf node referencing the given meshes.
    pub fn with_meshes(mesh_indices: Vec<usize>) -> Self {
        Self {
            mesh_indices,
            children: Vec::new(),
        }
    }
}

/// A polygonal face as imported.
///
/// Upstream triangulation should leave every face with exactly three
/// indices, but the source format may not guarantee it, so the arity is
/// kept checkable rather than baked into the type.
#[derive(Debug, Clone)]
pub struct Face {
    /// Vertex indices in declared winding order.
    pub indices: Vec<u32>,
}

impl Face {
    /// Create a triangular face.
    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self {
            indices: vec![a, b, c],
        }
    }
}

/// Raw geometry for a single imported mesh.
#[derive(Debug, Clone, Default)]
pub struct SourceMesh {
    /// Per-vertex positions, in source order.
    pub positions: Vec<Vector3<f32>>,
    /// Per-vertex normals, if the source carried (or the adapter generated)
    /// them. When present, the same length as `positions`.
    pub normals: Option<Vec<Vector3<f32>>>,
    /// Polygonal faces referencing `positions` by index.
    pub faces: Vec<Face>,
    /// Index of this mesh's material slot in the scene's material table.
    pub material_index: usize,
}

impl SourceMesh {
    /// Number of vertices in this mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Raw material properties for one slot of the scene's material table.
///
/// Every property is optional: source formats routinely omit some of them,
/// and the extractor decides how absence is handled.
#[derive(Debug, Clone, Default)]
pub struct SourceMaterial {
    /// Material name, for diagnostics only.
    pub name: String,
    /// Diffuse color.
    pub diffuse: Option<Vector3<f32>>,
    /// Specular color, unscaled.
    pub specular: Option<Vector3<f32>>,
    /// Emissive color.
    pub emissive: Option<Vector3<f32>>,
    /// Specular exponent.
    pub shininess: Option<f32>,
    /// Scale factor applied to the specular color before it is persisted.
    pub shininess_strength: Option<f32>,
}

/// A fully imported scene: hierarchy plus flat mesh and material tables.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    /// Root of the node hierarchy.
    pub root: SceneNode,
    /// All meshes in the scene, referenced by node mesh indices.
    pub meshes: Vec<SourceMesh>,
    /// All material slots in the scene, referenced by mesh material indices.
    pub materials: Vec<SourceMaterial>,
}

impl SceneGraph {
    /// Number of meshes in the scene's mesh table.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}
