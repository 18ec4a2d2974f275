//! # Renderable Model
//!
//! The load-side view of a .bmf file: an ordered list of self-contained
//! [`Mesh`] records. A [`Model`] exclusively owns its meshes for its whole
//! lifetime; handing the data to a GPU backend goes through the
//! [`RenderAdapter`] trait so this crate never touches a graphics API
//! itself.

use std::path::Path;

use cgmath::Vector3;
use log::debug;

use crate::error::DecodeError;
use crate::format;
use crate::material::Material;

/// One flattened, self-contained mesh record.
///
/// Positions and normals are parallel sequences of equal length, indices
/// come in triangles (length a multiple of 3, each value below the vertex
/// count), and the material is embedded by value rather than referenced.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions, in source order.
    pub positions: Vec<Vector3<f32>>,
    /// Vertex normals, one per position.
    pub normals: Vec<Vector3<f32>>,
    /// Triangle indices in declared winding order.
    pub indices: Vec<u32>,
    /// This mesh's material, copied out of the scene's material table.
    pub material: Material,
}

impl Mesh {
    /// Number of vertices in this mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of indices in this mesh.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles in this mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Draw contract a rendering backend implements to consume decoded meshes.
///
/// For each mesh the adapter is expected to upload the vertex and index
/// data, bind the material fields as uniforms, and issue one indexed draw.
pub trait RenderAdapter {
    /// Draw a single mesh.
    fn draw_mesh(&mut self, mesh: &Mesh);
}

/// An ordered list of meshes decoded from a .bmf file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    meshes: Vec<Mesh>,
}

impl Model {
    /// Build a model directly from a mesh list, taking ownership of it.
    pub fn from_meshes(meshes: Vec<Mesh>) -> Self {
        Self { meshes }
    }

    /// Load a model from a .bmf file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let model = format::decode::read_file(path.as_ref())?;
        debug!(
            "loaded {} with {} meshes",
            path.as_ref().display(),
            model.meshes.len()
        );
        Ok(model)
    }

    /// The meshes of this model, in file order.
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Number of meshes in this model.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether this model contains no meshes.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Consume the model and hand its mesh list to the caller.
    pub fn into_meshes(self) -> Vec<Mesh> {
        self.meshes
    }

    /// Render every mesh in file order through the given adapter.
    pub fn render(&self, adapter: &mut impl RenderAdapter) {
        for mesh in &self.meshes {
            adapter.draw_mesh(mesh);
        }
    }
}
