//! # Importer Adapters
//!
//! Adapters that normalize external model files into the crate's
//! [`SceneGraph`](crate::scene::SceneGraph) representation. Each adapter
//! owns the quirks of one source format; everything downstream of this
//! module sees the same node hierarchy plus flat mesh and material tables,
//! whatever the file looked like.
//!
//! [`import`] dispatches on the file extension:
//!
//! | Extension        | Adapter          | Backed by |
//! |------------------|------------------|-----------|
//! | `.obj`           | [`obj`]          | `tobj`    |
//! | `.gltf`, `.glb`  | [`gltf`]         | `gltf`    |
//!
//! Adapters pre-apply the normalization the pipeline expects: faces are
//! triangulated and vertex normals are generated when the source has none,
//! so the flattener usually has nothing left to fix.

pub mod gltf;
pub mod obj;

use std::path::Path;

use crate::error::ImportError;
use crate::scene::SceneGraph;

/// Import a model file, choosing the adapter from its extension.
pub fn import(path: &Path) -> Result<SceneGraph, ImportError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("obj") => obj::import(path),
        Some("gltf") | Some("glb") => gltf::import(path),
        _ => Err(ImportError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
