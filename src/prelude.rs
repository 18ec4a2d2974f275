//! # bmf Prelude
//!
//! Convenience re-exports for typical pipeline usage:
//!
//! ```rust
//! use bmf::prelude::*;
//! ```

pub use crate::error::{
    DecodeError, EncodeError, ExportError, ExtractError, FlattenError, ImportError,
};
pub use crate::export::{default_output_path, export, ExportOptions, ExportSummary};
pub use crate::flatten::{flatten, FacePolicy, FlattenOptions};
pub use crate::import::import;
pub use crate::material::{extract_materials, ExtractOptions, Material, Strictness};
pub use crate::model::{Mesh, Model, RenderAdapter};
pub use crate::scene::{Face, SceneGraph, SceneNode, SourceMaterial, SourceMesh};
