// src/lib.rs
//! # bmf
//!
//! Exporter and loader for the compact `.bmf` binary model format.
//!
//! The pipeline has two halves. On the producer side, an importer adapter
//! normalizes a source model (`.obj`, `.gltf`, `.glb`) into a scene graph,
//! the flattener turns that graph into an ordered list of self-contained
//! mesh records, and the encoder serializes the list with a hand-specified
//! little-endian layout. On the consumer side, the decoder parses a `.bmf`
//! file back into a [`Model`] whose meshes are ready for GPU upload through
//! the [`RenderAdapter`] seam.
//!
//! ```no_run
//! use bmf::{export, ExportOptions, Model};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Export a source model...
//! export(
//!     Path::new("ship.obj"),
//!     Path::new("ship.bmf"),
//!     &ExportOptions::default(),
//! )?;
//!
//! // ...and load it back.
//! let model = Model::load("ship.bmf")?;
//! assert!(!model.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod export;
pub mod flatten;
pub mod format;
pub mod import;
pub mod material;
pub mod model;
pub mod prelude;
pub mod scene;

// Re-export the main types for convenience
pub use export::{default_output_path, export, ExportOptions, ExportSummary};
pub use material::Material;
pub use model::{Mesh, Model, RenderAdapter};
