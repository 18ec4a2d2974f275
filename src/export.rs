//! # Export Pipeline
//!
//! One-shot orchestration of the whole producer side: import a source
//! model, extract its materials, flatten the scene graph, and serialize
//! the result to a .bmf file. Each run is synchronous, self-contained, and
//! shares no state with any other run.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::ExportError;
use crate::flatten::{flatten, FlattenOptions};
use crate::format;
use crate::import;
use crate::material::{extract_materials, ExtractOptions};

/// Configuration for one export run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Flattener configuration (face policy, deduplication).
    pub flatten: FlattenOptions,
    /// Material extraction configuration (lenient or strict).
    pub materials: ExtractOptions,
}

/// What an export run produced, for reporting.
#[derive(Debug, Clone, Copy)]
pub struct ExportSummary {
    /// Number of mesh records written.
    pub mesh_count: usize,
    /// Total vertices across all records.
    pub vertex_count: usize,
    /// Total indices across all records.
    pub index_count: usize,
    /// Size of the output file in bytes.
    pub bytes_written: u64,
}

/// Run the full import → extract → flatten → encode pipeline.
pub fn export(
    input: &Path,
    output: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    info!("importing {}", input.display());
    let scene = import::import(input)?;

    let materials = extract_materials(&scene.materials, &options.materials)?;
    let meshes = flatten(&scene, &materials, &options.flatten)?;

    info!("writing {}", output.display());
    let bytes_written = format::write_file(&meshes, output)?;

    let summary = ExportSummary {
        mesh_count: meshes.len(),
        vertex_count: meshes.iter().map(|m| m.vertex_count()).sum(),
        index_count: meshes.iter().map(|m| m.index_count()).sum(),
        bytes_written,
    };
    info!(
        "exported {} meshes, {} vertices, {} indices ({} bytes)",
        summary.mesh_count, summary.vertex_count, summary.index_count, summary.bytes_written
    );
    Ok(summary)
}

/// Default output path for a source model: `<stem>.bmf` in the current
/// working directory, whatever directory the input came from.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_else(|| OsStr::new("model"));
    PathBuf::from(stem).with_extension("bmf")
}
