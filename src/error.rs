//! # Error Types
//!
//! Error taxonomy for the export and load pipelines. Each pipeline stage has
//! its own error enum; [`ExportError`] gathers them for the one-shot export
//! entry point.
//!
//! Missing material attributes are deliberately *not* represented here by
//! default: under the lenient policy they are absorbed locally (zero default
//! plus a `log::warn!`) and only surface as [`ExtractError`] when strict
//! extraction is requested.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a source model file into a scene graph.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The source file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path has no extension we know how to import.
    #[error("{} has no supported model extension (expected .obj, .gltf or .glb)", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The backing importer rejected the file.
    #[error("failed to import {}: {message}", path.display())]
    Backend { path: PathBuf, message: String },
}

/// Failure during strict material extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A material property was absent from the source data.
    #[error("material {slot} ({name}) is missing its {attribute} attribute")]
    AttributeMissing {
        slot: usize,
        name: String,
        attribute: &'static str,
    },
}

/// Failure while flattening the scene graph into mesh records.
#[derive(Debug, Error)]
pub enum FlattenError {
    /// A face did not have exactly three indices.
    #[error("mesh {mesh}: face {face} has {arity} indices, expected 3")]
    NonTriangleFace {
        mesh: usize,
        face: usize,
        arity: usize,
    },

    /// A face referenced a vertex outside the mesh's vertex range.
    #[error("mesh {mesh}: face {face} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        mesh: usize,
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// Failure while serializing a mesh list to a .bmf file.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The output file could not be created.
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A mesh's normals did not pair one-to-one with its positions.
    #[error("mesh {mesh}: {normals} normals for {positions} positions, expected a one-to-one pairing")]
    NormalCountMismatch {
        mesh: usize,
        positions: usize,
        normals: usize,
    },

    /// Writing the encoded bytes failed.
    #[error("failed to write model data: {0}")]
    Io(#[from] io::Error),
}

/// Failure while parsing a .bmf byte stream.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stream ended before a field could be read in full.
    #[error("truncated file while reading {context}: need {needed} more bytes, {available} available")]
    Truncated {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    /// A declared count implies more payload than the stream holds.
    #[error("declared {context} ({value}) exceeds the {available} bytes remaining in the file")]
    CountOutOfBounds {
        context: &'static str,
        value: u64,
        available: usize,
    },
}

/// Any failure of the import → flatten → encode pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Flatten(#[from] FlattenError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
