//! CLI exporter: convert a source model file to .bmf.
//!
//! Argument validation happens entirely up front (clap exits non-zero on a
//! missing or extra positional before any file is touched), and any
//! pipeline failure propagates out of `main` as a non-zero exit with a
//! human-readable diagnostic.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use bmf::flatten::{FacePolicy, FlattenOptions};
use bmf::material::{ExtractOptions, Strictness};
use bmf::{default_output_path, export, ExportOptions};

/// Export a 3D model file to the .bmf binary model format.
#[derive(Parser)]
#[command(name = "bmf-export", version, about)]
struct Args {
    /// Source model file (.obj, .gltf or .glb)
    input: PathBuf,

    /// Output path; defaults to <input stem>.bmf in the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip faces that are not triangles instead of aborting
    #[arg(long)]
    skip_bad_faces: bool,

    /// Emit each source mesh only once, even if several nodes reference it
    #[arg(long)]
    dedup: bool,

    /// Treat missing material attributes as errors instead of defaulting
    /// them to zero
    #[arg(long)]
    strict_materials: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    let options = ExportOptions {
        flatten: FlattenOptions {
            face_policy: if args.skip_bad_faces {
                FacePolicy::Skip
            } else {
                FacePolicy::Strict
            },
            deduplicate: args.dedup,
        },
        materials: ExtractOptions {
            strictness: if args.strict_materials {
                Strictness::Strict
            } else {
                Strictness::Lenient
            },
        },
    };

    let summary = export(&args.input, &output, &options)
        .with_context(|| format!("failed to export {}", args.input.display()))?;

    println!(
        "wrote {} ({} meshes, {} vertices, {} indices, {} bytes)",
        output.display(),
        summary.mesh_count,
        summary.vertex_count,
        summary.index_count,
        summary.bytes_written
    );
    Ok(())
}
