//! # Material Extraction
//!
//! Turns the scene's raw material table into the fixed [`Material`] records
//! the format persists. Extraction is independent of scene traversal: each
//! slot is processed once, in table order, and each property is fetched
//! independently of the others.
//!
//! ## Absent properties
//!
//! A property missing from the source data yields an all-zero color (or a
//! 0.0 scalar) and a warning; extraction then continues with the remaining
//! properties and slots. [`Strictness::Strict`] turns that absence into an
//! error instead.
//!
//! ## Specular scaling
//!
//! The persisted specular color is the raw specular multiplied componentwise
//! by the shininess-strength scalar. The strength defaults to 0.0 when
//! absent, so a source without an explicit strength always persists a black
//! specular, whatever its raw specular color was. This convention is baked
//! into the file format and must survive round trips exactly.

use cgmath::Vector3;
use log::warn;

use crate::error::ExtractError;
use crate::scene::SourceMaterial;

/// The material record embedded in every persisted mesh.
///
/// `specular` holds the *scaled* specular color, not the raw source value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse color.
    pub diffuse: Vector3<f32>,
    /// Specular color, pre-scaled by the shininess strength.
    pub specular: Vector3<f32>,
    /// Emissive color.
    pub emissive: Vector3<f32>,
    /// Specular exponent.
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Vector3::new(0.0, 0.0, 0.0),
            specular: Vector3::new(0.0, 0.0, 0.0),
            emissive: Vector3::new(0.0, 0.0, 0.0),
            shininess: 0.0,
        }
    }
}

/// How to react to a material property missing from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Substitute a zero default, log a warning, keep going.
    #[default]
    Lenient,
    /// Abort extraction with [`ExtractError::AttributeMissing`].
    Strict,
}

/// Configuration for [`extract_materials`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Policy for properties absent from the source data.
    pub strictness: Strictness,
}

/// Extract an indexed [`Material`] table from the scene's raw material
/// slots.
///
/// Output index `i` corresponds to source slot `i`; meshes carry these
/// indices and the flattener resolves them by position.
pub fn extract_materials(
    sources: &[SourceMaterial],
    options: &ExtractOptions,
) -> Result<Vec<Material>, ExtractError> {
    sources
        .iter()
        .enumerate()
        .map(|(slot, source)| extract_material(slot, source, options))
        .collect()
}

fn extract_material(
    slot: usize,
    source: &SourceMaterial,
    options: &ExtractOptions,
) -> Result<Material, ExtractError> {
    let diffuse = fetch_color(slot, source, "diffuse", source.diffuse, options)?;
    let raw_specular = fetch_color(slot, source, "specular", source.specular, options)?;
    let emissive = fetch_color(slot, source, "emissive", source.emissive, options)?;
    let shininess = fetch_scalar(slot, source, "shininess", source.shininess, options)?;
    let strength = fetch_scalar(
        slot,
        source,
        "shininess strength",
        source.shininess_strength,
        options,
    )?;

    Ok(Material {
        diffuse,
        specular: raw_specular * strength,
        emissive,
        shininess,
    })
}

fn fetch_color(
    slot: usize,
    source: &SourceMaterial,
    attribute: &'static str,
    value: Option<Vector3<f32>>,
    options: &ExtractOptions,
) -> Result<Vector3<f32>, ExtractError> {
    match value {
        Some(color) => Ok(color),
        None => {
            missing(slot, source, attribute, options)?;
            Ok(Vector3::new(0.0, 0.0, 0.0))
        }
    }
}

fn fetch_scalar(
    slot: usize,
    source: &SourceMaterial,
    attribute: &'static str,
    value: Option<f32>,
    options: &ExtractOptions,
) -> Result<f32, ExtractError> {
    match value {
        Some(scalar) => Ok(scalar),
        None => {
            missing(slot, source, attribute, options)?;
            Ok(0.0)
        }
    }
}

fn missing(
    slot: usize,
    source: &SourceMaterial,
    attribute: &'static str,
    options: &ExtractOptions,
) -> Result<(), ExtractError> {
    match options.strictness {
        Strictness::Lenient => {
            warn!(
                "material {} ({}): no {} in source, defaulting to zero",
                slot, source.name, attribute
            );
            Ok(())
        }
        Strictness::Strict => Err(ExtractError::AttributeMissing {
            slot,
            name: source.name.clone(),
            attribute,
        }),
    }
}
