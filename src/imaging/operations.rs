//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{calculate_fit_dimensions, is_equirectangular_ratio};
use super::params::{BoundingBox, PanoramaRule, ThumbnailParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Identify an image and apply the panorama heuristic to its dimensions.
pub fn detect_equirectangular(
    backend: &impl ImageBackend,
    path: &Path,
    rule: &PanoramaRule,
) -> Result<bool> {
    let (width, height) = get_dimensions(backend, path)?;
    Ok(is_equirectangular_ratio(width, height, rule))
}

/// Plan a thumbnail operation without executing it.
///
/// Useful for testing parameter generation.
pub fn plan_thumbnail(
    source: &Path,
    output_path: &Path,
    source_dims: (u32, u32),
    bounds: BoundingBox,
) -> ThumbnailParams {
    let (width, height) = calculate_fit_dimensions(source_dims, bounds);

    ThumbnailParams {
        source: source.to_path_buf(),
        output: output_path.to_path_buf(),
        width,
        height,
    }
}

/// Create a thumbnail that fits inside `bounds`.
///
/// Reads the source dimensions, fits them into the box without upscaling, and
/// writes the result to `output_path`, replacing any previous file. Returns the
/// thumbnail's dimensions.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output_path: &Path,
    bounds: BoundingBox,
) -> Result<Dimensions> {
    let source_dims = get_dimensions(backend, source)?;
    let params = plan_thumbnail(source, output_path, source_dims, bounds);
    backend.thumbnail(&params)?;

    Ok(Dimensions {
        width: params.width,
        height: params.height,
    })
}
