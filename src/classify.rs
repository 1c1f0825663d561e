//! Panorama (360° equirectangular) classification.
//!
//! Equirectangular projections cover 360° horizontally and 180° vertically,
//! so they come out at a 2:1 width:height ratio. Detection is purely a
//! dimension test; embedded projection metadata is not consulted.

use crate::imaging::{ImageBackend, PanoramaRule, detect_equirectangular};
use std::path::Path;

/// Whether the image at `path` looks like an equirectangular panorama.
///
/// Unreadable or undecodable images are logged and classified `false`.
pub fn is_equirectangular(backend: &impl ImageBackend, path: &Path, rule: &PanoramaRule) -> bool {
    match detect_equirectangular(backend, path, rule) {
        Ok(is_360) => is_360,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read image size");
            false
        }
    }
}
