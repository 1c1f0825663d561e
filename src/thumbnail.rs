//! Thumbnail generation for gallery images.
//!
//! A thumbnail is a scaled-down copy written next to its source as
//! `<prefix><filename>`, so the viewer can load `images/<gallery>/thumb_x.jpg`
//! without any lookup. Thumbnails are regenerated on every run.

use crate::imaging::{BoundingBox, Dimensions, ImageBackend, create_thumbnail};
use crate::naming;
use std::path::{Path, PathBuf};

/// Where the thumbnail for `source` goes: same directory, prefixed name.
///
/// Returns `None` if `source` has no file name.
pub fn thumbnail_path(source: &Path, prefix: &str) -> Option<PathBuf> {
    let name = source.file_name()?.to_str()?;
    Some(source.with_file_name(naming::thumbnail_name(name, prefix)))
}

/// Write a thumbnail of `source` to `dest`, fitted inside `bounds`.
///
/// Failures are logged and reported as `None`; the caller moves on to the
/// next image either way.
pub fn generate_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    dest: &Path,
    bounds: BoundingBox,
) -> Option<Dimensions> {
    match create_thumbnail(backend, source, dest, bounds) {
        Ok(dims) => {
            tracing::debug!(
                thumbnail = %dest.display(),
                width = dims.width,
                height = dims.height,
                "created thumbnail"
            );
            Some(dims)
        }
        Err(e) => {
            tracing::warn!(source = %source.display(), error = %e, "thumbnail failed");
            None
        }
    }
}
