//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, read_capture_time, and thumbnail.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): the `image` crate for
//! pixels and `kamadak-exif` for metadata, all statically linked.

use super::params::ThumbnailParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Metadata unreadable: {0}")]
    Metadata(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// The rest of the crate talks to images only through this trait, so stage
/// logic can be exercised with a mock.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Read the raw EXIF `DateTimeOriginal` string, if the file carries one.
    ///
    /// `Ok(None)` means the file was readable but has no such tag.
    fn read_capture_time(&self, path: &Path) -> Result<Option<String>, BackendError>;

    /// Decode the source, resize to the exact size in `params`, write the output.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;
}
