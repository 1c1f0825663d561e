//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! and the [`backend`](super::backend) that does the pixel work, so a mock
//! backend can stand in during tests.
//!
//! ## Types
//!
//! - [`BoundingBox`]: Maximum thumbnail width and height. Zero sides are raised to 1.
//! - [`PanoramaRule`]: Aspect-ratio heuristic for equirectangular detection.
//! - [`ThumbnailParams`]: Source, output and final size of one thumbnail.

use std::path::PathBuf;

/// Box a thumbnail must fit inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            width: 120,
            height: 80,
        }
    }
}

/// Heuristic for flagging 360° equirectangular images.
///
/// An image matches when `|width / height - aspect_ratio| < tolerance` and
/// `width > min_width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanoramaRule {
    pub aspect_ratio: f64,
    pub tolerance: f64,
    pub min_width: u32,
}

impl Default for PanoramaRule {
    fn default() -> Self {
        Self {
            aspect_ratio: 2.0,
            tolerance: 0.1,
            min_width: 1000,
        }
    }
}

/// Parameters for a thumbnail operation (decode + resize to exact size).
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Final output dimensions, already fitted to the bounding box.
    pub width: u32,
    pub height: u32,
}
