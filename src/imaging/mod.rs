//! Image processing: pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` (format sniffed from content) |
//! | **Capture time** | `kamadak-exif` (`DateTimeOriginal`) |
//! | **Thumbnail** | fit-within-box + `resize_exact` (Lanczos3) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math and the panorama rule (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub(crate) mod exif;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{calculate_fit_dimensions, is_equirectangular_ratio};
pub use operations::{create_thumbnail, detect_equirectangular, get_dimensions};
pub use params::{BoundingBox, PanoramaRule, ThumbnailParams};
pub use rust_backend::RustBackend;
