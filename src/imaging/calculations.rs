//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{BoundingBox, PanoramaRule};

/// Calculate the size of an image scaled down to fit inside a bounding box.
///
/// The aspect ratio is preserved and images are never upscaled: a source that
/// already fits keeps its own size. Each side is rounded and kept within
/// `1..=box side`.
///
/// # Examples
/// ```
/// # use pano_gallery::imaging::calculate_fit_dimensions;
/// # use pano_gallery::imaging::BoundingBox;
/// let b = BoundingBox::new(120, 80);
/// // 4000x3000 is height-bound: 80 / 3000 → 107x80
/// assert_eq!(calculate_fit_dimensions((4000, 3000), b), (107, 80));
/// // 4000x2000 is width-bound: 120 / 4000 → 120x60
/// assert_eq!(calculate_fit_dimensions((4000, 2000), b), (120, 60));
/// // Small images are left alone
/// assert_eq!(calculate_fit_dimensions((64, 48), b), (64, 48));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), bounds: BoundingBox) -> (u32, u32) {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return (src_w.max(1).min(bounds.width), src_h.max(1).min(bounds.height));
    }
    if src_w <= bounds.width && src_h <= bounds.height {
        return (src_w, src_h);
    }

    let scale_w = bounds.width as f64 / src_w as f64;
    let scale_h = bounds.height as f64 / src_h as f64;
    let scale = scale_w.min(scale_h);

    let w = ((src_w as f64 * scale).round() as u32).clamp(1, bounds.width);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, bounds.height);
    (w, h)
}

/// Apply the panorama heuristic to a pair of pixel dimensions.
///
/// A zero height is never a panorama.
pub fn is_equirectangular_ratio(width: u32, height: u32, rule: &PanoramaRule) -> bool {
    if height == 0 {
        return false;
    }
    let ratio = width as f64 / height as f64;
    (ratio - rule.aspect_ratio).abs() < rule.tolerance && width > rule.min_width
}
