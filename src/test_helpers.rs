//! Shared test utilities for the pano-gallery test suite.
//!
//! Provides synthetic image writers (with and without an embedded EXIF
//! capture time) and a temp-dir workspace with `raw/` and `images/` roots.
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let (tmp, config) = setup_workspace();
//! let session = create_dir(&config.raw_root, "sessionA");
//! create_test_jpeg_with_capture_time(&session.join("photo1.jpg"), 64, 48, "2023:05:10 14:22:00");
//!
//! let report = ingest_with_backend(&RustBackend::new(), &config).unwrap();
//! assert_eq!(read_manifest(&config.images_root.join("index.json"))["subdirectories"][0], "2023-05-10");
//! ```

use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::GalleryConfig;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

// =========================================================================
// Workspace setup
// =========================================================================

/// Temp directory with an existing `raw/` root and a config pointing at
/// `raw/` and `images/`. The images root is not created.
pub fn setup_workspace() -> (TempDir, GalleryConfig) {
    let tmp = TempDir::new().unwrap();
    let raw = tmp.path().join("raw");
    std::fs::create_dir_all(&raw).unwrap();
    let config = GalleryConfig::with_roots(raw, tmp.path().join("images"));
    (tmp, config)
}

/// Create `parent/name` and return its path.
pub fn create_dir(parent: &Path, name: &str) -> PathBuf {
    let dir = parent.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Parse a manifest file into a JSON value. Panics if missing or malformed.
pub fn read_manifest(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("manifest {} unreadable: {e}", path.display()));
    serde_json::from_str(&text).unwrap()
}

// =========================================================================
// Synthetic images
// =========================================================================

fn gradient_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

/// Encode a gradient as a baseline JPEG, no metadata.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    gradient_rgb(width, height)
        .write_to(&mut buf, ImageFormat::Jpeg)
        .unwrap();
    buf.into_inner()
}

/// Write a gradient JPEG with no EXIF block.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, jpeg_bytes(width, height)).unwrap();
}

/// Write a gradient JPEG whose EXIF carries `DateTimeOriginal = raw`.
pub fn create_test_jpeg_with_capture_time(path: &Path, width: u32, height: u32, raw: &str) {
    let jpeg = jpeg_bytes(width, height);
    std::fs::write(path, splice_exif(&jpeg, &exif_app1_segment(raw))).unwrap();
}

/// Write a semi-transparent RGBA PNG.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 200])
    });
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

// =========================================================================
// EXIF construction
// =========================================================================

/// Insert an APP segment directly after the JPEG SOI marker.
pub fn splice_exif(jpeg: &[u8], segment: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG");
    let mut out = Vec::with_capacity(jpeg.len() + segment.len());
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(segment);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// APP1 segment holding a minimal big-endian TIFF block:
/// IFD0 with an Exif IFD pointer, Exif IFD with a single DateTimeOriginal.
pub fn exif_app1_segment(raw: &str) -> Vec<u8> {
    let tiff = tiff_with_date_time_original(raw);
    let len = u16::try_from(2 + 6 + tiff.len()).unwrap();

    let mut seg = vec![0xFF, 0xE1];
    seg.extend_from_slice(&len.to_be_bytes());
    seg.extend_from_slice(b"Exif\0\0");
    seg.extend_from_slice(&tiff);
    seg
}

fn ifd_entry(tag: u16, kind: u16, count: u32, value: [u8; 4]) -> Vec<u8> {
    let mut e = Vec::with_capacity(12);
    e.extend_from_slice(&tag.to_be_bytes());
    e.extend_from_slice(&kind.to_be_bytes());
    e.extend_from_slice(&count.to_be_bytes());
    e.extend_from_slice(&value);
    e
}

fn tiff_with_date_time_original(raw: &str) -> Vec<u8> {
    const TYPE_ASCII: u16 = 2;
    const TYPE_LONG: u16 = 4;
    const TAG_EXIF_IFD: u16 = 0x8769;
    const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;

    // header (8) + IFD0 (2 + 12 + 4) = 26; Exif IFD (2 + 12 + 4) ends at 44
    const EXIF_IFD_OFFSET: u32 = 26;
    const DATA_OFFSET: u32 = 44;

    let mut ascii = raw.as_bytes().to_vec();
    ascii.push(0);
    let count = ascii.len() as u32;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\0\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());

    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend(ifd_entry(
        TAG_EXIF_IFD,
        TYPE_LONG,
        1,
        EXIF_IFD_OFFSET.to_be_bytes(),
    ));
    tiff.extend_from_slice(&0u32.to_be_bytes());

    tiff.extend_from_slice(&1u16.to_be_bytes());
    if ascii.len() <= 4 {
        let mut inline = [0u8; 4];
        inline[..ascii.len()].copy_from_slice(&ascii);
        tiff.extend(ifd_entry(TAG_DATE_TIME_ORIGINAL, TYPE_ASCII, count, inline));
        tiff.extend_from_slice(&0u32.to_be_bytes());
    } else {
        tiff.extend(ifd_entry(
            TAG_DATE_TIME_ORIGINAL,
            TYPE_ASCII,
            count,
            DATA_OFFSET.to_be_bytes(),
        ));
        tiff.extend_from_slice(&0u32.to_be_bytes());
        tiff.extend_from_slice(&ascii);
    }
    tiff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_jpeg_decodes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("x.jpg");
        create_test_jpeg_with_capture_time(&path, 16, 8, "2023:05:10 14:22:00");
        assert_eq!(image::image_dimensions(&path).unwrap(), (16, 8));
    }

    #[test]
    fn exif_segment_layout() {
        let seg = exif_app1_segment("2023:05:10 14:22:00");
        // marker + length + "Exif\0\0" + 44 bytes of IFDs + 20 bytes of ASCII
        assert_eq!(seg.len(), 2 + 2 + 6 + 44 + 20);
        assert_eq!(&seg[4..10], b"Exif\0\0");
        assert_eq!(u16::from_be_bytes([seg[2], seg[3]]) as usize, seg.len() - 2);
    }
}
