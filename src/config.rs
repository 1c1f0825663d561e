//! Gallery configuration module.
//!
//! Handles loading, validating, and merging a `config.toml` file. Stock
//! defaults are the base layer; a user file only needs the keys it wants to
//! change. The resolved [`GalleryConfig`] is passed explicitly into every
//! stage, so tests can point the pipeline at temporary directories.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! raw_root = "raw"           # Ingestion input: one subdirectory per session
//! images_root = "images"     # Gallery tree written by ingest, read by index
//!
//! [thumbnails]
//! width = 120                # Bounding box; aspect ratio is preserved
//! height = 80
//! prefix = "thumb_"          # thumb_photo.jpg sits next to photo.jpg
//!
//! [panorama]
//! aspect_ratio = 2.0         # Equirectangular width:height
//! tolerance = 0.1            # |w/h - aspect_ratio| must be below this
//! min_width = 1000           # and width must exceed this
//!
//! [manifest]
//! filename = "index.json"    # Per-gallery and root manifest name
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{BoundingBox, PanoramaRule};
use crate::naming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Pipeline configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Root of the raw import tree (`raw/<session>/<images>`).
    pub raw_root: PathBuf,
    /// Root of the gallery tree (`images/<gallery>/<images>`).
    pub images_root: PathBuf,
    /// Thumbnail bounding box and naming.
    pub thumbnails: ThumbnailsConfig,
    /// Equirectangular detection heuristic.
    pub panorama: PanoramaConfig,
    /// Manifest file naming.
    pub manifest: ManifestConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            raw_root: PathBuf::from("raw"),
            images_root: PathBuf::from("images"),
            thumbnails: ThumbnailsConfig::default(),
            panorama: PanoramaConfig::default(),
            manifest: ManifestConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Config rooted at the given directories, all other values stock.
    pub fn with_roots(raw_root: impl Into<PathBuf>, images_root: impl Into<PathBuf>) -> Self {
        Self {
            raw_root: raw_root.into(),
            images_root: images_root.into(),
            ..Self::default()
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.width == 0 || self.thumbnails.height == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.width and thumbnails.height must be non-zero".into(),
            ));
        }
        if self.thumbnails.prefix.is_empty() {
            return Err(ConfigError::Validation(
                "thumbnails.prefix must not be empty".into(),
            ));
        }
        if has_separator(&self.thumbnails.prefix) {
            return Err(ConfigError::Validation(
                "thumbnails.prefix must not contain path separators".into(),
            ));
        }
        if !is_positive(self.panorama.aspect_ratio) {
            return Err(ConfigError::Validation(
                "panorama.aspect_ratio must be positive".into(),
            ));
        }
        if !is_positive(self.panorama.tolerance) {
            return Err(ConfigError::Validation(
                "panorama.tolerance must be positive".into(),
            ));
        }
        let manifest = &self.manifest.filename;
        if manifest.is_empty() || has_separator(manifest) {
            return Err(ConfigError::Validation(
                "manifest.filename must be a plain file name".into(),
            ));
        }
        if naming::has_image_extension(manifest) {
            return Err(ConfigError::Validation(
                "manifest.filename must not use an image extension".into(),
            ));
        }
        Ok(())
    }

    /// Thumbnail bounding box as an imaging parameter.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.thumbnails.width, self.thumbnails.height)
    }

    /// Panorama heuristic as an imaging parameter.
    pub fn panorama_rule(&self) -> PanoramaRule {
        PanoramaRule {
            aspect_ratio: self.panorama.aspect_ratio,
            tolerance: self.panorama.tolerance,
            min_width: self.panorama.min_width,
        }
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn has_separator(s: &str) -> bool {
    s.contains('/') || s.contains('\\')
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Maximum thumbnail width in pixels.
    pub width: u32,
    /// Maximum thumbnail height in pixels.
    pub height: u32,
    /// Filename prefix marking derived thumbnails.
    pub prefix: String,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 80,
            prefix: "thumb_".to_string(),
        }
    }
}

/// Equirectangular detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanoramaConfig {
    pub aspect_ratio: f64,
    pub tolerance: f64,
    pub min_width: u32,
}

impl Default for PanoramaConfig {
    fn default() -> Self {
        let rule = PanoramaRule::default();
        Self {
            aspect_ratio: rule.aspect_ratio,
            tolerance: rule.tolerance,
            min_width: rule.min_width,
        }
    }
}

/// Manifest naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// File name used for both gallery and root manifests.
    pub filename: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            filename: "index.json".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given TOML file, falling back to stock defaults
/// when it doesn't exist.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# pano-gallery configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Raw import tree: one subdirectory per capture session.
#   raw/<session>/<image files>
raw_root = "raw"

# Gallery tree written by `ingest` and read by `index`.
#   images/<gallery>/<image files>
images_root = "images"

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Bounding box in pixels. Images are scaled down to fit, never up.
width = 120
height = 80

# Thumbnails are written next to the original as <prefix><filename>.
# Files starting with this prefix are never treated as source images.
prefix = "thumb_"

# ---------------------------------------------------------------------------
# Panorama (360° equirectangular) detection
# ---------------------------------------------------------------------------
[panorama]
# An image is flagged when |width/height - aspect_ratio| < tolerance
# and width > min_width.
aspect_ratio = 2.0
tolerance = 0.1
min_width = 1000

# ---------------------------------------------------------------------------
# Manifests
# ---------------------------------------------------------------------------
[manifest]
# Name of the JSON index written into each gallery and into the images root.
filename = "index.json"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = GalleryConfig::default();
        assert_eq!(config.raw_root, PathBuf::from("raw"));
        assert_eq!(config.images_root, PathBuf::from("images"));
        assert_eq!(config.thumbnails.width, 120);
        assert_eq!(config.thumbnails.height, 80);
        assert_eq!(config.thumbnails.prefix, "thumb_");
        assert_eq!(config.manifest.filename, "index.json");
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(GalleryConfig::default().validate().is_ok());
    }

    #[test]
    fn with_roots_overrides_only_roots() {
        let config = GalleryConfig::with_roots("/in", "/out");
        assert_eq!(config.raw_root, PathBuf::from("/in"));
        assert_eq!(config.images_root, PathBuf::from("/out"));
        assert_eq!(config.thumbnails.prefix, "thumb_");
    }

    #[test]
    fn imaging_params_follow_config() {
        let mut config = GalleryConfig::default();
        config.thumbnails.width = 200;
        config.panorama.min_width = 2000;

        assert_eq!(config.bounding_box(), BoundingBox::new(200, 80));
        assert_eq!(config.panorama_rule().min_width, 2000);
        assert_eq!(config.panorama_rule().aspect_ratio, 2.0);
    }

    #[test]
    fn parse_partial_config() {
        let overlay: toml::Value = toml::from_str(
            r#"
images_root = "gallery"

[thumbnails]
width = 240
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();

        assert_eq!(config.images_root, PathBuf::from("gallery"));
        assert_eq!(config.thumbnails.width, 240);
        assert_eq!(config.thumbnails.height, 80);
        assert_eq!(config.raw_root, PathBuf::from("raw"));
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.thumbnails.prefix, "thumb_");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[panorama]
tolerance = 0.05

[manifest]
filename = "gallery.json"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.panorama.tolerance, 0.05);
        assert_eq!(config.manifest.filename, "gallery.json");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not [valid toml").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let overlay: toml::Value = toml::from_str("unknown_key = 1").unwrap();
        assert!(resolve_config(stock_defaults_value(), Some(overlay)).is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let overlay: toml::Value = toml::from_str("[thumbnails]\nquality = 90").unwrap();
        assert!(resolve_config(stock_defaults_value(), Some(overlay)).is_err());
    }

    #[test]
    fn validate_zero_thumbnail_box() {
        let mut config = GalleryConfig::default();
        config.thumbnails.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_prefix_rules() {
        let mut config = GalleryConfig::default();
        config.thumbnails.prefix = String::new();
        assert!(config.validate().is_err());

        config.thumbnails.prefix = "thumbs/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_panorama_values() {
        let mut config = GalleryConfig::default();
        config.panorama.tolerance = 0.0;
        assert!(config.validate().is_err());

        let mut config = GalleryConfig::default();
        config.panorama.aspect_ratio = -2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_manifest_filename() {
        let mut config = GalleryConfig::default();
        config.manifest.filename = "index.jpg".to_string();
        assert!(config.validate().is_err());

        config.manifest.filename = "../index.json".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[t]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[t]\ny = 5\nz = 6").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(5));
        assert_eq!(merged["t"]["z"].as_integer(), Some(6));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(stock_defaults_value(), Some(value)).unwrap();
        let defaults = GalleryConfig::default();
        assert_eq!(config.raw_root, defaults.raw_root);
        assert_eq!(config.images_root, defaults.images_root);
        assert_eq!(config.thumbnails.width, defaults.thumbnails.width);
        assert_eq!(config.thumbnails.prefix, defaults.thumbnails.prefix);
        assert_eq!(config.panorama.min_width, defaults.panorama.min_width);
        assert_eq!(config.manifest.filename, defaults.manifest.filename);
    }
}
