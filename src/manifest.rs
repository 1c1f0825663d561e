//! JSON manifests read by the gallery viewer.
//!
//! Four shapes exist, two per stage:
//!
//! ```text
//! ingest  gallery  {"images": ["photo1.jpg", ...]}
//! ingest  root     {"subdirectories": ["2023-05-10", ...]}
//! index   gallery  {"images": [{"filename": "photo1.jpg", "is_360": false}, ...]}
//! index   root     {"galleries": ["2023-05-10", ...]}
//! ```
//!
//! Manifests are pretty-printed with a trailing newline and always replace
//! the previous file, so an unchanged tree produces byte-identical output.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// Gallery manifest written by the ingestion stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameManifest {
    pub images: Vec<String>,
}

/// Gallery manifest written by the indexing stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryManifest {
    pub images: Vec<ImageEntry>,
}

/// One indexed image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub filename: String,
    pub is_360: bool,
}

/// Root manifest written by the ingestion stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdirectoriesManifest {
    pub subdirectories: Vec<String>,
}

/// Root manifest written by the indexing stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleriesManifest {
    pub galleries: Vec<String>,
}

/// Serialize a manifest to its on-disk text.
pub fn to_json<T: Serialize>(manifest: &T) -> Result<String, ManifestError> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    Ok(json)
}

/// Write `manifest` to `path`, replacing any existing file.
pub fn write_manifest<T: Serialize>(path: &Path, manifest: &T) -> Result<(), ManifestError> {
    let json = to_json(manifest)?;
    std::fs::write(path, json).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}
