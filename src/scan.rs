//! Directory listing shared by both stages.
//!
//! Both stages look exactly one level deep: the root holds one directory per
//! session or gallery, and each of those holds image files. Listings are
//! sorted by file name so that manifests do not depend on the order the
//! filesystem happens to return entries in.
//!
//! ```text
//! images/                  # root
//! ├── index.json           # ignored (not a directory)
//! ├── 2023-05-10/          # gallery
//! │   ├── photo1.jpg       # source image
//! │   ├── .sunset.jpg      # source image (dot names are not special)
//! │   ├── thumb_photo1.jpg # derived, skipped
//! │   └── index.json       # not an image, skipped
//! └── vacation/
//!     └── beach.PNG
//! ```

use crate::naming;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    RootMissing(PathBuf),
    #[error("Failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// One gallery directory and the source images it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryListing {
    pub name: String,
    pub path: PathBuf,
    pub images: Vec<String>,
}

/// Immediate children of `dir`, sorted by file name.
fn collect_entries(dir: &Path) -> Result<Vec<DirEntry>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::RootMissing(dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => entries.push(entry),
            // A child we cannot stat (e.g. a dangling symlink) is skipped; a
            // failure on the directory itself aborts the listing.
            Err(e) if e.depth() > 0 => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
            }
            Err(source) => {
                return Err(ScanError::Walk {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        }
    }
    Ok(entries)
}

/// Subdirectories of `root` in name order.
pub fn list_subdirectories(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    Ok(collect_entries(root)?
        .into_iter()
        .filter(|e| e.file_type().is_dir())
        .map(DirEntry::into_path)
        .collect())
}

/// File names of the source images in `dir`, in name order.
///
/// Thumbnails (names starting with `thumbnail_prefix`) and files outside the
/// extension allow-list are excluded.
pub fn list_source_images(dir: &Path, thumbnail_prefix: &str) -> Result<Vec<String>, ScanError> {
    Ok(collect_entries(dir)?
        .into_iter()
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.file_name().to_str().map(String::from))
        .filter(|name| naming::is_source_image(name, thumbnail_prefix))
        .collect())
}

/// Directory name as a string (lossy for non-UTF-8 names).
pub fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// List every gallery under `root` with its source images, without touching
/// anything. Galleries that cannot be listed are logged and left out.
pub fn scan_gallery_tree(
    root: &Path,
    thumbnail_prefix: &str,
) -> Result<Vec<GalleryListing>, ScanError> {
    let mut galleries = Vec::new();
    for path in list_subdirectories(root)? {
        match list_source_images(&path, thumbnail_prefix) {
            Ok(images) => galleries.push(GalleryListing {
                name: dir_name(&path),
                path,
                images,
            }),
            Err(e) => tracing::warn!(error = %e, "skipping gallery"),
        }
    }
    Ok(galleries)
}
