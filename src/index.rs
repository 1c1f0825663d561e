//! Indexing stage: gallery tree → manifests with panorama flags.
//!
//! Walks every gallery under the images root, regenerates each source image's
//! thumbnail, classifies the image as 360° or not, and rewrites the manifests:
//!
//! ```text
//! images/index.json             {"galleries": ["2023-05-10", "vacation"]}
//! images/2023-05-10/index.json  {"images": [{"filename": "photo1.jpg", "is_360": false}]}
//! ```
//!
//! Nothing is cached. Running the stage twice over an unchanged tree yields
//! byte-identical manifests, since listings are sorted and thumbnails are
//! never mistaken for sources.

use crate::classify;
use crate::config::GalleryConfig;
use crate::imaging::{ImageBackend, RustBackend};
use crate::manifest::{self, GalleriesManifest, GalleryManifest, ImageEntry};
use crate::scan::{self, GalleryListing, ScanError};
use crate::thumbnail;
use crate::types::Failure;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Images root not found: {0}")]
    ImagesRootMissing(PathBuf),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// One gallery as written to its manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedGallery {
    pub name: String,
    pub images: Vec<ImageEntry>,
}

impl IndexedGallery {
    pub fn panorama_count(&self) -> usize {
        self.images.iter().filter(|e| e.is_360).count()
    }
}

/// What an indexing run did.
#[derive(Debug, Clone, Default)]
pub struct IndexReport {
    pub galleries: Vec<IndexedGallery>,
    pub thumbnails_written: usize,
    pub failures: Vec<Failure>,
}

impl IndexReport {
    pub fn images_indexed(&self) -> usize {
        self.galleries.iter().map(|g| g.images.len()).sum()
    }

    pub fn panoramas(&self) -> usize {
        self.galleries.iter().map(IndexedGallery::panorama_count).sum()
    }

    pub fn gallery(&self, name: &str) -> Option<&IndexedGallery> {
        self.galleries.iter().find(|g| g.name == name)
    }
}

/// Run the indexing stage with the production imaging backend.
pub fn index(config: &GalleryConfig) -> Result<IndexReport, IndexError> {
    index_with_backend(&RustBackend::new(), config)
}

/// List what the indexing stage would process, without writing anything.
pub fn plan(config: &GalleryConfig) -> Result<Vec<GalleryListing>, IndexError> {
    check_root(&config.images_root)?;
    Ok(scan::scan_gallery_tree(
        &config.images_root,
        &config.thumbnails.prefix,
    )?)
}

fn check_root(root: &Path) -> Result<(), IndexError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(IndexError::ImagesRootMissing(root.to_path_buf()))
    }
}

/// Run the indexing stage with a specific backend (allows testing with mock).
pub fn index_with_backend(
    backend: &impl ImageBackend,
    config: &GalleryConfig,
) -> Result<IndexReport, IndexError> {
    check_root(&config.images_root)?;

    let mut report = IndexReport::default();
    for gallery_dir in scan::list_subdirectories(&config.images_root)? {
        index_gallery(backend, config, &gallery_dir, &mut report);
    }

    let root_manifest = GalleriesManifest {
        galleries: report.galleries.iter().map(|g| g.name.clone()).collect(),
    };
    let path = config.images_root.join(&config.manifest.filename);
    if let Err(e) = manifest::write_manifest(&path, &root_manifest) {
        tracing::warn!(error = %e, "root manifest not written");
        report.failures.push(Failure::new(path, e));
    }

    Ok(report)
}

fn index_gallery(
    backend: &impl ImageBackend,
    config: &GalleryConfig,
    gallery_dir: &Path,
    report: &mut IndexReport,
) {
    let prefix = &config.thumbnails.prefix;
    let images = match scan::list_source_images(gallery_dir, prefix) {
        Ok(images) => images,
        Err(e) => {
            tracing::warn!(error = %e, "skipping gallery");
            report.failures.push(Failure::new(gallery_dir, e));
            return;
        }
    };

    let bounds = config.bounding_box();
    let rule = config.panorama_rule();
    let mut entries = Vec::with_capacity(images.len());

    for filename in images {
        let source = gallery_dir.join(&filename);

        let thumbnailed = thumbnail::thumbnail_path(&source, prefix).is_some_and(|thumb| {
            thumbnail::generate_thumbnail(backend, &source, &thumb, bounds).is_some()
        });
        if thumbnailed {
            report.thumbnails_written += 1;
        } else {
            report
                .failures
                .push(Failure::new(&source, "thumbnail not generated"));
        }

        let is_360 = classify::is_equirectangular(backend, &source, &rule);
        entries.push(ImageEntry { filename, is_360 });
    }

    let gallery = IndexedGallery {
        name: scan::dir_name(gallery_dir),
        images: entries,
    };
    tracing::info!(
        gallery = %gallery.name,
        images = gallery.images.len(),
        panoramas = gallery.panorama_count(),
        "indexed gallery"
    );

    let manifest_path = gallery_dir.join(&config.manifest.filename);
    let gallery_manifest = GalleryManifest {
        images: gallery.images.clone(),
    };
    if let Err(e) = manifest::write_manifest(&manifest_path, &gallery_manifest) {
        tracing::warn!(error = %e, "gallery manifest not written");
        report.failures.push(Failure::new(manifest_path, e));
    }

    report.galleries.push(gallery);
}
