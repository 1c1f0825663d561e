//! Ingestion stage: raw capture sessions → dated galleries.
//!
//! Each immediate subdirectory of the raw root is one capture session. The
//! session's first source image (in name order) decides the gallery name: its
//! EXIF capture date as `YYYY-MM-DD`, or the session folder name when no date
//! can be read. Every source image is then copied into the gallery, given a
//! thumbnail, and listed in the gallery manifest.
//!
//! ```text
//! raw/                              images/
//! ├── sessionA/                     ├── index.json         {"subdirectories": [...]}
//! │   └── photo1.jpg  (2023:05:10)  ├── 2023-05-10/
//! └── vacation/                     │   ├── photo1.jpg
//!     └── beach.jpg   (no EXIF)     │   ├── thumb_photo1.jpg
//!                                   │   └── index.json     {"images": ["photo1.jpg"]}
//!                                   └── vacation/
//!                                       └── ...
//! ```
//!
//! ## Collisions
//!
//! Two sessions shot on the same day map to the same gallery. The directory
//! is reused, a same-named file from the later session overwrites the earlier
//! copy, and the gallery manifest lists every image either session
//! contributed. The root manifest lists the gallery once.

use crate::config::GalleryConfig;
use crate::imaging::{ImageBackend, RustBackend};
use crate::manifest::{self, FilenameManifest, SubdirectoriesManifest};
use crate::metadata;
use crate::naming;
use crate::scan::{self, ScanError};
use crate::thumbnail;
use crate::types::Failure;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Raw root not found: {0}")]
    RawRootMissing(PathBuf),
    #[error("Failed to create {path}: {source}")]
    CreateRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// One gallery written during an ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedGallery {
    pub name: String,
    /// Raw session folders that mapped to this gallery, in processing order.
    pub sessions: Vec<String>,
    /// Image file names in the gallery manifest.
    pub images: Vec<String>,
}

impl IngestedGallery {
    /// More than one session landed in this gallery.
    pub fn is_merged(&self) -> bool {
        self.sessions.len() > 1
    }
}

/// What an ingestion run did.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Galleries in root-manifest order.
    pub galleries: Vec<IngestedGallery>,
    pub thumbnails_written: usize,
    pub failures: Vec<Failure>,
}

impl IngestReport {
    pub fn images_copied(&self) -> usize {
        self.galleries.iter().map(|g| g.images.len()).sum()
    }

    pub fn gallery(&self, name: &str) -> Option<&IngestedGallery> {
        self.galleries.iter().find(|g| g.name == name)
    }

    fn gallery_index(&mut self, name: &str, session: &str) -> usize {
        if let Some(i) = self.galleries.iter().position(|g| g.name == name) {
            let gallery = &mut self.galleries[i];
            tracing::warn!(
                gallery = name,
                session,
                earlier = %gallery.sessions.join(", "),
                "sessions share a gallery; merging"
            );
            gallery.sessions.push(session.to_string());
            return i;
        }
        self.galleries.push(IngestedGallery {
            name: name.to_string(),
            sessions: vec![session.to_string()],
            images: Vec::new(),
        });
        self.galleries.len() - 1
    }
}

/// Run the ingestion stage with the production imaging backend.
pub fn ingest(config: &GalleryConfig) -> Result<IngestReport, IngestError> {
    ingest_with_backend(&RustBackend::new(), config)
}

/// Run the ingestion stage with a specific backend (allows testing with mock).
pub fn ingest_with_backend(
    backend: &impl ImageBackend,
    config: &GalleryConfig,
) -> Result<IngestReport, IngestError> {
    if !config.raw_root.is_dir() {
        return Err(IngestError::RawRootMissing(config.raw_root.clone()));
    }
    fs::create_dir_all(&config.images_root).map_err(|source| IngestError::CreateRoot {
        path: config.images_root.clone(),
        source,
    })?;

    let mut report = IngestReport::default();
    for session in scan::list_subdirectories(&config.raw_root)? {
        ingest_session(backend, config, &session, &mut report);
    }

    let root_manifest = SubdirectoriesManifest {
        subdirectories: report.galleries.iter().map(|g| g.name.clone()).collect(),
    };
    let path = config.images_root.join(&config.manifest.filename);
    if let Err(e) = manifest::write_manifest(&path, &root_manifest) {
        tracing::warn!(error = %e, "root manifest not written");
        report.failures.push(Failure::new(path, e));
    }

    Ok(report)
}

/// Gallery name for a session: capture date of its first image, else the
/// sanitized folder name.
fn gallery_name_for(
    backend: &impl ImageBackend,
    session: &Path,
    session_name: &str,
    images: &[String],
) -> String {
    let date = images
        .first()
        .and_then(|first| metadata::read_capture_date(backend, &session.join(first)));
    if let Some(date) = date {
        return date;
    }

    let name = naming::sanitize_gallery_name(session_name);
    if name != session_name {
        tracing::warn!(session = session_name, gallery = %name, "session name sanitized");
    }
    name
}

fn ingest_session(
    backend: &impl ImageBackend,
    config: &GalleryConfig,
    session: &Path,
    report: &mut IngestReport,
) {
    let prefix = &config.thumbnails.prefix;
    let session_name = scan::dir_name(session);

    let images = match scan::list_source_images(session, prefix) {
        Ok(images) => images,
        Err(e) => {
            tracing::warn!(error = %e, "skipping session");
            report.failures.push(Failure::new(session, e));
            return;
        }
    };

    let gallery_name = gallery_name_for(backend, session, &session_name, &images);
    let gallery_dir = config.images_root.join(&gallery_name);
    if let Err(e) = fs::create_dir_all(&gallery_dir) {
        tracing::warn!(gallery = %gallery_dir.display(), error = %e, "cannot create gallery");
        report.failures.push(Failure::new(&gallery_dir, e));
        return;
    }

    let idx = report.gallery_index(&gallery_name, &session_name);
    let bounds = config.bounding_box();

    for name in &images {
        let source = session.join(name);
        let dest = gallery_dir.join(name);

        if let Err(e) = fs::copy(&source, &dest) {
            tracing::warn!(source = %source.display(), error = %e, "copy failed");
            report.failures.push(Failure::new(&source, e));
            continue;
        }

        let thumbnailed = thumbnail::thumbnail_path(&dest, prefix).is_some_and(|thumb| {
            thumbnail::generate_thumbnail(backend, &dest, &thumb, bounds).is_some()
        });
        if thumbnailed {
            report.thumbnails_written += 1;
        } else {
            report
                .failures
                .push(Failure::new(&dest, "thumbnail not generated"));
        }

        let listed = &mut report.galleries[idx].images;
        if !listed.contains(name) {
            listed.push(name.clone());
        }
    }

    let gallery = &report.galleries[idx];
    tracing::info!(
        session = %session_name,
        gallery = %gallery.name,
        images = images.len(),
        "ingested session"
    );

    let manifest_path = gallery_dir.join(&config.manifest.filename);
    let gallery_manifest = FilenameManifest {
        images: gallery.images.clone(),
    };
    if let Err(e) = manifest::write_manifest(&manifest_path, &gallery_manifest) {
        tracing::warn!(error = %e, "gallery manifest not written");
        report.failures.push(Failure::new(manifest_path, e));
    }
}
