//! # pano-gallery
//!
//! A two-stage batch pipeline that turns folders of photos into a browsable
//! gallery tree: dated galleries, fixed-box thumbnails, and JSON manifests
//! that flag 360° equirectangular panoramas for a static viewer.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Ingest   raw/<session>/    →  images/<gallery>/   (copy + thumbnail + name by date)
//! 2. Index    images/<gallery>/ →  index.json files    (thumbnail + 360° flag)
//! ```
//!
//! Each stage is a plain function taking an explicit [`config::GalleryConfig`]
//! and returning a report. Both stages rewrite every artifact on each run;
//! there is no cache and no change detection. A bad image is logged and
//! skipped, never fatal.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`ingest`] | Stage 1: copies raw sessions into date-named galleries |
//! | [`index`] | Stage 2: regenerates thumbnails, classifies panoramas, writes manifests |
//! | [`metadata`] | EXIF capture date → `YYYY-MM-DD` gallery name |
//! | [`classify`] | Equirectangular (2:1, wide) detection |
//! | [`thumbnail`] | Fixed-box thumbnails written next to their source |
//! | [`scan`] | Sorted one-level directory listings shared by both stages |
//! | [`manifest`] | JSON manifest shapes and writing |
//! | [`naming`] | Extension allow-list, thumbnail prefix, gallery name sanitizing |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`imaging`] | Pure-Rust image backend: decode, resize, EXIF |
//! | [`output`] | CLI output formatting of stage reports |
//! | [`types`] | Types shared by both stage reports |
//!
//! # Logging
//!
//! Library code reports through [`tracing`]. Per-image problems are `warn`,
//! per-gallery progress is `info`, absent EXIF is `debug`. Nothing is printed
//! unless the caller installs a subscriber, e.g. with [`init_tracing`].

pub mod classify;
pub mod config;
pub mod imaging;
pub mod index;
pub mod ingest;
pub mod manifest;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod scan;
pub mod thumbnail;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `verbose`. Calling this twice is harmless: the second call is ignored.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
