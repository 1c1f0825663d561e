//! CLI output formatting for both pipeline stages.
//!
//! Every gallery is shown as a header line (positional index, name, photo
//! count) followed by indented context lines and its images. Failures are
//! grouped at the end, then a one-line summary.
//!
//! # Output Format
//!
//! ## Ingest
//!
//! ```text
//! 001 2023-05-10 (2 photos)
//!     Sessions: evening, morning (merged)
//!     001 e1.jpg
//!     002 m1.jpg
//! 002 vacation (1 photo)
//!     Sessions: vacation
//!     001 beach.jpg
//!
//! Failures
//!     raw/vacation/notes.jpg: thumbnail not generated
//!
//! Ingested 3 photos into 2 galleries, 3 thumbnails
//! ```
//!
//! ## Index
//!
//! ```text
//! 001 2023-05-10 (2 photos)
//!     001 flat.jpg
//!     002 pano.jpg [360]
//!
//! Indexed 2 photos in 1 gallery (1 panorama), 2 thumbnails
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 2023-05-10 (2 photos)
//!     Source: images/2023-05-10
//!     001 flat.jpg
//!     002 pano.jpg
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::index::IndexReport;
use crate::ingest::IngestReport;
use crate::scan::GalleryListing;
use crate::types::Failure;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 photo`, `2 photos`.
fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Gallery header: positional index, name, photo count.
///
/// ```text
/// 001 2023-05-10 (5 photos)
/// ```
fn gallery_header(index: usize, name: &str, photos: usize) -> String {
    format!(
        "{} {} ({})",
        format_index(index),
        name,
        count(photos, "photo", "photos")
    )
}

fn image_line(index: usize, filename: &str) -> String {
    format!("{}{} {}", indent(1), format_index(index), filename)
}

fn push_failures(lines: &mut Vec<String>, failures: &[Failure]) {
    if failures.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("Failures".to_string());
    for f in failures {
        lines.push(format!("{}{}: {}", indent(1), f.path.display(), f.reason));
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Ingest output
// ============================================================================

/// Format the ingestion report: galleries with their source sessions.
pub fn format_ingest_output(report: &IngestReport) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, gallery) in report.galleries.iter().enumerate() {
        lines.push(gallery_header(i + 1, &gallery.name, gallery.images.len()));
        let merged = if gallery.is_merged() { " (merged)" } else { "" };
        lines.push(format!(
            "{}Sessions: {}{}",
            indent(1),
            gallery.sessions.join(", "),
            merged
        ));
        for (j, name) in gallery.images.iter().enumerate() {
            lines.push(image_line(j + 1, name));
        }
    }

    push_failures(&mut lines, &report.failures);

    lines.push(String::new());
    lines.push(format!(
        "Ingested {} into {}, {}",
        count(report.images_copied(), "photo", "photos"),
        count(report.galleries.len(), "gallery", "galleries"),
        count(report.thumbnails_written, "thumbnail", "thumbnails"),
    ));
    lines
}

pub fn print_ingest_output(report: &IngestReport) {
    print_lines(format_ingest_output(report));
}

// ============================================================================
// Index output
// ============================================================================

/// Format the indexing report: galleries with 360° flags.
pub fn format_index_output(report: &IndexReport) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, gallery) in report.galleries.iter().enumerate() {
        lines.push(gallery_header(i + 1, &gallery.name, gallery.images.len()));
        for (j, entry) in gallery.images.iter().enumerate() {
            let mut line = image_line(j + 1, &entry.filename);
            if entry.is_360 {
                line.push_str(" [360]");
            }
            lines.push(line);
        }
    }

    push_failures(&mut lines, &report.failures);

    lines.push(String::new());
    lines.push(format!(
        "Indexed {} in {} ({}), {}",
        count(report.images_indexed(), "photo", "photos"),
        count(report.galleries.len(), "gallery", "galleries"),
        count(report.panoramas(), "panorama", "panoramas"),
        count(report.thumbnails_written, "thumbnail", "thumbnails"),
    ));
    lines
}

pub fn print_index_output(report: &IndexReport) {
    print_lines(format_index_output(report));
}

// ============================================================================
// Check output
// ============================================================================

/// Format the dry-run listing of what `index` would process.
pub fn format_check_output(galleries: &[GalleryListing]) -> Vec<String> {
    let mut lines = Vec::new();

    if galleries.is_empty() {
        lines.push("No galleries found".to_string());
        return lines;
    }

    for (i, gallery) in galleries.iter().enumerate() {
        lines.push(gallery_header(i + 1, &gallery.name, gallery.images.len()));
        lines.push(format!("{}Source: {}", indent(1), gallery.path.display()));
        for (j, name) in gallery.images.iter().enumerate() {
            lines.push(image_line(j + 1, name));
        }
    }
    lines
}

pub fn print_check_output(galleries: &[GalleryListing]) {
    print_lines(format_check_output(galleries));
}
