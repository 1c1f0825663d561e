//! Capture-date extraction for gallery naming.
//!
//! The ingestion stage names a gallery after the day its photos were taken.
//! That day comes from the EXIF `DateTimeOriginal` tag of the first image in a
//! raw session, which cameras write as `YYYY:MM:DD HH:MM:SS`. Only the date
//! portion is kept and rewritten with dashes:
//!
//! ```text
//! "2023:05:10 14:22:00"  →  "2023-05-10"
//! ```
//!
//! A missing tag, a malformed value, and an unreadable file all mean the same
//! thing to the caller: no date, fall back to the session's folder name. The
//! reason is logged but never returned.

use crate::imaging::{BackendError, ImageBackend};
use chrono::NaiveDateTime;
use std::path::Path;

/// EXIF timestamp layout.
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Gallery date layout.
const GALLERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a raw EXIF timestamp into a `YYYY-MM-DD` gallery date.
///
/// Surrounding whitespace and NUL padding are ignored; anything else that
/// does not match `YYYY:MM:DD HH:MM:SS` (including impossible dates such as
/// month 13) yields `None`.
pub fn parse_capture_date(raw: &str) -> Option<String> {
    let cleaned = raw.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    NaiveDateTime::parse_from_str(cleaned, EXIF_DATETIME_FORMAT)
        .ok()
        .map(|dt| dt.format(GALLERY_DATE_FORMAT).to_string())
}

/// Read an image's capture date as `YYYY-MM-DD`.
///
/// Returns `None` when the tag is absent, unparseable, or the file cannot be
/// opened or decoded. Every such case is logged; none is an error.
pub fn read_capture_date(backend: &impl ImageBackend, path: &Path) -> Option<String> {
    match backend.read_capture_time(path) {
        Ok(Some(raw)) => {
            let date = parse_capture_date(&raw);
            if date.is_none() {
                tracing::warn!(
                    path = %path.display(),
                    value = %raw,
                    "capture time is not in YYYY:MM:DD HH:MM:SS form"
                );
            }
            date
        }
        Ok(None) => {
            tracing::debug!(path = %path.display(), "no DateTimeOriginal tag");
            None
        }
        Err(BackendError::Metadata(reason)) => {
            tracing::debug!(path = %path.display(), %reason, "no EXIF data");
            None
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read capture time");
            None
        }
    }
}
