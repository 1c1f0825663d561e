//! EXIF capture-time extraction via `kamadak-exif`.
//!
//! Only one tag matters here: `DateTimeOriginal` (`0x9003`) in the primary
//! image's Exif IFD, stored as ASCII `YYYY:MM:DD HH:MM:SS`. The raw string is
//! returned untouched; parsing belongs to [`crate::metadata`].
//!
//! `read_from_container` understands JPEG, TIFF, PNG (`eXIf`), WebP and HEIF
//! containers. GIF and BMP carry no EXIF, so for them the reader reports an
//! error that callers treat the same as a missing tag.

use super::backend::BackendError;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read the raw `DateTimeOriginal` string from an image file.
///
/// - `Err(Io)` when the file cannot be opened
/// - `Err(Metadata)` when the container has no parsable EXIF block
/// - `Ok(None)` when EXIF is present but the tag is missing or not ASCII
pub fn read_date_time_original(path: &Path) -> Result<Option<String>, BackendError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| BackendError::Metadata(format!("{}: {}", path.display(), e)))?;

    let Some(field) = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY) else {
        return Ok(None);
    };

    Ok(ascii_value(&field.value))
}

/// First ASCII component of an EXIF value, NUL padding and whitespace stripped.
fn ascii_value(value: &Value) -> Option<String> {
    let Value::Ascii(parts) = value else {
        return None;
    };
    let bytes = parts.first()?;
    let s = std::str::from_utf8(bytes).ok()?;
    let trimmed = s.trim_end_matches('\0').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
