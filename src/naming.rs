//! Centralized filename conventions shared by every stage.
//!
//! Three rules live here so ingestion and indexing can never disagree:
//!
//! - **Image allow-list**: a file is a source image when its extension is one
//!   of [`IMAGE_EXTENSIONS`], compared case-insensitively.
//! - **Derived artifacts**: thumbnails are named `<prefix><original>` and are
//!   never treated as source images, whichever stage is scanning.
//! - **Gallery names**: a gallery name becomes a path segment under the images
//!   root, so it is checked and, if needed, rewritten before use.
//!
//! ```text
//! photo1.jpg         → source image
//! thumb_photo1.jpg   → thumbnail of photo1.jpg (skipped)
//! notes.txt          → ignored
//! ../etc             → gallery name rewritten to "etc"
//! ```

use std::path::Path;

/// Extensions (lowercase, without the dot) that count as source images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// Gallery name used when sanitizing leaves nothing behind.
pub const FALLBACK_GALLERY_NAME: &str = "untitled";

/// Characters that are rejected in gallery names on at least one platform.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

/// Whether `name` carries an allow-listed image extension.
pub fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Whether `name` is a derived thumbnail under the given prefix.
pub fn is_thumbnail(name: &str, prefix: &str) -> bool {
    name.starts_with(prefix)
}

/// Whether `name` should be processed as a source image.
pub fn is_source_image(name: &str, thumbnail_prefix: &str) -> bool {
    !is_thumbnail(name, thumbnail_prefix) && has_image_extension(name)
}

/// Thumbnail filename for a source image: `photo.jpg` → `thumb_photo.jpg`.
pub fn thumbnail_name(source: &str, prefix: &str) -> String {
    format!("{prefix}{source}")
}

/// Whether a gallery name can be used verbatim as a single path segment.
pub fn is_safe_gallery_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name.trim() == name
        && !name.ends_with('.')
        && !name
            .chars()
            .any(|c| c.is_control() || FORBIDDEN_CHARS.contains(&c))
}

/// Rewrite a gallery name into a safe single path segment.
///
/// Safe names pass through untouched, so date-derived names (`2023-05-10`) and
/// ordinary folder names keep their identity. Otherwise:
/// - Forbidden and control characters become dashes
/// - Consecutive dashes collapse into one
/// - Leading/trailing dashes, dots and whitespace are stripped
/// - An empty result becomes [`FALLBACK_GALLERY_NAME`]
pub fn sanitize_gallery_name(name: &str) -> String {
    if is_safe_gallery_name(name) {
        return name.to_string();
    }

    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_control() || FORBIDDEN_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect();

    let mut collapsed = String::with_capacity(replaced.len());
    let mut prev_dash = false;
    for c in replaced.chars() {
        if c == '-' {
            if !prev_dash {
                collapsed.push('-');
            }
            prev_dash = true;
        } else {
            collapsed.push(c);
            prev_dash = false;
        }
    }

    let trimmed = collapsed.trim_matches(|c: char| c == '-' || c == '.' || c.is_whitespace());
    if trimmed.is_empty() {
        FALLBACK_GALLERY_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
