//! Shared types returned by both pipeline stages.
//!
//! Stages never abort on a single bad image. Instead each problem becomes a
//! [`Failure`] in the stage's report, next to what did succeed, so the CLI can
//! print a summary and callers can assert on exact outcomes.

use std::path::PathBuf;

/// One per-image or per-gallery problem that was logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// File or directory the problem concerns.
    pub path: PathBuf,
    /// Human-readable cause.
    pub reason: String,
}

impl Failure {
    pub fn new(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
