//! File modification times.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Source of file modification times.
pub trait Timestamps {
    /// Modification time of `path`, or `None` if it does not exist.
    fn modified(&self, path: &Path) -> Option<SystemTime>;
}

/// Reads modification times from the file system.
#[derive(Copy, Clone, Debug, Default)]
pub struct FsTimestamps;

impl Timestamps for FsTimestamps {
    fn modified(&self, path: &Path) -> Option<SystemTime> {
        fs::metadata(path).and_then(|meta| meta.modified()).ok()
    }
}

/// True if `artifact` exists and is not older than `source`.
///
/// A missing source never makes an existing artifact stale.
pub fn is_current(timestamps: &dyn Timestamps, source: &Path, artifact: &Path) -> bool {
    match (timestamps.modified(source), timestamps.modified(artifact)) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(source), Some(artifact)) => artifact >= source,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
