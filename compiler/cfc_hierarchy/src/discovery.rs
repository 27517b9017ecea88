//! Source file discovery.
//!
//! Finds every file with a given extension under a directory tree.
//! Hidden files and directories are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use crate::HierarchyError;

/// Discover all files ending in `.{ext}` below `root`, sorted by path.
pub fn discover(root: &Path, ext: &str) -> Result<Vec<PathBuf>, HierarchyError> {
    let mut files = Vec::new();
    discover_recursive(root, ext, &mut files)?;
    files.sort();
    Ok(files)
}

fn discover_recursive(dir: &Path, ext: &str, files: &mut Vec<PathBuf>) -> Result<(), HierarchyError> {
    let entries = fs::read_dir(dir).map_err(|e| HierarchyError::io(dir.display().to_string(), e))?;

    for entry in entries {
        let path = entry
            .map_err(|e| HierarchyError::io(dir.display().to_string(), e))?
            .path();

        if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with('.'))
        {
            continue;
        }

        if path.is_dir() {
            discover_recursive(&path, ext, files)?;
        } else if path.extension().is_some_and(|e| e == ext) {
            files.push(path);
        }
    }
    Ok(())
}
