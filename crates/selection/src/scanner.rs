//! Dist directory scanning.
//!
//! Recursively walks a build output directory and produces relative paths
//! normalized to forward slashes, for hosts that do not carry a file list.

use std::path::Path;

use crate::error::SelectionError;

/// Lists every regular file under `dist_dir`, sorted.
///
/// Relative paths use `/` as separator on every platform, matching the
/// object keys they become.
pub fn scan_dist_dir(dist_dir: &Path) -> Result<Vec<String>, SelectionError> {
    let mut files = Vec::new();
    walk_dir(dist_dir, dist_dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk_dir(root: &Path, current: &Path, files: &mut Vec<String>) -> Result<(), SelectionError> {
    for entry in std::fs::read_dir(current)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk_dir(root, &path, files)?;
        } else if file_type.is_file() {
            let rel_path = path.strip_prefix(root).map_err(std::io::Error::other)?;
            files.push(rel_path.to_string_lossy().replace('\\', "/"));
        }
    }

    Ok(())
}
