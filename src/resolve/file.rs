//! Local file system resolution with glob and directory expansion.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::Resolver;
use crate::core::{BundleError, Result};
use crate::debug;
use crate::utils::path::is_glob;

#[derive(Debug, Clone, Copy, Default)]
pub struct FileResolver;

impl Resolver for FileResolver {
    fn try_resolve(&self, reference: &str) -> Result<Vec<PathBuf>> {
        let files = if is_glob(reference) {
            expand_glob(reference)?
        } else {
            let path = Path::new(reference);
            if path.is_dir() {
                expand_dir(path)
            } else if path.is_file() {
                vec![path.to_path_buf()]
            } else {
                Vec::new()
            }
        };

        if files.is_empty() {
            debug!("resolve"; "no files for {}", reference);
        }
        Ok(files)
    }
}

/// Files matching a glob pattern, sorted.
fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries =
        glob::glob(pattern).map_err(|e| BundleError::Pattern(pattern.to_string(), e.to_string()))?;
    let mut files: Vec<_> = entries
        .filter_map(std::result::Result::ok)
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Direct file children of a directory, sorted.
fn expand_dir(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .collect();
    files.sort();
    files
}
