//! File stamps used to invalidate cached renders.
//!
//! A stamp records mtime and length at the moment a render pass read the
//! file. Any later difference (including deletion) marks the file stale.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStamp {
    path: PathBuf,
    mtime: Option<SystemTime>,
    len: Option<u64>,
}

impl FileStamp {
    /// Capture the current state of `path`.
    pub fn capture(path: &Path) -> Self {
        let meta = path.metadata().ok();
        Self {
            path: path.to_path_buf(),
            mtime: meta.as_ref().and_then(|m| m.modified().ok()),
            len: meta.as_ref().map(|m| m.len()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the file still looks the way it did when captured.
    pub fn is_current(&self) -> bool {
        Self::capture(&self.path) == *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_stamp_detects_change() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "var a;").unwrap();

        let stamp = FileStamp::capture(&file);
        assert!(stamp.is_current());

        fs::write(&file, "var a = 1;").unwrap();
        assert!(!stamp.is_current());
    }

    #[test]
    fn test_stamp_detects_deletion() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.css");
        fs::write(&file, "a{}").unwrap();

        let stamp = FileStamp::capture(&file);
        fs::remove_file(&file).unwrap();
        assert!(!stamp.is_current());
        assert!(!file.exists());
    }

    #[test]
    fn test_missing_file_stays_current_while_missing() {
        let stamp = FileStamp::capture(Path::new("/nonexistent/tagpack/file.js"));
        assert!(stamp.is_current());
    }
}
