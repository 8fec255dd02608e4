//! Mapping between application URLs and the file system.
//!
//! - `~/x` is app-relative: it expands to `{virtual_root}x` in tags and maps
//!   to `{root}/x` on disk.
//! - `/x` maps to `{root}/x` unless it already points inside `root`.
//! - Query strings are dropped before mapping to disk.

use std::path::{Path, PathBuf};

use super::route::split_query;

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[derive(Debug, Clone)]
pub struct PathMapper {
    root: PathBuf,
    virtual_root: String,
}

impl PathMapper {
    /// `root` is the physical directory served at `virtual_root`.
    pub fn new(root: impl Into<PathBuf>, virtual_root: &str) -> Self {
        let mut virtual_root = virtual_root.trim().to_string();
        if !virtual_root.starts_with('/') {
            virtual_root.insert(0, '/');
        }
        if !virtual_root.ends_with('/') {
            virtual_root.push('/');
        }
        Self {
            root: root.into(),
            virtual_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn virtual_root(&self) -> &str {
        &self.virtual_root
    }

    /// Expand an app-relative reference for use in a tag.
    pub fn expand(&self, reference: &str) -> String {
        match reference.strip_prefix("~/") {
            Some(rest) => format!("{}{rest}", self.virtual_root),
            None => reference.to_string(),
        }
    }

    /// Map a reference to the file it denotes on disk.
    pub fn to_file_system(&self, reference: &str) -> PathBuf {
        let (path, _) = split_query(reference);

        if let Some(rest) = path.strip_prefix("~/") {
            return self.root.join(rest);
        }

        let as_path = Path::new(path);
        if as_path.starts_with(&self.root) {
            return as_path.to_path_buf();
        }

        self.root.join(path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/file.txt"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_virtual_root_is_normalized() {
        assert_eq!(PathMapper::new("/srv", "app").virtual_root(), "/app/");
        assert_eq!(PathMapper::new("/srv", "/").virtual_root(), "/");
        assert_eq!(PathMapper::new("/srv", "/app/").virtual_root(), "/app/");
    }

    #[test]
    fn test_expand_app_relative() {
        let mapper = PathMapper::new("/srv/www", "/shop");
        assert_eq!(mapper.expand("~/js/app.js"), "/shop/js/app.js");
        assert_eq!(mapper.expand("/js/app.js"), "/js/app.js");
        assert_eq!(mapper.expand("js/app.js"), "js/app.js");
    }

    #[test]
    fn test_to_file_system() {
        let mapper = PathMapper::new("/srv/www", "/shop");
        assert_eq!(
            mapper.to_file_system("~/js/app.js"),
            PathBuf::from("/srv/www/js/app.js")
        );
        assert_eq!(
            mapper.to_file_system("/out/site.js?v=1"),
            PathBuf::from("/srv/www/out/site.js")
        );
        assert_eq!(
            mapper.to_file_system("css/site.css"),
            PathBuf::from("/srv/www/css/site.css")
        );
        assert_eq!(
            mapper.to_file_system("/srv/www/already/inside.js"),
            PathBuf::from("/srv/www/already/inside.js")
        );
    }
}
