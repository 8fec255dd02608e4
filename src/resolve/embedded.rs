//! Embedded resources compiled into the host binary.
//!
//! Resources are registered by id (typically with `include_str!`) and
//! materialized into a scratch directory on resolve, so the rest of the
//! pipeline can read them like any other file.
//!
//! ```ignore
//! let embedded = EmbeddedResolver::new(".tagpack/embedded")
//!     .with_resource("widget.js", include_str!("widget.js"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use super::Resolver;
use crate::core::{BundleError, Result};
use crate::debug;

#[derive(Debug)]
pub struct EmbeddedResolver {
    scratch: PathBuf,
    resources: DashMap<String, Arc<str>>,
}

impl EmbeddedResolver {
    pub fn new(scratch: impl Into<PathBuf>) -> Self {
        Self {
            scratch: scratch.into(),
            resources: DashMap::new(),
        }
    }

    pub fn with_resource(self, id: impl Into<String>, content: impl Into<Arc<str>>) -> Self {
        self.register(id, content);
        self
    }

    pub fn register(&self, id: impl Into<String>, content: impl Into<Arc<str>>) {
        self.resources.insert(id.into(), content.into());
    }

    pub fn scratch(&self) -> &Path {
        &self.scratch
    }

    fn scratch_path(&self, id: &str) -> PathBuf {
        let name: String = id
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '_',
                c => c,
            })
            .collect();
        self.scratch.join(name)
    }
}

impl Resolver for EmbeddedResolver {
    fn try_resolve(&self, reference: &str) -> Result<Vec<PathBuf>> {
        let Some(content) = self.resources.get(reference).map(|r| Arc::clone(r.value())) else {
            debug!("resolve"; "no embedded resource {}", reference);
            return Ok(Vec::new());
        };

        let path = self.scratch_path(reference);
        // Leave identical files alone so their mtime stays a valid cache stamp.
        let unchanged = fs::read_to_string(&path).is_ok_and(|existing| *existing == *content);
        if !unchanged {
            fs::create_dir_all(&self.scratch).map_err(BundleError::io(&self.scratch))?;
            fs::write(&path, content.as_bytes()).map_err(BundleError::io(&path))?;
        }
        Ok(vec![path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_materializes_resource() {
        let dir = TempDir::new().unwrap();
        let resolver = EmbeddedResolver::new(dir.path().join("scratch"))
            .with_resource("Vendor/widget.js", "var widget = 1;");

        let files = resolver.try_resolve("Vendor/widget.js").unwrap();
        assert_eq!(files, vec![dir.path().join("scratch/Vendor_widget.js")]);
        assert_eq!(fs::read_to_string(&files[0]).unwrap(), "var widget = 1;");
    }

    #[test]
    fn test_unknown_resource_is_empty() {
        let dir = TempDir::new().unwrap();
        let resolver = EmbeddedResolver::new(dir.path());
        assert!(resolver.try_resolve("missing.js").unwrap().is_empty());
    }

    #[test]
    fn test_rewrites_only_on_change() {
        let dir = TempDir::new().unwrap();
        let resolver = EmbeddedResolver::new(dir.path()).with_resource("a.css", "a{}");
        let path = resolver.try_resolve("a.css").unwrap().remove(0);
        let before = crate::freshness::FileStamp::capture(&path);

        resolver.try_resolve("a.css").unwrap();
        assert!(before.is_current());

        resolver.register("a.css", "a{color:red}");
        resolver.try_resolve("a.css").unwrap();
        assert!(!before.is_current());
    }
}
