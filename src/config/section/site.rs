//! `[site]` section configuration.
//!
//! Where app-relative paths point on disk and in URLs.
//!
//! # Example
//!
//! ```toml
//! [site]
//! root = "public"         # Physical directory behind "~/" and "/" paths
//! virtual_root = "/app"   # What "~/" expands to in emitted tags
//! scratch = ".tagpack"    # Where embedded resources are materialized
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Physical root, relative to the config file.
    pub root: PathBuf,

    /// URL prefix that `~/` expands to.
    pub virtual_root: String,

    /// Scratch directory, relative to the config file.
    pub scratch: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            virtual_root: "/".to_string(),
            scratch: PathBuf::from(".tagpack"),
        }
    }
}

impl SiteConfig {
    pub const ROOT: FieldPath = FieldPath::new("site.root");
    pub const VIRTUAL_ROOT: FieldPath = FieldPath::new("site.virtual_root");

    /// `root` must already be absolute (see `TagpackConfig::finalize`).
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.root.is_dir() {
            diag.error_with_hint(
                Self::ROOT,
                format!("`{}` is not a directory", self.root.display()),
                "paths are relative to the directory containing tagpack.toml",
            );
        }
        if self.virtual_root.contains(['?', '#']) {
            diag.error(Self::VIRTUAL_ROOT, "must be a plain path without `?` or `#`");
        }
    }

    pub(crate) fn normalize(&mut self, base: &Path) {
        self.root = crate::utils::path::normalize_path(&base.join(&self.root));
        self.scratch = crate::utils::path::normalize_path(&base.join(&self.scratch));
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::config::test_parse_config;

    #[test]
    fn test_site_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.root, PathBuf::from("."));
        assert_eq!(config.site.virtual_root, "/");
        assert_eq!(config.site.scratch, PathBuf::from(".tagpack"));
    }

    #[test]
    fn test_site_config_partial_override() {
        let config = test_parse_config("[site]\nroot = \"public\"\nvirtual_root = \"/app\"");
        assert_eq!(config.site.root, PathBuf::from("public"));
        assert_eq!(config.site.virtual_root, "/app");
        assert_eq!(config.site.scratch, PathBuf::from(".tagpack"));
    }

    #[test]
    fn test_site_config_normalize() {
        let mut config = test_parse_config("[site]\nroot = \"public\"");
        config.site.normalize(Path::new("/srv/app"));
        assert_eq!(config.site.root, PathBuf::from("/srv/app/public"));
        assert_eq!(config.site.scratch, PathBuf::from("/srv/app/.tagpack"));
    }
}
