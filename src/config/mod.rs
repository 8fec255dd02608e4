//! Configuration management for `tagpack.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── bundle     # [[bundle]]
//! │   ├── render     # [render]
//! │   └── site       # [site]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # TagpackConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `[site]`      | Physical root, virtual root, scratch directory   |
//! | `[render]`    | Mode, hash key, only-if-missing, lock timeout    |
//! | `[[bundle]]`  | Named bundles: kind, output, assets, groups      |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    BundleConfig, GroupConfig, MinifierChoice, RemoteAssetConfig, RenderConfig, SiteConfig,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::BundleContext;
use crate::log;
use crate::resolve::EmbeddedResolver;

/// Root configuration structure representing tagpack.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagpackConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory containing the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default, rename = "bundle")]
    pub bundles: Vec<BundleConfig>,
}

impl TagpackConfig {
    /// Locate, parse, normalize and validate a config file.
    ///
    /// A relative `config` is searched upward from the current directory.
    pub fn load(config: &Path) -> Result<Self> {
        let Some(path) = find_config_file(config) else {
            bail!(ConfigError::NotFound(config.to_path_buf()));
        };

        let mut loaded = Self::from_path(&path)?;
        loaded.finalize(&path);
        loaded.validate()?;
        Ok(loaded)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve every path against the config file's directory.
    fn finalize(&mut self, config_path: &Path) {
        self.config_path = crate::utils::path::normalize_path(config_path);
        self.root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.site.normalize(&self.root);
    }

    /// Validate configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.render.validate(&mut diag);

        let mut seen = FxHashSet::default();
        for bundle in &self.bundles {
            bundle.validate(&mut diag);
            if !bundle.name.is_empty() && !seen.insert(bundle.name.as_str()) {
                diag.error_with_hint(
                    BundleConfig::NAME,
                    format!("duplicate bundle `{}`", bundle.name),
                    "bundle names must be unique",
                );
            }
        }

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// A render context rooted at `[site]` with `[render]` defaults.
    pub fn context(&self) -> Arc<BundleContext> {
        let embedded = EmbeddedResolver::new(self.site.scratch.join("embedded"));
        BundleContext::builder(&self.site.root)
            .virtual_root(&self.site.virtual_root)
            .mode(self.render.mode)
            .lock_timeout(self.render.lock_timeout())
            .embedded_resolver(Arc::new(embedded))
            .build()
    }

    pub fn bundle(&self, name: &str) -> Option<&BundleConfig> {
        self.bundles.iter().find(|b| b.name == name)
    }

    /// Bundles named in `names` (all when empty), in config order.
    pub fn select(&self, names: &[String]) -> Result<Vec<&BundleConfig>> {
        if names.is_empty() {
            return Ok(self.bundles.iter().collect());
        }

        let wanted: FxHashSet<&str> = names.iter().map(String::as_str).collect();
        if let Some(unknown) = wanted.iter().find(|name| self.bundle(name).is_none()) {
            let known: Vec<_> = self.bundles.iter().map(|b| b.name.as_str()).collect();
            bail!("unknown bundle `{}` (configured: {})", unknown, known.join(", "));
        }

        Ok(self
            .bundles
            .iter()
            .filter(|b| wanted.contains(b.name.as_str()))
            .collect())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> TagpackConfig {
    let (parsed, ignored) = TagpackConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RenderMode;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[site]
root = "public"
virtual_root = "/app"

[render]
mode = "debug"

[[bundle]]
name = "site"
kind = "script"
output = "~/assets/site.js"
assets = ["~/js/a.js"]

[[bundle]]
name = "theme"
kind = "style"
output = "~/assets/theme.css"
assets = ["~/css/a.css"]
"#;

    fn write_site(config: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("tagpack.toml"), config).unwrap();
        dir
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = TagpackConfig::from_str("[site\nroot = \"public\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_resolves_paths_against_config_dir() {
        let dir = write_site(CONFIG);
        let config = TagpackConfig::load(&dir.path().join("tagpack.toml")).unwrap();

        let root = crate::utils::path::normalize_path(dir.path());
        assert_eq!(config.root, root);
        assert_eq!(config.site.root, root.join("public"));
        assert_eq!(config.site.scratch, root.join(".tagpack"));
        assert_eq!(config.bundles.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = TagpackConfig::load(&dir.path().join("tagpack.toml")).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_load_rejects_duplicate_names() {
        let dir = write_site(&format!(
            "{CONFIG}\n[[bundle]]\nname = \"site\"\nkind = \"script\"\noutput = \"~/x.js\"\nassets = [\"~/x.js\"]\n"
        ));
        let err = TagpackConfig::load(&dir.path().join("tagpack.toml")).unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err:?}");
        };
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].message.contains("duplicate bundle `site`"));
    }

    #[test]
    fn test_load_missing_site_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tagpack.toml"), CONFIG).unwrap();
        let err = TagpackConfig::load(&dir.path().join("tagpack.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Diagnostics(_))
        ));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\nroot = \"public\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = TagpackConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.root, PathBuf::from("public"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_unknown_bundle_fields_detected() {
        let content = r#"
[render]
hash_kee = "v"

[[bundle]]
name = "site"
kind = "script"
output = "~/site.js"
assets = ["~/js/a.js"]
atributes = { defer = "defer" }
"#;
        let (config, ignored) = TagpackConfig::parse_with_ignored(content).unwrap();

        assert!(ignored.iter().any(|f| f == "render.hash_kee"));
        assert!(
            ignored.iter().any(|f| f.starts_with("bundle") && f.ends_with("atributes")),
            "bundle typo not reported: {ignored:?}"
        );
        assert!(config.bundles[0].attributes.is_empty());
        assert_eq!(config.bundles[0].assets, vec!["~/js/a.js"]);
    }

    #[test]
    fn test_context_follows_config() {
        let dir = write_site(CONFIG);
        let config = TagpackConfig::load(&dir.path().join("tagpack.toml")).unwrap();
        let ctx = config.context();

        assert_eq!(ctx.mapper().root(), config.site.root);
        assert_eq!(ctx.mapper().virtual_root(), "/app/");
        assert_eq!(ctx.default_mode(), RenderMode::Debug);
        assert_eq!(ctx.lock_timeout(), config.render.lock_timeout());
    }

    #[test]
    fn test_select_bundles() {
        let config = test_parse_config(CONFIG);

        let all = config.select(&[]).unwrap();
        assert_eq!(all.len(), 2);

        let theme = config.select(&["theme".to_string()]).unwrap();
        assert_eq!(theme.len(), 1);
        assert_eq!(theme[0].name, "theme");

        let err = config.select(&["nope".to_string()]).unwrap_err();
        assert!(err.to_string().contains("unknown bundle `nope`"));
    }
}
