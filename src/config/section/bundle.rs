//! `[[bundle]]` entries.
//!
//! # Example
//!
//! ```toml
//! [[bundle]]
//! name = "site"
//! kind = "script"                     # or "style"
//! output = "~/assets/site_#.js"       # `#` becomes the content hash
//! minifier = "default"                # or "none"
//! assets = ["~/js/jquery.js", "~/js/app/*.js"]
//! attributes = { defer = "defer" }
//! remote = [{ local = "~/js/analytics.js", url = "https://cdn.example.com/a.js" }]
//!
//! [bundle.groups.head]                # rendered to site_#.head.js
//! assets = ["~/js/modernizr.js"]
//! attributes = { async = "async" }
//! ```
//!
//! Groups are emitted after the top-level assets, in name order.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::asset::{AssetKind, Attributes, DEFAULT_GROUP, NullMinifier};
use crate::bundle::Bundle;
use crate::config::{ConfigDiagnostics, FieldPath, RenderConfig};
use crate::core::BundleContext;

/// Minifier selection for a bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinifierChoice {
    /// The kind's minifier (oxc for scripts, lightningcss for styles).
    #[default]
    Default,
    /// Concatenate only.
    None,
}

/// Served from `url` in release mode, from `local` in debug mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAssetConfig {
    pub local: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    pub assets: Vec<String>,
    pub attributes: Attributes,
    pub remote: Vec<RemoteAssetConfig>,
}

impl GroupConfig {
    fn asset_count(&self) -> usize {
        self.assets.len() + self.remote.len()
    }

    fn register(&self, bundle: Bundle, name: &str) -> Bundle {
        register_group(bundle, name, &self.assets, &self.remote, &self.attributes)
    }
}

fn register_group(
    mut bundle: Bundle,
    name: &str,
    assets: &[String],
    remote: &[RemoteAssetConfig],
    attributes: &Attributes,
) -> Bundle {
    bundle = bundle.add_all_to_group(name, assets);
    for asset in remote {
        bundle = bundle.add_remote_to_group(name, &asset.local, &asset.url);
    }
    if !attributes.is_empty() {
        bundle = bundle.with_group_attributes(attributes.clone(), name, false);
    }
    bundle
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    pub name: String,
    pub kind: AssetKind,
    pub output: String,
    #[serde(default)]
    pub minifier: MinifierChoice,
    // Top-level assets, attributes and remotes form the default group.
    // Not a flattened `GroupConfig`: serde_ignored cannot see through flatten.
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub remote: Vec<RemoteAssetConfig>,
    #[serde(default)]
    pub groups: BTreeMap<String, GroupConfig>,
}

impl BundleConfig {
    pub const NAME: FieldPath = FieldPath::new("bundle.name");
    pub const OUTPUT: FieldPath = FieldPath::new("bundle.output");
    pub const ASSETS: FieldPath = FieldPath::new("bundle.assets");
    pub const GROUPS: FieldPath = FieldPath::new("bundle.groups");

    /// Build a bundle with every registration from this entry.
    pub fn to_bundle(&self, ctx: Arc<BundleContext>, render: &RenderConfig) -> Bundle {
        let mut bundle = Bundle::new(self.kind, ctx).hash_key_named(&render.hash_key);
        if render.only_if_missing {
            bundle = bundle.render_only_if_output_file_missing();
        }
        if self.minifier == MinifierChoice::None {
            bundle = bundle.with_minifier(NullMinifier);
        }

        bundle = register_group(
            bundle,
            DEFAULT_GROUP,
            &self.assets,
            &self.remote,
            &self.attributes,
        );
        for (name, group) in &self.groups {
            bundle = group.register(bundle, name);
        }
        bundle
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.error(Self::NAME, "bundle name must not be empty");
        }
        if self.output.trim().is_empty() {
            diag.error(Self::OUTPUT, format!("bundle `{}` has no output", self.name));
        }

        let total = self.assets.len()
            + self.remote.len()
            + self.groups.values().map(GroupConfig::asset_count).sum::<usize>();
        if total == 0 {
            diag.error_with_hint(
                Self::ASSETS,
                format!("bundle `{}` has no assets", self.name),
                "add `assets = [...]` or a `[bundle.groups.<name>]` table",
            );
        }

        for (name, group) in &self.groups {
            if name == DEFAULT_GROUP {
                diag.error_with_hint(
                    Self::GROUPS,
                    format!("bundle `{}` declares a `{DEFAULT_GROUP}` group", self.name),
                    "top-level `assets` already form the default group",
                );
            } else if name.contains(['/', '\\', '?', '#', '.']) {
                diag.error(
                    Self::GROUPS,
                    format!("group `{name}` in bundle `{}` cannot be part of a file name", self.name),
                );
            } else if group.asset_count() == 0 {
                diag.warn(
                    Self::GROUPS,
                    format!("group `{name}` in bundle `{}` has no assets", self.name),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    const SITE: &str = r#"
[[bundle]]
name = "site"
kind = "script"
output = "~/assets/site_#.js"
assets = ["~/js/a.js", "~/js/b.js"]
attributes = { defer = "defer" }
remote = [{ local = "~/js/jq.js", url = "https://cdn.example.com/jq.js" }]

[bundle.groups.head]
assets = ["~/js/head.js"]
attributes = { async = "async" }
"#;

    #[test]
    fn test_bundle_config_parse() {
        let config = test_parse_config(SITE);
        assert_eq!(config.bundles.len(), 1);

        let bundle = &config.bundles[0];
        assert_eq!(bundle.name, "site");
        assert_eq!(bundle.kind, AssetKind::Script);
        assert_eq!(bundle.minifier, MinifierChoice::Default);
        assert_eq!(bundle.assets, vec!["~/js/a.js", "~/js/b.js"]);
        assert_eq!(bundle.remote[0].url, "https://cdn.example.com/jq.js");
        assert_eq!(bundle.groups["head"].assets, vec!["~/js/head.js"]);
    }

    #[test]
    fn test_bundle_config_to_bundle() {
        let config = test_parse_config(SITE);
        let ctx = BundleContext::new("/srv/www");
        let bundle = config.bundles[0].to_bundle(ctx, &config.render);

        let groups: Vec<_> = bundle.groups().iter().collect();
        assert_eq!(groups.len(), 2);

        let (name, default) = groups[0];
        assert_eq!(name, DEFAULT_GROUP);
        assert_eq!(default.assets().len(), 3);
        assert!(default.assets()[2].is_remote());
        assert_eq!(default.attribute_string(), "defer=\"defer\" ");

        let (name, head) = groups[1];
        assert_eq!(name, "head");
        assert_eq!(head.attribute_string(), "async=\"async\" ");
    }

    #[test]
    fn test_bundle_config_validation() {
        let config = test_parse_config(
            r#"
[[bundle]]
name = ""
kind = "style"
output = ""

[bundle.groups.default]
assets = []

[bundle.groups."print.css"]
assets = ["~/css/print.css"]
"#,
        );
        let mut diag = ConfigDiagnostics::new();
        config.bundles[0].validate(&mut diag);

        // name, output, default group, bad group name
        assert_eq!(diag.len(), 4);
    }

    #[test]
    fn test_bundle_config_empty_group_warns() {
        let config = test_parse_config(
            r#"
[[bundle]]
name = "site"
kind = "style"
output = "~/site.css"
assets = ["~/css/a.css"]

[bundle.groups.print]
"#,
        );
        let mut diag = ConfigDiagnostics::new();
        config.bundles[0].validate(&mut diag);
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_bundle_config_requires_kind() {
        let result: Result<crate::config::TagpackConfig, _> =
            toml::from_str("[[bundle]]\nname = \"x\"\noutput = \"~/x.js\"");
        assert!(result.is_err());
    }
}
