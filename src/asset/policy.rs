//! Asset-type policies: what distinguishes a script bundle from a style bundle.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::TagTemplate;
use super::minify::{CssMinifier, JsMinifier, Minifier};

/// Kind of bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Script,
    Style,
}

impl AssetKind {
    pub const fn policy(self) -> &'static AssetPolicy {
        match self {
            Self::Script => &AssetPolicy::SCRIPT,
            Self::Style => &AssetPolicy::STYLE,
        }
    }
}

/// Configuration injected into the shared render orchestrator.
pub struct AssetPolicy {
    pub kind: AssetKind,
    /// Namespace for cache, registry and render-path keys.
    pub cache_prefix: &'static str,
    pub template: TagTemplate,
    pub default_minifier: fn() -> Arc<dyn Minifier>,
}

fn js_minifier() -> Arc<dyn Minifier> {
    Arc::new(JsMinifier)
}

fn css_minifier() -> Arc<dyn Minifier> {
    Arc::new(CssMinifier)
}

impl AssetPolicy {
    pub const SCRIPT: Self = Self {
        kind: AssetKind::Script,
        cache_prefix: "js",
        template: TagTemplate::new(
            r#"<script type="text/javascript" __ATTRIBUTES__src="__PATH__"></script>"#,
        ),
        default_minifier: js_minifier,
    };

    pub const STYLE: Self = Self {
        kind: AssetKind::Style,
        cache_prefix: "css",
        template: TagTemplate::new(
            r#"<link rel="stylesheet" type="text/css" __ATTRIBUTES__href="__PATH__" />"#,
        ),
        default_minifier: css_minifier,
    };
}

impl fmt::Debug for AssetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetPolicy")
            .field("kind", &self.kind)
            .field("cache_prefix", &self.cache_prefix)
            .field("template", &self.template)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults() {
        let script = AssetKind::Script.policy();
        assert_eq!(script.cache_prefix, "js");
        assert_eq!((script.default_minifier)().name(), "oxc");
        assert_eq!(
            script.template.render("", "/a.js"),
            r#"<script type="text/javascript" src="/a.js"></script>"#
        );

        let style = AssetKind::Style.policy();
        assert_eq!(style.cache_prefix, "css");
        assert_eq!((style.default_minifier)().name(), "lightningcss");
        assert_eq!(
            style.template.render("media=\"print\" ", "/a.css"),
            r#"<link rel="stylesheet" type="text/css" media="print" href="/a.css" />"#
        );
    }
}
