//! Bundles: registration API and render orchestration.
//!
//! # Module Structure
//!
//! ```text
//! bundle/
//! ├── mod.rs      # Bundle, registration and configuration (this file)
//! ├── render.rs   # cache lookup, do-once lock, debug/release dispatch
//! ├── debug.rs    # one tag per asset
//! ├── release.rs  # concatenate, minify, hash, persist per group
//! └── named.rs    # named bundle registry (as_named, render_named, ...)
//! ```
//!
//! # Example
//!
//! ```ignore
//! let tags = Bundle::javascript(BundleContext::global())
//!     .add("~/js/jquery.js")
//!     .add("~/js/app/*.js")
//!     .add_remote("~/js/analytics.js", "https://cdn.example.com/analytics.js")
//!     .with_attribute("defer", "defer")
//!     .render("~/assets/site_#.js")?;
//! ```

mod debug;
mod named;
mod release;
mod render;

use std::sync::Arc;

use crate::asset::{
    Asset, AssetKind, AssetPolicy, Attributes, DEFAULT_GROUP, GroupMap, Minifier,
};
use crate::core::{BundleContext, RenderMode};

/// Query parameter carrying the hash when it is not part of the file name.
pub const DEFAULT_HASH_KEY: &str = "r";

/// A set of script or style assets, partitioned into groups.
///
/// Registration and configuration methods consume and return the bundle so
/// calls can be chained. Render methods leave the registrations untouched,
/// except the named variants which restore a persisted snapshot first.
pub struct Bundle {
    ctx: Arc<BundleContext>,
    policy: &'static AssetPolicy,
    groups: GroupMap,
    mode: Option<RenderMode>,
    minifier: Option<Arc<dyn Minifier>>,
    hash_key: String,
    only_if_missing: bool,
}

impl Bundle {
    pub fn new(kind: AssetKind, ctx: Arc<BundleContext>) -> Self {
        Self {
            ctx,
            policy: kind.policy(),
            groups: GroupMap::new(),
            mode: None,
            minifier: None,
            hash_key: DEFAULT_HASH_KEY.to_string(),
            only_if_missing: false,
        }
    }

    pub fn javascript(ctx: Arc<BundleContext>) -> Self {
        Self::new(AssetKind::Script, ctx)
    }

    pub fn css(ctx: Arc<BundleContext>) -> Self {
        Self::new(AssetKind::Style, ctx)
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    pub fn add(self, path: impl Into<String>) -> Self {
        self.add_to_group(DEFAULT_GROUP, path)
    }

    pub fn add_all<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_all_to_group(DEFAULT_GROUP, paths)
    }

    pub fn add_to_group(mut self, group: &str, path: impl Into<String>) -> Self {
        self.groups.get_or_insert(group).push(Asset::local(path));
        self
    }

    pub fn add_all_to_group<I, S>(mut self, group: &str, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target = self.groups.get_or_insert(group);
        for path in paths {
            target.push(Asset::local(path));
        }
        self
    }

    /// Served from `url` in release mode, from `local_path` in debug mode.
    pub fn add_remote(self, local_path: impl Into<String>, url: impl Into<String>) -> Self {
        self.add_remote_to_group(DEFAULT_GROUP, local_path, url)
    }

    pub fn add_remote_to_group(
        mut self,
        group: &str,
        local_path: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.groups
            .get_or_insert(group)
            .push(Asset::remote(local_path, url));
        self
    }

    /// Content comes from the embedded resource `resource`.
    pub fn add_embedded_resource(
        mut self,
        local_path: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        self.groups
            .get_or_insert(DEFAULT_GROUP)
            .push(Asset::embedded(local_path, resource));
        self
    }

    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_group_attribute(name, value, DEFAULT_GROUP)
    }

    pub fn with_attributes(self, attributes: Attributes, merge: bool) -> Self {
        self.with_group_attributes(attributes, DEFAULT_GROUP, merge)
    }

    pub fn with_group_attribute(
        self,
        name: impl Into<String>,
        value: impl Into<String>,
        group: &str,
    ) -> Self {
        let attributes = Attributes::from([(name.into(), value.into())]);
        self.with_group_attributes(attributes, group, true)
    }

    pub fn with_group_attributes(mut self, attributes: Attributes, group: &str, merge: bool) -> Self {
        self.groups
            .get_or_insert(group)
            .set_attributes(attributes, merge);
        self
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    pub fn force_debug(mut self) -> Self {
        self.mode = Some(RenderMode::Debug);
        self
    }

    pub fn force_release(mut self) -> Self {
        self.mode = Some(RenderMode::Release);
        self
    }

    /// Use the given mode, or the context default when `None`.
    pub fn with_mode(mut self, mode: Option<RenderMode>) -> Self {
        self.mode = mode;
        self
    }

    /// Reuse an existing output file instead of re-minifying it.
    ///
    /// The hash then reflects whatever is on disk, which may be stale relative
    /// to the sources. Has no effect when the destination contains `#`.
    pub fn render_only_if_output_file_missing(mut self) -> Self {
        self.only_if_missing = true;
        self
    }

    pub fn with_minifier<M: Minifier + 'static>(mut self, minifier: M) -> Self {
        self.minifier = Some(Arc::new(minifier));
        self
    }

    pub fn hash_key_named(mut self, key: impl Into<String>) -> Self {
        self.hash_key = key.into();
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn groups(&self) -> &GroupMap {
        &self.groups
    }

    pub fn policy(&self) -> &'static AssetPolicy {
        self.policy
    }

    pub fn context(&self) -> &Arc<BundleContext> {
        &self.ctx
    }

    /// Effective render mode.
    pub fn mode(&self) -> RenderMode {
        self.mode.unwrap_or_else(|| self.ctx.default_mode())
    }

    fn minifier(&self) -> Arc<dyn Minifier> {
        self.minifier
            .clone()
            .unwrap_or_else(|| (self.policy.default_minifier)())
    }

    /// Drop all rendered output cached in this bundle's context.
    pub fn clear_cache(&self) {
        self.ctx.cache().clear();
    }
}
