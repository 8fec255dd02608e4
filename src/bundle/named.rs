//! Named bundles: render once at startup, emit by name afterwards.
//!
//! `as_named` / `as_cached` snapshot the group map under `prefix:name`.
//! The `render_*` methods restore that snapshot into the calling bundle
//! before answering, so any bundle instance of the same kind can serve it.

use super::Bundle;
use crate::core::{BundleError, Result};
use crate::render::{CacheRenderer, FileRenderer};

impl Bundle {
    /// Render to `destination` and register the result under `name`.
    pub fn as_named(&self, name: &str, destination: &str) -> Result<()> {
        self.render_with(Some(destination), name, &FileRenderer)?;
        self.ctx.store_named(&self.cache_key(name), self.groups.clone());
        Ok(())
    }

    /// Like [`as_named`](Self::as_named), but keep the artifact in memory
    /// instead of writing it. Returns the tags.
    pub fn as_cached(&self, name: &str, destination: &str) -> Result<String> {
        let tags = self.render_with(Some(destination), name, &self.cache_renderer(name))?;
        self.ctx.store_named(&self.cache_key(name), self.groups.clone());
        Ok(tags)
    }

    /// Tags of a bundle registered with `as_named`.
    pub fn render_named(&mut self, name: &str) -> Result<String> {
        let key = self.restore(name)?;
        self.ctx
            .cache()
            .try_get(&key)
            .ok_or(BundleError::NotCached(key))
    }

    /// Artifact content of a bundle registered with `as_cached`.
    pub fn render_cached(&mut self, name: &str) -> Result<String> {
        let key = self.restore(name)?;
        self.ctx
            .raw_content()
            .get(&key)
            .ok_or(BundleError::NotCached(key))
    }

    /// Tags of a bundle registered with `as_cached`, re-rendering into the
    /// in-memory store from the recorded destinations if needed.
    pub fn render_cached_asset_tag(&mut self, name: &str) -> Result<String> {
        self.restore(name)?;
        self.render_with(None, name, &self.cache_renderer(name))
    }

    fn cache_renderer(&self, name: &str) -> CacheRenderer {
        CacheRenderer::new(self.ctx.raw_content().clone(), self.cache_key(name))
    }

    /// Replace this bundle's groups with the snapshot stored under `name`.
    fn restore(&mut self, name: &str) -> Result<String> {
        let key = self.cache_key(name);
        self.groups = self
            .ctx
            .named(&key)
            .ok_or_else(|| BundleError::RegistryMiss(key.clone()))?;
        Ok(key)
    }
}
