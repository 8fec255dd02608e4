//! Render dispatch: cache lookup, do-once locking, debug/release selection.

use std::fs;
use std::path::{Path, PathBuf};

use super::Bundle;
use crate::asset::Asset;
use crate::core::{BundleError, RenderMode, Result};
use crate::debug;
use crate::render::{FileRenderer, Renderer};
use crate::resolve::{InputFile, ResolverKind};

impl Bundle {
    /// Render the bundle's tags for `destination`.
    ///
    /// In release mode `destination` names the output file (`~/` expands to
    /// the virtual root; a `#` is replaced by the content hash). In debug mode
    /// it is only part of the cache key.
    pub fn render(&self, destination: &str) -> Result<String> {
        let key = self.ad_hoc_key(destination);
        self.render_with(Some(destination), &key, &FileRenderer)
    }

    /// Key for renders that are not named: destination plus everything that
    /// changes the output.
    fn ad_hoc_key(&self, destination: &str) -> String {
        format!(
            "{destination}|{}|{}|{}|{}|{}",
            self.mode(),
            self.hash_key,
            self.minifier().name(),
            self.only_if_missing,
            self.groups.fingerprint(),
        )
    }

    /// Namespaced bundle-cache and registry key.
    pub(super) fn cache_key(&self, key: &str) -> String {
        format!("{}:{}", self.policy.cache_prefix, key)
    }

    /// Render-path cache key for one group.
    pub(super) fn render_path_key(&self, group: &str, key: &str) -> String {
        format!("{}.{group}.{key}", self.policy.cache_prefix)
    }

    pub(super) fn render_with(
        &self,
        destination: Option<&str>,
        key: &str,
        renderer: &dyn Renderer,
    ) -> Result<String> {
        let cache_key = self.cache_key(key);
        let cache = self.ctx.cache();

        if let Some(content) = cache.try_get(&cache_key) {
            debug!("cache"; "hit {}", cache_key);
            return Ok(content);
        }

        self.ctx
            .locks()
            .with(&cache_key, self.ctx.lock_timeout(), || {
                // Another caller may have rendered while we waited.
                if let Some(content) = cache.try_get(&cache_key) {
                    debug!("cache"; "hit {} after wait", cache_key);
                    return Ok(content);
                }

                let mode = self.mode();
                debug!("render"; "{} {}", mode, cache_key);
                if self.groups.has_no_assets() {
                    debug!("render"; "{} has no assets", cache_key);
                }

                let mut pass = RenderPass::new(self);
                let content = match mode {
                    RenderMode::Debug => pass.debug()?,
                    RenderMode::Release => pass.release(destination, key, renderer)?,
                };

                cache.add(&cache_key, &content, &pass.dependent_files);
                Ok(content)
            })
    }
}

/// State of one render: the files read so far.
pub(super) struct RenderPass<'a> {
    pub(super) bundle: &'a Bundle,
    pub(super) dependent_files: Vec<PathBuf>,
}

impl<'a> RenderPass<'a> {
    fn new(bundle: &'a Bundle) -> Self {
        Self {
            bundle,
            dependent_files: Vec::new(),
        }
    }

    /// Resolve a local or embedded asset and record the files as dependencies.
    pub(super) fn resolve(&mut self, asset: &Asset) -> Result<Vec<PathBuf>> {
        let ctx = &self.bundle.ctx;
        let input = InputFile::for_asset(asset, ctx.mapper());
        let files = ctx.resolvers().resolve(&input)?;
        if files.is_empty() {
            debug!("resolve"; "{} matched nothing", asset.local_path());
        }
        self.dependent_files.extend(files.iter().cloned());
        Ok(files)
    }

    /// Resolve the local copy of a remote asset, for invalidation only.
    pub(super) fn track_local_copy(&mut self, asset: &Asset) -> Result<()> {
        let ctx = &self.bundle.ctx;
        let path = ctx.mapper().to_file_system(asset.local_path());
        let files = ctx
            .resolvers()
            .get(ResolverKind::File)
            .try_resolve(&path.to_string_lossy())?;
        self.dependent_files.extend(files);
        Ok(())
    }
}

pub(super) fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(BundleError::io(path))
}

/// Concatenate files in order, each followed by `separator`.
pub(super) fn concatenate(files: &[PathBuf], separator: &str) -> Result<String> {
    let mut out = String::new();
    for file in files {
        out.push_str(&read_source(file)?);
        out.push_str(separator);
    }
    Ok(out)
}
