//! Shared render state.
//!
//! Everything that must outlive a single `Bundle` lives here:
//! - bundle cache (rendered output, invalidated by dependent files)
//! - named bundle registry (group map snapshots)
//! - render-path cache (destinations remembered per group and key)
//! - raw content store (artifacts written by the cache renderer)
//! - per-key locks for do-once rendering
//!
//! A process normally uses [`BundleContext::global`]. Tests and embedders
//! build their own context and pass it to each bundle.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use dashmap::DashMap;

use super::{KeyLocks, RenderMode};
use crate::asset::GroupMap;
use crate::cache::{BundleCache, MemoryBundleCache};
use crate::freshness::{Blake3Hasher, ContentHasher};
use crate::render::RawContentStore;
use crate::resolve::{EmbeddedResolver, FileResolver, RemoteResolver, Resolver, Resolvers};
use crate::utils::path::{PathMapper, normalize_path};

/// Default bound on waiting for another caller's render of the same key.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(30);

/// Process-wide default context rooted at the current directory.
static GLOBAL_CONTEXT: LazyLock<Arc<BundleContext>> =
    LazyLock::new(|| BundleContext::builder(normalize_path(Path::new("."))).build());

pub struct BundleContext {
    mapper: PathMapper,
    resolvers: Resolvers,
    hasher: Arc<dyn ContentHasher>,
    cache: Arc<dyn BundleCache>,
    raw: RawContentStore,
    named: DashMap<String, GroupMap>,
    render_paths: DashMap<String, String>,
    locks: KeyLocks,
    default_mode: RenderMode,
    lock_timeout: Duration,
}

impl BundleContext {
    pub fn builder(root: impl Into<PathBuf>) -> BundleContextBuilder {
        BundleContextBuilder::new(root)
    }

    /// Context with default collaborators rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Arc<Self> {
        Self::builder(root).build()
    }

    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_CONTEXT)
    }

    pub fn mapper(&self) -> &PathMapper {
        &self.mapper
    }

    pub fn resolvers(&self) -> &Resolvers {
        &self.resolvers
    }

    pub fn hasher(&self) -> &dyn ContentHasher {
        self.hasher.as_ref()
    }

    pub fn cache(&self) -> &dyn BundleCache {
        self.cache.as_ref()
    }

    pub fn raw_content(&self) -> &RawContentStore {
        &self.raw
    }

    pub fn locks(&self) -> &KeyLocks {
        &self.locks
    }

    pub fn default_mode(&self) -> RenderMode {
        self.default_mode
    }

    pub fn lock_timeout(&self) -> Duration {
        self.lock_timeout
    }

    /// Snapshot a group map under a registry key.
    pub fn store_named(&self, key: &str, groups: GroupMap) {
        self.named.insert(key.to_string(), groups);
    }

    pub fn named(&self, key: &str) -> Option<GroupMap> {
        self.named.get(key).map(|r| r.value().clone())
    }

    /// Remember the destination used for a group render.
    pub fn remember_render_path(&self, key: &str, destination: &str) {
        self.render_paths
            .insert(key.to_string(), destination.to_string());
    }

    pub fn render_path(&self, key: &str) -> Option<String> {
        self.render_paths.get(key).map(|r| r.value().clone())
    }

    /// Forget everything rendered or registered through this context.
    pub fn reset(&self) {
        self.cache.clear();
        self.raw.clear();
        self.named.clear();
        self.render_paths.clear();
        self.locks.clear();
    }
}

pub struct BundleContextBuilder {
    root: PathBuf,
    virtual_root: String,
    resolvers: Resolvers,
    hasher: Arc<dyn ContentHasher>,
    cache: Arc<dyn BundleCache>,
    default_mode: RenderMode,
    lock_timeout: Duration,
}

impl BundleContextBuilder {
    fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let embedded = EmbeddedResolver::new(root.join(".tagpack").join("embedded"));
        Self {
            resolvers: Resolvers::new(
                Arc::new(FileResolver),
                Arc::new(RemoteResolver),
                Arc::new(embedded),
            ),
            root,
            virtual_root: "/".to_string(),
            hasher: Arc::new(Blake3Hasher),
            cache: Arc::new(MemoryBundleCache::new()),
            default_mode: RenderMode::Release,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// URL prefix that `~/` expands to.
    pub fn virtual_root(mut self, virtual_root: impl Into<String>) -> Self {
        self.virtual_root = virtual_root.into();
        self
    }

    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn hasher(mut self, hasher: Arc<dyn ContentHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn cache(mut self, cache: Arc<dyn BundleCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn file_resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolvers.set_file(resolver);
        self
    }

    pub fn remote_resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolvers.set_remote(resolver);
        self
    }

    pub fn embedded_resolver(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolvers.set_embedded(resolver);
        self
    }

    pub fn build(self) -> Arc<BundleContext> {
        Arc::new(BundleContext {
            mapper: PathMapper::new(self.root, &self.virtual_root),
            resolvers: self.resolvers,
            hasher: self.hasher,
            cache: self.cache,
            raw: RawContentStore::new(),
            named: DashMap::new(),
            render_paths: DashMap::new(),
            locks: KeyLocks::new(),
            default_mode: self.default_mode,
            lock_timeout: self.lock_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Asset, DEFAULT_GROUP};

    #[test]
    fn test_builder_defaults() {
        let ctx = BundleContext::new("/srv/www");
        assert_eq!(ctx.mapper().root(), Path::new("/srv/www"));
        assert_eq!(ctx.mapper().virtual_root(), "/");
        assert_eq!(ctx.default_mode(), RenderMode::Release);
        assert_eq!(ctx.lock_timeout(), DEFAULT_LOCK_TIMEOUT);
    }

    #[test]
    fn test_registry_and_render_paths() {
        let ctx = BundleContext::builder("/srv/www")
            .virtual_root("/app")
            .mode(RenderMode::Debug)
            .build();
        assert_eq!(ctx.mapper().virtual_root(), "/app/");

        let mut groups = GroupMap::new();
        groups
            .get_or_insert(DEFAULT_GROUP)
            .push(Asset::local("~/a.js"));
        ctx.store_named("js:site", groups.clone());
        assert_eq!(ctx.named("js:site"), Some(groups));
        assert_eq!(ctx.named("js:other"), None);

        ctx.remember_render_path("js.default.site", "~/out.js");
        assert_eq!(ctx.render_path("js.default.site").as_deref(), Some("~/out.js"));

        ctx.reset();
        assert_eq!(ctx.named("js:site"), None);
        assert_eq!(ctx.render_path("js.default.site"), None);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(Arc::ptr_eq(&BundleContext::global(), &BundleContext::global()));
    }
}
