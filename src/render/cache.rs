use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;

use super::Renderer;
use crate::core::Result;
use crate::debug;

/// Rendered artifacts kept in memory, keyed by `prefix:name`.
#[derive(Debug, Clone, Default)]
pub struct RawContentStore {
    entries: Arc<DashMap<String, String>>,
}

impl RawContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|r| r.value().clone())
    }

    pub fn insert(&self, key: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(key.into(), content.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

/// Stores content under a fixed key; the destination is ignored.
#[derive(Debug, Clone)]
pub struct CacheRenderer {
    store: RawContentStore,
    key: String,
}

impl CacheRenderer {
    pub fn new(store: RawContentStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

impl Renderer for CacheRenderer {
    fn render(&self, content: &str, _destination: &Path) -> Result<()> {
        self.store.insert(self.key.as_str(), content);
        debug!("render"; "cached {} ({} bytes)", self.key, content.len());
        Ok(())
    }
}
