//! In-memory bundle cache invalidated by dependent-file stamps.

use std::path::PathBuf;

use dashmap::DashMap;

use super::BundleCache;
use crate::debug;
use crate::freshness::FileStamp;

#[derive(Debug)]
struct CacheEntry {
    content: String,
    stamps: Vec<FileStamp>,
}

impl CacheEntry {
    fn is_fresh(&self) -> bool {
        self.stamps.iter().all(FileStamp::is_current)
    }
}

/// Thread-safe cache for rendered bundles.
#[derive(Debug, Default)]
pub struct MemoryBundleCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryBundleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BundleCache for MemoryBundleCache {
    fn try_get(&self, key: &str) -> Option<String> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_fresh() {
                return Some(entry.content.clone());
            }
        } else {
            return None;
        }

        // Guard above is released; re-check under the shard write lock.
        if self.entries.remove_if(key, |_, e| !e.is_fresh()).is_some() {
            debug!("cache"; "dependency changed, dropped {}", key);
        }
        None
    }

    fn add(&self, key: &str, content: &str, dependent_files: &[PathBuf]) {
        let stamps = dependent_files
            .iter()
            .map(|path| FileStamp::capture(path))
            .collect();
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                content: content.to_string(),
                stamps,
            },
        );
    }

    fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_get_add() {
        let cache = MemoryBundleCache::new();
        assert_eq!(cache.try_get("js:a"), None);

        cache.add("js:a", "<script></script>", &[]);
        assert_eq!(cache.try_get("js:a").as_deref(), Some("<script></script>"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_dependency_change_invalidates() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "var a;").unwrap();

        let cache = MemoryBundleCache::new();
        cache.add("js:a", "tag", std::slice::from_ref(&file));
        assert!(cache.try_get("js:a").is_some());

        fs::write(&file, "var a = 1;").unwrap();
        assert_eq!(cache.try_get("js:a"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let cache = MemoryBundleCache::new();
        cache.add("js:a", "a", &[]);
        cache.add("css:b", "b", &[]);
        cache.clear();
        assert!(cache.is_empty());
    }
}
