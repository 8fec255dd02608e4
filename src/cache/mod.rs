//! Bundle cache: rendered output keyed by render key.
//!
//! Each entry remembers the files its render pass read. The default
//! [`MemoryBundleCache`] drops an entry as soon as any of them changes.

mod memory;

use std::path::PathBuf;

pub use memory::MemoryBundleCache;

pub trait BundleCache: Send + Sync {
    fn try_get(&self, key: &str) -> Option<String>;

    fn add(&self, key: &str, content: &str, dependent_files: &[PathBuf]);

    /// Drop every entry (test isolation).
    fn clear(&self);
}
