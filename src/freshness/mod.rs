//! Freshness: content hashes for cache-busting, file stamps for invalidation.

mod hash;
mod mtime;

pub use hash::{Blake3Hasher, ContentHash, ContentHasher, FINGERPRINT_LEN};
pub use mtime::FileStamp;
