//! Content hashing for cache-busting using blake3.
//!
//! The digest always runs over the exact bytes that will be served, so the
//! fingerprint changes if and only if the served content changes.

use std::fmt;

/// Length of the fingerprint embedded in URLs.
pub const FINGERPRINT_LEN: usize = 16;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hash a byte slice in one shot.
    #[inline]
    pub fn of(data: impl AsRef<[u8]>) -> Self {
        Self(*blake3::hash(data.as_ref()).as_bytes())
    }

    /// Get the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// Short URL-safe fingerprint (lowercase hex).
    pub fn fingerprint(self) -> String {
        hex::encode(&self.0[..FINGERPRINT_LEN / 2])
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

/// Produces the digest embedded in bundle URLs.
pub trait ContentHasher: Send + Sync {
    fn hash(&self, content: &str) -> String;
}

/// Default hasher: first 16 hex characters of the blake3 digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl ContentHasher for Blake3Hasher {
    fn hash(&self, content: &str) -> String {
        ContentHash::of(content).fingerprint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_display() {
        let hash = ContentHash::new([0xab; 32]);
        assert_eq!(format!("{}", hash), "abababababababab");
    }

    #[test]
    fn test_fingerprint_is_prefix_of_hex() {
        let hash = ContentHash::of("body{color:red}");
        assert!(hash.to_hex().starts_with(&hash.fingerprint()));
        assert_eq!(hash.fingerprint().len(), FINGERPRINT_LEN);
    }

    #[test]
    fn test_hasher_is_deterministic() {
        let hasher = Blake3Hasher;
        let content = "var a=1;var b=2;";
        assert_eq!(hasher.hash(content), hasher.hash(content));
        assert!(
            hasher
                .hash(content)
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_hasher_single_byte_change() {
        let hasher = Blake3Hasher;
        assert_ne!(hasher.hash("var a=1;"), hasher.hash("var a=2;"));
        assert_ne!(hasher.hash(""), hasher.hash(" "));
    }
}
