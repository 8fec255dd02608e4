//! Per-key do-once locks.
//!
//! Concurrent first renders of the same cache key serialize on one mutex;
//! renders of different keys never contend.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;

use super::{BundleError, Result};

#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`.
    ///
    /// Waiting is bounded by `timeout`; the closure itself is not.
    pub fn with<T>(&self, key: &str, timeout: Duration, f: impl FnOnce() -> Result<T>) -> Result<T> {
        // Clone the Arc so the shard guard is released before blocking.
        let lock = Arc::clone(
            self.locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );

        let _guard = lock
            .try_lock_for(timeout)
            .ok_or_else(|| BundleError::LockTimeout(key.to_string()))?;
        f()
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    pub fn clear(&self) {
        self.locks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_same_key_is_serialized() {
        let locks = Arc::new(KeyLocks::new());
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let active = Arc::clone(&active);
                let peak = Arc::clone(&peak);
                thread::spawn(move || {
                    locks
                        .with("js:site", Duration::from_secs(5), || {
                            let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                            peak.fetch_max(now, Ordering::SeqCst);
                            thread::sleep(Duration::from_millis(5));
                            active.fetch_sub(1, Ordering::SeqCst);
                            Ok(())
                        })
                        .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert_eq!(locks.len(), 1);
    }

    #[test]
    fn test_timeout_while_held() {
        let locks = KeyLocks::new();
        let result = locks.with("css:site", Duration::from_secs(1), || {
            // Re-entering the same key cannot succeed while the outer guard is held.
            locks.with("css:site", Duration::from_millis(10), || Ok(()))
        });
        assert!(matches!(result, Err(BundleError::LockTimeout(key)) if key == "css:site"));
    }

    #[test]
    fn test_different_keys_do_not_block() {
        let locks = KeyLocks::new();
        let result = locks.with("a", Duration::from_secs(1), || {
            locks.with("b", Duration::from_millis(10), || Ok(42))
        });
        assert_eq!(result.unwrap(), 42);
    }
}
