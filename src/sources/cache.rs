//! Short-TTL read-through cache for registrant metadata
//!
//! Constructed once and injected into whatever needs it; entries are
//! immutable once written, so concurrent readers are safe. Expired entries
//! are dropped lazily on read and can be swept explicitly.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    inserted_at: Instant,
    value: V,
}

/// A TTL-bounded key/value cache
pub struct TtlCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Default five-minute TTL used for registrant metadata
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(300))
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                tracing::debug!(key = %key, "registrant cache hit");
                Some(entry.value.clone())
            }
            Some(_) => {
                tracing::debug!(key = %key, "registrant cache entry expired");
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.insert(
            key.into(),
            CacheEntry {
                inserted_at: Instant::now(),
                value,
            },
        );
    }

    /// Drop every expired entry
    pub fn sweep(&self) {
        let ttl = self.ttl;
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(60));
        cache.insert("1000123", "Santander Drive".to_string());
        assert_eq!(cache.get("1000123").as_deref(), Some("Santander Drive"));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_expiry() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_millis(0));
        cache.insert("k", 1);
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(cache.get("k"), None);

        cache.sweep();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_overwrite_refreshes() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("k", 1);
        cache.insert("k", 2);
        assert_eq!(cache.get("k"), Some(2));
        assert_eq!(cache.len(), 1);
    }
}
