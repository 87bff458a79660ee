// In-memory TTL cache for API responses, keyed by URL.
// Shared process-wide through the fetcher; entries expire after a fixed
// window and there is no other eviction (the URL set is small and finite).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;

/// How long a cached response stays fresh: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// URL-keyed response cache with a fixed time-to-live.
pub struct MemoryCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Look up a fresh entry. Expired entries are treated as absent.
    pub fn get(&self, url: &str) -> Option<Value> {
        let entry = self.entries.get(url)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Store a response, stamping the current time.
    pub fn insert(&mut self, url: &str, value: Value) {
        self.entries.insert(
            url.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Evict the entry for a URL (manual refetch).
    pub fn invalidate(&mut self, url: &str) {
        self.entries.remove(url);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fresh_entry_is_returned() {
        let mut cache = MemoryCache::new();
        let value = json!([{ "id": 1, "name": "Homer" }]);

        cache.insert("https://example.com/characters", value.clone());

        // Within the TTL the stored value comes back as-is.
        let hit = cache.get("https://example.com/characters");
        assert_eq!(hit, Some(value));
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let mut cache = MemoryCache::with_ttl(Duration::ZERO);
        cache.insert("https://example.com/episodes", json!([]));

        assert!(cache.get("https://example.com/episodes").is_none());
        // The entry is still present, just stale.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_evicts_one_url() {
        let mut cache = MemoryCache::new();
        cache.insert("a", json!(1));
        cache.insert("b", json!(2));

        cache.invalidate("a");

        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b"), Some(json!(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unknown_url_is_a_miss() {
        let cache = MemoryCache::new();
        assert!(cache.get("https://example.com/nope").is_none());
        assert!(cache.is_empty());
    }
}
