//! Injected query cache for repeated dashboard reads.
//!
//! Explicit service object rather than a module-global: whoever needs
//! caching receives a handle, and mutating call sites invalidate by key
//! prefix. Entries carry their own deadline so a stale hit is never served.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;
use serde_json::Value;

struct Entry {
    value: Value,
    expires_at: Instant,
}

pub struct QueryCache {
    entries: Mutex<LruCache<String, Entry>>,
    ttl: Duration,
}

impl QueryCache {
    /// A zero `capacity` is clamped to one entry.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let mut guard = self.entries.lock().expect("cache mutex poisoned");
        match guard.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                guard.pop(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: impl Into<String>, value: Value) {
        let mut guard = self.entries.lock().expect("cache mutex poisoned");
        guard.put(
            key.into(),
            Entry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop every entry whose key starts with `prefix`.
    pub fn invalidate_prefix(&self, prefix: &str) {
        let mut guard = self.entries.lock().expect("cache mutex poisoned");
        let stale: Vec<String> = guard
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in stale {
            guard.pop(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_returns_cached_value_within_ttl() {
        let cache = QueryCache::new(8, Duration::from_secs(60));
        cache.put("dashboard:bedrijf:u-1", json!({ "open": 2 }));
        assert_eq!(
            cache.get("dashboard:bedrijf:u-1"),
            Some(json!({ "open": 2 }))
        );
    }

    #[test]
    fn expired_entries_are_evicted_on_read() {
        let cache = QueryCache::new(8, Duration::from_millis(0));
        cache.put("dashboard:bedrijf:u-1", json!(1));
        assert_eq!(cache.get("dashboard:bedrijf:u-1"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_prefix_removes_matching_keys_only() {
        let cache = QueryCache::new(8, Duration::from_secs(60));
        cache.put("dashboard:bedrijf:u-1", json!(1));
        cache.put("dashboard:bedrijf:u-2", json!(2));
        cache.put("opdrachten:open", json!(3));

        cache.invalidate_prefix("dashboard:bedrijf:");

        assert_eq!(cache.get("dashboard:bedrijf:u-1"), None);
        assert_eq!(cache.get("dashboard:bedrijf:u-2"), None);
        assert_eq!(cache.get("opdrachten:open"), Some(json!(3)));
    }

    #[test]
    fn capacity_bounds_resident_entries() {
        let cache = QueryCache::new(2, Duration::from_secs(60));
        cache.put("a", json!(1));
        cache.put("b", json!(2));
        cache.put("c", json!(3));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), None);
    }
}
