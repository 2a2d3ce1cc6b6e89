//! TTL cache for taxonomy lookups
//!
//! Each lookup list is cached as an immutable `Arc<Vec<T>>` snapshot that is
//! replaced wholesale on refresh. Readers clone the `Arc` under a short read
//! lock and never observe a partially written list.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

struct CacheEntry<T> {
    fetched_at: Instant,
    data: Arc<Vec<T>>,
}

/// Read-through cache with a fixed time-to-live per entry
pub struct TtlCache<K, T> {
    ttl: Duration,
    entries: RwLock<HashMap<K, CacheEntry<T>>>,
}

impl<K, T> TtlCache<K, T>
where
    K: Eq + Hash,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached snapshot for `key` if it has not expired
    pub fn get(&self, key: &K) -> Option<Arc<Vec<T>>> {
        let entries = self.entries.read().expect("cache lock poisoned");
        entries.get(key).and_then(|entry| {
            if entry.fetched_at.elapsed() < self.ttl {
                Some(Arc::clone(&entry.data))
            } else {
                None
            }
        })
    }

    /// Store a fresh snapshot for `key`, replacing any previous entry
    pub fn put(&self, key: K, data: Vec<T>) -> Arc<Vec<T>> {
        let data = Arc::new(data);
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.insert(
            key,
            CacheEntry {
                fetched_at: Instant::now(),
                data: Arc::clone(&data),
            },
        );
        data
    }
}
