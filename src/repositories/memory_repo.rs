use std::num::NonZeroUsize;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use lru::LruCache;
use serde_json::Value;

use crate::config::StorageSettings;
use crate::repositories::{StateStore, StoreError};

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: Value,
    expires_at: Option<DateTime<Utc>>,
}

/// LRU-bounded in-memory state backend. With a TTL of 0 entries live until
/// evicted by capacity, which matches local-storage semantics closely
/// enough for the demos.
pub struct MemoryStore {
    entries: Mutex<LruCache<String, MemoryEntry>>,
    ttl_seconds: u64,
}

impl MemoryStore {
    pub fn new(settings: &StorageSettings) -> Self {
        let capacity = NonZeroUsize::new(settings.memory_cache_entries.max(1))
            .unwrap_or_else(|| NonZeroUsize::new(1).expect("1 is non-zero"));
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl_seconds: settings.memory_ttl_seconds,
        }
    }

    fn expiry(&self) -> Option<DateTime<Utc>> {
        if self.ttl_seconds == 0 {
            None
        } else {
            Some(Utc::now() + Duration::seconds(self.ttl_seconds as i64))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(&StorageSettings {
            sqlite_path: String::new(),
            memory_cache_entries: 256,
            memory_ttl_seconds: 0,
        })
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let mut entries = self.entries.lock().expect("memory store lock poisoned");
        if let Some(entry) = entries.get(key) {
            match entry.expires_at {
                Some(expires_at) if expires_at <= Utc::now() => {}
                _ => return Ok(Some(entry.value.clone())),
            }
        }
        entries.pop(key);
        Ok(None)
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("memory store lock poisoned");
        entries.put(
            key.to_string(),
            MemoryEntry {
                value: value.clone(),
                expires_at: self.expiry(),
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("memory store lock poisoned");
        entries.pop(key);
        Ok(())
    }
}
