//! TtlCache - expiring JSON payloads on top of a KeyValueStore

use super::{KeyValueStore, StoreError};
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix for every key the cache owns
pub const CACHE_PREFIX: &str = "api_cache_";

/// One hour
pub const DEFAULT_TTL_MS: i64 = 3_600_000;

/// Stored form of a cached payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Value,
    /// Unix time in milliseconds after which the entry is stale
    pub expiry: i64,
}

/// Expiring cache; never stores empty payloads
#[derive(Debug, Clone)]
pub struct TtlCache<S> {
    store: S,
    ttl: Duration,
}

impl<S: KeyValueStore> TtlCache<S> {
    pub fn new(store: S) -> Self {
        Self::with_ttl(store, Duration::milliseconds(DEFAULT_TTL_MS))
    }

    pub fn with_ttl(store: S, ttl: Duration) -> Self {
        TtlCache { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Fetch a live entry; stale entries are removed
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, StoreError> {
        self.get_at(key, Utc::now())
    }

    pub fn get_at<T: DeserializeOwned>(
        &mut self,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<T>, StoreError> {
        let full_key = prefixed(key);
        let Some(raw) = self.store.get(&full_key)? else {
            return Ok(None);
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(key, error = %e, "dropping unreadable cache entry");
                self.store.remove(&full_key)?;
                return Ok(None);
            }
        };

        if now.timestamp_millis() > entry.expiry {
            tracing::debug!(key, "cache entry expired");
            self.store.remove(&full_key)?;
            return Ok(None);
        }

        Ok(Some(serde_json::from_value(entry.data)?))
    }

    /// Cache `data` with the default TTL; returns whether it was stored
    pub fn set<T: Serialize>(&mut self, key: &str, data: &T) -> Result<bool, StoreError> {
        self.set_at(key, data, self.ttl, Utc::now())
    }

    pub fn set_with_ttl<T: Serialize>(
        &mut self,
        key: &str,
        data: &T,
        ttl: Duration,
    ) -> Result<bool, StoreError> {
        self.set_at(key, data, ttl, Utc::now())
    }

    /// Empty payloads are refused and evict whatever was cached under `key`
    pub fn set_at<T: Serialize>(
        &mut self,
        key: &str,
        data: &T,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let full_key = prefixed(key);
        let data = serde_json::to_value(data)?;
        if is_empty_payload(&data) {
            tracing::warn!(key, "refusing to cache empty payload");
            self.store.remove(&full_key)?;
            return Ok(false);
        }

        let entry = CacheEntry {
            data,
            expiry: (now + ttl).timestamp_millis(),
        };
        self.store.set(&full_key, serde_json::to_string(&entry)?)?;
        Ok(true)
    }

    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.store.remove(&prefixed(key))
    }

    /// Drop every cache entry, leaving other keys alone; returns the count removed
    pub fn clear(&mut self) -> Result<usize, StoreError> {
        let keys: Vec<String> = self
            .store
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(CACHE_PREFIX))
            .collect();
        for key in &keys {
            self.store.remove(key)?;
        }
        Ok(keys.len())
    }
}

fn prefixed(key: &str) -> String {
    format!("{}{}", CACHE_PREFIX, key)
}

fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn test_entry_format() {
        let mut cache = TtlCache::new(MemoryStore::new());
        cache
            .set_at("heroes", &vec!["rehan"], Duration::milliseconds(1000), at(5000))
            .unwrap();

        let raw = cache.store().get("api_cache_heroes").unwrap().unwrap();
        let entry: CacheEntry = serde_json::from_str(&raw).unwrap();
        assert_eq!(entry.expiry, 6000);
        assert_eq!(entry.data, serde_json::json!(["rehan"]));
    }

    #[test]
    fn test_expired_entry_removed_on_read() {
        let mut cache = TtlCache::new(MemoryStore::new());
        let ttl = Duration::milliseconds(DEFAULT_TTL_MS);
        cache.set_at("skills", &vec![1, 2, 3], ttl, at(0)).unwrap();

        let live: Option<Vec<i32>> = cache.get_at("skills", at(DEFAULT_TTL_MS)).unwrap();
        assert_eq!(live, Some(vec![1, 2, 3]));

        let stale: Option<Vec<i32>> = cache.get_at("skills", at(DEFAULT_TTL_MS + 1)).unwrap();
        assert!(stale.is_none());
        assert!(cache.store().is_empty());
    }

    #[test]
    fn test_empty_payloads_never_cached() {
        let mut cache = TtlCache::new(MemoryStore::new());
        assert!(cache.set("list", &vec!["x"]).unwrap());

        let empty: Vec<String> = Vec::new();
        assert!(!cache.set("list", &empty).unwrap());
        assert!(cache.get::<Vec<String>>("list").unwrap().is_none());

        assert!(!cache.set("text", &"   ").unwrap());
        assert!(!cache.set("none", &Option::<u32>::None).unwrap());
        assert!(!cache.set("map", &serde_json::json!({})).unwrap());
        assert!(cache.set("zero", &0).unwrap());
    }

    #[test]
    fn test_clear_only_touches_prefixed_keys() {
        let mut store = MemoryStore::new();
        store.set("planner-config", "{}".to_string()).unwrap();
        let mut cache = TtlCache::new(store);
        cache.set("a", &1).unwrap();
        cache.set("b", &2).unwrap();

        assert_eq!(cache.clear().unwrap(), 2);
        assert_eq!(cache.store().keys().unwrap(), vec!["planner-config"]);
    }

    #[test]
    fn test_unreadable_entry_dropped() {
        let mut store = MemoryStore::new();
        store.set("api_cache_bad", "garbage".to_string()).unwrap();
        let mut cache = TtlCache::new(store);

        assert!(cache.get::<u32>("bad").unwrap().is_none());
        assert!(cache.store().is_empty());
    }
}
