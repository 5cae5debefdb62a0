//! In-memory store with automatic serialization.

use crate::{CacheError, CacheKey};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

/// Type-safe in-memory cache.
///
/// Values are stored as JSON for any type that implements `Serialize` and
/// `DeserializeOwned`. Writes replace only the entry under their own key, so
/// a late write can never clobber a result for a different key.
#[derive(Debug, Default)]
pub struct Store {
    entries: HashMap<CacheKey, serde_json::Value>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Result<Option<T>, CacheError> {
        match self.entries.get(key) {
            Some(value) => {
                let value: T = serde_json::from_value(value.clone())?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing any previous entry for the key.
    pub fn set<T: Serialize>(&mut self, key: &CacheKey, value: &T) -> Result<(), CacheError> {
        let value = serde_json::to_value(value)?;
        self.entries.insert(key.clone(), value);
        Ok(())
    }

    /// Delete a value from the cache. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Get all keys currently in the cache.
    pub fn keys(&self) -> Vec<CacheKey> {
        self.entries.keys().cloned().collect()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry named by a mutation's declared invalidation set.
    ///
    /// Missing keys are tolerated, so a set can over-declare.
    pub fn invalidate<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = CacheKey>,
    {
        let mut dropped = 0;
        for key in keys {
            if self.entries.remove(&key).is_some() {
                dropped += 1;
            }
        }
        dropped
    }

    /// Clear the entire store.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cache_key, EntityKind};

    #[test]
    fn test_set_and_get() {
        let mut store = Store::new();
        let key = cache_key!(EntityKind::ProductCustom, "pc-1");

        store.set(&key, &15000i64).unwrap();
        let value: Option<i64> = store.get(&key).unwrap();
        assert_eq!(value, Some(15000));
    }

    #[test]
    fn test_get_missing_key() {
        let store = Store::new();
        let key = cache_key!(EntityKind::ProductCustom, "absent");
        let value: Option<i64> = store.get(&key).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_overwrite_is_per_key() {
        let mut store = Store::new();
        let first = cache_key!(EntityKind::ProductCustom, "pc-1");
        let second = cache_key!(EntityKind::ProductCustom, "pc-2");

        store.set(&first, &100i64).unwrap();
        store.set(&second, &200i64).unwrap();
        // A later write for pc-1 replaces pc-1 only.
        store.set(&first, &150i64).unwrap();

        assert_eq!(store.get::<i64>(&first).unwrap(), Some(150));
        assert_eq!(store.get::<i64>(&second).unwrap(), Some(200));
    }

    #[test]
    fn test_delete() {
        let mut store = Store::new();
        let key = cache_key!(EntityKind::Endow, "e-1");

        store.set(&key, &"gift wrap").unwrap();
        assert!(store.exists(&key));
        assert!(store.delete(&key));
        assert!(!store.exists(&key));
        assert!(!store.delete(&key));
    }

    #[test]
    fn test_invalidate_tolerates_missing_keys() {
        let mut store = Store::new();
        let present = cache_key!(EntityKind::ItemList, "variant-1");
        let absent = cache_key!(EntityKind::Statistics, "variant-1");

        store.set(&present, &vec!["item-1"]).unwrap();
        let dropped = store.invalidate(vec![present.clone(), absent]);

        assert_eq!(dropped, 1);
        assert!(store.is_empty());
    }
}
