//! Shared Store
//!
//! Coarse-lock wrapper that lets several threads use one [`SimpleLru`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{CacheStats, SimpleLru};
use crate::config::Config;
use crate::storage::Storage;

// == Shared Store ==
/// Cloneable handle to a [`SimpleLru`] guarded by a single mutex.
///
/// Every operation holds the lock for its whole duration, so operations on
/// the same store are fully serialized. `get` reorders entries, which is why
/// a plain mutex is used rather than a read-write lock.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<SimpleLru>>,
}

impl SharedStore {
    pub fn new(max_size: usize) -> Self {
        Self::from_lru(SimpleLru::new(max_size))
    }

    pub fn from_config(config: &Config) -> Self {
        Self::from_lru(SimpleLru::from_config(config))
    }

    pub fn from_lru(lru: SimpleLru) -> Self {
        Self {
            inner: Arc::new(Mutex::new(lru)),
        }
    }

    pub fn put(&self, key: &[u8], value: &[u8]) -> bool {
        self.lock().put(key, value)
    }

    pub fn put_if_absent(&self, key: &[u8], value: &[u8]) -> bool {
        self.lock().put_if_absent(key, value)
    }

    pub fn set(&self, key: &[u8], value: &[u8]) -> bool {
        self.lock().set(key, value)
    }

    pub fn delete(&self, key: &[u8]) -> bool {
        self.lock().delete(key)
    }

    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.lock().get(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The engine never panics halfway through a mutation, so a poisoned lock
    // still guards a consistent cache.
    fn lock(&self) -> MutexGuard<'_, SimpleLru> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for SharedStore {
    fn put(&mut self, key: &[u8], value: &[u8]) -> bool {
        SharedStore::put(self, key, value)
    }

    fn put_if_absent(&mut self, key: &[u8], value: &[u8]) -> bool {
        SharedStore::put_if_absent(self, key, value)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> bool {
        SharedStore::set(self, key, value)
    }

    fn delete(&mut self, key: &[u8]) -> bool {
        SharedStore::delete(self, key)
    }

    fn get(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        SharedStore::get(self, key)
    }
}
