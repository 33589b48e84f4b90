//! Cache Store Module
//!
//! Main storage engine combining a key index with the recency list and a
//! byte budget.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::cache::entry::footprint;
use crate::cache::lru::{Handle, RecencyList};
use crate::cache::{CacheStats, Entry};
use crate::config::{Config, DEFAULT_MAX_SIZE};
use crate::error::{Result, StorageError};

// == Simple LRU ==
/// Byte-budgeted key-value cache with least recently used eviction.
///
/// Not thread safe. Wrap it in [`crate::SharedStore`] to share it between
/// threads.
#[derive(Debug)]
pub struct SimpleLru {
    /// Key to slot lookup
    index: HashMap<Vec<u8>, Handle>,
    /// Entries in access order
    order: RecencyList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of bytes (keys plus values) allowed
    max_size: usize,
    /// Bytes currently stored
    cur_size: usize,
}

impl Default for SimpleLru {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

impl SimpleLru {
    // == Constructor ==
    /// Creates an empty cache holding at most `max_size` bytes of keys and values.
    pub fn new(max_size: usize) -> Self {
        info!(max_size, "LRU storage initialized");
        Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            stats: CacheStats::new(max_size),
            max_size,
            cur_size: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_size)
    }

    // == Put ==
    /// Inserts or overwrites `key`, making it the most recently used entry.
    ///
    /// Returns false when the entry alone is larger than the cache; the
    /// stored data is left untouched in that case.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> bool {
        self.try_put(key, value).is_ok()
    }

    /// Like [`SimpleLru::put`] but reports why the write was refused.
    pub fn try_put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_fits(key, value)?;
        match self.index.get(key).copied() {
            Some(handle) => self.update(handle, value),
            None => self.insert(key, value),
        }
    }

    // == Put If Absent ==
    /// Inserts `key` only if it is not stored yet.
    pub fn put_if_absent(&mut self, key: &[u8], value: &[u8]) -> bool {
        self.try_put_if_absent(key, value).unwrap_or(false)
    }

    /// Returns `Ok(false)` when the key is already present.
    pub fn try_put_if_absent(&mut self, key: &[u8], value: &[u8]) -> Result<bool> {
        if self.index.contains_key(key) {
            return Ok(false);
        }
        self.check_fits(key, value)?;
        self.insert(key, value)?;
        Ok(true)
    }

    // == Set ==
    /// Replaces the value of an existing key and marks it most recently used.
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> bool {
        self.try_set(key, value).unwrap_or(false)
    }

    /// Returns `Ok(false)` when the key is absent.
    pub fn try_set(&mut self, key: &[u8], value: &[u8]) -> Result<bool> {
        let Some(handle) = self.index.get(key).copied() else {
            return Ok(false);
        };
        self.check_fits(key, value)?;
        self.update(handle, value)?;
        Ok(true)
    }

    // == Delete ==
    /// Removes `key` without touching the order of other entries.
    pub fn delete(&mut self, key: &[u8]) -> bool {
        let Some(handle) = self.index.remove(key) else {
            return false;
        };
        if let Some(entry) = self.order.remove(handle) {
            self.cur_size -= entry.footprint();
        }
        self.sync_usage();
        true
    }

    // == Get ==
    /// Returns a copy of the value stored under `key` and marks it most
    /// recently used.
    pub fn get(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        let Some(handle) = self.index.get(key).copied() else {
            self.stats.record_miss();
            return None;
        };
        self.order.touch(handle);
        self.stats.record_hit();
        self.order.get(handle).map(|entry| entry.value.clone())
    }

    // == Contains ==
    /// Checks for `key` without counting as a use.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    // == Keys ==
    /// Iterates stored keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.order.iter().map(|entry| entry.key.as_slice())
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn cur_size(&self) -> usize {
        self.cur_size
    }

    /// Rejects entries that cannot fit even in an empty cache.
    fn check_fits(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let size = footprint(key, value);
        if size > self.max_size {
            warn!(
                size,
                max_size = self.max_size,
                "Rejected entry larger than cache capacity"
            );
            return Err(StorageError::EntryTooLarge {
                size,
                max_size: self.max_size,
            });
        }
        Ok(())
    }

    /// Stores a new key as the most recently used entry.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let size = footprint(key, value);
        self.make_room(size, None)?;

        let handle = self.order.push_back(Entry::new(key, value));
        self.index.insert(key.to_vec(), handle);
        self.cur_size += size;
        self.sync_usage();
        Ok(())
    }

    /// Replaces the value behind `handle`, evicting others if it grows.
    fn update(&mut self, handle: Handle, value: &[u8]) -> Result<()> {
        let old_len = self.order.get(handle).map_or(0, |entry| entry.value.len());

        // The updated entry moves to the tail first so the eviction loop only
        // reaches it once every other entry is gone.
        self.order.touch(handle);
        self.make_room(value.len().saturating_sub(old_len), Some(handle))?;

        if let Some(entry) = self.order.get_mut(handle) {
            entry.value.clear();
            entry.value.extend_from_slice(value);
        }
        self.cur_size = self.cur_size - old_len + value.len();
        self.sync_usage();
        Ok(())
    }

    /// Evicts from the least recently used end until `additional` bytes fit.
    ///
    /// `protected` is never evicted; reaching it (or an empty list) first is
    /// reported as [`StorageError::NoEvictableEntry`].
    fn make_room(&mut self, additional: usize, protected: Option<Handle>) -> Result<()> {
        while self.cur_size + additional > self.max_size {
            let victim = match self.order.front() {
                Some(handle) if Some(handle) != protected => handle,
                _ => {
                    return Err(StorageError::NoEvictableEntry {
                        required: additional,
                        max_size: self.max_size,
                    })
                }
            };
            self.evict(victim);
        }
        Ok(())
    }

    fn evict(&mut self, handle: Handle) {
        if let Some(entry) = self.order.remove(handle) {
            self.index.remove(&entry.key);
            let freed = entry.footprint();
            self.cur_size -= freed;
            self.stats.record_eviction();
            debug!(
                freed,
                cur_size = self.cur_size,
                "Evicted least recently used entry"
            );
        }
    }

    fn sync_usage(&mut self) {
        self.stats.set_usage(self.order.len(), self.cur_size);
    }

    /// Panics if the index, the recency list and the byte count disagree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let total: usize = self.order.iter().map(Entry::footprint).sum();
        assert_eq!(self.cur_size, total, "cur_size does not match stored bytes");
        assert!(
            self.cur_size <= self.max_size,
            "cur_size {} exceeds max_size {}",
            self.cur_size,
            self.max_size
        );
        assert_eq!(self.index.len(), self.order.len(), "index/list length mismatch");
        for (key, handle) in &self.index {
            let entry = self.order.get(*handle).expect("index points at a dead slot");
            assert_eq!(&entry.key, key, "index points at the wrong entry");
        }
        for entry in self.order.iter() {
            assert!(self.index.contains_key(&entry.key), "entry missing from index");
        }
    }
}
