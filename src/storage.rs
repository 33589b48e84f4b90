//! Storage Interface
//!
//! The operation set a serving layer needs from a key-value backend.

use crate::cache::SimpleLru;

// == Storage Trait ==
/// Key-value backend consumed by the serving layer.
///
/// Ordinary outcomes are reported as `bool`/`Option`:
/// - `put` fails only when the entry can never fit
/// - `put_if_absent` fails when the key already exists
/// - `set` fails when the key is absent
/// - `delete` fails when the key is absent
/// - `get` yields a copy of the value, never a reference into storage
pub trait Storage {
    /// Inserts or overwrites `key`.
    fn put(&mut self, key: &[u8], value: &[u8]) -> bool;

    /// Inserts `key` only if it is not stored yet.
    fn put_if_absent(&mut self, key: &[u8], value: &[u8]) -> bool;

    /// Replaces the value of an existing key.
    fn set(&mut self, key: &[u8], value: &[u8]) -> bool;

    /// Removes `key`.
    fn delete(&mut self, key: &[u8]) -> bool;

    /// Reads a copy of the value stored under `key`.
    fn get(&mut self, key: &[u8]) -> Option<Vec<u8>>;
}

impl Storage for SimpleLru {
    fn put(&mut self, key: &[u8], value: &[u8]) -> bool {
        SimpleLru::put(self, key, value)
    }

    fn put_if_absent(&mut self, key: &[u8], value: &[u8]) -> bool {
        SimpleLru::put_if_absent(self, key, value)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> bool {
        SimpleLru::set(self, key, value)
    }

    fn delete(&mut self, key: &[u8]) -> bool {
        SimpleLru::delete(self, key)
    }

    fn get(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        SimpleLru::get(self, key)
    }
}
