//! Simple LRU - An in-memory key-value storage engine
//!
//! Keeps byte-string entries under a fixed byte budget and evicts the
//! least recently used entries when space runs out.

pub mod cache;
pub mod config;
pub mod error;
pub mod shared;
pub mod storage;

pub use cache::{CacheStats, Entry, SimpleLru};
pub use config::Config;
pub use error::{Result, StorageError};
pub use shared::SharedStore;
pub use storage::Storage;
