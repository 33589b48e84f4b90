//! Cache Module
//!
//! Provides the in-memory storage engine with byte-budgeted LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::Entry;
pub use lru::{Handle, Iter, RecencyList};
pub use stats::CacheStats;
pub use store::SimpleLru;
