//! Configuration Module
//!
//! Loads the storage capacity from environment variables for the embedding
//! service. The engine itself only takes `max_size` at construction.

use std::env;

/// Default capacity budget in bytes.
pub const DEFAULT_MAX_SIZE: usize = 1024;

/// Environment variable holding the capacity budget.
pub const MAX_SIZE_VAR: &str = "LRU_MAX_SIZE";

/// Storage configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of bytes (keys plus values) the cache can hold
    pub max_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_MAX_SIZE` - Capacity budget in bytes (default: 1024)
    pub fn from_env() -> Self {
        Self {
            max_size: env::var(MAX_SIZE_VAR)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SIZE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}
