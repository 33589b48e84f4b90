//! Error types for the storage engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Storage Error Enum ==
/// Failures that prevent a write from being applied.
///
/// Missing or already present keys are ordinary outcomes and are reported
/// through `bool`/`Option` returns, not through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The entry alone does not fit in an empty cache
    #[error("Entry of {size} bytes exceeds cache capacity of {max_size} bytes")]
    EntryTooLarge { size: usize, max_size: usize },

    /// Only the protected entry is left and there is still no room
    #[error("No evictable entry left to free {required} bytes (capacity {max_size} bytes)")]
    NoEvictableEntry { required: usize, max_size: usize },
}

// == Result Type Alias ==
/// Convenience Result type for the storage engine.
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_too_large_message() {
        let err = StorageError::EntryTooLarge {
            size: 12,
            max_size: 10,
        };
        assert_eq!(
            err.to_string(),
            "Entry of 12 bytes exceeds cache capacity of 10 bytes"
        );
    }

    #[test]
    fn test_no_evictable_entry_message() {
        let err = StorageError::NoEvictableEntry {
            required: 4,
            max_size: 10,
        };
        assert!(err.to_string().contains("free 4 bytes"));
    }
}
