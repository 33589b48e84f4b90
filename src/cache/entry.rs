//! Cache Entry Module
//!
//! Defines the owned key/value record stored in each recency slot.

// == Entry ==
/// A stored key-value pair.
///
/// Each entry is owned by exactly one slot of the recency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The key bytes
    pub key: Vec<u8>,
    /// The value bytes
    pub value: Vec<u8>,
}

impl Entry {
    // == Constructor ==
    /// Creates a new entry owning copies of `key` and `value`.
    pub fn new(key: &[u8], value: &[u8]) -> Self {
        Self {
            key: key.to_vec(),
            value: value.to_vec(),
        }
    }

    // == Footprint ==
    /// Returns the number of bytes this entry counts against the budget.
    pub fn footprint(&self) -> usize {
        footprint(&self.key, &self.value)
    }
}

/// Bytes a key/value pair would occupy once stored.
pub fn footprint(key: &[u8], value: &[u8]) -> usize {
    key.len() + value.len()
}
