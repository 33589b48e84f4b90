//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the accounting, consistency and recency rules of
//! the storage engine against random operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::SimpleLru;

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 64;

// == Strategies ==
/// Generates short keys so sequences revisit the same keys often
fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(b'a'..=b'f', 1..4)
}

/// Generates values, occasionally larger than the whole cache
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        9 => prop::collection::vec(any::<u8>(), 0..24),
        1 => prop::collection::vec(any::<u8>(), TEST_MAX_SIZE..TEST_MAX_SIZE + 8),
    ]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: Vec<u8>, value: Vec<u8> },
    PutIfAbsent { key: Vec<u8>, value: Vec<u8> },
    Set { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
    Get { key: Vec<u8> },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::PutIfAbsent { key, value }),
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

fn apply(store: &mut SimpleLru, op: &CacheOp) -> bool {
    match op {
        CacheOp::Put { key, value } => store.put(key, value),
        CacheOp::PutIfAbsent { key, value } => store.put_if_absent(key, value),
        CacheOp::Set { key, value } => store.set(key, value),
        CacheOp::Delete { key } => store.delete(key),
        CacheOp::Get { key } => store.get(key).is_some(),
    }
}

/// Fills a fresh store with distinct 4-byte entries `k0`..`kN`.
fn filled_store(count: usize) -> (SimpleLru, Vec<Vec<u8>>) {
    let mut store = SimpleLru::new(count * 4);
    let keys: Vec<Vec<u8>> = (0..count).map(|i| format!("k{}", i).into_bytes()).collect();
    for key in &keys {
        store.put(key, b"vv");
    }
    (store, keys)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Byte accounting, capacity bound and index/list agreement hold after
    // every operation.
    #[test]
    fn prop_invariants_hold(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store = SimpleLru::new(TEST_MAX_SIZE);

        for op in &ops {
            apply(&mut store, op);
            store.assert_consistent();
            prop_assert!(store.cur_size() <= store.max_size());
        }
    }

    // Failed writes leave the cache exactly as it was.
    #[test]
    fn prop_failed_writes_do_not_mutate(
        setup in prop::collection::vec(cache_op_strategy(), 0..40),
        op in cache_op_strategy()
    ) {
        let mut store = SimpleLru::new(TEST_MAX_SIZE);
        for setup_op in &setup {
            apply(&mut store, setup_op);
        }

        let keys_before: Vec<Vec<u8>> = store.keys().map(<[u8]>::to_vec).collect();
        let size_before = store.cur_size();

        let is_write = !matches!(op, CacheOp::Get { .. });
        if is_write && !apply(&mut store, &op) {
            let keys_after: Vec<Vec<u8>> = store.keys().map(<[u8]>::to_vec).collect();
            prop_assert_eq!(keys_before, keys_after);
            prop_assert_eq!(size_before, store.cur_size());
        }
    }

    // After put, the stored value round-trips and the key is most recently used.
    #[test]
    fn prop_put_then_get(
        setup in prop::collection::vec(cache_op_strategy(), 0..40),
        key in key_strategy(),
        value in prop::collection::vec(any::<u8>(), 0..24)
    ) {
        let mut store = SimpleLru::new(TEST_MAX_SIZE);
        for setup_op in &setup {
            apply(&mut store, setup_op);
        }

        prop_assert!(store.put(&key, &value));
        prop_assert_eq!(store.keys().last(), Some(key.as_slice()));
        prop_assert_eq!(store.get(&key), Some(value));
    }

    // Touching a key via get or set makes it the last eviction candidate.
    #[test]
    fn prop_touch_protects_from_eviction(
        count in 3usize..10,
        touched in 0usize..10,
        via_set in any::<bool>()
    ) {
        let (mut store, keys) = filled_store(count);
        let touched = touched % count;

        if via_set {
            prop_assert!(store.set(&keys[touched], b"ww"));
        } else {
            prop_assert!(store.get(&keys[touched]).is_some());
        }

        // Each new entry evicts exactly one old one
        for i in 0..count - 1 {
            let key = format!("n{}", i).into_bytes();
            prop_assert!(store.put(&key, b"xx"));
            prop_assert!(store.contains(&keys[touched]));
        }
        prop_assert_eq!(store.stats().evictions, (count - 1) as u64);
    }

    // Insertions at capacity evict in strict least recently used order.
    #[test]
    fn prop_eviction_order(count in 2usize..10, extra in 1usize..10) {
        let (mut store, keys) = filled_store(count);
        let extra = extra.min(count);

        for i in 0..extra {
            let key = format!("n{}", i).into_bytes();
            prop_assert!(store.put(&key, b"xx"));
        }

        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(store.contains(key), i >= extra, "key index {}", i);
        }
    }

    // Delete is idempotent and hides the key from get.
    #[test]
    fn prop_delete_twice(
        key in key_strategy(),
        value in prop::collection::vec(any::<u8>(), 0..24)
    ) {
        let mut store = SimpleLru::new(TEST_MAX_SIZE);
        store.put(&key, &value);

        prop_assert!(store.delete(&key));
        prop_assert!(!store.delete(&key));
        prop_assert_eq!(store.get(&key), None);
        prop_assert_eq!(store.cur_size(), 0);
    }

    // Entry count tracks the distinct keys that are still stored.
    #[test]
    fn prop_len_matches_distinct_keys(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = SimpleLru::new(TEST_MAX_SIZE);
        for op in &ops {
            apply(&mut store, op);
        }

        let distinct: HashSet<Vec<u8>> = store.keys().map(<[u8]>::to_vec).collect();
        prop_assert_eq!(distinct.len(), store.len());
        prop_assert_eq!(store.stats().total_entries, store.len());
    }
}
