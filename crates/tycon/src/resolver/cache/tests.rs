// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//! Tests for the contract cache.

use super::*;
use crate::contract::{ArrayContract, ContractKind};
use std::sync::Barrier;
use std::thread;

fn key(resolver: u64, name: &str) -> CacheKey {
    CacheKey {
        resolver: ResolverId::from_raw(resolver),
        type_id: TypeId::of(name),
    }
}

fn contract(name: &str) -> Arc<Contract> {
    let type_id = TypeId::of(name);
    Arc::new(Contract::new(
        type_id,
        type_id,
        ContractKind::Array(ArrayContract::default()),
    ))
}

#[test]
fn test_get_miss_then_hit() {
    let cache = ContractCache::new();
    let key = key(1, "Movie");
    assert!(cache.get(&key).is_none());

    cache.publish(key, contract("Movie"));
    let hit = cache.get(&key).expect("hit");
    assert_eq!(hit.underlying_type, TypeId::of("Movie"));

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[test]
fn test_hit_returns_same_instance() {
    let cache = ContractCache::new();
    let key = key(1, "Movie");
    cache.publish(key, contract("Movie"));

    let first = cache.get(&key).expect("hit");
    let second = cache.get(&key).expect("hit");
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_resolver_identity_partitions_entries() {
    let cache = ContractCache::new();
    cache.publish(key(1, "Movie"), contract("Movie"));

    assert!(cache.get(&key(2, "Movie")).is_none());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_republish_replaces_without_touching_reader_snapshot() {
    let cache = ContractCache::new();
    let key = key(1, "Movie");
    cache.publish(key, contract("Movie"));
    let before = cache.get(&key).expect("hit");

    cache.publish(key, contract("Movie"));
    let after = cache.get(&key).expect("hit");

    // the handed-out contract is untouched; the mapping was replaced
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.underlying_type, after.underlying_type);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_concurrent_publish_single_entry() {
    let cache = ContractCache::new();
    let barrier = Barrier::new(8);
    let key = key(1, "Movie");

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                barrier.wait();
                if cache.get(&key).is_none() {
                    cache.publish(key, contract("Movie"));
                }
            });
        }
    });

    assert_eq!(cache.len(), 1);
    assert!(cache.get(&key).is_some());
}
