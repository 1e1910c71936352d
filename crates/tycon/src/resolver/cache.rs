// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Copy-on-write contract cache.
//!
//! The hot path is a lock-free snapshot read that hands every caller the
//! same `Arc<Contract>`. Publication takes a single lock, re-reads the
//! current snapshot, builds a new map with the entry added, and atomically
//! swaps the visible reference — readers never observe a partially-updated
//! mapping. Racing builds for the same key are accepted wasted work;
//! last-writer-wins is safe because the value for a key is always
//! semantically equivalent across builds. There is no eviction; entries
//! live for process lifetime.

use crate::contract::Contract;
use crate::descriptor::TypeId;
use crate::resolver::ResolverId;
use arc_swap::ArcSwap;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Identifies a cached contract across resolver configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    pub resolver: ResolverId,
    pub type_id: TypeId,
}

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupStats {
    pub hits: u64,
    pub misses: u64,
}

/// Concurrent copy-on-write cache of resolved contracts.
pub(crate) struct ContractCache {
    snapshot: ArcSwap<HashMap<CacheKey, Arc<Contract>>>,
    publish: Mutex<()>,
    stats: RwLock<LookupStats>,
}

impl ContractCache {
    pub(crate) fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(HashMap::new()),
            publish: Mutex::new(()),
            stats: RwLock::new(LookupStats::default()),
        }
    }

    /// The cache shared process-wide across all resolvers configured for
    /// shared caching.
    pub(crate) fn shared() -> &'static ContractCache {
        static SHARED: OnceLock<ContractCache> = OnceLock::new();
        SHARED.get_or_init(ContractCache::new)
    }

    /// Lock-free snapshot lookup.
    pub(crate) fn get(&self, key: &CacheKey) -> Option<Arc<Contract>> {
        let hit = self.snapshot.load().get(key).cloned();
        if hit.is_some() {
            self.record_hit();
        }
        hit
    }

    /// Publish a freshly built contract under `key`.
    pub(crate) fn publish(&self, key: CacheKey, contract: Arc<Contract>) {
        let _guard = self.publish.lock();
        let current = self.snapshot.load_full();
        let mut updated: HashMap<CacheKey, Arc<Contract>> = (*current).clone();
        updated.insert(key, contract);
        self.snapshot.store(Arc::new(updated));
        self.record_miss();
        log::trace!("published contract for type {}", key.type_id);
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.load().len()
    }

    pub(crate) fn stats(&self) -> LookupStats {
        *self.stats.read()
    }

    fn record_hit(&self) {
        let mut stats = self.stats.write();
        stats.hits = stats.hits.saturating_add(1);
    }

    fn record_miss(&self) {
        let mut stats = self.stats.write();
        stats.misses = stats.misses.saturating_add(1);
    }
}

#[cfg(test)]
mod tests;
