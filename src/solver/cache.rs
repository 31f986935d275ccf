//! Bounded memoization cache
//!
//! A least-recently-used map from an argument tuple to its result. Lookups and
//! inserts both refresh recency; once the entry count exceeds the capacity the
//! stalest entries are evicted. A capacity of zero disables caching.
//!
//! Caches whose values vary wildly in size can also carry a weight limit, in
//! which case eviction continues until the summed weight fits as well.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::hash::Hash;

/// Hit/miss/eviction counters for one cache
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache (0.0 when unused)
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheEntry<V> {
    value: V,
    stamp: u64,
    weight: usize,
}

/// LRU cache keyed by the full argument tuple of a pure function
pub struct MemoCache<K, V> {
    capacity: usize,
    clock: u64,
    entries: FxHashMap<K, CacheEntry<V>>,
    // stamp -> key, oldest first
    recency: BTreeMap<u64, K>,
    weigh: Option<fn(&V) -> usize>,
    weight_limit: usize,
    weight: usize,
    stats: CacheStats,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            clock: 0,
            entries: FxHashMap::default(),
            recency: BTreeMap::new(),
            weigh: None,
            weight_limit: usize::MAX,
            weight: 0,
            stats: CacheStats::default(),
        }
    }

    /// Also bound the summed `weigh` of all entries by `limit`
    ///
    /// The most recent entry is always kept, even when it alone is over.
    #[must_use]
    pub fn with_weight_limit(mut self, limit: usize, weigh: fn(&V) -> usize) -> Self {
        self.weigh = Some(weigh);
        self.weight_limit = limit;
        self
    }

    /// Look up `key`, marking it most recently used on a hit
    pub fn get(&mut self, key: &K) -> Option<V> {
        if let Some(entry) = self.entries.get_mut(key) {
            self.clock += 1;
            self.recency.remove(&entry.stamp);
            self.recency.insert(self.clock, key.clone());
            entry.stamp = self.clock;
            self.stats.hits += 1;
            Some(entry.value.clone())
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Store `value` under `key`, evicting the least recently used entries if full
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        self.clock += 1;
        let stamp = self.clock;
        let weight = self.weigh.map_or(0, |weigh| weigh(&value));
        let entry = CacheEntry {
            value,
            stamp,
            weight,
        };
        if let Some(previous) = self.entries.insert(key.clone(), entry) {
            self.recency.remove(&previous.stamp);
            self.weight -= previous.weight;
        }
        self.recency.insert(stamp, key);
        self.weight += weight;

        while self.entries.len() > self.capacity
            || (self.weight > self.weight_limit && self.entries.len() > 1)
        {
            let Some((_, oldest)) = self.recency.pop_first() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&oldest) {
                self.weight -= evicted.weight;
            }
            self.stats.evictions += 1;
        }
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Summed weight of the entries held (0 without a weight limit)
    #[must_use]
    pub const fn weight(&self) -> usize {
        self.weight
    }

    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop every entry; counters are kept
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        self.weight = 0;
    }
}
