//! Memoization of trigonometric intermediates.
//!
//! Entries are keyed by the function and the exact bit pattern of the input,
//! so a repeated coordinate always hits and no two distinct inputs collide.
//! The cache grows until [`TrigCache::clear`] unless a capacity is set; at
//! capacity new values are still computed and returned, just not stored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Memoized function family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrigFn {
    /// Degrees to radians
    Radians,
    Sin,
    Cos,
}

impl TrigFn {
    #[inline]
    fn apply(self, x: f64) -> f64 {
        match self {
            TrigFn::Radians => x.to_radians(),
            TrigFn::Sin => x.sin(),
            TrigFn::Cos => x.cos(),
        }
    }
}

type TrigKey = (TrigFn, u64);

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Entries currently stored
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Misses that were not stored because the cache was full
    pub rejected: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, 0.0 when nothing was looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe memo table for `to_radians`, `sin` and `cos`.
#[derive(Debug, Default)]
pub struct TrigCache {
    entries: RwLock<HashMap<TrigKey, f64>>,
    capacity: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
    rejected: AtomicU64,
}

impl TrigCache {
    /// Creates an unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache that stores at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Maximum number of stored entries, `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[inline]
    pub fn to_radians(&self, degrees: f64) -> f64 {
        self.get_or_compute(TrigFn::Radians, degrees)
    }

    #[inline]
    pub fn sin(&self, radians: f64) -> f64 {
        self.get_or_compute(TrigFn::Sin, radians)
    }

    #[inline]
    pub fn cos(&self, radians: f64) -> f64 {
        self.get_or_compute(TrigFn::Cos, radians)
    }

    /// Returns the memoized value of `func(x)`, computing and storing it on a miss.
    ///
    /// A poisoned lock is recovered and used as-is.
    pub fn get_or_compute(&self, func: TrigFn, x: f64) -> f64 {
        let key = (func, x.to_bits());

        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied();
        if let Some(value) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return value;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = func.apply(x);
        tracing::trace!(func = ?func, input = x, value, "trig cache miss");

        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let full = self
            .capacity
            .is_some_and(|cap| guard.len() >= cap && !guard.contains_key(&key));
        if full {
            self.rejected.fetch_add(1, Ordering::Relaxed);
        } else {
            guard.insert(key, value);
        }

        value
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry and resets the counters.
    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
    }

    /// Snapshot of the entry count and counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}
