//! LFU (Least Frequently Used) eviction policy, O(1) variant.
//!
//! Built on [`FrequencyBuckets`]: one list per access count plus a
//! `min_freq` cursor that always names a non-empty bucket.
//!
//! ## Eviction Flow
//!
//! ```text
//!   add(k)     ──► bucket[1].push_front(k); min_freq = 1
//!
//!   access(k)  ──► remove k from bucket[F]
//!                  bucket[F] empty? drop it; if F == min_freq → min_freq = F + 1
//!                  bucket[F + 1].push_front(k)
//!
//!   victim()   ──► bucket[min_freq].pop_back()
//!
//!   remove(k)  ──► remove k from bucket[F]
//!                  bucket[F] empty and F == min_freq → min_freq = next populated bucket
//! ```
//!
//! Within one frequency the oldest arrival is evicted first, which gives an
//! LRU tie-break among equally frequent keys.
//!
//! ## Example
//!
//! ```
//! use boundcache::policy::{EvictionPolicy, LfuPolicy};
//!
//! let mut policy = LfuPolicy::new();
//! policy.add("a");
//! policy.add("b");
//! policy.add("c");
//! policy.access(&"a");
//! policy.access(&"a");
//! policy.access(&"b");
//!
//! assert_eq!(policy.frequency(&"a"), Some(3));
//! assert_eq!(policy.victim(), Some("c"));
//! ```

use std::hash::Hash;

use crate::ds::FrequencyBuckets;
use crate::policy::EvictionPolicy;

/// Frequency-order eviction.
#[derive(Debug)]
pub struct LfuPolicy<K> {
    buckets: FrequencyBuckets<K>,
}

impl<K> LfuPolicy<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            buckets: FrequencyBuckets::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: FrequencyBuckets::with_capacity(capacity),
        }
    }

    /// Access count of `key` (1 after `add`).
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.buckets.frequency(key)
    }

    /// Smallest access count among tracked keys.
    pub fn min_frequency(&self) -> Option<u64> {
        self.buckets.min_freq()
    }
}

impl<K> EvictionPolicy<K> for LfuPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn add(&mut self, key: K) {
        self.buckets.insert(key);
    }

    fn remove(&mut self, key: &K) -> bool {
        self.buckets.remove(key).is_some()
    }

    #[inline]
    fn access(&mut self, key: &K) {
        self.buckets.touch(key);
    }

    fn victim(&mut self) -> Option<K> {
        self.buckets.pop_min().map(|(key, _)| key)
    }

    fn peek_victim(&self) -> Option<&K> {
        self.buckets.peek_min().map(|(key, _)| key)
    }

    fn contains(&self, key: &K) -> bool {
        self.buckets.contains(key)
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }

    fn clear(&mut self) {
        self.buckets.clear();
    }
}

impl<K> Default for LfuPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
