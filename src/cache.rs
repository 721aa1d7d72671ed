//! Bounded key-value cache driven by a pluggable eviction policy.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                        BoundedCache<K, V>                            │
//!   │                                                                      │
//!   │   capacity: usize                                                    │
//!   │   table:  FxHashMap<K, V>   (values live here)                       │
//!   │   policy: Policy<K>         (keys only; names the victim)            │
//!   │                                                                      │
//!   │   Invariant: table keys == policy keys, len <= capacity              │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Put Flow
//!
//! ```text
//!   put(key, value)
//!        │
//!        ▼
//!   key already cached? ── YES ──► overwrite value, policy.access(key)
//!        │ NO
//!        ▼
//!   len == capacity? ── YES ──► victim = policy.victim(); table.remove(victim)
//!        │
//!        ▼
//!   policy.add(key); table.insert(key, value)
//! ```
//!
//! Overwriting an existing key counts as a touch: it never evicts and never
//! registers the key with the policy a second time.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::cache::BoundedCache;
//! use boundcache::policy::PolicyKind;
//!
//! let mut cache = BoundedCache::new(2, PolicyKind::Lru).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3); // evicts "b"
//!
//! assert_eq!(cache.get(&"a"), Some(&1));
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.len(), 2);
//! ```
//!
//! ## Thread Safety
//!
//! `BoundedCache` is single-threaded. With the `concurrency` feature,
//! [`ConcurrentCache`](crate::concurrent::ConcurrentCache) guards one cache
//! with a single lock so table and policy always change together.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::{CacheError, ConfigError, InvariantError};
use crate::policy::{EvictionPolicy, Policy, PolicyKind};
use crate::traits::{CoreCache, MutableCache};

/// Fixed-capacity cache whose evictions are chosen by a [`Policy`].
pub struct BoundedCache<K, V>
where
    K: Clone + Eq + Hash,
{
    capacity: usize,
    table: FxHashMap<K, V>,
    policy: Policy<K>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::BoundedCache;
    /// use boundcache::policy::PolicyKind;
    ///
    /// let cache = BoundedCache::<String, u32>::new(100, PolicyKind::Clock).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    ///
    /// assert!(BoundedCache::<String, u32>::new(0, PolicyKind::Clock).is_err());
    /// ```
    pub fn new(capacity: usize, kind: PolicyKind) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        debug!(capacity, policy = %kind, "creating bounded cache");
        Ok(Self {
            capacity,
            table: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            policy: Policy::with_capacity(kind, capacity),
        })
    }

    /// Inserts or overwrites `key`, returning the previous value.
    ///
    /// A new key may evict one other entry chosen by the policy. Overwriting
    /// never evicts and is reported to the policy as an access.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.table.get_mut(&key) {
            let old = std::mem::replace(slot, value);
            self.policy.access(&key);
            return Some(old);
        }
        self.insert_new(key, value);
        None
    }

    /// Like [`put`](Self::put), but returns the entry evicted to make room.
    ///
    /// Overwriting an existing key returns `None`; the old value is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use boundcache::cache::BoundedCache;
    /// use boundcache::policy::PolicyKind;
    ///
    /// let mut cache = BoundedCache::new(1, PolicyKind::Fifo).unwrap();
    /// assert_eq!(cache.put_evicting("a", 1), None);
    /// assert_eq!(cache.put_evicting("b", 2), Some(("a", 1)));
    /// ```
    pub fn put_evicting(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(slot) = self.table.get_mut(&key) {
            *slot = value;
            self.policy.access(&key);
            return None;
        }
        self.insert_new(key, value)
    }

    fn insert_new(&mut self, key: K, value: V) -> Option<(K, V)> {
        let evicted = if self.table.len() >= self.capacity {
            self.evict_one()
        } else {
            None
        };
        self.policy.add(key.clone());
        self.table.insert(key, value);
        evicted
    }

    fn evict_one(&mut self) -> Option<(K, V)> {
        let victim = self.policy.victim()?;
        let value = self.table.remove(&victim)?;
        trace!(policy = %self.policy.kind(), len = self.table.len(), "evicted entry");
        Some((victim, value))
    }

    /// Returns the value for `key` and records the access with the policy.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let value = self.table.get(key)?;
        self.policy.access(key);
        Some(value)
    }

    /// Like [`get`](Self::get), but reports a miss as [`CacheError::KeyNotFound`].
    pub fn try_get(&mut self, key: &K) -> Result<&V, CacheError> {
        self.get(key).ok_or(CacheError::KeyNotFound)
    }

    /// Returns the value for `key` without touching eviction state.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.table.get(key)
    }

    /// Returns `true` if `key` is cached. Does not touch eviction state.
    pub fn contains(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    /// Removes `key` ahead of its eviction turn.
    ///
    /// Removing a key that is not cached changes nothing.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.table.remove(key)?;
        self.policy.remove(key);
        trace!(policy = %self.policy.kind(), len = self.table.len(), "removed entry");
        Some(value)
    }

    /// Returns the key the next eviction would discard.
    pub fn peek_victim(&self) -> Option<&K> {
        self.policy.peek_victim()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// Read access to the policy, e.g. to inspect LFU frequencies.
    pub fn policy(&self) -> &Policy<K> {
        &self.policy
    }

    /// Drops every entry; capacity and policy kind are kept.
    pub fn clear(&mut self) {
        self.table.clear();
        self.policy.clear();
    }

    /// Iterates cached entries in arbitrary order without touching the policy.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.table.iter()
    }

    /// Verifies that the table and the policy agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.table.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.table.len(),
                self.capacity
            )));
        }
        if self.table.len() != self.policy.len() {
            return Err(InvariantError::new(format!(
                "table holds {} keys but {} policy tracks {}",
                self.table.len(),
                self.policy.kind(),
                self.policy.len()
            )));
        }
        if self.table.keys().any(|key| !self.policy.contains(key)) {
            return Err(InvariantError::new("table key is not tracked by the policy"));
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for BoundedCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        BoundedCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        BoundedCache::contains(self, key)
    }

    fn len(&self) -> usize {
        BoundedCache::len(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        BoundedCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for BoundedCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        BoundedCache::remove(self, key)
    }
}

impl<K, V> fmt::Debug for BoundedCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCache")
            .field("policy", &self.policy.kind())
            .field("capacity", &self.capacity)
            .field("len", &self.table.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize, kind: PolicyKind) -> BoundedCache<&'static str, i32> {
        BoundedCache::new(capacity, kind).unwrap()
    }

    mod basic_operations {
        use super::*;

        #[test]
        fn test_new_cache() {
            for kind in PolicyKind::ALL {
                let cache = cache(10, kind);
                assert_eq!(cache.capacity(), 10);
                assert_eq!(cache.len(), 0);
                assert!(cache.is_empty());
                assert_eq!(cache.policy_kind(), kind);
            }
        }

        #[test]
        fn test_zero_capacity_rejected() {
            let err = BoundedCache::<u32, u32>::new(0, PolicyKind::Fifo).unwrap_err();
            assert!(err.message().contains("capacity"));
        }

        #[test]
        fn test_put_and_get() {
            for kind in PolicyKind::ALL {
                let mut cache = cache(10, kind);
                assert_eq!(cache.put("a", 1), None);
                assert_eq!(cache.put("b", 2), None);

                assert_eq!(cache.get(&"a"), Some(&1));
                assert_eq!(cache.get(&"b"), Some(&2));
                assert_eq!(cache.get(&"c"), None);
            }
        }

        #[test]
        fn test_try_get_reports_miss() {
            let mut cache = cache(2, PolicyKind::Lru);
            cache.put("a", 1);
            assert_eq!(cache.try_get(&"a"), Ok(&1));
            assert_eq!(cache.try_get(&"zzz"), Err(CacheError::KeyNotFound));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn test_overwrite_returns_old_value_without_growing() {
            for kind in PolicyKind::ALL {
                let mut cache = cache(2, kind);
                cache.put("a", 1);
                assert_eq!(cache.put("a", 10), Some(1));
                assert_eq!(cache.len(), 1);
                assert_eq!(cache.policy().len(), 1);
                assert_eq!(cache.peek(&"a"), Some(&10));
                cache.check_invariants().unwrap();
            }
        }

        #[test]
        fn test_remove() {
            for kind in PolicyKind::ALL {
                let mut cache = cache(10, kind);
                cache.put("a", 1);
                cache.put("b", 2);

                assert_eq!(cache.remove(&"a"), Some(1));
                assert!(!cache.contains(&"a"));
                assert_eq!(cache.len(), 1);

                assert_eq!(cache.remove(&"c"), None);
                assert_eq!(cache.len(), 1);
                cache.check_invariants().unwrap();
            }
        }

        #[test]
        fn test_clear() {
            let mut cache = cache(10, PolicyKind::Lfu);
            cache.put("a", 1);
            cache.put("b", 2);

            cache.clear();
            assert!(cache.is_empty());
            assert!(!cache.contains(&"a"));
            assert_eq!(cache.peek_victim(), None);
            cache.check_invariants().unwrap();
        }
    }

    mod eviction {
        use super::*;

        #[test]
        fn test_len_never_exceeds_capacity() {
            for kind in PolicyKind::ALL {
                let mut cache = BoundedCache::new(3, kind).unwrap();
                for i in 0..50 {
                    cache.put(i, i * 10);
                    if i % 3 == 0 {
                        cache.get(&(i / 2));
                    }
                    assert!(cache.len() <= 3);
                    cache.check_invariants().unwrap();
                }
            }
        }

        #[test]
        fn test_put_evicting_reports_victim() {
            let mut cache = cache(2, PolicyKind::Lru);
            cache.put("a", 1);
            cache.put("b", 2);
            cache.get(&"a");

            assert_eq!(cache.peek_victim(), Some(&"b"));
            assert_eq!(cache.put_evicting("c", 3), Some(("b", 2)));
            assert_eq!(cache.put_evicting("c", 30), None);
            assert_eq!(cache.peek(&"c"), Some(&30));
        }

        #[test]
        fn test_overwrite_counts_as_touch_for_lru() {
            let mut cache = cache(2, PolicyKind::Lru);
            cache.put("a", 1);
            cache.put("b", 2);
            cache.put("a", 11);
            cache.put("c", 3);

            assert!(cache.contains(&"a"));
            assert!(!cache.contains(&"b"));
        }

        #[test]
        fn test_overwrite_keeps_fifo_position() {
            let mut cache = cache(2, PolicyKind::Fifo);
            cache.put("a", 1);
            cache.put("b", 2);
            cache.put("a", 11);
            cache.put("c", 3);

            assert!(!cache.contains(&"a"));
            assert!(cache.contains(&"b"));
        }

        #[test]
        fn test_overwrite_bumps_lfu_frequency() {
            let mut cache = cache(2, PolicyKind::Lfu);
            cache.put("a", 1);
            cache.put("a", 2);
            if let Policy::Lfu(lfu) = cache.policy() {
                assert_eq!(lfu.frequency(&"a"), Some(2));
            } else {
                panic!("expected LFU policy");
            }
        }

        #[test]
        fn test_capacity_one() {
            for kind in PolicyKind::ALL {
                let mut cache = cache(1, kind);
                cache.put("a", 1);
                assert_eq!(cache.get(&"a"), Some(&1));

                cache.put("b", 2);
                assert!(!cache.contains(&"a"));
                assert_eq!(cache.get(&"b"), Some(&2));
            }
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn test_get_miss_has_no_side_effect() {
            let mut cache = cache(2, PolicyKind::Lfu);
            cache.put("a", 1);
            assert_eq!(cache.get(&"missing"), None);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.policy().len(), 1);
        }

        #[test]
        fn test_peek_does_not_touch() {
            let mut cache = cache(2, PolicyKind::Lru);
            cache.put("a", 1);
            cache.put("b", 2);
            assert_eq!(cache.peek(&"a"), Some(&1));
            cache.put("c", 3);

            assert!(!cache.contains(&"a"));
            assert!(cache.contains(&"b"));
        }

        #[test]
        fn test_string_keys() {
            let mut cache = BoundedCache::new(10, PolicyKind::Clock).unwrap();
            cache.put("hello".to_string(), 1);
            cache.put("world".to_string(), 2);
            assert_eq!(cache.get(&"hello".to_string()), Some(&1));
            assert_eq!(cache.iter().count(), 2);
        }

        #[test]
        fn test_debug_output() {
            let cache = cache(4, PolicyKind::Clock);
            let dbg = format!("{cache:?}");
            assert!(dbg.contains("BoundedCache"));
            assert!(dbg.contains("Clock"));
        }
    }
}
