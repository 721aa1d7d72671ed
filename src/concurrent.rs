//! Thread-safe wrapper around [`BoundedCache`].
//!
//! A single `parking_lot::Mutex` guards the value table and the policy
//! together, so every call applies its table change and the matching policy
//! notification atomically. Even `get` takes the exclusive lock: a hit
//! mutates eviction state.
//!
//! ```text
//!   Thread A ─┐
//!   Thread B ─┼──► Mutex<BoundedCache<K, V>> ──► table + policy
//!   Thread C ─┘        (one holder per call)
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use boundcache::concurrent::ConcurrentCache;
//! use boundcache::policy::PolicyKind;
//!
//! let cache = Arc::new(ConcurrentCache::new(64, PolicyKind::Lru).unwrap());
//!
//! let handles: Vec<_> = (0..4u64)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 cache.put(t * 1000 + i, i);
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 64);
//! ```

use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;

use crate::cache::BoundedCache;
use crate::error::{CacheError, ConfigError};
use crate::policy::PolicyKind;

/// `Send + Sync` bounded cache; each call holds the lock for its duration.
pub struct ConcurrentCache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: Mutex<BoundedCache<K, V>>,
}

impl<K, V> ConcurrentCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty cache; zero capacity is rejected.
    pub fn new(capacity: usize, kind: PolicyKind) -> Result<Self, ConfigError> {
        Ok(Self::from_cache(BoundedCache::new(capacity, kind)?))
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: BoundedCache<K, V>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    pub fn put_evicting(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().put_evicting(key, value)
    }

    /// Returns a clone of the value for `key`, recording the access.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn try_get(&self, key: &K) -> Result<V, CacheError>
    where
        V: Clone,
    {
        self.inner.lock().try_get(key).cloned()
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.inner.lock().policy_kind()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` with exclusive access, for compound operations such as
    /// get-or-insert that must not interleave with other callers.
    ///
    /// ```
    /// use boundcache::concurrent::ConcurrentCache;
    /// use boundcache::policy::PolicyKind;
    ///
    /// let cache = ConcurrentCache::new(4, PolicyKind::Lfu).unwrap();
    /// let len = cache.with(|c| {
    ///     if !c.contains(&"k") {
    ///         c.put("k", 1);
    ///     }
    ///     c.len()
    /// });
    /// assert_eq!(len, 1);
    /// ```
    pub fn with<R>(&self, f: impl FnOnce(&mut BoundedCache<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Consumes the wrapper and returns the inner cache.
    pub fn into_inner(self) -> BoundedCache<K, V> {
        self.inner.into_inner()
    }
}

impl<K, V> fmt::Debug for ConcurrentCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentCache")
            .field("policy", &cache.policy_kind())
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}
