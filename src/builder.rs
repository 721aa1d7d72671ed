//! Cache builder.
//!
//! Collects construction parameters and validates them once, at build time.
//! Policies can be chosen by [`PolicyKind`] or by name, e.g. from a config
//! file or command-line flag.
//!
//! ## Example
//!
//! ```rust
//! use boundcache::builder::CacheBuilder;
//! use boundcache::policy::PolicyKind;
//!
//! let mut cache = CacheBuilder::new(100)
//!     .policy(PolicyKind::Lfu)
//!     .try_build::<u64, String>()
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! let cache = CacheBuilder::new(8)
//!     .policy_name("second-chance")
//!     .and_then(|b| b.try_build::<u64, u64>())
//!     .unwrap();
//! assert_eq!(cache.policy_kind(), PolicyKind::Clock);
//! ```

use std::hash::Hash;

use crate::cache::BoundedCache;
use crate::error::ConfigError;
use crate::policy::PolicyKind;

/// Builder for [`BoundedCache`] instances.
///
/// Defaults to [`PolicyKind::Lru`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    capacity: usize,
    policy: PolicyKind,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: PolicyKind::default(),
        }
    }

    /// Sets the eviction policy.
    pub fn policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the eviction policy by name (`"fifo"`, `"lru"`, `"lfu"`, `"clock"`).
    ///
    /// Unknown names are rejected here rather than at build time.
    pub fn policy_name(self, name: &str) -> Result<Self, ConfigError> {
        Ok(self.policy(name.parse()?))
    }

    /// Builds the cache, rejecting invalid parameters.
    pub fn try_build<K, V>(self) -> Result<BoundedCache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        BoundedCache::new(self.capacity, self.policy)
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. Use [`try_build`](Self::try_build) to
    /// handle that case.
    pub fn build<K, V>(self) -> BoundedCache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(err) => panic!("invalid cache configuration: {err}"),
        }
    }
}
