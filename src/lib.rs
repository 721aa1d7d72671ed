//! boundcache: bounded in-memory key-value cache with pluggable eviction.
//!
//! A [`BoundedCache`] holds at most `capacity` entries. When a new key
//! arrives at a full cache, the configured [`Policy`] names one tracked key
//! to discard. Four policies ship: FIFO, LRU, LFU and CLOCK, each with O(1)
//! (amortized for CLOCK) `add`, `remove`, `access` and `victim`.
//!
//! ```
//! use boundcache::prelude::*;
//!
//! let mut cache = CacheBuilder::new(2).policy(PolicyKind::Fifo).build();
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3);
//!
//! assert!(!cache.contains(&"a"));
//! ```

pub mod builder;
pub mod cache;
#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use crate::builder::CacheBuilder;
pub use crate::cache::BoundedCache;
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentCache;
pub use crate::error::{CacheError, ConfigError, InvariantError};
pub use crate::policy::{EvictionPolicy, Policy, PolicyKind};
