//! Commonly used types, for glob import.

pub use crate::builder::CacheBuilder;
pub use crate::cache::BoundedCache;
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentCache;
pub use crate::error::{CacheError, ConfigError};
pub use crate::policy::{
    ClockPolicy, EvictionPolicy, FifoPolicy, LfuPolicy, LruPolicy, Policy, PolicyKind,
};
pub use crate::traits::{CoreCache, MutableCache};
