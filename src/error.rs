//! Error types for the boundcache library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Caller-facing error. `KeyNotFound` is returned by
//!   [`BoundedCache::try_get`](crate::cache::BoundedCache::try_get) on a miss;
//!   `InvalidConfiguration` wraps a [`ConfigError`].
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (zero capacity, unknown policy name).
//! - [`InvariantError`]: Returned by
//!   [`BoundedCache::check_invariants`](crate::cache::BoundedCache::check_invariants)
//!   when the value table and the policy disagree.
//!
//! Policy operations themselves never fail: removing or touching an unknown
//! key is a no-op.
//!
//! ## Example Usage
//!
//! ```
//! use boundcache::cache::BoundedCache;
//! use boundcache::error::CacheError;
//! use boundcache::policy::PolicyKind;
//!
//! let err = BoundedCache::<u64, u64>::new(0, PolicyKind::Lru).unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//!
//! let mut cache = BoundedCache::<u64, u64>::new(4, PolicyKind::Lru).unwrap();
//! assert_eq!(cache.try_get(&1), Err(CacheError::KeyNotFound));
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Errors surfaced to cache callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The requested key is not in the cache.
    #[error("key not found")]
    KeyNotFound,

    /// The cache could not be constructed from the given parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use boundcache::policy::PolicyKind;
///
/// let err = "mru".parse::<PolicyKind>().unwrap_err();
/// assert!(err.message().contains("mru"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
