//! Eviction policies.
//!
//! A policy tracks exactly the keys the owning cache holds and, on demand,
//! names one of them as the next victim. It never sees values.
//!
//! ## Architecture
//!
//! ```text
//!   BoundedCache ──put/get/remove──► Policy<K> (closed enum)
//!                                      ├── Fifo(FifoPolicy<K>)    IntrusiveList, insertion order
//!                                      ├── Lru(LruPolicy<K>)      IntrusiveList, recency order
//!                                      ├── Lfu(LfuPolicy<K>)      FrequencyBuckets
//!                                      └── Clock(ClockPolicy<K>)  ClockRing + hand
//! ```
//!
//! ## Lifecycle Notifications
//!
//! | Call        | FIFO       | LRU            | LFU                    | CLOCK               |
//! |-------------|------------|----------------|------------------------|---------------------|
//! | `add`       | push head  | push head      | freq=1 bucket head     | link behind hand, ref=1 |
//! | `access`    | no-op      | move to head   | bump to freq+1 bucket  | ref=1               |
//! | `remove`    | unlink     | unlink         | unlink, fix `min_freq` | unlink, hand steps back |
//! | `victim`    | pop tail   | pop tail       | tail of `min_freq`     | sweep from hand     |
//!
//! `add` on a key the policy already tracks is ignored; `remove` and `access`
//! on unknown keys are no-ops. `victim` returns `None` only when empty.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::ConfigError;

pub mod clock;
pub mod fifo;
pub mod lfu;
pub mod lru;

pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;

/// Replacement algorithm contract shared by every policy.
///
/// # Example
///
/// ```
/// use boundcache::policy::{EvictionPolicy, LruPolicy};
///
/// let mut policy = LruPolicy::new();
/// policy.add("a");
/// policy.add("b");
/// policy.access(&"a");
///
/// assert_eq!(policy.victim(), Some("b"));
/// assert_eq!(policy.len(), 1);
/// ```
pub trait EvictionPolicy<K> {
    /// Registers a newly inserted key as eviction-eligible.
    fn add(&mut self, key: K);

    /// Deregisters `key`; returns `false` if it was not tracked.
    fn remove(&mut self, key: &K) -> bool;

    /// Records a read or overwrite of `key`.
    fn access(&mut self, key: &K);

    /// Selects, deregisters and returns one key to evict.
    fn victim(&mut self) -> Option<K>;

    /// Returns the key the next [`victim`](Self::victim) call would select.
    ///
    /// For CLOCK this reports the outcome of the sweep without clearing any
    /// reference bits.
    fn peek_victim(&self) -> Option<&K>;

    /// Returns `true` if `key` is tracked.
    fn contains(&self, key: &K) -> bool;

    /// Number of tracked keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every key.
    fn clear(&mut self);
}

/// The available replacement algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolicyKind {
    /// First In, First Out: evict the oldest insertion.
    Fifo,
    /// Least Recently Used: evict the key touched longest ago.
    #[default]
    Lru,
    /// Least Frequently Used, recency tie-break within a frequency.
    Lfu,
    /// CLOCK / second chance.
    Clock,
}

impl PolicyKind {
    /// All policy kinds, in declaration order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Fifo,
        PolicyKind::Lru,
        PolicyKind::Lfu,
        PolicyKind::Clock,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "fifo",
            PolicyKind::Lru => "lru",
            PolicyKind::Lfu => "lfu",
            PolicyKind::Clock => "clock",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    /// Parses a policy name case-insensitively.
    ///
    /// Unknown names are rejected rather than mapped to a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "lru" => Ok(PolicyKind::Lru),
            "lfu" => Ok(PolicyKind::Lfu),
            "clock" | "second-chance" | "second_chance" => Ok(PolicyKind::Clock),
            other => Err(ConfigError::new(format!(
                "unknown eviction policy {other:?} (expected fifo, lru, lfu or clock)"
            ))),
        }
    }
}

/// A policy instance selected once at construction.
#[derive(Debug)]
pub enum Policy<K>
where
    K: Clone + Eq + Hash,
{
    Fifo(FifoPolicy<K>),
    Lru(LruPolicy<K>),
    Lfu(LfuPolicy<K>),
    Clock(ClockPolicy<K>),
}

impl<K> Policy<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty policy of `kind`, pre-sized for `capacity` keys.
    pub fn with_capacity(kind: PolicyKind, capacity: usize) -> Self {
        match kind {
            PolicyKind::Fifo => Policy::Fifo(FifoPolicy::with_capacity(capacity)),
            PolicyKind::Lru => Policy::Lru(LruPolicy::with_capacity(capacity)),
            PolicyKind::Lfu => Policy::Lfu(LfuPolicy::with_capacity(capacity)),
            PolicyKind::Clock => Policy::Clock(ClockPolicy::with_capacity(capacity)),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Fifo(_) => PolicyKind::Fifo,
            Policy::Lru(_) => PolicyKind::Lru,
            Policy::Lfu(_) => PolicyKind::Lfu,
            Policy::Clock(_) => PolicyKind::Clock,
        }
    }
}

impl<K> EvictionPolicy<K> for Policy<K>
where
    K: Clone + Eq + Hash,
{
    fn add(&mut self, key: K) {
        match self {
            Policy::Fifo(p) => p.add(key),
            Policy::Lru(p) => p.add(key),
            Policy::Lfu(p) => p.add(key),
            Policy::Clock(p) => p.add(key),
        }
    }

    fn remove(&mut self, key: &K) -> bool {
        match self {
            Policy::Fifo(p) => p.remove(key),
            Policy::Lru(p) => p.remove(key),
            Policy::Lfu(p) => p.remove(key),
            Policy::Clock(p) => p.remove(key),
        }
    }

    fn access(&mut self, key: &K) {
        match self {
            Policy::Fifo(p) => p.access(key),
            Policy::Lru(p) => p.access(key),
            Policy::Lfu(p) => p.access(key),
            Policy::Clock(p) => p.access(key),
        }
    }

    fn victim(&mut self) -> Option<K> {
        match self {
            Policy::Fifo(p) => p.victim(),
            Policy::Lru(p) => p.victim(),
            Policy::Lfu(p) => p.victim(),
            Policy::Clock(p) => p.victim(),
        }
    }

    fn peek_victim(&self) -> Option<&K> {
        match self {
            Policy::Fifo(p) => p.peek_victim(),
            Policy::Lru(p) => p.peek_victim(),
            Policy::Lfu(p) => p.peek_victim(),
            Policy::Clock(p) => p.peek_victim(),
        }
    }

    fn contains(&self, key: &K) -> bool {
        match self {
            Policy::Fifo(p) => p.contains(key),
            Policy::Lru(p) => p.contains(key),
            Policy::Lfu(p) => p.contains(key),
            Policy::Clock(p) => p.contains(key),
        }
    }

    fn len(&self) -> usize {
        match self {
            Policy::Fifo(p) => p.len(),
            Policy::Lru(p) => p.len(),
            Policy::Lfu(p) => p.len(),
            Policy::Clock(p) => p.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            Policy::Fifo(p) => p.clear(),
            Policy::Lru(p) => p.clear(),
            Policy::Lfu(p) => p.clear(),
            Policy::Clock(p) => p.clear(),
        }
    }
}
