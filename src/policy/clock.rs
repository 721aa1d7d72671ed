//! CLOCK (second-chance) eviction policy.
//!
//! Approximates LRU with a single reference bit per key instead of a full
//! recency order. Reads only set a bit; nothing moves.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                         ClockPolicy<K> Layout                               │
//! │                                                                             │
//! │                  hand                                                       │
//! │                   │                                                         │
//! │                   ▼                                                         │
//! │           ┌──► [A ref] ──► [B    ] ──► [C ref] ──► [D ref] ──┐              │
//! │           └──────────────────────────────────────────────────┘              │
//! │                                                                             │
//! │   add:    link behind the hand with ref set                                 │
//! │   access: set ref (entry and hand stay put)                                 │
//! │   victim: sweep from hand, clear refs, evict first clear entry              │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reference Bit State Machine
//!
//! ```text
//!          add / access                 hand passes
//!   ───────────────────────►  [set]  ──────────────►  [clear]
//!                               ▲                        │
//!                               └──────── access ────────┤
//!                                                        │ hand arrives
//!                                                        ▼
//!                                                     evicted
//! ```
//!
//! ## Algorithm
//!
//! ```text
//! VICTIM():
//!   loop:
//!     entry = ring[hand]
//!     if entry.referenced:
//!       entry.referenced = false   // second chance
//!       hand = entry.next
//!     else:
//!       unlink entry
//!       hand = entry.next
//!       return entry.key
//! ```
//!
//! The loop ends within one revolution: a full pass clears every bit, so the
//! hand's starting entry is clear on its second visit.
//!
//! ## Performance Characteristics
//!
//! | Operation | Time    | Notes                               |
//! |-----------|---------|-------------------------------------|
//! | `add`     | O(1)    | Link behind hand                    |
//! | `access`  | O(1)    | Hash lookup + bit set               |
//! | `remove`  | O(1)    | Unlink                              |
//! | `victim`  | O(1)*   | *Amortized; one sweep clears n bits |

use std::hash::Hash;

use crate::ds::ClockRing;
use crate::policy::EvictionPolicy;

/// Second-chance eviction over a circular ring.
///
/// # Example
///
/// ```
/// use boundcache::policy::{ClockPolicy, EvictionPolicy};
///
/// let mut policy = ClockPolicy::new();
/// policy.add("a");
/// policy.add("b");
/// policy.add("c");
///
/// // All bits set: the sweep clears a, b, c and comes back to a.
/// assert_eq!(policy.victim(), Some("a"));
///
/// // b gets a second chance, c does not.
/// policy.access(&"b");
/// assert_eq!(policy.victim(), Some("c"));
/// ```
#[derive(Debug)]
pub struct ClockPolicy<K> {
    ring: ClockRing<K>,
}

impl<K> ClockPolicy<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            ring: ClockRing::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: ClockRing::with_capacity(capacity),
        }
    }

    /// Reference bit of `key`, or `None` if it is not tracked.
    pub fn is_referenced(&self, key: &K) -> Option<bool> {
        self.ring.is_referenced(key)
    }

    /// Key currently under the clock hand.
    pub fn hand(&self) -> Option<&K> {
        self.ring.hand_key()
    }

    /// Iterates `(key, referenced)` in the order the hand will visit them.
    pub fn iter(&self) -> impl Iterator<Item = (&K, bool)> {
        self.ring.iter()
    }
}

impl<K> EvictionPolicy<K> for ClockPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn add(&mut self, key: K) {
        self.ring.insert(key);
    }

    fn remove(&mut self, key: &K) -> bool {
        self.ring.remove(key)
    }

    #[inline]
    fn access(&mut self, key: &K) {
        self.ring.touch(key);
    }

    fn victim(&mut self) -> Option<K> {
        self.ring.pop_victim()
    }

    fn peek_victim(&self) -> Option<&K> {
        self.ring.peek_victim()
    }

    fn contains(&self, key: &K) -> bool {
        self.ring.contains(key)
    }

    fn len(&self) -> usize {
        self.ring.len()
    }

    fn clear(&mut self) {
        self.ring.clear();
    }
}

impl<K> Default for ClockPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
