//! Clock-sweep ring for second-chance eviction.
//!
//! Keys sit on a circular doubly linked ring stored in a `SlotArena`. A hand
//! points at the next eviction candidate. Accesses set a referenced bit that
//! grants one extra pass of the hand before the entry can be evicted.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           ClockRing<K>                               │
//!   │                                                                      │
//!   │   index: FxHashMap<K, SlotId>        arena: SlotArena<Node<K>>       │
//!   │                                                                      │
//!   │                 hand                                                 │
//!   │                  │                                                   │
//!   │                  ▼                                                   │
//!   │          ┌──► [A ref=1] ──► [B ref=0] ──► [C ref=1] ──┐              │
//!   │          │                                            │              │
//!   │          └────────────────────────────────────────────┘              │
//!   │                                                                      │
//!   │   Sweep from hand:                                                   │
//!   │   [A ref=1] -> clear ref, advance                                    │
//!   │   [B ref=0] -> evict B, hand moves to C                              │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Placement
//!
//! New entries are linked immediately behind the hand, so a full sweep
//! visits them last. The first entry of an empty ring becomes the hand.
//!
//! ## Performance Characteristics
//!
//! | Operation    | Time        | Notes                                  |
//! |--------------|-------------|----------------------------------------|
//! | `insert`     | O(1)        | Link behind hand, ref=1                |
//! | `touch`      | O(1)        | Sets reference bit                     |
//! | `remove`     | O(1)        | Unlink; hand steps back if it pointed here |
//! | `pop_victim` | O(1) amort. | At most one full revolution            |
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<K> {
    referenced: bool,
    prev: SlotId,
    next: SlotId,
    key: K,
}

/// Circular ring implementing the CLOCK (second-chance) algorithm over keys.
#[derive(Debug)]
pub struct ClockRing<K> {
    arena: SlotArena<Node<K>>,
    index: FxHashMap<K, SlotId>,
    hand: Option<SlotId>,
}

impl<K> ClockRing<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty ring.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            index: FxHashMap::default(),
            hand: None,
        }
    }

    /// Creates an empty ring with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            hand: None,
        }
    }

    /// Returns the number of entries on the ring.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `key` is on the ring.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the key under the hand.
    pub fn hand_key(&self) -> Option<&K> {
        self.hand
            .and_then(|id| self.arena.get(id))
            .map(|node| &node.key)
    }

    /// Returns the reference bit of `key`, or `None` if missing.
    pub fn is_referenced(&self, key: &K) -> Option<bool> {
        let id = *self.index.get(key)?;
        self.arena.get(id).map(|node| node.referenced)
    }

    /// Links `key` behind the hand with its reference bit set.
    ///
    /// Returns `false` (and changes nothing) if the key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let id = match self.hand {
            None => {
                let id = self.arena.insert(Node {
                    referenced: true,
                    prev: SlotId(0),
                    next: SlotId(0),
                    key: key.clone(),
                });
                if let Some(node) = self.arena.get_mut(id) {
                    node.prev = id;
                    node.next = id;
                }
                self.hand = Some(id);
                id
            },
            Some(hand) => {
                let Some(tail) = self.arena.get(hand).map(|node| node.prev) else {
                    return false;
                };
                let id = self.arena.insert(Node {
                    referenced: true,
                    prev: tail,
                    next: hand,
                    key: key.clone(),
                });
                if let Some(node) = self.arena.get_mut(tail) {
                    node.next = id;
                }
                if let Some(node) = self.arena.get_mut(hand) {
                    node.prev = id;
                }
                id
            },
        };

        self.index.insert(key, id);
        true
    }

    /// Sets the reference bit for `key`; returns `false` if missing.
    ///
    /// Neither the entry nor the hand moves.
    pub fn touch(&mut self, key: &K) -> bool {
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        match self.arena.get_mut(id) {
            Some(node) => {
                node.referenced = true;
                true
            },
            None => false,
        }
    }

    /// Unlinks `key` from the ring; returns `false` if missing.
    ///
    /// If the hand points at the removed entry it first steps back to the
    /// previous entry so it never dangles.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(id) = self.index.remove(key) else {
            return false;
        };
        if self.hand == Some(id) {
            self.hand = self.arena.get(id).map(|node| node.prev);
        }
        self.unlink(id);
        true
    }

    /// Sweeps from the hand and evicts the first entry with a clear bit.
    ///
    /// Referenced entries passed over have their bit cleared. Terminates
    /// within one full revolution plus one step.
    pub fn pop_victim(&mut self) -> Option<K> {
        loop {
            let id = self.hand?;
            let node = self.arena.get_mut(id)?;
            if node.referenced {
                node.referenced = false;
                self.hand = Some(node.next);
                continue;
            }

            let next = node.next;
            let key = node.key.clone();
            self.index.remove(&key);
            self.unlink(id);
            if self.hand == Some(id) {
                self.hand = Some(next);
            }
            return Some(key);
        }
    }

    /// Returns the key [`pop_victim`](Self::pop_victim) would evict, without
    /// clearing any bits.
    pub fn peek_victim(&self) -> Option<&K> {
        let start = self.hand?;
        let mut current = start;
        for _ in 0..self.len() {
            let node = self.arena.get(current)?;
            if !node.referenced {
                return Some(&node.key);
            }
            current = node.next;
        }
        // Every bit is set: a sweep clears them all and lands back on the hand.
        self.arena.get(start).map(|node| &node.key)
    }

    /// Iterates `(key, referenced)` starting at the hand, in sweep order.
    pub fn iter(&self) -> ClockRingIter<'_, K> {
        ClockRingIter {
            ring: self,
            current: self.hand,
            remaining: self.len(),
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.index.clear();
        self.hand = None;
    }

    fn unlink(&mut self, id: SlotId) {
        let Some(node) = self.arena.remove(id) else {
            return;
        };
        if self.arena.is_empty() {
            self.hand = None;
            return;
        }
        if let Some(prev) = self.arena.get_mut(node.prev) {
            prev.next = node.next;
        }
        if let Some(next) = self.arena.get_mut(node.next) {
            next.prev = node.prev;
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.arena.len(), self.index.len());

        let Some(hand) = self.hand else {
            assert!(self.arena.is_empty());
            return;
        };

        let mut current = hand;
        let mut count = 0usize;
        loop {
            let node = self.arena.get(current).expect("ring node missing");
            assert_eq!(self.index.get(&node.key), Some(&current));
            let next = self.arena.get(node.next).expect("next node missing");
            assert_eq!(next.prev, current);
            count += 1;
            assert!(count <= self.len());
            current = node.next;
            if current == hand {
                break;
            }
        }
        assert_eq!(count, self.len());
    }
}

impl<K> Default for ClockRing<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(key, referenced)` pairs in sweep order.
pub struct ClockRingIter<'a, K> {
    ring: &'a ClockRing<K>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, K> Iterator for ClockRingIter<'a, K> {
    type Item = (&'a K, bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.ring.arena.get(self.current?)?;
        self.current = Some(node.next);
        self.remaining -= 1;
        Some((&node.key, node.referenced))
    }
}
