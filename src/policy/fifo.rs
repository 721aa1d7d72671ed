//! FIFO (First In, First Out) eviction policy.
//!
//! Keys are ordered purely by insertion. Reads never reorder anything, so
//! the victim is always the oldest key still present.
//!
//! ```text
//!   add(k)  ──► head ─► [k4] ◄──► [k3] ◄──► [k2] ◄──► [k1] ◄── tail ──► victim()
//!                      newest                          oldest
//! ```
//!
//! | Operation | Time | Notes                     |
//! |-----------|------|---------------------------|
//! | `add`     | O(1) | Push to head              |
//! | `access`  | O(1) | No-op                     |
//! | `remove`  | O(1) | Unlink by `SlotId`        |
//! | `victim`  | O(1) | Pop tail                  |

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::policy::EvictionPolicy;

/// Insertion-order eviction.
///
/// # Example
///
/// ```
/// use boundcache::policy::{EvictionPolicy, FifoPolicy};
///
/// let mut policy = FifoPolicy::new();
/// policy.add(1);
/// policy.add(2);
/// policy.access(&1); // ignored
///
/// assert_eq!(policy.victim(), Some(1));
/// ```
#[derive(Debug)]
pub struct FifoPolicy<K> {
    list: IntrusiveList<K>,
    index: FxHashMap<K, SlotId>,
}

impl<K> FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            list: IntrusiveList::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Iterates keys from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.list.iter()
    }
}

impl<K> EvictionPolicy<K> for FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn add(&mut self, key: K) {
        if self.index.contains_key(&key) {
            return;
        }
        let id = self.list.push_front(key.clone());
        self.index.insert(key, id);
    }

    fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => self.list.remove(id).is_some(),
            None => false,
        }
    }

    #[inline]
    fn access(&mut self, _key: &K) {}

    fn victim(&mut self) -> Option<K> {
        let key = self.list.pop_back()?;
        self.index.remove(&key);
        Some(key)
    }

    fn peek_victim(&self) -> Option<&K> {
        self.list.back()
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }
}

impl<K> Default for FifoPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
