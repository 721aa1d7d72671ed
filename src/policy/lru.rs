//! LRU (Least Recently Used) eviction policy.
//!
//! Same list layout as FIFO, but every touch (read or overwrite) moves the
//! key back to the head, so the tail is always the least recently touched.
//!
//! ```text
//!   access(k2):
//!     before: head ─► [k4] ◄──► [k3] ◄──► [k2] ◄──► [k1] ◄── tail
//!     after:  head ─► [k2] ◄──► [k4] ◄──► [k3] ◄──► [k1] ◄── tail
//! ```
//!
//! | Operation | Time | Notes                     |
//! |-----------|------|---------------------------|
//! | `add`     | O(1) | Push to head              |
//! | `access`  | O(1) | Move to head              |
//! | `remove`  | O(1) | Unlink by `SlotId`        |
//! | `victim`  | O(1) | Pop tail                  |

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::policy::EvictionPolicy;

/// Recency-order eviction.
///
/// # Example
///
/// ```
/// use boundcache::policy::{EvictionPolicy, LruPolicy};
///
/// let mut policy = LruPolicy::new();
/// policy.add(1);
/// policy.add(2);
/// policy.access(&1);
///
/// assert_eq!(policy.victim(), Some(2));
/// ```
#[derive(Debug)]
pub struct LruPolicy<K> {
    list: IntrusiveList<K>,
    index: FxHashMap<K, SlotId>,
}

impl<K> LruPolicy<K>
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

    /// Iterates keys from most to least recently touched.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.list.iter()
    }
}

impl<K> EvictionPolicy<K> for LruPolicy<K>
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
    fn access(&mut self, key: &K) {
        if let Some(&id) = self.index.get(key) {
            self.list.move_to_front(id);
        }
    }

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

impl<K> Default for LruPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
