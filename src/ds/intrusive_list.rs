//! Doubly linked key list for the FIFO and LRU policies.
//!
//! Both policies keep a `FxHashMap<K, SlotId>` beside this list. The handle
//! returned by [`push_front`](IntrusiveList::push_front) is what they store,
//! so unlinking or promoting a key never walks the list.
//!
//! ```text
//!   index: { k1 -> id_3, k2 -> id_2, k3 -> id_1 }
//!
//!   head (newest / MRU) ─► [id_1: k3] ◄──► [id_2: k2] ◄──► [id_3: k1] ◄── tail (victim)
//! ```
//!
//! Nodes live in a [`SlotArena`] and point at each other by `SlotId`.
//! A handle is valid until its node is removed; the policy drops it from
//! its index in the same call.
//!
//! | Operation       | Used by      | Time |
//! |-----------------|--------------|------|
//! | `push_front`    | FIFO, LRU    | O(1) |
//! | `move_to_front` | LRU `access` | O(1) |
//! | `remove`        | FIFO, LRU    | O(1) |
//! | `pop_back`      | `victim`     | O(1) |

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Link<T> {
    value: T,
    newer: Option<SlotId>,
    older: Option<SlotId>,
}

/// Arena-backed list ordered newest to oldest.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    nodes: SlotArena<Link<T>>,
    newest: Option<SlotId>,
    oldest: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            newest: None,
            oldest: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The oldest value, i.e. the next one `pop_back` returns.
    pub fn back(&self) -> Option<&T> {
        self.nodes.get(self.oldest?).map(|link| &link.value)
    }

    /// Iterates from newest to oldest.
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            list: self,
            current: self.newest,
        }
    }

    /// Links `value` as the newest node and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.nodes.insert(Link {
            value,
            newer: None,
            older: None,
        });
        self.link_newest(id);
        id
    }

    /// Unlinks and returns the oldest value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.oldest?;
        self.remove(id)
    }

    /// Unlinks the node behind `id`; `None` if the handle is stale.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.nodes.remove(id).map(|link| link.value)
    }

    /// Makes `id` the newest node; returns `false` if the handle is stale.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.newest == Some(id) {
            return true;
        }
        if self.unlink(id).is_none() {
            return false;
        }
        self.link_newest(id);
        true
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.newest = None;
        self.oldest = None;
    }

    fn link_newest(&mut self, id: SlotId) {
        let previous = self.newest;
        if let Some(link) = self.nodes.get_mut(id) {
            link.newer = None;
            link.older = previous;
        }
        match previous.and_then(|prev| self.nodes.get_mut(prev)) {
            Some(prev) => prev.newer = Some(id),
            None => self.oldest = Some(id),
        }
        self.newest = Some(id);
    }

    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let link = self.nodes.get_mut(id)?;
        let (newer, older) = (link.newer.take(), link.older.take());

        match newer.and_then(|n| self.nodes.get_mut(n)) {
            Some(n) => n.older = older,
            None => self.newest = older,
        }
        match older.and_then(|o| self.nodes.get_mut(o)) {
            Some(o) => o.newer = newer,
            None => self.oldest = newer,
        }
        Some(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut count = 0usize;
        let mut newer = None;
        let mut current = self.newest;
        while let Some(id) = current {
            let link = self.nodes.get(id).expect("linked node missing");
            assert_eq!(link.newer, newer);
            count += 1;
            assert!(count <= self.len(), "cycle in list");
            newer = Some(id);
            current = link.older;
        }
        assert_eq!(self.oldest, newer);
        assert_eq!(count, self.len());
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct IntrusiveListIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.list.nodes.get(self.current?)?;
        self.current = link.older;
        Some(&link.value)
    }
}
