// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Behavior every policy must share through the public `BoundedCache` API,
// plus the canonical eviction scenario for each policy.

use std::collections::VecDeque;

use boundcache::prelude::*;
use proptest::prelude::*;

// ==============================================
// Canonical Eviction Scenarios
// ==============================================

mod scenarios {
    use super::*;

    #[test]
    fn fifo_evicts_in_insertion_order_despite_reads() {
        let capacity = 4;
        let mut cache = BoundedCache::new(capacity, PolicyKind::Fifo).unwrap();
        let mut evicted = Vec::new();

        for key in 1..=10u32 {
            // Reads on every resident key must not change the order.
            for resident in 1..key {
                cache.get(&resident);
            }
            if let Some((k, _)) = cache.put_evicting(key, key * 10) {
                evicted.push(k);
            }
        }

        assert_eq!(evicted, (1..=6).collect::<Vec<_>>());
        assert_eq!(cache.len(), capacity);
    }

    #[test]
    fn lru_evicts_least_recently_touched() {
        let mut cache = BoundedCache::new(5, PolicyKind::Lru).unwrap();
        for key in 1..=5 {
            cache.put(key, key);
        }
        cache.get(&1);
        cache.get(&2);

        assert_eq!(cache.put_evicting(6, 6), Some((3, 3)));
        assert!(cache.contains(&1));
        assert!(cache.contains(&2));
    }

    #[test]
    fn lfu_evicts_unique_minimum_frequency() {
        let mut cache = BoundedCache::new(3, PolicyKind::Lfu).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"b");

        assert_eq!(cache.put_evicting("d", 4), Some(("c", 3)));

        let Policy::Lfu(lfu) = cache.policy() else {
            panic!("expected LFU policy");
        };
        assert_eq!(lfu.frequency(&"a"), Some(3));
        assert_eq!(lfu.frequency(&"b"), Some(2));
        assert_eq!(lfu.frequency(&"d"), Some(1));
    }

    #[test]
    fn clock_full_sweep_then_second_chance() {
        let mut cache = BoundedCache::new(3, PolicyKind::Clock).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        // Every bit is set: the sweep clears a, b, c and evicts a on revisit.
        assert_eq!(cache.put_evicting("d", 4), Some(("a", 1)));
        {
            let Policy::Clock(clock) = cache.policy() else {
                panic!("expected CLOCK policy");
            };
            assert_eq!(clock.is_referenced(&"b"), Some(false));
            assert_eq!(clock.is_referenced(&"c"), Some(false));
            assert_eq!(clock.hand(), Some(&"b"));
        }

        // b regains its bit and is skipped; c is not.
        cache.get(&"b");
        assert_eq!(cache.peek_victim(), Some(&"c"));
        assert_eq!(cache.put_evicting("e", 5), Some(("c", 3)));
        assert!(cache.contains(&"b"));
    }

    #[test]
    fn put_then_get_round_trips() {
        for kind in PolicyKind::ALL {
            let mut cache = BoundedCache::new(1, kind).unwrap();
            for key in 0..20u32 {
                cache.put(key, key + 100);
                assert_eq!(cache.get(&key), Some(&(key + 100)), "{kind}");
            }
        }
    }

    /// Per-key eviction standing: list order for FIFO/LRU, `(key, frequency)`
    /// for LFU, `(key, reference bit)` in sweep order for CLOCK.
    fn standing(cache: &BoundedCache<u32, u32>) -> Vec<(u32, u64)> {
        match cache.policy() {
            Policy::Fifo(p) => p.iter().map(|k| (*k, 0)).collect(),
            Policy::Lru(p) => p.iter().map(|k| (*k, 0)).collect(),
            Policy::Lfu(p) => {
                let mut keys: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
                keys.sort_unstable();
                keys.into_iter()
                    .map(|k| (k, p.frequency(&k).unwrap_or(0)))
                    .collect()
            },
            Policy::Clock(p) => p.iter().map(|(k, r)| (*k, u64::from(r))).collect(),
        }
    }

    #[test]
    fn remove_missing_key_changes_nothing() {
        for kind in PolicyKind::ALL {
            let mut cache = BoundedCache::new(4, kind).unwrap();
            for key in 1..=4 {
                cache.put(key, key);
            }
            // Force a CLOCK sweep so bits differ, and spread LFU counts.
            cache.put(5, 5);
            cache.get(&2);
            cache.get(&2);
            cache.get(&3);

            let victim = cache.peek_victim().copied();
            let before = standing(&cache);

            assert_eq!(cache.remove(&99), None);
            assert_eq!(cache.remove(&99), None);

            assert_eq!(cache.len(), 4);
            assert_eq!(cache.peek_victim().copied(), victim, "{kind}");
            assert_eq!(standing(&cache), before, "{kind}");
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn remove_missing_key_keeps_lfu_frequencies() {
        let mut cache = BoundedCache::new(3, PolicyKind::Lfu).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.get(&"a");

        cache.remove(&"zzz");

        let Policy::Lfu(lfu) = cache.policy() else {
            panic!("expected LFU policy");
        };
        assert_eq!(lfu.frequency(&"a"), Some(3));
        assert_eq!(lfu.frequency(&"b"), Some(1));
        assert_eq!(lfu.min_frequency(), Some(1));
    }

    #[test]
    fn remove_missing_key_keeps_clock_ring() {
        let mut cache = BoundedCache::new(3, PolicyKind::Clock).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.put("d", 4); // sweep clears every bit, evicts a
        cache.get(&"c");

        let Policy::Clock(clock) = cache.policy() else {
            panic!("expected CLOCK policy");
        };
        let before: Vec<_> = clock.iter().map(|(k, r)| (*k, r)).collect();
        assert_eq!(before, vec![("b", false), ("c", true), ("d", true)]);

        cache.remove(&"zzz");

        let Policy::Clock(clock) = cache.policy() else {
            panic!("expected CLOCK policy");
        };
        let after: Vec<_> = clock.iter().map(|(k, r)| (*k, r)).collect();
        assert_eq!(after, before);
        assert_eq!(clock.hand(), Some(&"b"));
    }
}

// ==============================================
// Configuration
// ==============================================

mod configuration {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected_for_every_policy() {
        for kind in PolicyKind::ALL {
            let err = BoundedCache::<u32, u32>::new(0, kind).unwrap_err();
            assert!(err.message().contains("capacity"));
        }
    }

    #[test]
    fn unknown_policy_name_is_rejected() {
        let err = "random".parse::<PolicyKind>().unwrap_err();
        let wrapped = CacheError::from(err);
        assert!(matches!(wrapped, CacheError::InvalidConfiguration(_)));
    }

    #[test]
    fn policy_names_round_trip_through_display() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.to_string().parse::<PolicyKind>().unwrap(), kind);
        }
    }
}

// ==============================================
// Property Tests
// ==============================================

#[derive(Debug, Clone)]
enum Op {
    Put(u32, u32),
    Get(u32),
    Peek(u32),
    Remove(u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..40, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        3 => (0u32..40).prop_map(Op::Get),
        1 => (0u32..40).prop_map(Op::Peek),
        1 => (0u32..40).prop_map(Op::Remove),
    ]
}

fn kind_strategy() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

/// Straightforward ordered-list model of FIFO and LRU; front = next victim.
struct OrderModel {
    capacity: usize,
    recency: bool,
    order: VecDeque<(u32, u32)>,
}

impl OrderModel {
    fn new(capacity: usize, recency: bool) -> Self {
        Self {
            capacity,
            recency,
            order: VecDeque::new(),
        }
    }

    fn position(&self, key: u32) -> Option<usize> {
        self.order.iter().position(|(k, _)| *k == key)
    }

    fn touch(&mut self, idx: usize) -> usize {
        if !self.recency {
            return idx;
        }
        if let Some(entry) = self.order.remove(idx) {
            self.order.push_back(entry);
        }
        self.order.len() - 1
    }

    fn put(&mut self, key: u32, value: u32) -> Option<(u32, u32)> {
        if let Some(idx) = self.position(key) {
            let idx = self.touch(idx);
            self.order[idx].1 = value;
            return None;
        }
        let evicted = if self.order.len() == self.capacity {
            self.order.pop_front()
        } else {
            None
        };
        self.order.push_back((key, value));
        evicted
    }

    fn get(&mut self, key: u32) -> Option<u32> {
        let idx = self.position(key)?;
        let idx = self.touch(idx);
        Some(self.order[idx].1)
    }

    fn remove(&mut self, key: u32) -> Option<u32> {
        let idx = self.position(key)?;
        self.order.remove(idx).map(|(_, v)| v)
    }
}

proptest! {
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_invariants_always_hold(
        kind in kind_strategy(),
        capacity in 1usize..20,
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        let mut cache: BoundedCache<u32, u32> = BoundedCache::new(capacity, kind).unwrap();
        for op in ops {
            match op {
                Op::Put(k, v) => { cache.put(k, v); },
                Op::Get(k) => { cache.get(&k); },
                Op::Peek(k) => { cache.peek(&k); },
                Op::Remove(k) => { cache.remove(&k); },
            }
            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.len(), cache.policy().len());
            prop_assert!(cache.check_invariants().is_ok());
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_peek_victim_matches_next_eviction(
        kind in kind_strategy(),
        capacity in 1usize..10,
        ops in prop::collection::vec(op_strategy(), 0..100),
        fresh in 1000u32..2000
    ) {
        let mut cache: BoundedCache<u32, u32> = BoundedCache::new(capacity, kind).unwrap();
        for op in ops {
            match op {
                Op::Put(k, v) => { cache.put(k, v); },
                Op::Get(k) => { cache.get(&k); },
                Op::Peek(k) => { cache.peek(&k); },
                Op::Remove(k) => { cache.remove(&k); },
            }
        }
        if cache.len() == capacity {
            let predicted = cache.peek_victim().copied();
            let evicted = cache.put_evicting(fresh, 0).map(|(k, _)| k);
            prop_assert_eq!(predicted, evicted);
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_fifo_and_lru_match_reference_model(
        recency in any::<bool>(),
        capacity in 1usize..12,
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        let kind = if recency { PolicyKind::Lru } else { PolicyKind::Fifo };
        let mut cache: BoundedCache<u32, u32> = BoundedCache::new(capacity, kind).unwrap();
        let mut model = OrderModel::new(capacity, recency);

        for op in ops {
            match op {
                Op::Put(k, v) => {
                    prop_assert_eq!(cache.put_evicting(k, v), model.put(k, v));
                },
                Op::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                },
                Op::Peek(k) => {
                    let expected = model.position(k).map(|i| model.order[i].1);
                    prop_assert_eq!(cache.peek(&k).copied(), expected);
                },
                Op::Remove(k) => {
                    prop_assert_eq!(cache.remove(&k), model.remove(k));
                },
            }
            prop_assert_eq!(cache.len(), model.order.len());
            prop_assert_eq!(cache.peek_victim().copied(), model.order.front().map(|(k, _)| *k));
        }
    }
}
