use std::sync::Arc;
use std::thread;

use boundcache::prelude::*;

fn main() {
    let cache = Arc::new(ConcurrentCache::new(128, PolicyKind::Clock).expect("non-zero capacity"));

    let workers: Vec<_> = (0..4u64)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let mut hits = 0u64;
                for i in 0..1_000u64 {
                    let key = (worker * 7 + i) % 256;
                    if cache.get(&key).is_some() {
                        hits += 1;
                    } else {
                        cache.put(key, key * key);
                    }
                }
                hits
            })
        })
        .collect();

    let hits: u64 = workers.into_iter().map(|h| h.join().unwrap_or(0)).sum();
    println!("hits: {hits}, resident: {}/{}", cache.len(), cache.capacity());

    let consistent = cache.with(|c| c.check_invariants());
    println!("invariants: {consistent:?}");
}
