use boundcache::prelude::*;

fn main() {
    for kind in PolicyKind::ALL {
        let mut cache = CacheBuilder::new(3).policy(kind).build();

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"b");

        let evicted = cache.put_evicting("d", 4).map(|(k, _)| k);
        println!("{:>5}: put d evicted {evicted:?}", kind.as_str());
    }

    match "mru".parse::<PolicyKind>() {
        Ok(kind) => println!("parsed {kind}"),
        Err(err) => println!("rejected: {err}"),
    }
}

// Expected output:
//  fifo: put d evicted Some("a")
//   lru: put d evicted Some("c")
//   lfu: put d evicted Some("c")
// clock: put d evicted Some("a")
// rejected: unknown eviction policy "mru" (expected fifo, lru, lfu or clock)
//
// Explanation: capacity=3. FIFO ignores reads, so the oldest key goes.
// LRU drops c, the least recently touched. LFU drops c, the only key never
// read. CLOCK finds every bit set, clears all three in one sweep and evicts
// a when the hand comes back to it.
