pub mod clock_ring;
pub mod frequency_buckets;
pub mod intrusive_list;
pub mod slot_arena;

pub use clock_ring::ClockRing;
pub use frequency_buckets::FrequencyBuckets;
pub use intrusive_list::IntrusiveList;
pub use slot_arena::{SlotArena, SlotId};
