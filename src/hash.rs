//! Open-addressing hash tables over primitive keys.
//!
//! The tables in this module store keys and values inline in flat arrays
//! whose length is a power of two. A key's ideal slot is given by the low bits
//! of a mixed version of its bit pattern, and collisions are resolved by
//! linear probing: an entry is stored in the first empty slot found by
//! stepping forward (and wrapping around) from its ideal slot.
//!
//! Empty slots are marked by the bit pattern zero. The zero key itself is
//! therefore never stored in the table: a flag records whether it is present
//! and its value lives in one extra slot past the end of the table, which every
//! operation checks first.
//!
//! There are no tombstones. Removing an entry empties its slot and then walks
//! the rest of the probe run, moving back every entry whose ideal slot does
//! not lie between the freed slot and its current position (cyclically). After
//! this back-shift, every remaining entry is reachable from its ideal slot
//! without crossing an empty slot, exactly as if the removed entry had never
//! been inserted.
//!
//! A table grows to the next suitable power of two when an insertion would
//! take it over `capacity * load_factor` entries, and halves when removals
//! leave it less than a quarter of that full (never going below the size
//! requested at creation). At least one slot is always empty, so probe loops
//! always terminate.

pub(crate) mod builder;
pub(crate) mod iter;
pub(crate) mod map;
pub(crate) mod set;

#[cfg(feature = "serde")]
mod serde_impl;

pub use builder::OpenHashMapBuilder;
pub use iter::{Iter, Keys, MapCursor, Values};
pub use map::OpenHashMap;
pub use set::{OpenHashSet, SetCursor};
