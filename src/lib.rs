#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

//! Primcoll provides collections of primitive values that store them unboxed,
//! in flat arrays.
//!
//! # Hash tables
//!
//! [`OpenHashMap`][map-struct] and [`OpenHashSet`][set-struct] are open
//! addressing hash tables with linear probing and keys of any
//! [`PrimitiveKey`][key-trait] type: the integer types, `f32`, `f64`, `char`
//! and `bool`. Keys and values are kept in two parallel arrays whose length is
//! a power of two, without per-entry allocation. Removal shifts entries back
//! instead of leaving tombstones, so lookups never get slower as entries come
//! and go.
//!
//! Lookups of missing keys do not fail: they return the map's _default return
//! value_, which is `V::default()` unless set otherwise.
//!
//! ```rust
//! use primcoll::OpenHashMap;
//!
//! let mut counts: OpenHashMap<char, u32> = OpenHashMap::new();
//! for c in "mississippi".chars() {
//!     counts.add_to(c, 1);
//! }
//! assert_eq!(counts.get('s'), 4);
//! assert_eq!(counts.get('z'), 0);
//! ```
//!
//! # Segmented lists
//!
//! [`SegmentedList`][list-struct] is a list indexed by `u64` whose elements live
//! in segments of a fixed power-of-two size, so it can grow past the largest
//! single allocation the platform allows. Bulk operations copy one segment
//! piece at a time, and [`SubList`][sub-list-struct] views,
//! [`ListCursor`][cursor-struct]s and [`ListSplitter`][splitter-struct]s give
//! ranged, positional and splittable access to it.
//!
//! ```rust
//! use primcoll::{CollectionError, SegmentedList};
//!
//! let mut list: SegmentedList<f64> = SegmentedList::new();
//! list.add_elements(0, &[1.0, 2.0, 4.0], 0, 3)?;
//! list.insert(2, 3.0)?;
//! assert_eq!(list.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
//! # Ok::<(), CollectionError>(())
//! ```
//!
//! # Cargo features
//!
//! - `logging`: emits `log` records at trace level when a hash table is
//!   rehashed or the storage of a list is reallocated.
//! - `serde`: implements `Serialize` and `Deserialize` for the collections.
//!
//! [map-struct]: ./struct.OpenHashMap.html
//! [set-struct]: ./struct.OpenHashSet.html
//! [key-trait]: ./trait.PrimitiveKey.html
//! [list-struct]: ./struct.SegmentedList.html
//! [sub-list-struct]: ./struct.SubList.html
//! [cursor-struct]: ./struct.ListCursor.html
//! [splitter-struct]: ./struct.ListSplitter.html

pub mod big_list;
pub mod hash;

pub(crate) mod common;

pub use big_list::{
    BigArray, BigList, ListCursor, ListSplitter, SegmentedList, SubList,
    DEFAULT_INITIAL_CAPACITY, DEFAULT_SEGMENT_SHIFT,
};
pub use common::{
    error::CollectionError,
    hash_common::{
        DEFAULT_INITIAL_SIZE, DEFAULT_LOAD_FACTOR, FAST_LOAD_FACTOR, VERY_FAST_LOAD_FACTOR,
    },
    primitive::PrimitiveKey,
};
pub use hash::{MapCursor, OpenHashMap, OpenHashMapBuilder, OpenHashSet, SetCursor};

#[cfg(test)]
mod tests {
    #[test]
    fn default_constants() {
        assert_eq!(crate::DEFAULT_INITIAL_SIZE, 16);
        assert_eq!(crate::DEFAULT_LOAD_FACTOR, 0.75);
        assert_eq!(crate::DEFAULT_INITIAL_CAPACITY, 10);
        assert_eq!(crate::DEFAULT_SEGMENT_SHIFT, 27);
        assert_eq!(crate::BigArray::<u8>::SEGMENT_SIZE, 134_217_728);
    }
}
