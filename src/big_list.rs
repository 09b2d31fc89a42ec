//! Lists of primitive values indexed by `u64`, backed by segmented storage.
//!
//! A [`SegmentedList`][list-struct] keeps its elements in a [`BigArray`][array-struct]:
//! a table of segments of `2^SHIFT` elements each. Element `i` lives at offset
//! `i & (2^SHIFT - 1)` of segment `i >> SHIFT`, so indexing costs a shift and a
//! mask, and the length of the list is not limited by the largest allocation
//! the platform can make. Growing the list appends whole segments (and
//! reallocates at most the last one), so existing segments are never copied.
//!
//! Insertions and removals in the middle of the list, and the bulk operations
//! (`get_elements`, `set_elements`, `add_elements` and `remove_elements`), move
//! elements one block per segment piece rather than one element at a time.
//!
//! Views over a range of a list ([`SubList`][sub-list-struct]) and cursors
//! ([`ListCursor`][cursor-struct]) mutably borrow the list they work on, so the
//! list cannot be changed behind their back while they are alive. Both work on
//! anything implementing the [`BigList`][big-list-trait] trait, which is how a
//! view of a view forwards its changes all the way down.
//!
//! [list-struct]: ./struct.SegmentedList.html
//! [array-struct]: ./struct.BigArray.html
//! [sub-list-struct]: ./struct.SubList.html
//! [cursor-struct]: ./struct.ListCursor.html
//! [big-list-trait]: ./trait.BigList.html

pub(crate) mod big_array;
pub(crate) mod iter;
pub(crate) mod list;
pub(crate) mod sub_list;

#[cfg(feature = "serde")]
mod serde_impl;

pub use big_array::{BigArray, DEFAULT_SEGMENT_SHIFT};
pub use iter::{Iter, ListCursor, ListSplitter};
pub use list::{SegmentedList, DEFAULT_INITIAL_CAPACITY};
pub use sub_list::SubList;

use crate::common::error::CollectionError;

/// The indexed operations shared by [`SegmentedList`] and its [`SubList`]
/// views.
///
/// Indices are relative to the list the method is called on. Every method
/// checks its indices and ranges before touching any element, so a failed call
/// leaves the list unchanged.
pub trait BigList {
    type Element: Copy;

    /// Returns the number of elements.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`.
    fn get(&self, index: u64) -> Result<Self::Element, CollectionError>;

    /// Replaces the element at `index` and returns the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`.
    fn set(&mut self, index: u64, value: Self::Element) -> Result<Self::Element, CollectionError>;

    /// Inserts `value` at `index`, moving the elements at and after `index`
    /// one position later.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index > len`.
    fn insert(&mut self, index: u64, value: Self::Element) -> Result<(), CollectionError>;

    /// Removes the element at `index` and returns it, moving the elements
    /// after it one position earlier.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`.
    fn remove_at(&mut self, index: u64) -> Result<Self::Element, CollectionError>;

    /// Copies the `length` elements starting at `from` into
    /// `dest[dest_offset..dest_offset + length]`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if either range does not
    /// fit.
    fn get_elements(
        &self,
        from: u64,
        dest: &mut [Self::Element],
        dest_offset: usize,
        length: usize,
    ) -> Result<(), CollectionError>;

    /// Overwrites the `length` elements starting at `index` with
    /// `src[offset..offset + length]`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if either range does not
    /// fit.
    fn set_elements(
        &mut self,
        index: u64,
        src: &[Self::Element],
        offset: usize,
        length: usize,
    ) -> Result<(), CollectionError>;

    /// Inserts `src[offset..offset + length]` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index > len` or if the
    /// source range does not fit in `src`.
    fn add_elements(
        &mut self,
        index: u64,
        src: &[Self::Element],
        offset: usize,
        length: usize,
    ) -> Result<(), CollectionError>;

    /// Removes the elements in `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if `from > to`, and
    /// [`CollectionError::IndexOutOfRange`] if `to > len`.
    fn remove_elements(&mut self, from: u64, to: u64) -> Result<(), CollectionError>;
}
