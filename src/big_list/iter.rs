use super::{big_array::BigArray, BigList};
use crate::common::error::CollectionError;

use std::iter::FusedIterator;

/// An iterator over the elements of a [`SegmentedList`][list-struct], from
/// both ends.
///
/// [list-struct]: ./struct.SegmentedList.html
pub struct Iter<'a, T, const SHIFT: u32> {
    array: &'a BigArray<T, SHIFT>,
    front: u64,
    back: u64,
}

impl<'a, T, const SHIFT: u32> Iter<'a, T, SHIFT> {
    pub(crate) fn new(array: &'a BigArray<T, SHIFT>, front: u64, back: u64) -> Self {
        Self { array, front, back }
    }
}

impl<'a, T, const SHIFT: u32> Iterator for Iter<'a, T, SHIFT>
where
    T: Copy + Default,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        let value = self.array.get(self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        match usize::try_from(len) {
            Ok(len) => (len, Some(len)),
            Err(_) => (usize::MAX, None),
        }
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        self.front = self.front.saturating_add(n as u64).min(self.back);
        self.next()
    }

    fn fold<B, F>(self, init: B, mut f: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        let mut acc = init;
        for chunk in self.array.chunks(self.front, self.back) {
            acc = chunk.iter().fold(acc, |acc, value| f(acc, *value));
        }
        acc
    }
}

impl<'a, T, const SHIFT: u32> DoubleEndedIterator for Iter<'a, T, SHIFT>
where
    T: Copy + Default,
{
    fn next_back(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.array.get(self.back))
    }
}

impl<'a, T, const SHIFT: u32> ExactSizeIterator for Iter<'a, T, SHIFT> where T: Copy + Default {}

impl<'a, T, const SHIFT: u32> FusedIterator for Iter<'a, T, SHIFT> where T: Copy + Default {}

/// A cursor over a [`BigList`] that moves in both directions and can modify
/// the list as it goes.
///
/// The cursor sits between two elements. [`next`][Iterator::next] returns the
/// element after it and moves forward; [`previous`][Self::previous] returns
/// the element before it and moves back. [`remove`][Self::remove] and
/// [`set`][Self::set] act on the element returned by the last move, and fail
/// with [`CollectionError::InvalidIteratorState`] if there is none, which is
/// the case before the first move and after a `remove` or an
/// [`add`][Self::add].
///
/// # Examples
///
/// ```rust
/// use primcoll::{CollectionError, SegmentedList};
///
/// let mut list: SegmentedList<i32> = (1..=6).collect();
/// let mut cursor = list.cursor();
/// while let Some(value) = cursor.next() {
///     if value % 2 == 0 {
///         cursor.remove()?;
///     } else {
///         cursor.set(value * 10)?;
///         cursor.add(0)?;
///     }
/// }
/// assert_eq!(list.to_vec(), vec![10, 0, 30, 0, 50, 0]);
/// # Ok::<(), CollectionError>(())
/// ```
pub struct ListCursor<'a, L: ?Sized> {
    list: &'a mut L,
    pos: u64,
    last: Option<u64>,
}

impl<'a, L> ListCursor<'a, L>
where
    L: BigList + ?Sized,
{
    /// `pos` must already be checked against `list`.
    pub(crate) fn new(list: &'a mut L, pos: u64) -> Self {
        Self {
            list,
            pos,
            last: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.list.len()
    }

    pub fn has_previous(&self) -> bool {
        self.pos > 0
    }

    /// Returns the index of the element a call to `next` would return.
    pub fn next_index(&self) -> u64 {
        self.pos
    }

    /// Returns the index of the element a call to `previous` would return,
    /// or `None` at the start of the list.
    pub fn previous_index(&self) -> Option<u64> {
        self.pos.checked_sub(1)
    }

    /// Moves back and returns the element before the cursor.
    pub fn previous(&mut self) -> Option<L::Element> {
        let index = self.pos.checked_sub(1)?;
        let value = self.list.get(index).ok()?;
        self.pos = index;
        self.last = Some(index);
        Some(value)
    }

    /// Removes the element returned by the last call to `next` or `previous`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidIteratorState`] if there is no such
    /// element.
    pub fn remove(&mut self) -> Result<L::Element, CollectionError> {
        let last = self.last.ok_or(CollectionError::InvalidIteratorState)?;
        let value = self.list.remove_at(last)?;
        if last < self.pos {
            self.pos -= 1;
        }
        self.last = None;
        Ok(value)
    }

    /// Replaces the element returned by the last call to `next` or
    /// `previous`, and returns the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidIteratorState`] if there is no such
    /// element.
    pub fn set(&mut self, value: L::Element) -> Result<L::Element, CollectionError> {
        let last = self.last.ok_or(CollectionError::InvalidIteratorState)?;
        self.list.set(last, value)
    }

    /// Inserts `value` before the cursor. A following `next` is not affected,
    /// and a following `previous` returns `value`.
    pub fn add(&mut self, value: L::Element) -> Result<(), CollectionError> {
        self.list.insert(self.pos, value)?;
        self.pos += 1;
        self.last = None;
        Ok(())
    }
}

impl<'a, L> Iterator for ListCursor<'a, L>
where
    L: BigList + ?Sized,
{
    type Item = L::Element;

    fn next(&mut self) -> Option<L::Element> {
        let value = self.list.get(self.pos).ok()?;
        self.last = Some(self.pos);
        self.pos += 1;
        Some(value)
    }
}

/// A splittable iterator over a range of a [`SegmentedList`][list-struct].
///
/// [`try_split`][Self::try_split] hands out the first half of the remaining
/// range and keeps the second one. The split point is moved to the closest
/// segment boundary when there is one strictly inside the range, so that each
/// half reads as few segments as possible.
///
/// [list-struct]: ./struct.SegmentedList.html
///
/// # Examples
///
/// ```rust
/// use primcoll::SegmentedList;
///
/// // Segments of 8 elements.
/// let list: SegmentedList<u32, 3> = (0..20).collect();
/// let mut second = list.splitter();
/// let first = second.try_split().unwrap();
///
/// // The middle is 10, and the closest segment start is 8.
/// assert_eq!(first.estimate_size(), 8);
/// assert_eq!(second.estimate_size(), 12);
/// assert_eq!(first.sum::<u32>() + second.sum::<u32>(), (0..20).sum());
/// ```
pub struct ListSplitter<'a, T, const SHIFT: u32> {
    array: &'a BigArray<T, SHIFT>,
    pos: u64,
    max: u64,
}

impl<'a, T, const SHIFT: u32> ListSplitter<'a, T, SHIFT>
where
    T: Copy + Default,
{
    pub(crate) fn new(array: &'a BigArray<T, SHIFT>, pos: u64, max: u64) -> Self {
        Self { array, pos, max }
    }

    /// Returns the number of elements left.
    pub fn estimate_size(&self) -> u64 {
        self.max - self.pos
    }

    /// Splits off the first part of the remaining elements, or returns `None`
    /// when there are too few elements left to be worth splitting.
    pub fn try_split(&mut self) -> Option<Self> {
        let half = (self.max - self.pos) >> 1;
        if half <= 1 {
            return None;
        }
        let mid = BigArray::<T, SHIFT>::nearest_segment_start(
            self.pos + half,
            self.pos + 1,
            self.max - 1,
        );
        let prefix = Self::new(self.array, self.pos, mid);
        self.pos = mid;
        Some(prefix)
    }

    /// Calls `f` on every element left, one segment piece at a time.
    pub fn for_each_remaining<F>(&mut self, mut f: F)
    where
        F: FnMut(T),
    {
        for chunk in self.array.chunks(self.pos, self.max) {
            chunk.iter().copied().for_each(&mut f);
        }
        self.pos = self.max;
    }
}

impl<'a, T, const SHIFT: u32> Iterator for ListSplitter<'a, T, SHIFT>
where
    T: Copy + Default,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.pos >= self.max {
            return None;
        }
        let value = self.array.get(self.pos);
        self.pos += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.estimate_size()) {
            Ok(len) => (len, Some(len)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<'a, T, const SHIFT: u32> FusedIterator for ListSplitter<'a, T, SHIFT> where T: Copy + Default {}
