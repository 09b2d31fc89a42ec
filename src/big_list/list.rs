use super::{
    big_array::{BigArray, DEFAULT_SEGMENT_SHIFT},
    iter::{Iter, ListCursor, ListSplitter},
    sub_list::SubList,
    BigList,
};
use crate::common::{
    ensure_from_to, ensure_index, ensure_offset_length, ensure_restricted_index, ensure_span,
    error::CollectionError,
};

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{Index, IndexMut},
};

/// The capacity of a list the first time it allocates, unless more room was
/// asked for.
pub const DEFAULT_INITIAL_CAPACITY: u64 = 10;

/// A growable list of primitive values indexed by `u64`.
///
/// The elements live in a [`BigArray`] with segments of `2^SHIFT` elements.
/// `SHIFT` defaults to [`DEFAULT_SEGMENT_SHIFT`]; smaller shifts are mostly
/// useful to exercise segment boundaries with few elements.
///
/// Index checked operations return [`CollectionError`] instead of panicking;
/// the `Index` and `IndexMut` impls are the panicking alternative.
///
/// # Examples
///
/// ```rust
/// use primcoll::{CollectionError, SegmentedList};
///
/// // Segments of 4 elements.
/// let mut list: SegmentedList<i64, 2> = (0..10).collect();
///
/// list.insert(0, -1)?;
/// assert_eq!(list.get(4)?, 3);
/// assert_eq!(list.remove_at(4)?, 3);
///
/// let mut dest = [0; 3];
/// list.get_elements(3, &mut dest, 0, 3)?;
/// assert_eq!(dest, [2, 4, 5]);
///
/// assert_eq!(
///     list.get(10),
///     Err(CollectionError::IndexOutOfRange { index: 10, len: 10 })
/// );
/// # Ok::<(), CollectionError>(())
/// ```
#[derive(Clone)]
pub struct SegmentedList<T, const SHIFT: u32 = DEFAULT_SEGMENT_SHIFT> {
    storage: BigArray<T, SHIFT>,
    size: u64,
}

impl<T, const SHIFT: u32> SegmentedList<T, SHIFT>
where
    T: Copy + Default,
{
    /// Creates an empty list. It does not allocate until the first element is
    /// added.
    pub fn new() -> Self {
        Self {
            storage: BigArray::new(),
            size: 0,
        }
    }

    /// Creates an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            storage: BigArray::with_len(capacity),
            size: 0,
        }
    }

    /// Creates a list holding a copy of `elements`.
    pub fn from_slice(elements: &[T]) -> Self {
        let mut list = Self::with_capacity(elements.len() as u64);
        list.storage.copy_from_slice(0, elements);
        list.size = elements.len() as u64;
        list
    }

    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of elements the list can hold without reallocating.
    pub fn capacity(&self) -> u64 {
        self.storage.len()
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: u64) -> Result<T, CollectionError> {
        ensure_restricted_index(index, self.size)?;
        Ok(self.storage.get(index))
    }

    /// Replaces the element at `index` and returns the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: u64, value: T) -> Result<T, CollectionError> {
        ensure_restricted_index(index, self.size)?;
        Ok(self.storage.set(index, value))
    }

    /// Inserts `value` at `index`, moving the elements at and after `index`
    /// one position later.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: u64, value: T) -> Result<(), CollectionError> {
        ensure_index(index, self.size)?;
        self.grow(self.size + 1);
        if index != self.size {
            self.storage.copy_within(index, index + 1, self.size - index);
        }
        self.storage.set(index, value);
        self.size += 1;
        Ok(())
    }

    /// Appends `value` to the end of the list.
    pub fn push(&mut self, value: T) {
        self.grow(self.size + 1);
        self.storage.set(self.size, value);
        self.size += 1;
    }

    /// Removes the last element and returns it, or `None` if the list is
    /// empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        self.size -= 1;
        Some(self.storage.get(self.size))
    }

    /// Removes the element at `index` and returns it, moving the elements
    /// after it one position earlier.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index >= len`.
    pub fn remove_at(&mut self, index: u64) -> Result<T, CollectionError> {
        ensure_restricted_index(index, self.size)?;
        let old = self.storage.get(index);
        self.size -= 1;
        if index != self.size {
            self.storage.copy_within(index + 1, index, self.size - index);
        }
        Ok(old)
    }

    /// Copies the `length` elements starting at `from` into
    /// `dest[dest_offset..dest_offset + length]`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if the list range or the
    /// destination range does not fit.
    pub fn get_elements(
        &self,
        from: u64,
        dest: &mut [T],
        dest_offset: usize,
        length: usize,
    ) -> Result<(), CollectionError> {
        ensure_span(from, length, self.size)?;
        ensure_offset_length(dest.len(), dest_offset, length)?;
        self.storage.copy_to_slice(from, &mut dest[dest_offset..dest_offset + length]);
        Ok(())
    }

    /// Overwrites the `length` elements starting at `index` with
    /// `src[offset..offset + length]`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if the list range or the
    /// source range does not fit.
    pub fn set_elements(
        &mut self,
        index: u64,
        src: &[T],
        offset: usize,
        length: usize,
    ) -> Result<(), CollectionError> {
        ensure_span(index, length, self.size)?;
        ensure_offset_length(src.len(), offset, length)?;
        self.storage.copy_from_slice(index, &src[offset..offset + length]);
        Ok(())
    }

    /// Inserts `src[offset..offset + length]` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index > len` or if the
    /// source range does not fit in `src`.
    pub fn add_elements(
        &mut self,
        index: u64,
        src: &[T],
        offset: usize,
        length: usize,
    ) -> Result<(), CollectionError> {
        ensure_index(index, self.size)?;
        ensure_offset_length(src.len(), offset, length)?;
        self.open_gap(index, length as u64);
        self.storage.copy_from_slice(index, &src[offset..offset + length]);
        Ok(())
    }

    /// Inserts all elements of `other` at `index`, copying one segment piece
    /// at a time. `other` may use a different segment size.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index > len`.
    pub fn extend_from_list<const S: u32>(
        &mut self,
        index: u64,
        other: &SegmentedList<T, S>,
    ) -> Result<(), CollectionError> {
        ensure_index(index, self.size)?;
        self.open_gap(index, other.size);
        let mut at = index;
        for chunk in other.storage.chunks(0, other.size) {
            self.storage.copy_from_slice(at, chunk);
            at += chunk.len() as u64;
        }
        Ok(())
    }

    /// Removes the elements in `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if `from > to`, and
    /// [`CollectionError::IndexOutOfRange`] if `to > len`.
    pub fn remove_elements(&mut self, from: u64, to: u64) -> Result<(), CollectionError> {
        ensure_from_to(from, to, self.size)?;
        self.storage.copy_within(to, from, self.size - to);
        self.size -= to - from;
        Ok(())
    }

    /// Removes all elements, keeping the allocated storage.
    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// Shortens the list to `len` elements. Does nothing if the list is not
    /// longer than that.
    pub fn truncate(&mut self, len: u64) {
        if len < self.size {
            self.size = len;
        }
    }

    /// Changes the length of the list to `len`, appending `T::default()` or
    /// dropping elements at the end as needed.
    pub fn resize(&mut self, len: u64) {
        if len > self.size {
            self.grow(len);
            self.storage.fill(self.size, len, T::default());
        }
        self.size = len;
    }

    /// Makes sure the list can hold at least `capacity` elements without
    /// reallocating.
    pub fn ensure_capacity(&mut self, capacity: u64) {
        self.grow(capacity);
    }

    /// Makes sure `additional` more elements can be added without
    /// reallocating.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `u64`.
    pub fn reserve(&mut self, additional: u64) {
        let capacity = self.size.checked_add(additional).expect("capacity overflow");
        self.grow(capacity);
    }

    /// Shrinks the storage to the current length.
    pub fn trim(&mut self) {
        self.trim_to(0);
    }

    /// Shrinks the storage to `max(capacity, len)` elements. Does nothing if
    /// the storage is not larger than that.
    pub fn trim_to(&mut self, capacity: u64) {
        let target = capacity.max(self.size);
        if target >= self.storage.len() {
            return;
        }
        self.storage.resize(target);
    }

    /// Returns the index of the first element equal to `value`.
    pub fn index_of(&self, value: T) -> Option<u64>
    where
        T: PartialEq,
    {
        let mut base = 0;
        for chunk in self.storage.chunks(0, self.size) {
            if let Some(i) = chunk.iter().position(|e| *e == value) {
                return Some(base + i as u64);
            }
            base += chunk.len() as u64;
        }
        None
    }

    /// Returns the index of the last element equal to `value`.
    pub fn last_index_of(&self, value: T) -> Option<u64>
    where
        T: PartialEq,
    {
        let mut end = self.size;
        while end > 0 {
            let start = BigArray::<T, SHIFT>::start(BigArray::<T, SHIFT>::segment(end - 1));
            let chunk = self.storage.chunk(start, end);
            if let Some(i) = chunk.iter().rposition(|e| *e == value) {
                return Some(start + i as u64);
            }
            end = start;
        }
        None
    }

    pub fn contains(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Removes the first element equal to `value`. Returns `true` if one was
    /// found.
    pub fn remove_value(&mut self, value: T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }

    /// Copies the elements into a `Vec`.
    ///
    /// # Panics
    ///
    /// Panics if the list is longer than a `Vec` can be.
    pub fn to_vec(&self) -> Vec<T> {
        let len = usize::try_from(self.size).expect("capacity overflow");
        let mut vec = Vec::with_capacity(len);
        for chunk in self.storage.chunks(0, self.size) {
            vec.extend_from_slice(chunk);
        }
        vec
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> Iter<'_, T, SHIFT> {
        Iter::new(&self.storage, 0, self.size)
    }

    /// Returns a cursor positioned before the first element.
    pub fn cursor(&mut self) -> ListCursor<'_, Self> {
        ListCursor::new(self, 0)
    }

    /// Returns a cursor positioned before the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index > len`.
    pub fn cursor_at(&mut self, index: u64) -> Result<ListCursor<'_, Self>, CollectionError> {
        ensure_index(index, self.size)?;
        Ok(ListCursor::new(self, index))
    }

    /// Returns a splittable iterator over the elements. Splits fall on segment
    /// boundaries when one is close enough.
    pub fn splitter(&self) -> ListSplitter<'_, T, SHIFT> {
        ListSplitter::new(&self.storage, 0, self.size)
    }

    /// Returns a view of the elements in `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if `from > to`, and
    /// [`CollectionError::IndexOutOfRange`] if `to > len`.
    pub fn sub_list(&mut self, from: u64, to: u64) -> Result<SubList<'_, Self>, CollectionError> {
        ensure_from_to(from, to, self.size)?;
        Ok(SubList::new(self, from, to))
    }

    /// Makes room for `length` elements at `index`.
    fn open_gap(&mut self, index: u64, length: u64) {
        if length > 0 {
            self.grow(self.size + length);
            self.storage.copy_within(index, index + length, self.size - index);
            self.size += length;
        }
    }

    /// Grows the storage so that it holds at least `capacity` elements, by at
    /// least half of its current size.
    fn grow(&mut self, capacity: u64) {
        let old = self.storage.len();
        if capacity <= old {
            return;
        }
        let new_capacity = if old == 0 {
            capacity.max(DEFAULT_INITIAL_CAPACITY)
        } else {
            old.saturating_add(old >> 1).max(capacity)
        };
        self.storage.resize(new_capacity);
    }
}

impl<T, const SHIFT: u32> BigList for SegmentedList<T, SHIFT>
where
    T: Copy + Default,
{
    type Element = T;

    fn len(&self) -> u64 {
        self.size
    }

    fn get(&self, index: u64) -> Result<T, CollectionError> {
        SegmentedList::get(self, index)
    }

    fn set(&mut self, index: u64, value: T) -> Result<T, CollectionError> {
        SegmentedList::set(self, index, value)
    }

    fn insert(&mut self, index: u64, value: T) -> Result<(), CollectionError> {
        SegmentedList::insert(self, index, value)
    }

    fn remove_at(&mut self, index: u64) -> Result<T, CollectionError> {
        SegmentedList::remove_at(self, index)
    }

    fn get_elements(
        &self,
        from: u64,
        dest: &mut [T],
        dest_offset: usize,
        length: usize,
    ) -> Result<(), CollectionError> {
        SegmentedList::get_elements(self, from, dest, dest_offset, length)
    }

    fn set_elements(
        &mut self,
        index: u64,
        src: &[T],
        offset: usize,
        length: usize,
    ) -> Result<(), CollectionError> {
        SegmentedList::set_elements(self, index, src, offset, length)
    }

    fn add_elements(
        &mut self,
        index: u64,
        src: &[T],
        offset: usize,
        length: usize,
    ) -> Result<(), CollectionError> {
        SegmentedList::add_elements(self, index, src, offset, length)
    }

    fn remove_elements(&mut self, from: u64, to: u64) -> Result<(), CollectionError> {
        SegmentedList::remove_elements(self, from, to)
    }
}

impl<T, const SHIFT: u32> Default for SegmentedList<T, SHIFT>
where
    T: Copy + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const SHIFT: u32> fmt::Debug for SegmentedList<T, SHIFT>
where
    T: Copy + Default + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const SHIFT: u32> PartialEq for SegmentedList<T, SHIFT>
where
    T: Copy + Default + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .storage
                .chunks(0, self.size)
                .zip(other.storage.chunks(0, other.size))
                .all(|(a, b)| a == b)
    }
}

impl<T, const SHIFT: u32> Eq for SegmentedList<T, SHIFT> where T: Copy + Default + Eq {}

impl<T, const SHIFT: u32> PartialOrd for SegmentedList<T, SHIFT>
where
    T: Copy + Default + PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T, const SHIFT: u32> Ord for SegmentedList<T, SHIFT>
where
    T: Copy + Default + Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T, const SHIFT: u32> Hash for SegmentedList<T, SHIFT>
where
    T: Copy + Default + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        for chunk in self.storage.chunks(0, self.size) {
            T::hash_slice(chunk, state);
        }
    }
}

impl<T, const SHIFT: u32> Index<u64> for SegmentedList<T, SHIFT>
where
    T: Copy + Default,
{
    type Output = T;

    fn index(&self, index: u64) -> &T {
        if let Err(e) = ensure_restricted_index(index, self.size) {
            panic!("{e}");
        }
        self.storage.get_ref(index)
    }
}

impl<T, const SHIFT: u32> IndexMut<u64> for SegmentedList<T, SHIFT>
where
    T: Copy + Default,
{
    fn index_mut(&mut self, index: u64) -> &mut T {
        if let Err(e) = ensure_restricted_index(index, self.size) {
            panic!("{e}");
        }
        self.storage.get_mut(index)
    }
}

impl<T, const SHIFT: u32> Extend<T> for SegmentedList<T, SHIFT>
where
    T: Copy + Default,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0 as u64);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T, const SHIFT: u32> FromIterator<T> for SegmentedList<T, SHIFT>
where
    T: Copy + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, const SHIFT: u32> From<&[T]> for SegmentedList<T, SHIFT>
where
    T: Copy + Default,
{
    fn from(elements: &[T]) -> Self {
        Self::from_slice(elements)
    }
}

impl<'a, T, const SHIFT: u32> IntoIterator for &'a SegmentedList<T, SHIFT>
where
    T: Copy + Default,
{
    type Item = T;
    type IntoIter = Iter<'a, T, SHIFT>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{SegmentedList, DEFAULT_INITIAL_CAPACITY};
    use crate::CollectionError;

    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
    };

    // Segments of 4 elements.
    type Small = SegmentedList<i32, 2>;

    fn small(len: i32) -> Small {
        (0..len).collect()
    }

    #[test]
    fn addressing_across_segments() {
        let list = small(23);
        assert_eq!(list.len(), 23);
        for i in 0..23 {
            assert_eq!(list.get(i), Ok(i as i32));
        }
        assert_eq!(
            list.get(23),
            Err(CollectionError::IndexOutOfRange { index: 23, len: 23 })
        );
    }

    #[test]
    fn insert_at_front_shifts_everything() {
        let mut list = small(13);
        list.insert(0, -1).unwrap();
        assert_eq!(list.len(), 14);
        assert_eq!(list.get(0), Ok(-1));
        for i in 0..13 {
            assert_eq!(list.get(i + 1), Ok(i as i32));
        }
    }

    #[test]
    fn insert_at_end_and_past_end() {
        let mut list = small(4);
        list.insert(4, 4).unwrap();
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4]);
        assert_eq!(
            list.insert(6, 6),
            Err(CollectionError::IndexOutOfRange { index: 6, len: 5 })
        );
    }

    #[test]
    fn remove_at_segment_boundary_closes_the_gap() {
        let mut list = small(12);
        // Index 3 is the last slot of the first segment.
        assert_eq!(list.remove_at(3), Ok(3));
        assert_eq!(list.remove_at(4), Ok(5));
        assert_eq!(list.to_vec(), vec![0, 1, 2, 4, 6, 7, 8, 9, 10, 11]);
        assert_eq!(list.remove_at(9), Ok(11));
        assert_eq!(
            list.remove_at(9),
            Err(CollectionError::IndexOutOfRange { index: 9, len: 9 })
        );
    }

    #[test]
    fn growth_policy() {
        let mut list = Small::new();
        assert_eq!(list.capacity(), 0);
        list.push(1);
        assert_eq!(list.capacity(), DEFAULT_INITIAL_CAPACITY);
        list.extend(1..10);
        assert_eq!(list.capacity(), 10);
        list.push(10);
        assert_eq!(list.capacity(), 15);

        let mut list = Small::with_capacity(3);
        list.extend([1, 2, 3]);
        assert_eq!(list.capacity(), 3);
        list.push(4);
        assert_eq!(list.capacity(), 4);

        list.reserve(100);
        assert_eq!(list.capacity(), 104);
    }

    #[test]
    fn trim() {
        let mut list = small(30);
        list.truncate(5);
        assert_eq!(list.capacity(), 30);
        list.trim_to(8);
        assert_eq!(list.capacity(), 8);
        list.trim();
        assert_eq!(list.capacity(), 5);
        list.trim_to(100);
        assert_eq!(list.capacity(), 5);
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn resize_fills_with_default() {
        let mut list = small(6);
        list.truncate(2);
        list.resize(5);
        assert_eq!(list.to_vec(), vec![0, 1, 0, 0, 0]);
        list.resize(1);
        assert_eq!(list.to_vec(), vec![0]);
    }

    #[test]
    fn bulk_get_and_set() {
        let mut list = small(17);
        let mut dest = [0; 10];
        list.get_elements(2, &mut dest, 1, 9).unwrap();
        assert_eq!(dest, [0, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

        list.set_elements(3, &[-1, -2, -3, -4, -5, -6], 1, 5).unwrap();
        assert_eq!(
            list.to_vec(),
            vec![0, 1, 2, -2, -3, -4, -5, -6, 8, 9, 10, 11, 12, 13, 14, 15, 16]
        );

        assert_eq!(
            list.get_elements(10, &mut dest, 0, 8),
            Err(CollectionError::IndexOutOfRange { index: 18, len: 17 })
        );
        assert_eq!(
            list.get_elements(0, &mut dest, 5, 6),
            Err(CollectionError::IndexOutOfRange { index: 11, len: 10 })
        );
        assert!(list.set_elements(15, &[1, 2, 3], 0, 3).is_err());
    }

    #[test]
    fn bulk_add_and_remove() {
        let mut list = small(9);
        list.add_elements(2, &[100, 101, 102, 103, 104, 105], 0, 6).unwrap();
        assert_eq!(
            list.to_vec(),
            vec![0, 1, 100, 101, 102, 103, 104, 105, 2, 3, 4, 5, 6, 7, 8]
        );

        list.remove_elements(1, 9).unwrap();
        assert_eq!(list.to_vec(), vec![0, 3, 4, 5, 6, 7, 8]);

        assert!(matches!(
            list.remove_elements(4, 2),
            Err(CollectionError::InvalidArgument(_))
        ));
        assert_eq!(
            list.remove_elements(4, 8),
            Err(CollectionError::IndexOutOfRange { index: 8, len: 7 })
        );
        assert_eq!(
            list.add_elements(8, &[1], 0, 1),
            Err(CollectionError::IndexOutOfRange { index: 8, len: 7 })
        );
        assert_eq!(list.len(), 7);
    }

    #[test]
    fn extend_from_list_with_other_segment_size() {
        let mut list = small(6);
        let other: SegmentedList<i32, 3> = (100..111).collect();
        list.extend_from_list(3, &other).unwrap();
        let mut expected = vec![0, 1, 2];
        expected.extend(100..111);
        expected.extend([3, 4, 5]);
        assert_eq!(list.to_vec(), expected);
    }

    #[test]
    fn searching() {
        let list: Small = [5, 1, 5, 2, 3, 5, 7, 1, 9].iter().copied().collect();
        assert_eq!(list.index_of(5), Some(0));
        assert_eq!(list.last_index_of(5), Some(5));
        assert_eq!(list.last_index_of(1), Some(7));
        assert_eq!(list.index_of(9), Some(8));
        assert_eq!(list.index_of(4), None);
        assert_eq!(list.last_index_of(4), None);
        assert!(list.contains(7));

        let mut list = list;
        assert!(list.remove_value(5));
        assert!(!list.remove_value(4));
        assert_eq!(list.to_vec(), vec![1, 5, 2, 3, 5, 7, 1, 9]);
    }

    #[test]
    fn pop_and_push() {
        let mut list = Small::new();
        assert_eq!(list.pop(), None);
        for i in 0..9 {
            list.push(i);
        }
        assert_eq!(list.pop(), Some(8));
        assert_eq!(list.len(), 8);
    }

    #[test]
    fn comparisons_and_hash() {
        let a = small(10);
        let mut b = Small::with_capacity(100);
        b.extend(0..10);
        assert_eq!(a, b);

        let hash = |l: &Small| {
            let mut hasher = DefaultHasher::new();
            l.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&a), hash(&b));

        b.set(9, 10).unwrap();
        assert_ne!(a, b);
        assert!(a < b);
        assert!(small(3) < small(4));
        assert_eq!(format!("{:?}", small(3)), "[0, 1, 2]");
    }

    #[test]
    fn index_operators() {
        let mut list = small(6);
        list[5] += 10;
        assert_eq!(list[5], 15);
    }

    #[test]
    #[should_panic(expected = "index (6) is out of range for length 6")]
    fn index_out_of_range_panics() {
        let list = small(6);
        let _ = list[6];
    }
}
