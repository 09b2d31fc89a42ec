use super::{iter::ListCursor, BigList};
use crate::common::{
    ensure_from_to, ensure_index, ensure_offset_length, ensure_restricted_index, ensure_span,
    error::CollectionError,
};

use std::fmt;

/// A view of the range `[from, to)` of a [`BigList`].
///
/// The view owns no elements: reads and writes go to the underlying list at
/// `from + index`. Insertions and removals through the view move its upper
/// bound along, so the view keeps covering the same logical range of the
/// list. The underlying list stays mutably borrowed while the view is alive.
///
/// Views nest. A view of a view forwards its changes to the outer view, which
/// adjusts its own bound and forwards them to the list.
///
/// # Examples
///
/// ```rust
/// use primcoll::{BigList, CollectionError, SegmentedList};
///
/// let mut list: SegmentedList<u8> = (0..10).collect();
/// {
///     let mut view = list.sub_list(2, 5)?;
///     assert_eq!(view.len(), 3);
///     assert_eq!(view.get(0)?, 2);
///
///     view.insert(3, 42)?;
///     view.remove_at(0)?;
///     assert_eq!(view.to_vec(), vec![3, 4, 42]);
///     assert!(view.get(3).is_err());
/// }
/// assert_eq!(list.to_vec(), vec![0, 1, 3, 4, 42, 5, 6, 7, 8, 9]);
/// # Ok::<(), CollectionError>(())
/// ```
pub struct SubList<'a, L: ?Sized> {
    list: &'a mut L,
    from: u64,
    to: u64,
}

impl<'a, L> SubList<'a, L>
where
    L: BigList + ?Sized,
{
    /// `[from, to)` must already be checked against `list`.
    pub(crate) fn new(list: &'a mut L, from: u64, to: u64) -> Self {
        Self { list, from, to }
    }

    /// Appends `value` at the end of the view, which is `to` in the
    /// underlying list.
    pub fn push(&mut self, value: L::Element) -> Result<(), CollectionError> {
        self.insert(self.len(), value)
    }

    /// Removes every element of the view from the underlying list.
    pub fn clear(&mut self) -> Result<(), CollectionError> {
        self.remove_elements(0, self.len())
    }

    /// Copies the elements of the view into a `Vec`.
    ///
    /// # Panics
    ///
    /// Panics if the view is longer than a `Vec` can be.
    pub fn to_vec(&self) -> Vec<L::Element>
    where
        L::Element: Default,
    {
        let len = usize::try_from(self.len()).expect("capacity overflow");
        let mut vec = vec![L::Element::default(); len];
        // The range was checked when the view was created and the view has
        // kept it in bounds since.
        if let Err(e) = self.list.get_elements(self.from, &mut vec, 0, len) {
            unreachable!("a view went out of the bounds of its list: {e}");
        }
        vec
    }

    /// Returns a cursor positioned before the first element of the view.
    pub fn cursor(&mut self) -> ListCursor<'_, Self> {
        ListCursor::new(self, 0)
    }

    /// Returns a view of the elements in `[from, to)` of this view.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if `from > to`, and
    /// [`CollectionError::IndexOutOfRange`] if `to > len`.
    pub fn sub_list(&mut self, from: u64, to: u64) -> Result<SubList<'_, Self>, CollectionError> {
        ensure_from_to(from, to, self.len())?;
        Ok(SubList::new(self, from, to))
    }
}

impl<'a, L> BigList for SubList<'a, L>
where
    L: BigList + ?Sized,
{
    type Element = L::Element;

    fn len(&self) -> u64 {
        self.to - self.from
    }

    fn get(&self, index: u64) -> Result<L::Element, CollectionError> {
        ensure_restricted_index(index, self.len())?;
        self.list.get(self.from + index)
    }

    fn set(&mut self, index: u64, value: L::Element) -> Result<L::Element, CollectionError> {
        ensure_restricted_index(index, self.len())?;
        self.list.set(self.from + index, value)
    }

    fn insert(&mut self, index: u64, value: L::Element) -> Result<(), CollectionError> {
        ensure_index(index, self.len())?;
        self.list.insert(self.from + index, value)?;
        self.to += 1;
        Ok(())
    }

    fn remove_at(&mut self, index: u64) -> Result<L::Element, CollectionError> {
        ensure_restricted_index(index, self.len())?;
        let old = self.list.remove_at(self.from + index)?;
        self.to -= 1;
        Ok(old)
    }

    fn get_elements(
        &self,
        from: u64,
        dest: &mut [L::Element],
        dest_offset: usize,
        length: usize,
    ) -> Result<(), CollectionError> {
        ensure_span(from, length, self.len())?;
        self.list.get_elements(self.from + from, dest, dest_offset, length)
    }

    fn set_elements(
        &mut self,
        index: u64,
        src: &[L::Element],
        offset: usize,
        length: usize,
    ) -> Result<(), CollectionError> {
        ensure_span(index, length, self.len())?;
        self.list.set_elements(self.from + index, src, offset, length)
    }

    fn add_elements(
        &mut self,
        index: u64,
        src: &[L::Element],
        offset: usize,
        length: usize,
    ) -> Result<(), CollectionError> {
        ensure_index(index, self.len())?;
        ensure_offset_length(src.len(), offset, length)?;
        self.list.add_elements(self.from + index, src, offset, length)?;
        self.to += length as u64;
        Ok(())
    }

    fn remove_elements(&mut self, from: u64, to: u64) -> Result<(), CollectionError> {
        ensure_from_to(from, to, self.len())?;
        self.list.remove_elements(self.from + from, self.from + to)?;
        self.to -= to - from;
        Ok(())
    }
}

impl<'a, L> fmt::Debug for SubList<'a, L>
where
    L: BigList + ?Sized,
    L::Element: Default + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubList")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("elements", &self.to_vec())
            .finish()
    }
}
