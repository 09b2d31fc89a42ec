//! An open-addressing hash set with primitive elements.

use super::{
    iter::{Keys, MapCursor},
    map::OpenHashMap,
};
use crate::common::{error::CollectionError, primitive::PrimitiveKey};

use std::fmt;

/// A hash set of primitive values.
///
/// `OpenHashSet` shares the table of [`OpenHashMap`] with zero-sized values,
/// so it has the same layout, growth policy and iteration order, and the same
/// out-of-band handling of the zero element.
///
/// # Examples
///
/// ```rust
/// use primcoll::OpenHashSet;
///
/// let mut set: OpenHashSet<char> = "hello".chars().collect();
/// assert_eq!(set.len(), 4);
/// assert!(set.contains('l'));
/// assert!(!set.add('h'));
/// assert!(set.remove('h'));
/// assert!(!set.contains('h'));
/// ```
#[derive(Clone)]
pub struct OpenHashSet<K> {
    pub(crate) map: OpenHashMap<K, ()>,
}

impl<K: PrimitiveKey> OpenHashSet<K> {
    /// Creates an empty set. The table is allocated on the first insertion.
    pub fn new() -> Self {
        Self {
            map: OpenHashMap::new(),
        }
    }

    /// Creates an empty set able to hold `expected` elements without
    /// rehashing.
    ///
    /// # Panics
    ///
    /// Panics if the table needed for `expected` elements is not addressable.
    pub fn with_capacity(expected: usize) -> Self {
        Self {
            map: OpenHashMap::with_capacity(expected),
        }
    }

    /// Creates an empty set able to hold `expected` elements without
    /// rehashing at the given load factor.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if `load_factor` is not in
    /// `(0, 1)`, and [`CollectionError::IndexOutOfRange`] if `expected` needs a
    /// table that is not addressable.
    pub fn with_capacity_and_load_factor(
        expected: usize,
        load_factor: f32,
    ) -> Result<Self, CollectionError> {
        Ok(Self {
            map: OpenHashMap::with_capacity_and_load_factor(expected, load_factor)?,
        })
    }

    /// Creates a set holding the elements of `elements`.
    pub fn from_slice(elements: &[K]) -> Self {
        let mut set = Self::with_capacity(elements.len());
        set.extend(elements.iter().copied());
        set
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the size of the hash table, or zero if it has not been
    /// allocated yet.
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    pub fn load_factor(&self) -> f32 {
        self.map.load_factor()
    }

    /// Adds `element` to the set. Returns `true` if it was not present.
    pub fn add(&mut self, element: K) -> bool {
        self.map.insert(element, ()).is_none()
    }

    /// Removes `element` from the set. Returns `true` if it was present.
    pub fn remove(&mut self, element: K) -> bool {
        self.map.take(element).is_some()
    }

    pub fn contains(&self, element: K) -> bool {
        self.map.contains_key(element)
    }

    /// Keeps only the elements for which `f` returns `true`.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(K) -> bool,
    {
        self.map.retain(|k, _| f(k));
    }

    /// Removes all elements, keeping the allocated table.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Makes sure `additional` more elements can be added without rehashing.
    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional);
    }

    /// Shrinks the table to the smallest size able to hold the current
    /// elements.
    pub fn trim(&mut self) {
        self.map.trim();
    }

    /// Shrinks the table to the smallest size able to hold `expected`
    /// elements, if that many elements fit.
    pub fn trim_to(&mut self, expected: usize) {
        self.map.trim_to(expected);
    }

    /// Returns an iterator over the elements, in table order.
    pub fn iter(&self) -> Keys<'_, K, ()> {
        self.map.keys()
    }

    /// Returns a cursor over the elements, which can remove the element it
    /// returned last.
    pub fn cursor(&mut self) -> SetCursor<'_, K> {
        SetCursor {
            inner: self.map.cursor(),
        }
    }
}

/// A cursor over the elements of an [`OpenHashSet`] that can remove the
/// element it returned last.
pub struct SetCursor<'a, K> {
    inner: MapCursor<'a, K, ()>,
}

impl<'a, K: PrimitiveKey> SetCursor<'a, K> {
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Moves to the next element and returns it.
    pub fn next_element(&mut self) -> Option<K> {
        self.inner.next_entry().map(|(k, _)| k)
    }

    /// Removes the element returned by the last call to
    /// [`next_element`][next-element].
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidIteratorState`] if `next_element` has
    /// not been called, or if the element was already removed.
    ///
    /// [next-element]: #method.next_element
    pub fn remove(&mut self) -> Result<(), CollectionError> {
        self.inner.remove()
    }
}

impl<K: PrimitiveKey> Default for OpenHashSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PrimitiveKey> fmt::Debug for OpenHashSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PrimitiveKey> PartialEq for OpenHashSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<K: PrimitiveKey> Extend<K> for OpenHashSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|k| (k, ())));
    }
}

impl<K: PrimitiveKey> FromIterator<K> for OpenHashSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, K: PrimitiveKey> IntoIterator for &'a OpenHashSet<K> {
    type Item = K;
    type IntoIter = Keys<'a, K, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
