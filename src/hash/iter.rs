use super::map::OpenHashMap;
use crate::common::{error::CollectionError, primitive::PrimitiveKey};

use std::iter::FusedIterator;

/// An iterator over the entries of an [`OpenHashMap`].
///
/// The zero key comes first, then the table slots from the highest to the
/// lowest. This order depends on the table size and the hash function, so it
/// is neither the insertion order nor stable across rehashes.
pub struct Iter<'a, K, V> {
    map: &'a OpenHashMap<K, V>,
    pos: usize,
    remaining: usize,
    must_return_zero_key: bool,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(map: &'a OpenHashMap<K, V>) -> Self {
        Self {
            map,
            pos: map.n,
            remaining: map.size,
            must_return_zero_key: map.contains_zero_key,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: PrimitiveKey,
    V: Copy,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if self.must_return_zero_key {
            self.must_return_zero_key = false;
            return Some((K::default(), self.map.values[self.map.n]));
        }

        while self.pos > 0 {
            self.pos -= 1;
            let k = self.map.keys[self.pos];
            if !k.is_zero() {
                return Some((k, self.map.values[self.pos]));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: PrimitiveKey, V: Copy> ExactSizeIterator for Iter<'a, K, V> {}
impl<'a, K: PrimitiveKey, V: Copy> FusedIterator for Iter<'a, K, V> {}

/// An iterator over the keys of an [`OpenHashMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K: PrimitiveKey, V: Copy> Iterator for Keys<'a, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: PrimitiveKey, V: Copy> ExactSizeIterator for Keys<'a, K, V> {}
impl<'a, K: PrimitiveKey, V: Copy> FusedIterator for Keys<'a, K, V> {}

/// An iterator over the values of an [`OpenHashMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K: PrimitiveKey, V: Copy> Iterator for Values<'a, K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: PrimitiveKey, V: Copy> ExactSizeIterator for Values<'a, K, V> {}
impl<'a, K: PrimitiveKey, V: Copy> FusedIterator for Values<'a, K, V> {}

/// The entry returned last by a [`MapCursor`].
#[derive(Clone, Copy)]
enum Current<K> {
    /// A table slot, or `n` for the zero key.
    Slot(usize),
    /// A key that was moved behind the cursor by a removal. It is looked up
    /// again, since later removals may move it once more.
    Wrapped(K),
}

/// A cursor over the entries of an [`OpenHashMap`] that can remove or update
/// the entry it returned last.
///
/// Entries are visited in the same order as [`OpenHashMap::iter`]. Each entry
/// present when the cursor was created is returned exactly once, even when a
/// removal through the cursor moves not-yet-visited entries across the end of
/// the table.
///
/// The cursor borrows the map mutably, so the map cannot be changed by other
/// means while the cursor is alive.
///
/// # Examples
///
/// ```rust
/// use primcoll::OpenHashMap;
///
/// let mut map: OpenHashMap<u32, u32> = (0..10).map(|i| (i, i * i)).collect();
///
/// let mut cursor = map.cursor();
/// while let Some((k, v)) = cursor.next_entry() {
///     if k % 2 == 0 {
///         cursor.remove().unwrap();
///     } else {
///         cursor.set_value(v + 1).unwrap();
///     }
/// }
///
/// assert_eq!(map.len(), 5);
/// assert_eq!(map.get(3), 10);
/// ```
pub struct MapCursor<'a, K, V> {
    map: &'a mut OpenHashMap<K, V>,
    /// The next table slot to examine is `pos - 1`. Zero once the table has
    /// been scanned.
    pos: usize,
    remaining: usize,
    must_return_zero_key: bool,
    current: Option<Current<K>>,
    /// Keys moved from the start of the table to its end by removals.
    wrapped: Vec<K>,
    next_wrapped: usize,
}

impl<'a, K, V> MapCursor<'a, K, V>
where
    K: PrimitiveKey,
    V: Copy + Default,
{
    pub(crate) fn new(map: &'a mut OpenHashMap<K, V>) -> Self {
        Self {
            pos: map.n,
            remaining: map.size,
            must_return_zero_key: map.contains_zero_key,
            current: None,
            wrapped: Vec::new(),
            next_wrapped: 0,
            map,
        }
    }

    /// Returns `true` if there are entries left to visit.
    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    /// Moves to the next entry and returns it.
    pub fn next_entry(&mut self) -> Option<(K, V)> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if self.must_return_zero_key {
            self.must_return_zero_key = false;
            self.current = Some(Current::Slot(self.map.n));
            return Some((K::default(), self.map.values[self.map.n]));
        }

        while self.pos > 0 {
            self.pos -= 1;
            let k = self.map.keys[self.pos];
            if !k.is_zero() {
                self.current = Some(Current::Slot(self.pos));
                return Some((k, self.map.values[self.pos]));
            }
        }

        let k = *self.wrapped.get(self.next_wrapped)?;
        self.next_wrapped += 1;
        let slot = self.map.find(k)?;
        self.current = Some(Current::Wrapped(k));
        Some((k, self.map.values[slot]))
    }

    /// Removes the entry returned by the last call to
    /// [`next_entry`][next-entry] and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidIteratorState`] if `next_entry` has
    /// not been called, or if the entry was already removed.
    ///
    /// [next-entry]: #method.next_entry
    pub fn remove(&mut self) -> Result<V, CollectionError> {
        self.remove_current().ok_or(CollectionError::InvalidIteratorState)
    }

    /// Replaces the value of the entry returned by the last call to
    /// [`next_entry`][next-entry] and returns the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidIteratorState`] if `next_entry` has
    /// not been called, or if the entry was removed.
    ///
    /// [next-entry]: #method.next_entry
    pub fn set_value(&mut self, value: V) -> Result<V, CollectionError> {
        let slot = match self.current {
            Some(Current::Slot(slot)) => slot,
            Some(Current::Wrapped(k)) => self
                .map
                .find(k)
                .ok_or(CollectionError::InvalidIteratorState)?,
            None => return Err(CollectionError::InvalidIteratorState),
        };
        Ok(std::mem::replace(&mut self.map.values[slot], value))
    }

    pub(crate) fn remove_current(&mut self) -> Option<V> {
        match self.current.take()? {
            Current::Slot(slot) if slot == self.map.n => {
                self.map.contains_zero_key = false;
                self.map.size -= 1;
                Some(self.map.values[slot])
            }
            Current::Slot(slot) => {
                let old = self.map.values[slot];
                let wrapped = &mut self.wrapped;
                self.map.shift_keys(slot, |k| wrapped.push(k));
                self.map.size -= 1;
                Some(old)
            }
            // The table has been scanned already, so a plain removal (which
            // may shrink the table) is fine.
            Current::Wrapped(k) => self.map.take(k),
        }
    }
}
