//! An open-addressing hash map with primitive keys, linear probing and
//! back-shift deletion.

use super::{
    builder::OpenHashMapBuilder,
    iter::{Iter, Keys, MapCursor, Values},
};
use crate::common::{
    error::CollectionError,
    hash_common::{self, DEFAULT_INITIAL_SIZE, DEFAULT_LOAD_FACTOR},
    primitive::PrimitiveKey,
};

use std::{fmt, ops::Add};

/// A hash map from primitive keys to `Copy` values, implemented with a single
/// flat table, open addressing and linear probing.
///
/// The table size is always a power of two. Keys are stored inline in one
/// array and values in a parallel one, so no entry is ever allocated on its
/// own. Removals move the following entries of the probe run backward instead
/// of leaving tombstones, hence lookups never slow down after many removals.
///
/// # Missing keys and the default return value
///
/// Lookups do not return an `Option`. When a key is absent, [`get`][get],
/// [`put`][put] and [`remove`][remove] return the map's
/// [default return value][drv], which is `V::default()` unless changed with
/// [`set_default_return_value`][set-drv].
///
/// This means that `put` returns the same value for a fresh insertion and for
/// the replacement of an entry whose previous value happened to equal the
/// default return value. Call [`contains_key`][contains-key] first when the two
/// cases must be told apart.
///
/// # The zero key
///
/// The bit pattern zero marks empty slots, so the zero key (`0`, `0.0`, `'\0'`
/// or `false`) is kept out of band: a flag records its presence and its value
/// lives in an extra slot after the table.
///
/// # Examples
///
/// ```rust
/// use primcoll::OpenHashMap;
///
/// let mut map: OpenHashMap<i32, u64> = OpenHashMap::new();
/// assert_eq!(map.put(7, 49), 0);
/// assert_eq!(map.put(7, 50), 49);
/// assert_eq!(map.get(7), 50);
///
/// // A missing key yields the default return value.
/// map.set_default_return_value(u64::MAX);
/// assert_eq!(map.get(8), u64::MAX);
/// assert_eq!(map.remove(7), 50);
/// assert!(map.is_empty());
/// ```
///
/// [get]: #method.get
/// [put]: #method.put
/// [remove]: #method.remove
/// [drv]: #method.default_return_value
/// [set-drv]: #method.set_default_return_value
/// [contains-key]: #method.contains_key
#[derive(Clone)]
pub struct OpenHashMap<K, V> {
    /// `n + 1` keys. The last one is never read; it keeps both arrays the same
    /// length.
    pub(crate) keys: Box<[K]>,
    /// `n + 1` values. `values[n]` belongs to the zero key.
    pub(crate) values: Box<[V]>,
    /// The table size, zero until the first insertion when created empty.
    pub(crate) n: usize,
    pub(crate) mask: usize,
    pub(crate) contains_zero_key: bool,
    pub(crate) size: usize,
    max_fill: usize,
    /// The table size requested at creation. Removals never shrink below it.
    min_n: usize,
    load_factor: f32,
    default_return_value: V,
}

impl<K, V> OpenHashMap<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default,
{
    /// Creates an empty map with the default load factor.
    ///
    /// The map does not allocate its table until the first insertion.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty map able to hold `expected` entries without rehashing,
    /// using the default load factor.
    ///
    /// If `expected` is 0, the table is allocated on the first insertion.
    ///
    /// # Panics
    ///
    /// Panics if the table needed for `expected` entries is not addressable.
    pub fn with_capacity(expected: usize) -> Self {
        match Self::with_capacity_and_load_factor(expected, DEFAULT_LOAD_FACTOR) {
            Ok(map) => map,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates an empty map able to hold `expected` entries without rehashing
    /// at the given load factor.
    ///
    /// The table size will be the least power of two greater than or equal to
    /// `expected / load_factor`. For instance `expected = 3` at the default
    /// load factor gives a table of 4 slots.
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
        if !hash_common::is_valid_load_factor(load_factor) {
            return Err(CollectionError::InvalidArgument(format!(
                "load factor must be greater than 0 and smaller than 1, got {load_factor}"
            )));
        }

        let n = if expected == 0 {
            0
        } else {
            hash_common::array_size(expected, load_factor).ok_or(
                CollectionError::IndexOutOfRange {
                    index: expected as u64,
                    len: hash_common::max_expected(load_factor) as u64,
                },
            )?
        };

        let (keys, values) = allocate(n);
        Ok(Self {
            keys,
            values,
            n,
            mask: n.saturating_sub(1),
            contains_zero_key: false,
            size: 0,
            max_fill: hash_common::max_fill(n, load_factor),
            min_n: n,
            load_factor,
            default_return_value: V::default(),
        })
    }

    /// Creates a map holding the pairs `(keys[i], values[i])`. Later pairs
    /// override earlier ones with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if the two slices have
    /// different lengths or if `load_factor` is not in `(0, 1)`.
    pub fn from_arrays(keys: &[K], values: &[V], load_factor: f32) -> Result<Self, CollectionError> {
        if keys.len() != values.len() {
            return Err(CollectionError::InvalidArgument(format!(
                "the key array and the value array have different lengths ({} and {})",
                keys.len(),
                values.len()
            )));
        }
        let mut map = Self::with_capacity_and_load_factor(keys.len(), load_factor)?;
        for (&k, &v) in keys.iter().zip(values) {
            map.put(k, v);
        }
        Ok(map)
    }

    /// Returns an [`OpenHashMapBuilder`], which builds an `OpenHashMap` with
    /// various configuration knobs.
    pub fn builder() -> OpenHashMapBuilder<K, V> {
        OpenHashMapBuilder::default()
    }
}

// Accessors that need no bounds on the key or value types.
impl<K, V> OpenHashMap<K, V> {
    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the size of the hash table, which is a power of two, or zero
    /// if the table has not been allocated yet.
    pub fn capacity(&self) -> usize {
        self.n
    }

    /// Returns the load factor of this map.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }
}

impl<K, V> OpenHashMap<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default,
{
    /// Returns the value returned by lookups of missing keys.
    pub fn default_return_value(&self) -> V {
        self.default_return_value
    }

    /// Sets the value returned by lookups of missing keys.
    pub fn set_default_return_value(&mut self, value: V) {
        self.default_return_value = value;
    }

    /// Returns the value of `key`, or the default return value if the key is
    /// absent.
    #[inline]
    pub fn get(&self, key: K) -> V {
        match self.find(key) {
            Some(slot) => self.values[slot],
            None => self.default_return_value,
        }
    }

    /// Returns the value of `key`, or `default` if the key is absent.
    #[inline]
    pub fn get_or_default(&self, key: K, default: V) -> V {
        match self.find(key) {
            Some(slot) => self.values[slot],
            None => default,
        }
    }

    /// Returns `true` if the map contains `key`.
    #[inline]
    pub fn contains_key(&self, key: K) -> bool {
        self.find(key).is_some()
    }

    /// Associates `value` with `key`.
    ///
    /// Returns the previous value, or the default return value if the key was
    /// absent.
    pub fn put(&mut self, key: K, value: V) -> V {
        match self.insert(key, value) {
            Some(slot) => std::mem::replace(&mut self.values[slot], value),
            None => self.default_return_value,
        }
    }

    /// Associates `value` with `key` only if the key is absent.
    ///
    /// Returns the current value, or the default return value if the pair was
    /// inserted.
    pub fn put_if_absent(&mut self, key: K, value: V) -> V {
        match self.insert(key, value) {
            Some(slot) => self.values[slot],
            None => self.default_return_value,
        }
    }

    /// Replaces the value of `key` only if the key is present.
    ///
    /// Returns the previous value, or the default return value if the key was
    /// absent.
    pub fn replace(&mut self, key: K, value: V) -> V {
        match self.find(key) {
            Some(slot) => std::mem::replace(&mut self.values[slot], value),
            None => self.default_return_value,
        }
    }

    /// Removes `key` from the map.
    ///
    /// Returns the removed value, or the default return value if the key was
    /// absent.
    pub fn remove(&mut self, key: K) -> V {
        self.take(key).unwrap_or(self.default_return_value)
    }

    /// Returns the value of `key`, inserting `f(key)` first if the key is
    /// absent.
    pub fn compute_if_absent<F>(&mut self, key: K, f: F) -> V
    where
        F: FnOnce(K) -> V,
    {
        if let Some(slot) = self.find(key) {
            return self.values[slot];
        }
        let value = f(key);
        self.insert(key, value);
        value
    }

    /// Inserts `value` if `key` is absent, otherwise replaces the current value
    /// with `remap(current, value)`. Returns the new value.
    pub fn merge<F>(&mut self, key: K, value: V, remap: F) -> V
    where
        F: FnOnce(V, V) -> V,
    {
        match self.insert(key, value) {
            Some(slot) => {
                let merged = remap(self.values[slot], value);
                self.values[slot] = merged;
                merged
            }
            None => value,
        }
    }

    /// Keeps only the entries for which `f` returns `true`.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(K, V) -> bool,
    {
        let mut cursor = self.cursor();
        while let Some((k, v)) = cursor.next_entry() {
            if !f(k, v) {
                cursor.remove_current();
            }
        }
    }

    /// Copies all the pairs of `other` into this map.
    pub fn put_all(&mut self, other: &Self) {
        self.extend(other.iter());
    }

    /// Removes all entries, keeping the allocated table.
    pub fn clear(&mut self) {
        if self.size == 0 {
            return;
        }
        self.size = 0;
        self.contains_zero_key = false;
        self.keys.fill(K::default());
    }

    /// Makes sure `additional` more entries can be inserted without rehashing.
    ///
    /// # Panics
    ///
    /// Panics if the required table is not addressable.
    pub fn reserve(&mut self, additional: usize) {
        let expected = self
            .size
            .checked_add(additional)
            .expect("capacity overflow");
        let needed = hash_common::array_size(expected, self.load_factor).expect("capacity overflow");
        if needed > self.n {
            self.rehash(needed);
        }
    }

    /// Shrinks the table to the smallest size able to hold the current
    /// entries.
    pub fn trim(&mut self) {
        self.trim_to(self.size);
    }

    /// Shrinks the table to the smallest size able to hold `expected` entries
    /// at the current load factor.
    ///
    /// Nothing happens if the table is already that small, or if `expected` is
    /// smaller than the number of entries.
    pub fn trim_to(&mut self, expected: usize) {
        let Some(l) = hash_common::array_size(expected, self.load_factor) else {
            return;
        };
        if l >= self.n || self.size > hash_common::max_fill(l, self.load_factor) {
            return;
        }
        self.rehash(l);
    }

    /// Returns an iterator over the entries, the zero key first and then in
    /// table slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Returns an iterator over the keys, in the same order as [`iter`].
    ///
    /// [`iter`]: #method.iter
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values, in the same order as [`iter`].
    ///
    /// [`iter`]: #method.iter
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Returns a cursor over the entries, which can remove or update the entry
    /// it returned last.
    pub fn cursor(&mut self) -> MapCursor<'_, K, V> {
        MapCursor::new(self)
    }
}

impl<K, V> OpenHashMap<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default + PartialEq,
{
    /// Returns `true` if some key is mapped to `value`.
    pub fn contains_value(&self, value: V) -> bool {
        self.values().any(|v| v == value)
    }

    /// Replaces the value of `key` with `new_value` only if it is currently
    /// mapped to `old_value`. Returns `true` if the value was replaced.
    pub fn replace_if(&mut self, key: K, old_value: V, new_value: V) -> bool {
        match self.find(key) {
            Some(slot) if self.values[slot] == old_value => {
                self.values[slot] = new_value;
                true
            }
            _ => false,
        }
    }

    /// Removes `key` only if it is currently mapped to `value`. Returns `true`
    /// if the entry was removed.
    pub fn remove_if_equals(&mut self, key: K, value: V) -> bool {
        match self.find(key) {
            Some(slot) if self.values[slot] == value => {
                self.remove_slot(slot);
                true
            }
            _ => false,
        }
    }
}

impl<K, V> OpenHashMap<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default + Add<Output = V>,
{
    /// Adds `increment` to the value of `key`. An absent key is inserted with
    /// the default return value plus `increment`.
    ///
    /// Returns the previous value, or the default return value if the key was
    /// absent.
    pub fn add_to(&mut self, key: K, increment: V) -> V {
        let initial = self.default_return_value + increment;
        match self.insert(key, initial) {
            Some(slot) => {
                let old = self.values[slot];
                self.values[slot] = old + increment;
                old
            }
            None => self.default_return_value,
        }
    }
}

// Table maintenance.
impl<K, V> OpenHashMap<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default,
{
    /// Returns the slot holding `key`, or `None`. The zero key lives in slot
    /// `n`.
    #[inline]
    pub(crate) fn find(&self, key: K) -> Option<usize> {
        if key.is_zero() {
            return self.contains_zero_key.then_some(self.n);
        }
        if self.n == 0 {
            return None;
        }

        let mut pos = hash_common::slot_of(key.to_bits64(), self.mask);
        loop {
            let curr = self.keys[pos];
            if curr.is_zero() {
                return None;
            }
            if curr.key_eq(key) {
                return Some(pos);
            }
            pos = (pos + 1) & self.mask;
        }
    }

    /// Grows the table to `table_size` slots, a power of two, if it is
    /// smaller.
    pub(crate) fn grow_table_to(&mut self, table_size: usize) {
        debug_assert!(table_size == 0 || table_size.is_power_of_two());
        if table_size > self.n {
            self.rehash(table_size);
        }
    }

    /// Returns the slot of `key` if it is present. Otherwise inserts
    /// `(key, value)`, growing the table first if needed, and returns `None`.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<usize> {
        if let found @ Some(_) = self.find(key) {
            return found;
        }

        if self.size + 1 > self.max_fill {
            let needed =
                hash_common::array_size(self.size + 1, self.load_factor).expect("capacity overflow");
            self.rehash(needed);
        }

        if key.is_zero() {
            self.contains_zero_key = true;
            self.values[self.n] = value;
        } else {
            let mut pos = hash_common::slot_of(key.to_bits64(), self.mask);
            while !self.keys[pos].is_zero() {
                pos = (pos + 1) & self.mask;
            }
            self.keys[pos] = key;
            self.values[pos] = value;
        }
        self.size += 1;
        None
    }

    /// Removes `key` and returns its value, or `None` if it was absent.
    pub(crate) fn take(&mut self, key: K) -> Option<V> {
        let slot = self.find(key)?;
        Some(self.remove_slot(slot))
    }

    /// Removes the entry in `slot` and shrinks the table if it became too
    /// sparse.
    fn remove_slot(&mut self, slot: usize) -> V {
        let old = self.values[slot];
        if slot == self.n {
            self.contains_zero_key = false;
        } else {
            self.shift_keys(slot, |_| {});
        }
        self.size -= 1;

        if self.n > self.min_n && self.size < self.max_fill / 4 && self.n > DEFAULT_INITIAL_SIZE {
            self.rehash(self.n / 2);
        }
        old
    }

    /// Empties `pos` and closes the gap by moving back every entry of the
    /// following run that would not be reachable from its ideal slot anymore.
    ///
    /// `on_wrap` receives the keys that moved from the start of the table to
    /// its end, i.e. across the wrap-around point.
    pub(crate) fn shift_keys<F>(&mut self, mut pos: usize, mut on_wrap: F)
    where
        F: FnMut(K),
    {
        loop {
            let last = pos;
            pos = (last + 1) & self.mask;
            let curr = loop {
                let curr = self.keys[pos];
                if curr.is_zero() {
                    self.keys[last] = K::default();
                    return;
                }
                let slot = hash_common::slot_of(curr.to_bits64(), self.mask);
                // Move the entry unless its ideal slot lies cyclically in
                // (last, pos].
                let must_move = if last <= pos {
                    last >= slot || slot > pos
                } else {
                    last >= slot && slot > pos
                };
                if must_move {
                    break curr;
                }
                pos = (pos + 1) & self.mask;
            };

            if pos < last {
                on_wrap(curr);
            }
            self.keys[last] = curr;
            self.values[last] = self.values[pos];
        }
    }

    /// Moves all entries to a new table of `new_n` slots.
    fn rehash(&mut self, new_n: usize) {
        debug_assert!(new_n.is_power_of_two());

        let mask = new_n - 1;
        let (mut new_keys, mut new_values) = allocate::<K, V>(new_n);

        if self.contains_zero_key {
            new_values[new_n] = self.values[self.n];
        }

        for (&k, &v) in self.keys.iter().zip(self.values.iter()).take(self.n) {
            if k.is_zero() {
                continue;
            }
            let mut pos = hash_common::slot_of(k.to_bits64(), mask);
            while !new_keys[pos].is_zero() {
                pos = (pos + 1) & mask;
            }
            new_keys[pos] = k;
            new_values[pos] = v;
        }

        #[cfg(feature = "logging")]
        log::trace!(
            "Rehashed an open hash map from {} to {} slots ({} entries)",
            self.n,
            new_n,
            self.size
        );

        self.keys = new_keys;
        self.values = new_values;
        self.n = new_n;
        self.mask = mask;
        self.max_fill = hash_common::max_fill(new_n, self.load_factor);
    }
}

fn allocate<K: Default + Clone, V: Default + Clone>(n: usize) -> (Box<[K]>, Box<[V]>) {
    if n == 0 {
        return (Box::default(), Box::default());
    }
    (
        vec![K::default(); n + 1].into_boxed_slice(),
        vec![V::default(); n + 1].into_boxed_slice(),
    )
}

impl<K, V> Default for OpenHashMap<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OpenHashMap<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> PartialEq for OpenHashMap<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.find(k).map_or(false, |slot| other.values[slot] == v))
    }
}

impl<K, V> Extend<(K, V)> for OpenHashMap<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > 0 {
            self.reserve(lower);
        }
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OpenHashMap<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V> IntoIterator for &'a OpenHashMap<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default,
{
    type Item = (K, V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::OpenHashMap;
    use crate::{
        common::{hash_common, test_utils::keys_with_slot},
        CollectionError,
    };

    use proptest::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn basic_operations() {
        let mut map: OpenHashMap<i32, i32> = OpenHashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 0);
        assert_eq!(map.get(1), 0);

        assert_eq!(map.put(1, 10), 0);
        assert_eq!(map.put(2, 20), 0);
        assert_eq!(map.put(1, 11), 10);
        assert_eq!(map.len(), 2);
        assert!(map.capacity().is_power_of_two());

        assert_eq!(map.get(1), 11);
        assert_eq!(map.get(2), 20);
        assert!(map.contains_key(2));
        assert!(!map.contains_key(3));

        assert_eq!(map.remove(1), 11);
        assert_eq!(map.remove(1), 0);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn lazy_allocation() {
        let mut map: OpenHashMap<u64, u8> = OpenHashMap::with_capacity(0);
        assert_eq!(map.capacity(), 0);
        // Lookups and removals on an unallocated table are plain misses.
        assert!(!map.contains_key(5));
        assert_eq!(map.remove(5), 0);
        assert_eq!(map.capacity(), 0);

        map.put(5, 1);
        assert_eq!(map.capacity(), 2);
        assert_eq!(map.get(5), 1);
    }

    #[test]
    fn lazy_allocation_with_zero_key_first() {
        let mut map: OpenHashMap<i16, i16> = OpenHashMap::new();
        assert_eq!(map.put(0, 3), 0);
        assert_eq!(map.capacity(), 2);
        assert_eq!(map.get(0), 3);
        map.put(1, 4);
        map.put(2, 5);
        assert_eq!(map.get(0), 3);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn resize_on_fourth_insertion() {
        let mut map: OpenHashMap<i32, i32> = OpenHashMap::with_capacity(3);
        assert_eq!(map.capacity(), 4);

        for k in 1..=3 {
            map.put(k, k * 10);
            assert_eq!(map.capacity(), 4);
        }
        map.put(4, 40);
        assert_eq!(map.capacity(), 8);
        for k in 1..=4 {
            assert_eq!(map.get(k), k * 10);
        }
    }

    #[test]
    fn resize_preserves_contents() {
        let mut map: OpenHashMap<i64, i64> = OpenHashMap::with_capacity(3);
        for k in 0..10_000 {
            map.put(k * 7919, k);
        }
        assert_eq!(map.len(), 10_000);
        for k in 0..10_000 {
            assert_eq!(map.get(k * 7919), k);
        }
    }

    #[test]
    fn remove_with_collisions() {
        let mut map: OpenHashMap<i32, i32> = OpenHashMap::with_capacity(3);
        assert_eq!(map.mask, 3);

        let keys = keys_with_slot(map.mask, 0, 3);
        for (i, &k) in keys.iter().enumerate() {
            map.put(k, i as i32 + 1);
        }
        assert_eq!(map.capacity(), 4);
        assert_eq!(&map.keys[..3], &keys[..]);

        // Removing the middle key must pull the last one back into its slot.
        assert_eq!(map.remove(keys[1]), 2);
        assert_eq!(map.get(keys[0]), 1);
        assert_eq!(map.get(keys[2]), 3);
        assert!(!map.contains_key(keys[1]));
        assert_eq!(map.keys[1], keys[2]);
        assert_eq!(map.keys[2], 0);
    }

    #[test]
    fn remove_with_wrapped_collisions() {
        let mut map: OpenHashMap<i32, i32> = OpenHashMap::with_capacity(3);
        let keys = keys_with_slot(map.mask, 3, 3);
        for &k in &keys {
            map.put(k, -k);
        }
        // Slot 3, then wrapped to slots 0 and 1.
        assert_eq!(map.keys[3], keys[0]);
        assert_eq!(map.keys[0], keys[1]);
        assert_eq!(map.keys[1], keys[2]);

        assert_eq!(map.remove(keys[0]), -keys[0]);
        assert_eq!(map.keys[3], keys[1]);
        assert_eq!(map.keys[0], keys[2]);
        assert_eq!(map.keys[1], 0);
        assert_eq!(map.get(keys[1]), -keys[1]);
        assert_eq!(map.get(keys[2]), -keys[2]);
    }

    #[test]
    fn remove_keeps_entries_at_their_ideal_slot() {
        let mut map: OpenHashMap<i32, i32> = OpenHashMap::with_capacity(6);
        assert_eq!(map.capacity(), 8);
        let at_zero = keys_with_slot(map.mask, 0, 2);
        let at_one = keys_with_slot(map.mask, 1, 1);

        map.put(at_zero[0], 1); // slot 0
        map.put(at_one[0], 2); // slot 1
        map.put(at_zero[1], 3); // slot 2

        map.remove(at_zero[0]);
        // at_one[0] already sits in its ideal slot and stays there, while
        // at_zero[1] jumps over it into the freed slot.
        assert_eq!(map.keys[0], at_zero[1]);
        assert_eq!(map.keys[1], at_one[0]);
        assert_eq!(map.keys[2], 0);
        assert_eq!(map.get(at_one[0]), 2);
        assert_eq!(map.get(at_zero[1]), 3);
    }

    #[test]
    fn zero_key() {
        let mut map: OpenHashMap<i32, i32> = OpenHashMap::with_capacity(4);
        map.set_default_return_value(-1);

        assert!(!map.contains_key(0));
        assert_eq!(map.get(0), -1);
        assert_eq!(map.put(0, 0), -1);
        assert!(map.contains_key(0));
        assert_eq!(map.get(0), 0);
        assert_eq!(map.len(), 1);

        // The zero key must not disturb ordinary keys.
        map.put(8, 80);
        assert_eq!(map.get(8), 80);

        assert_eq!(map.remove(0), 0);
        assert!(!map.contains_key(0));
        assert_eq!(map.get(0), -1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn zero_key_survives_rehash_and_trim() {
        let mut map: OpenHashMap<f64, u32> = OpenHashMap::new();
        map.put(0.0, 7);
        map.put(-0.0, 8);
        for i in 1..100 {
            map.put(i as f64, i);
        }
        assert_eq!(map.get(0.0), 7);
        assert_eq!(map.get(-0.0), 8);

        for i in 1..100 {
            map.remove(i as f64);
        }
        map.trim();
        assert_eq!(map.get(0.0), 7);
        assert_eq!(map.get(-0.0), 8);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn nan_keys_are_found() {
        let mut map: OpenHashMap<f32, i32> = OpenHashMap::new();
        map.put(f32::NAN, 1);
        assert_eq!(map.get(f32::NAN), 1);
        assert!(map.contains_key(f32::NAN));
    }

    #[test]
    fn put_returns_default_for_fresh_and_default_valued_entries() {
        let mut map: OpenHashMap<u8, i32> = OpenHashMap::new();
        assert_eq!(map.put(1, 0), 0);
        // The old value equals the default return value: same result as a
        // fresh insertion.
        assert_eq!(map.put(1, 5), 0);
        assert!(map.contains_key(1));
    }

    #[test]
    fn invalid_arguments() {
        assert!(matches!(
            OpenHashMap::<i32, i32>::with_capacity_and_load_factor(4, 0.0),
            Err(CollectionError::InvalidArgument(_))
        ));
        assert!(matches!(
            OpenHashMap::<i32, i32>::with_capacity_and_load_factor(4, 1.0),
            Err(CollectionError::InvalidArgument(_))
        ));
        assert!(matches!(
            OpenHashMap::<i32, i32>::from_arrays(&[1, 2], &[1], 0.75),
            Err(CollectionError::InvalidArgument(_))
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn with_capacity_panics_on_overflow() {
        let _ = OpenHashMap::<i32, i32>::with_capacity(usize::MAX);
    }

    #[test]
    fn from_arrays() {
        let map = OpenHashMap::from_arrays(&[1, 2, 1], &[10, 20, 30], 0.5).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(1), 30);
        assert_eq!(map.get(2), 20);
        assert_eq!(map.load_factor(), 0.5);
    }

    #[test]
    fn conditional_updates() {
        let mut map: OpenHashMap<u32, u32> = OpenHashMap::new();
        assert_eq!(map.replace(1, 5), 0);
        assert!(!map.contains_key(1));

        assert_eq!(map.put_if_absent(1, 5), 0);
        assert_eq!(map.put_if_absent(1, 6), 5);
        assert_eq!(map.replace(1, 7), 5);

        assert!(!map.replace_if(1, 5, 8));
        assert!(map.replace_if(1, 7, 8));
        assert_eq!(map.get(1), 8);

        assert!(!map.remove_if_equals(1, 7));
        assert!(map.remove_if_equals(1, 8));
        assert!(map.is_empty());

        assert_eq!(map.get_or_default(1, 99), 99);
    }

    #[test]
    fn counters() {
        let mut map: OpenHashMap<char, u64> = OpenHashMap::new();
        for c in "hello world".chars() {
            map.add_to(c, 1);
        }
        assert_eq!(map.get('l'), 3);
        assert_eq!(map.get('o'), 2);
        assert_eq!(map.get(' '), 1);
        assert_eq!(map.get('z'), 0);

        map.set_default_return_value(100);
        assert_eq!(map.add_to('z', 1), 100);
        assert_eq!(map.get('z'), 101);
    }

    #[test]
    fn compute_and_merge() {
        let mut map: OpenHashMap<i32, i32> = OpenHashMap::new();
        let mut calls = 0;
        assert_eq!(
            map.compute_if_absent(3, |k| {
                calls += 1;
                k * 3
            }),
            9
        );
        assert_eq!(
            map.compute_if_absent(3, |_| {
                calls += 1;
                0
            }),
            9
        );
        assert_eq!(calls, 1);

        assert_eq!(map.merge(4, 1, |a, b| a + b), 1);
        assert_eq!(map.merge(4, 5, |a, b| a + b), 6);
        assert_eq!(map.get(4), 6);
        assert!(map.contains_value(6));
        assert!(!map.contains_value(7));
    }

    #[test]
    fn clear_keeps_table() {
        let mut map: OpenHashMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
        let capacity = map.capacity();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        assert!(!map.contains_key(0));
        assert!(!map.contains_key(50));
        map.put(50, 1);
        assert_eq!(map.get(50), 1);
    }

    #[test]
    fn trim_and_shrink() {
        let mut map: OpenHashMap<i32, i32> = OpenHashMap::new();
        for i in 0..1000 {
            map.put(i, i);
        }
        let grown = map.capacity();
        assert_eq!(grown, 2048);

        // Removals halve the table once it becomes sparse.
        for i in 0..990 {
            map.remove(i);
        }
        assert!(map.capacity() < grown);
        for i in 990..1000 {
            assert_eq!(map.get(i), i);
        }

        map.trim();
        assert_eq!(map.capacity(), 16);
        map.trim_to(1);
        // Too many entries for a smaller table.
        assert_eq!(map.capacity(), 16);
        for i in 990..1000 {
            assert_eq!(map.get(i), i);
        }
    }

    #[test]
    fn removals_never_shrink_below_initial_size() {
        let mut map: OpenHashMap<i32, i32> = OpenHashMap::with_capacity(1000);
        let initial = map.capacity();
        for i in 0..1000 {
            map.put(i, i);
        }
        for i in 0..1000 {
            map.remove(i);
        }
        assert_eq!(map.capacity(), initial);
    }

    #[test]
    fn reserve_avoids_rehash() {
        let mut map: OpenHashMap<u16, u16> = OpenHashMap::new();
        map.reserve(100);
        let capacity = map.capacity();
        assert_eq!(capacity, 256);
        for i in 1..=100 {
            map.put(i, i);
        }
        assert_eq!(map.capacity(), capacity);
    }

    #[test]
    fn retain() {
        let mut map: OpenHashMap<i32, i32> = (0..200).map(|i| (i, i * 2)).collect();
        map.retain(|k, _| k % 3 == 0);
        assert_eq!(map.len(), 67);
        for i in 0..200 {
            assert_eq!(map.contains_key(i), i % 3 == 0, "key {i}");
        }
    }

    #[test]
    fn equality_ignores_layout() {
        let a: OpenHashMap<i32, i32> = (0..50).map(|i| (i, i)).collect();
        let mut b: OpenHashMap<i32, i32> = OpenHashMap::with_capacity(1000);
        for i in (0..50).rev() {
            b.put(i, i);
        }
        assert_eq!(a, b);
        b.put(3, 4);
        assert_ne!(a, b);
    }

    #[test]
    fn debug_format() {
        let mut map: OpenHashMap<i32, i32> = OpenHashMap::new();
        map.put(0, 1);
        assert_eq!(format!("{map:?}"), "{0: 1}");
    }

    #[test]
    fn unaddressable_capacity_is_out_of_range() {
        let max = hash_common::max_expected(0.5);
        assert_eq!(
            OpenHashMap::<i32, i32>::with_capacity_and_load_factor(usize::MAX, 0.5).err(),
            Some(CollectionError::IndexOutOfRange {
                index: usize::MAX as u64,
                len: max as u64,
            })
        );
        assert!(matches!(
            OpenHashMap::<i32, i32>::with_capacity_and_load_factor(max + 1, 0.5),
            Err(CollectionError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn load_never_exceeds_fractional_load_factor() {
        let mut map: OpenHashMap<i32, i32> =
            OpenHashMap::with_capacity_and_load_factor(2, 0.6).unwrap();
        assert_eq!(map.capacity(), 4);

        map.put(1, 1);
        map.put(2, 2);
        assert_eq!(map.capacity(), 4);
        // 3 entries in 4 slots would be a load of 0.75.
        map.put(3, 3);
        assert_eq!(map.capacity(), 8);

        for k in 4..1_000 {
            map.put(k, k);
            let load = map.len() as f64 / map.capacity() as f64;
            assert!(load <= 0.6, "load {load} with {} entries", map.len());
        }
        for k in 1..1_000 {
            assert_eq!(map.get(k), k);
        }
    }

    #[test]
    fn trim_to_keeps_room_for_expected_entries() {
        let mut map: OpenHashMap<i32, i32> =
            OpenHashMap::with_capacity_and_load_factor(1_000, 0.6).unwrap();
        map.put(1, 1);
        map.trim_to(5);
        // 8 slots only hold 4 entries at this load factor.
        assert_eq!(map.capacity(), 16);
        for k in 2..=5 {
            map.put(k, k);
        }
        assert_eq!(map.capacity(), 16);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Put(i32, i32),
        Remove(i32),
    }

    fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
        // A small key space forces many collisions and removals.
        let key = -256i32..256;
        prop::collection::vec(
            prop_oneof![
                2 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
                1 => key.prop_map(Op::Remove),
            ],
            0..2_000,
        )
    }

    proptest! {
        #[test]
        fn random_operations_match_std(ops in ops_strategy()) {
            let mut map: OpenHashMap<i32, i32> = OpenHashMap::new();
            let mut model: HashMap<i32, i32> = HashMap::new();

            for op in ops {
                match op {
                    Op::Put(k, v) => {
                        prop_assert_eq!(map.put(k, v), model.insert(k, v).unwrap_or(0));
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(map.remove(k), model.remove(&k).unwrap_or(0));
                    }
                }
                prop_assert_eq!(map.len(), model.len());
                prop_assert!(map.len() <= hash_common::max_fill(map.capacity(), map.load_factor()));
            }

            for key in -256..256 {
                prop_assert_eq!(map.contains_key(key), model.contains_key(&key));
                prop_assert_eq!(map.get(key), model.get(&key).copied().unwrap_or(0));
            }
        }
    }
}
