use super::map::OpenHashMap;
use crate::common::{
    error::CollectionError, hash_common::DEFAULT_LOAD_FACTOR, primitive::PrimitiveKey,
};

use std::marker::PhantomData;

/// Builds an [`OpenHashMap`][map-struct] with various configuration knobs.
///
/// [map-struct]: ./struct.OpenHashMap.html
///
/// # Examples
///
/// ```rust
/// use primcoll::{OpenHashMap, FAST_LOAD_FACTOR};
///
/// let mut map: OpenHashMap<i64, i32> = OpenHashMap::builder()
///     // Room for 1,000 entries before the first rehash.
///     .expected_entries(1_000)
///     // Shorter probe sequences at the cost of a larger table.
///     .load_factor(FAST_LOAD_FACTOR)
///     // Report missing keys as -1.
///     .default_return_value(-1)
///     .build()
///     .unwrap();
///
/// assert_eq!(map.capacity(), 2048);
/// assert_eq!(map.get(42), -1);
/// map.put(42, 7);
/// assert_eq!(map.get(42), 7);
/// ```
#[must_use]
pub struct OpenHashMapBuilder<K, V> {
    expected_entries: usize,
    load_factor: f32,
    default_return_value: Option<V>,
    key_type: PhantomData<K>,
}

impl<K, V> Default for OpenHashMapBuilder<K, V> {
    fn default() -> Self {
        Self {
            expected_entries: 0,
            load_factor: DEFAULT_LOAD_FACTOR,
            default_return_value: None,
            key_type: PhantomData,
        }
    }
}

impl<K, V> OpenHashMapBuilder<K, V>
where
    K: PrimitiveKey,
    V: Copy + Default,
{
    /// Sets the number of entries the map can hold before its first rehash.
    ///
    /// When zero (the default) the table is allocated on the first insertion.
    pub fn expected_entries(self, expected: usize) -> Self {
        Self {
            expected_entries: expected,
            ..self
        }
    }

    /// Sets the load factor of the map. It must be in `(0, 1)`.
    pub fn load_factor(self, load_factor: f32) -> Self {
        Self {
            load_factor,
            ..self
        }
    }

    /// Sets the value returned by lookups of missing keys.
    pub fn default_return_value(self, value: V) -> Self {
        Self {
            default_return_value: Some(value),
            ..self
        }
    }

    /// Builds an `OpenHashMap<K, V>`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] if the load factor is not
    /// in `(0, 1)`, and [`CollectionError::IndexOutOfRange`] if the expected
    /// number of entries needs a table that is not addressable.
    pub fn build(self) -> Result<OpenHashMap<K, V>, CollectionError> {
        let mut map =
            OpenHashMap::with_capacity_and_load_factor(self.expected_entries, self.load_factor)?;
        if let Some(value) = self.default_return_value {
            map.set_default_return_value(value);
        }
        Ok(map)
    }
}
