//! Persisted form of the hash tables.
//!
//! A map is written as its table size, its load factor, its default return
//! value and the sequence of its entries in table order (the zero key
//! included). Reading it back allocates a table of at least the written size
//! and rehashes the entries into it, so the slot layout is not part of the
//! format. A missing table size means a table sized for the entries.

use super::{map::OpenHashMap, set::OpenHashSet};
use crate::common::{hash_common::MAX_TABLE_SIZE, primitive::PrimitiveKey};

use serde::{de, ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

struct Entries<'a, K, V>(&'a OpenHashMap<K, V>);

impl<'a, K, V> Serialize for Entries<'a, K, V>
where
    K: PrimitiveKey + Serialize,
    V: Copy + Default + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<K, V> Serialize for OpenHashMap<K, V>
where
    K: PrimitiveKey + Serialize,
    V: Copy + Default + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OpenHashMap", 4)?;
        state.serialize_field("capacity", &self.capacity())?;
        state.serialize_field("load_factor", &self.load_factor())?;
        state.serialize_field("default_return_value", &self.default_return_value())?;
        state.serialize_field("entries", &Entries(self))?;
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(rename = "OpenHashMap")]
struct MapRepr<K, V> {
    #[serde(default)]
    capacity: usize,
    load_factor: f32,
    default_return_value: V,
    entries: Vec<(K, V)>,
}

fn check_table_size<E: de::Error>(capacity: usize) -> Result<usize, E> {
    if capacity == 0 || (capacity.is_power_of_two() && capacity <= MAX_TABLE_SIZE) {
        Ok(capacity)
    } else {
        Err(E::invalid_value(
            de::Unexpected::Unsigned(capacity as u64),
            &"zero or a power of two table size",
        ))
    }
}

impl<'de, K, V> Deserialize<'de> for OpenHashMap<K, V>
where
    K: PrimitiveKey + Deserialize<'de>,
    V: Copy + Default + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = MapRepr::<K, V>::deserialize(deserializer)?;
        let mut map =
            OpenHashMap::with_capacity_and_load_factor(repr.entries.len(), repr.load_factor)
                .map_err(de::Error::custom)?;
        map.grow_table_to(check_table_size::<D::Error>(repr.capacity)?);
        map.set_default_return_value(repr.default_return_value);
        for (k, v) in repr.entries {
            map.put(k, v);
        }
        Ok(map)
    }
}

impl<K> Serialize for OpenHashSet<K>
where
    K: PrimitiveKey + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OpenHashSet", 3)?;
        state.serialize_field("capacity", &self.capacity())?;
        state.serialize_field("load_factor", &self.load_factor())?;
        state.serialize_field("elements", &Elements(self))?;
        state.end()
    }
}

struct Elements<'a, K>(&'a OpenHashSet<K>);

impl<'a, K> Serialize for Elements<'a, K>
where
    K: PrimitiveKey + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

#[derive(Deserialize)]
#[serde(rename = "OpenHashSet")]
struct SetRepr<K> {
    #[serde(default)]
    capacity: usize,
    load_factor: f32,
    elements: Vec<K>,
}

impl<'de, K> Deserialize<'de> for OpenHashSet<K>
where
    K: PrimitiveKey + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = SetRepr::<K>::deserialize(deserializer)?;
        let mut set =
            OpenHashSet::with_capacity_and_load_factor(repr.elements.len(), repr.load_factor)
                .map_err(de::Error::custom)?;
        set.map.grow_table_to(check_table_size::<D::Error>(repr.capacity)?);
        set.extend(repr.elements);
        Ok(set)
    }
}
