//! Persisted form of the segmented list: a sequence of its elements in order.
//! Formats that need it get the length up front, since the iterator knows its
//! exact size. Reading it back lays the elements out in fresh segments.

use super::list::SegmentedList;

use serde::{
    de::{SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{fmt, marker::PhantomData};

// Upper bound for the capacity reserved from an untrusted size hint.
const MAX_PREALLOCATED: usize = 1 << 16;

impl<T, const SHIFT: u32> Serialize for SegmentedList<T, SHIFT>
where
    T: Copy + Default + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T, const SHIFT: u32> Deserialize<'de> for SegmentedList<T, SHIFT>
where
    T: Copy + Default + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListVisitor<T, const SHIFT: u32>(PhantomData<T>);

        impl<'de, T, const SHIFT: u32> Visitor<'de> for ListVisitor<T, SHIFT>
        where
            T: Copy + Default + Deserialize<'de>,
        {
            type Value = SegmentedList<T, SHIFT>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a sequence of list elements")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATED);
                let mut list = SegmentedList::with_capacity(capacity as u64);
                while let Some(value) = seq.next_element::<T>()? {
                    list.push(value);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_seq(ListVisitor::<T, SHIFT>(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::SegmentedList;

    #[test]
    fn round_trip_across_segments() {
        let list: SegmentedList<i16, 2> = (-7..12).collect();
        let json = serde_json::to_string(&list).unwrap();
        let restored: SegmentedList<i16, 2> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, list);
    }

    #[test]
    fn format_is_a_plain_sequence() {
        let list: SegmentedList<u8, 1> = (1..=5).collect();
        assert_eq!(serde_json::to_string(&list).unwrap(), "[1,2,3,4,5]");

        // The segment size is not part of the format.
        let other: SegmentedList<u8, 3> = serde_json::from_str("[1,2,3,4,5]").unwrap();
        assert_eq!(other.to_vec(), list.to_vec());
    }

    #[test]
    fn rejects_wrong_element_type() {
        assert!(serde_json::from_str::<SegmentedList<u8>>("[1,-2]").is_err());
    }
}
