use std::collections::HashMap;

use paste::paste;
use primcoll::{CollectionError, OpenHashMap, OpenHashSet, DEFAULT_INITIAL_SIZE};

// Generates the same suite for a key type. Keys are produced by casting `i32`
// values, so the suite also runs for the float types.
macro_rules! generate_map_tests {
    ($name:ident, $key:ty) => {
        paste! {
            #[test]
            fn [<test_ $name _put_get_remove>]() {
                let mut map: OpenHashMap<$key, i64> = OpenHashMap::new();
                let mut model = HashMap::new();

                for i in 0..100i32 {
                    let key = i as $key;
                    assert_eq!(map.put(key, i as i64), 0);
                    model.insert(i, i as i64);
                }
                assert_eq!(map.len(), model.len());
                assert!(map.contains_key(0 as $key));

                for i in (0..100i32).step_by(3) {
                    assert_eq!(map.remove(i as $key), i as i64);
                    model.remove(&i);
                }
                assert_eq!(map.len(), model.len());

                for i in 0..100i32 {
                    let expected = model.get(&i).copied().unwrap_or_default();
                    assert_eq!(map.get(i as $key), expected, "key {}", i);
                    assert_eq!(map.contains_key(i as $key), model.contains_key(&i));
                }
            }

            #[test]
            fn [<test_ $name _grows_and_shrinks>]() {
                let mut map: OpenHashMap<$key, u8> = OpenHashMap::with_capacity(3);
                assert_eq!(map.capacity(), 4);

                for i in 1..=3i32 {
                    map.put(i as $key, 1);
                }
                assert_eq!(map.capacity(), 4);
                map.put(4 as $key, 1);
                assert_eq!(map.capacity(), 8);

                for i in 5..=100i32 {
                    map.put(i as $key, 1);
                }
                assert_eq!(map.capacity(), 256);
                for i in 1..=100i32 {
                    assert_eq!(map.remove(i as $key), 1);
                }
                assert!(map.is_empty());
                assert_eq!(map.capacity(), DEFAULT_INITIAL_SIZE);
            }

            #[test]
            fn [<test_ $name _zero_key>]() {
                let mut map: OpenHashMap<$key, i32> = OpenHashMap::new();
                map.set_default_return_value(-1);

                assert_eq!(map.get(0 as $key), -1);
                assert_eq!(map.put(0 as $key, 10), -1);
                assert_eq!(map.put(0 as $key, 11), 10);
                assert_eq!(map.len(), 1);
                assert_eq!(map.iter().next(), Some((0 as $key, 11)));
                assert_eq!(map.remove(0 as $key), 11);
                assert_eq!(map.remove(0 as $key), -1);
                assert!(map.is_empty());
            }

            #[test]
            fn [<test_ $name _cursor_removes_every_other_entry>]() {
                let mut map: OpenHashMap<$key, i32> = (0..64i32).map(|i| (i as $key, i)).collect();
                let mut cursor = map.cursor();
                let mut seen = 0;
                while let Some((_, v)) = cursor.next_entry() {
                    seen += 1;
                    if v % 2 == 1 {
                        assert_eq!(cursor.remove(), Ok(v));
                    }
                }
                assert_eq!(seen, 64);
                assert_eq!(map.len(), 32);
                assert!(map.values().all(|v| v % 2 == 0));
            }

            #[test]
            fn [<test_ $name _set>]() {
                let mut set: OpenHashSet<$key> = (0..50i32).map(|i| i as $key).collect();
                assert_eq!(set.len(), 50);
                assert!(!set.add(7 as $key));
                set.retain(|k| k < (25 as $key));
                assert_eq!(set.len(), 25);
                assert!(set.contains(0 as $key));
                assert!(!set.contains(30 as $key));
            }
        }
    };
}

generate_map_tests!(i8, i8);
generate_map_tests!(u8, u8);
generate_map_tests!(i16, i16);
generate_map_tests!(u16, u16);
generate_map_tests!(i32, i32);
generate_map_tests!(u32, u32);
generate_map_tests!(i64, i64);
generate_map_tests!(u64, u64);
generate_map_tests!(usize, usize);
generate_map_tests!(f32, f32);
generate_map_tests!(f64, f64);

#[test]
fn test_char_and_bool_keys() {
    let mut counts: OpenHashMap<char, u32> = OpenHashMap::new();
    for c in "abracadabra\0".chars() {
        counts.add_to(c, 1);
    }
    assert_eq!(counts.get('a'), 5);
    assert_eq!(counts.get('\0'), 1);
    assert_eq!(counts.len(), 6);

    let mut flags: OpenHashMap<bool, u8> = OpenHashMap::new();
    flags.put(false, 1);
    flags.put(true, 2);
    assert_eq!(flags.len(), 2);
    assert_eq!(flags.get(false), 1);
    assert_eq!(flags.remove(true), 2);
}

#[test]
fn test_negative_zero_and_nan_keys() {
    let mut map: OpenHashMap<f64, u8> = OpenHashMap::new();
    map.put(0.0, 1);
    map.put(-0.0, 2);
    map.put(f64::NAN, 3);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(0.0), 1);
    assert_eq!(map.get(-0.0), 2);
    assert_eq!(map.get(f64::NAN), 3);
}

#[test]
fn test_invalid_construction() {
    for load_factor in [0.0, 1.0, -0.5, 2.0, f32::NAN] {
        assert!(matches!(
            OpenHashMap::<i32, i32>::with_capacity_and_load_factor(10, load_factor),
            Err(CollectionError::InvalidArgument(_))
        ));
    }
    assert!(matches!(
        OpenHashMap::<i32, i32>::with_capacity_and_load_factor(usize::MAX, 0.5),
        Err(CollectionError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        OpenHashMap::from_arrays(&[1, 2, 3], &[1, 2], 0.75),
        Err(CollectionError::InvalidArgument(_))
    ));
}

#[test]
fn test_logging_of_rehashes() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut map: OpenHashMap<u64, u64> = OpenHashMap::new();
    for i in 0..10_000 {
        map.put(i * 7919, i);
    }
    map.retain(|k, _| k % 2 == 0);
    map.trim();
    assert_eq!(map.len(), 5_000);
    assert_eq!(map.capacity(), 8192);
}
