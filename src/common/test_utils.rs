use super::{hash_common::slot_of, primitive::PrimitiveKey};

/// Returns the first `count` non-zero `i32` keys whose ideal slot in a table
/// with the given `mask` is `slot`.
pub(crate) fn keys_with_slot(mask: usize, slot: usize, count: usize) -> Vec<i32> {
    (1..i32::MAX)
        .filter(|k| slot_of(k.to_bits64(), mask) == slot)
        .take(count)
        .collect()
}
