//! Sizing and hashing arithmetic shared by the open-addressing tables.

/// The initial table size of a hash table created with no explicit capacity.
pub const DEFAULT_INITIAL_SIZE: usize = 16;

/// The default load factor of a hash table.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// A load factor trading memory for faster lookups.
pub const FAST_LOAD_FACTOR: f32 = 0.5;

/// A load factor for tables that must keep probe sequences very short.
pub const VERY_FAST_LOAD_FACTOR: f32 = 0.25;

/// The largest table size. One bit of headroom is kept so that the `n + 1`
/// key and value slots stay addressable.
pub(crate) const MAX_TABLE_SIZE: usize = 1 << (usize::BITS - 2);

// 2^64 / golden ratio.
const INV_PHI: u64 = 0x9e37_79b9_7f4a_7c15;

/// Scrambles the bits of a key so that the low bits used for indexing depend
/// on all of its bits. This is a bijection, hence keys never collide on the
/// full 64-bit value.
#[inline]
pub(crate) fn mix(bits: u64) -> u64 {
    let h = bits.wrapping_mul(INV_PHI);
    let h = h ^ (h >> 32);
    h ^ (h >> 16)
}

/// Returns the ideal slot of a key with the given bit pattern.
#[inline]
pub(crate) fn slot_of(bits: u64, mask: usize) -> usize {
    (mix(bits) as usize) & mask
}

/// Returns the number of entries a table of size `n` can hold without its
/// load exceeding `f`. At least one slot is always left empty so probe loops
/// terminate.
#[inline]
pub(crate) fn max_fill(n: usize, f: f32) -> usize {
    if n == 0 {
        return 0;
    }
    let fill = (n as f64 * f as f64).floor() as usize;
    fill.min(n - 1)
}

/// Returns the least power of two greater than or equal to
/// `ceil(expected / f)`, and never smaller than 2. A table of the returned
/// size always has `max_fill >= expected`. Returns `None` when the resulting
/// size is not addressable.
pub(crate) fn array_size(expected: usize, f: f32) -> Option<usize> {
    let wanted = (expected as f64 / f as f64).ceil();
    if wanted > MAX_TABLE_SIZE as f64 {
        return None;
    }
    let n = (wanted as usize).max(2).next_power_of_two();
    // The quotient may round down by one ulp.
    if max_fill(n, f) < expected {
        return n.checked_mul(2).filter(|&n| n <= MAX_TABLE_SIZE);
    }
    Some(n)
}

/// Returns the largest number of entries a table can be sized for at load
/// factor `f`.
#[inline]
pub(crate) fn max_expected(f: f32) -> usize {
    max_fill(MAX_TABLE_SIZE, f)
}

/// Returns `true` if `f` is a usable load factor.
#[inline]
pub(crate) fn is_valid_load_factor(f: f32) -> bool {
    f > 0.0 && f < 1.0
}
