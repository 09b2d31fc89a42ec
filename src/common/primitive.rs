use std::fmt::Debug;

/// A scalar type that can be used as the key of an [`OpenHashMap`][map] or an
/// [`OpenHashSet`][set].
///
/// Keys are compared and hashed by their raw bit pattern. For floating point
/// keys this means that `NaN` can be found again after insertion, and that
/// `0.0` and `-0.0` are two different keys.
///
/// The bit pattern zero (`0`, `0.0`, `'\0'`, `false`) is the empty-slot marker
/// of the table. It is still a valid key: the tables keep it out of band.
///
/// The trait is implemented for all integer types, `f32`, `f64`, `char` and
/// `bool`.
///
/// [map]: ./struct.OpenHashMap.html
/// [set]: ./struct.OpenHashSet.html
pub trait PrimitiveKey: Copy + Default + Debug {
    /// Returns the raw bit pattern of this key, zero extended to 64 bits.
    fn to_bits64(self) -> u64;

    /// Returns `true` if this key has the bit pattern zero.
    #[inline]
    fn is_zero(self) -> bool {
        self.to_bits64() == 0
    }

    /// Bitwise key equality.
    #[inline]
    fn key_eq(self, other: Self) -> bool {
        self.to_bits64() == other.to_bits64()
    }
}

macro_rules! impl_primitive_key_for_int {
    ($($t:ty => $u:ty),* $(,)?) => {
        $(
            impl PrimitiveKey for $t {
                #[inline]
                fn to_bits64(self) -> u64 {
                    self as $u as u64
                }
            }
        )*
    };
}

impl_primitive_key_for_int! {
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    isize => usize,
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    usize => usize,
}

impl PrimitiveKey for f32 {
    #[inline]
    fn to_bits64(self) -> u64 {
        self.to_bits() as u64
    }
}

impl PrimitiveKey for f64 {
    #[inline]
    fn to_bits64(self) -> u64 {
        self.to_bits()
    }
}

impl PrimitiveKey for char {
    #[inline]
    fn to_bits64(self) -> u64 {
        self as u32 as u64
    }
}

impl PrimitiveKey for bool {
    #[inline]
    fn to_bits64(self) -> u64 {
        self as u64
    }
}
