//! Raw 128-bit vector storage.
//!
//! `V128` is the untyped bit bucket every lane-typed vector in this crate
//! wraps. It carries no lane interpretation of its own: arithmetic lives on
//! the nominal types in [`crate::types`], and anything that needs to cross
//! between interpretations goes through an explicit reinterpretation (a plain
//! bit copy, see [`crate::reinterpret`]).
//!
//! Bytes are stored in little-endian lane order, lane 0 first, matching the
//! memory layout the load/store operations transfer. The storage is 16-byte
//! aligned so the native kernels can move it with a single register load.

use core::fmt;

/// Untyped 128-bit vector value.
///
/// All lane-typed vectors are `repr(transparent)` wrappers around this type,
/// so conversion in either direction is free and total.
#[derive(Clone, Copy)]
#[repr(C, align(16))]
pub struct V128 {
    bytes: [u8; 16],
}

impl V128 {
    /// The all-zeros vector.
    pub const ZERO: V128 = V128 { bytes: [0; 16] };

    /// The all-ones vector.
    pub const ONES: V128 = V128 { bytes: [0xFF; 16] };

    /// Returns a vector whose bits are all zero.
    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Interprets a 128-bit integer as a vector.
    #[inline]
    pub const fn from_bits(bits: u128) -> Self {
        Self {
            bytes: bits.to_le_bytes(),
        }
    }

    /// Returns the vector contents as a 128-bit integer.
    #[inline]
    pub const fn to_bits(self) -> u128 {
        u128::from_le_bytes(self.bytes)
    }

    /// Constructs a vector from bytes in lane order.
    #[inline]
    pub const fn from_le_bytes(bytes: [u8; 16]) -> Self {
        Self { bytes }
    }

    /// Returns the vector representation as bytes in lane order.
    #[inline]
    pub const fn to_le_bytes(self) -> [u8; 16] {
        self.bytes
    }

    /// True iff any bit of the 128 is set.
    #[inline]
    pub fn any_true(self) -> bool {
        self.to_bits() != 0
    }
}

impl Default for V128 {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for V128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl fmt::LowerHex for V128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#034x}", self.to_bits())
    }
}

impl fmt::UpperHex for V128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#034X}", self.to_bits())
    }
}

/// Generates the lane-view accessors used by the portable kernels and the
/// typed `to_array` methods. One pair per lane width and element kind.
macro_rules! lane_views {
    ($($to:ident / $from:ident: [$ty:ty; $n:expr], size $size:expr, zero $zero:expr;)*) => {
        impl V128 {
            $(
                #[inline]
                pub(crate) fn $to(self) -> [$ty; $n] {
                    let mut lanes = [$zero; $n];
                    let mut buf = [0u8; $size];
                    for (i, lane) in lanes.iter_mut().enumerate() {
                        buf.copy_from_slice(&self.bytes[i * $size..(i + 1) * $size]);
                        *lane = <$ty>::from_le_bytes(buf);
                    }
                    lanes
                }

                #[inline]
                pub(crate) fn $from(lanes: [$ty; $n]) -> Self {
                    let mut bytes = [0u8; 16];
                    for (i, lane) in lanes.iter().enumerate() {
                        bytes[i * $size..(i + 1) * $size].copy_from_slice(&lane.to_le_bytes());
                    }
                    Self { bytes }
                }
            )*
        }
    };
}

lane_views! {
    to_i8 / from_i8: [i8; 16], size 1, zero 0i8;
    to_u8 / from_u8: [u8; 16], size 1, zero 0u8;
    to_i16 / from_i16: [i16; 8], size 2, zero 0i16;
    to_u16 / from_u16: [u16; 8], size 2, zero 0u16;
    to_i32 / from_i32: [i32; 4], size 4, zero 0i32;
    to_u32 / from_u32: [u32; 4], size 4, zero 0u32;
    to_i64 / from_i64: [i64; 2], size 8, zero 0i64;
    to_u64 / from_u64: [u64; 2], size 8, zero 0u64;
    to_f32 / from_f32: [f32; 4], size 4, zero 0f32;
    to_f64 / from_f64: [f64; 2], size 8, zero 0f64;
}
