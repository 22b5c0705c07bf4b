//! Horizontal reduction and bit-scan on the integer types.
//!
//! `any_true` asks about the whole 128 bits at once; `all_true` is
//! lane-wise, so a lane with any bit set counts as true. `bitmask` packs
//! each lane's sign bit into a scalar, lane 0 into bit 0. `popcount` exists
//! for the 8-bit types only, matching the catalog.
//!
//! The mask types carry the same queries (see [`crate::mask`]); these are
//! the numeric-vector forms.

use crate::arch::kernels;
use crate::types::{I16x8, I32x4, I64x2, I8x16, U16x8, U32x4, U64x2, U8x16};

macro_rules! impl_reduce {
    ($($name:ident: $allk:ident, $bitk:ident -> $bits:ty;)*) => {
        $(
            impl $name {
                /// True iff any bit across the whole vector is set.
                #[inline]
                pub fn any_true(self) -> bool {
                    kernels::any_true(self.0)
                }

                /// True iff every lane is non-zero.
                #[inline]
                pub fn all_true(self) -> bool {
                    kernels::$allk(self.0)
                }

                /// Packs each lane's sign bit into an integer, lane 0 in
                /// bit 0.
                #[inline]
                pub fn bitmask(self) -> $bits {
                    kernels::$bitk(self.0)
                }
            }
        )*
    };
}

impl_reduce! {
    I8x16: all_true8, bitmask8 -> u16;
    U8x16: all_true8, bitmask8 -> u16;
    I16x8: all_true16, bitmask16 -> u8;
    U16x8: all_true16, bitmask16 -> u8;
    I32x4: all_true32, bitmask32 -> u8;
    U32x4: all_true32, bitmask32 -> u8;
    I64x2: all_true64, bitmask64 -> u8;
    U64x2: all_true64, bitmask64 -> u8;
}

macro_rules! impl_popcount {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                /// Counts the set bits in every lane.
                #[inline]
                pub fn popcount(self) -> Self {
                    Self(kernels::popcount8(self.0))
                }
            }
        )+
    };
}

impl_popcount!(I8x16, U8x16);
