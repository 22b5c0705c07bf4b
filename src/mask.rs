//! Mask queries and lane-level selection.
//!
//! Masks come out of comparisons with every lane all-ones or all-zeros, and
//! the operations here consume them: the horizontal queries (`any_true`,
//! `all_true`, `bitmask`) and the lane blend.
//!
//! `blend`/`select` shares its formula with `bitselect` today, but it is a
//! separate named operation: it assumes per-lane-uniform control bits and
//! may lower to a true lane-blend instruction where one exists.

use crate::arch::kernels;
use crate::types::{
    F32x4, F64x2, I16x8, I32x4, I64x2, I8x16, M16x8, M32x4, M64x2, M8x16, U16x8, U32x4, U64x2,
    U8x16,
};

/// Lane-level selection driven by a mask of matching lane width.
///
/// Implemented by every numeric vector type for its width's mask. Call it
/// through [`M8x16::select`] and friends, or directly as e.g.
/// `I8x16::blend(mask, a, b)`.
pub trait Select<Mask>: Sized {
    /// Takes each lane from `when_set` where the mask lane is true and from
    /// `when_unset` where it is false.
    fn blend(mask: Mask, when_set: Self, when_unset: Self) -> Self;
}

macro_rules! impl_select {
    ($($mask:ident => $($name:ident),+;)*) => {
        $(
            $(
                impl Select<$mask> for $name {
                    #[inline]
                    fn blend(mask: $mask, when_set: Self, when_unset: Self) -> Self {
                        Self(kernels::xor(
                            kernels::and(when_set.0, mask.0),
                            kernels::andnot(when_unset.0, mask.0),
                        ))
                    }
                }
            )+
        )*
    };
}

impl_select! {
    M8x16 => I8x16, U8x16;
    M16x8 => I16x8, U16x8;
    M32x4 => I32x4, U32x4, F32x4;
    M64x2 => I64x2, U64x2, F64x2;
}

macro_rules! impl_mask_ops {
    ($($name:ident: $allk:ident, $bitk:ident -> $bits:ty;)*) => {
        $(
            impl $name {
                /// True iff any lane is true.
                #[inline]
                pub fn any_true(self) -> bool {
                    kernels::any_true(self.0)
                }

                /// True iff every lane is true.
                #[inline]
                pub fn all_true(self) -> bool {
                    kernels::$allk(self.0)
                }

                /// Packs the lanes' truth bits into an integer, lane 0 in
                /// bit 0.
                #[inline]
                pub fn bitmask(self) -> $bits {
                    kernels::$bitk(self.0)
                }

                /// Takes each lane from `when_set` where `self` is true and
                /// from `when_unset` where it is false.
                #[inline]
                pub fn select<V: Select<Self>>(self, when_set: V, when_unset: V) -> V {
                    V::blend(self, when_set, when_unset)
                }
            }
        )*
    };
}

impl_mask_ops! {
    M8x16: all_true8, bitmask8 -> u16;
    M16x8: all_true16, bitmask16 -> u8;
    M32x4: all_true32, bitmask32 -> u8;
    M64x2: all_true64, bitmask64 -> u8;
}
