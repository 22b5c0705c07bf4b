//! Lanewise comparisons.
//!
//! Every comparison takes two vectors of the same element kind and returns
//! the matching-width boolean mask type, with true lanes all-ones and false
//! lanes all-zeros. Integer comparisons are total, so the derived forms
//! (`ne`, `le`, `ge`) are complements. Float comparisons follow IEEE
//! ordered/unordered rules — any comparison involving NaN is false except
//! `ne`, which is true — so their derived forms swap operands instead of
//! complementing.

use crate::arch::kernels;
use crate::types::{
    F32x4, F64x2, I16x8, I32x4, I64x2, I8x16, M16x8, M32x4, M64x2, M8x16, U16x8, U32x4, U64x2,
    U8x16,
};
use crate::v128::V128;

macro_rules! impl_int_compare {
    ($($name:ident => $mask:ident: $eqk:ident, $gtk:ident;)*) => {
        $(
            impl $name {
                /// Lanewise `==`.
                #[inline]
                pub fn eq(self, rhs: Self) -> $mask {
                    $mask(kernels::$eqk(self.0, rhs.0))
                }

                /// Lanewise `!=`.
                #[inline]
                pub fn ne(self, rhs: Self) -> $mask {
                    $mask(kernels::xor(kernels::$eqk(self.0, rhs.0), V128::ONES))
                }

                /// Lanewise `>`.
                #[inline]
                pub fn gt(self, rhs: Self) -> $mask {
                    $mask(kernels::$gtk(self.0, rhs.0))
                }

                /// Lanewise `<`.
                #[inline]
                pub fn lt(self, rhs: Self) -> $mask {
                    $mask(kernels::$gtk(rhs.0, self.0))
                }

                /// Lanewise `>=`.
                #[inline]
                pub fn ge(self, rhs: Self) -> $mask {
                    $mask(kernels::xor(kernels::$gtk(rhs.0, self.0), V128::ONES))
                }

                /// Lanewise `<=`.
                #[inline]
                pub fn le(self, rhs: Self) -> $mask {
                    $mask(kernels::xor(kernels::$gtk(self.0, rhs.0), V128::ONES))
                }
            }
        )*
    };
}

impl_int_compare! {
    I8x16 => M8x16: eq8, gt_i8;
    U8x16 => M8x16: eq8, gt_u8;
    I16x8 => M16x8: eq16, gt_i16;
    U16x8 => M16x8: eq16, gt_u16;
    I32x4 => M32x4: eq32, gt_i32;
    U32x4 => M32x4: eq32, gt_u32;
    I64x2 => M64x2: eq64, gt_i64;
    U64x2 => M64x2: eq64, gt_u64;
}

macro_rules! impl_float_compare {
    ($($name:ident => $mask:ident: $eqk:ident, $nek:ident, $ltk:ident, $lek:ident;)*) => {
        $(
            impl $name {
                /// Lanewise `==` (false on NaN).
                #[inline]
                pub fn eq(self, rhs: Self) -> $mask {
                    $mask(kernels::$eqk(self.0, rhs.0))
                }

                /// Lanewise `!=` (true on NaN).
                #[inline]
                pub fn ne(self, rhs: Self) -> $mask {
                    $mask(kernels::$nek(self.0, rhs.0))
                }

                /// Lanewise `<` (false on NaN).
                #[inline]
                pub fn lt(self, rhs: Self) -> $mask {
                    $mask(kernels::$ltk(self.0, rhs.0))
                }

                /// Lanewise `<=` (false on NaN).
                #[inline]
                pub fn le(self, rhs: Self) -> $mask {
                    $mask(kernels::$lek(self.0, rhs.0))
                }

                /// Lanewise `>` (false on NaN).
                #[inline]
                pub fn gt(self, rhs: Self) -> $mask {
                    $mask(kernels::$ltk(rhs.0, self.0))
                }

                /// Lanewise `>=` (false on NaN).
                #[inline]
                pub fn ge(self, rhs: Self) -> $mask {
                    $mask(kernels::$lek(rhs.0, self.0))
                }
            }
        )*
    };
}

impl_float_compare! {
    F32x4 => M32x4: eq_f32, ne_f32, lt_f32, le_f32;
    F64x2 => M64x2: eq_f64, ne_f64, lt_f64, le_f64;
}
