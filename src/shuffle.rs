//! Lane permutation.
//!
//! `shuffle` is the compile-time-indexed form: every index is a const
//! generic, checked at build time against `2 * LANES` (indices below the
//! lane count pick from `self`, the rest from `rhs`). `swizzle` is the
//! run-time-indexed form over a single operand, defined for the 8-bit types;
//! an out-of-range index produces a zero lane rather than anything
//! undefined — callers rely on that to mask out unwanted lanes.

use crate::arch::kernels;
use crate::types::{F32x4, F64x2, I16x8, I32x4, I64x2, I8x16, U16x8, U32x4, U64x2, U8x16};

macro_rules! impl_shuffle_x16 {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                /// Builds a vector whose lane `n` is lane `In` of the
                /// concatenation `self ++ rhs` (indices `0..16` pick from
                /// `self`, `16..32` from `rhs`). Indices are checked at
                /// build time.
                #[inline]
                #[allow(clippy::too_many_arguments)]
                pub fn shuffle<
                    const I0: usize, const I1: usize, const I2: usize, const I3: usize,
                    const I4: usize, const I5: usize, const I6: usize, const I7: usize,
                    const I8: usize, const I9: usize, const I10: usize, const I11: usize,
                    const I12: usize, const I13: usize, const I14: usize, const I15: usize,
                >(self, rhs: Self) -> Self {
                    const {
                        assert!(
                            I0 < 32 && I1 < 32 && I2 < 32 && I3 < 32
                                && I4 < 32 && I5 < 32 && I6 < 32 && I7 < 32
                                && I8 < 32 && I9 < 32 && I10 < 32 && I11 < 32
                                && I12 < 32 && I13 < 32 && I14 < 32 && I15 < 32,
                            "shuffle index out of range"
                        )
                    };
                    let a = self.to_array();
                    let b = rhs.to_array();
                    let idx = [
                        I0, I1, I2, I3, I4, I5, I6, I7, I8, I9, I10, I11, I12, I13, I14, I15,
                    ];
                    let mut out = a;
                    for (lane, &i) in out.iter_mut().zip(idx.iter()) {
                        *lane = if i < 16 { a[i] } else { b[i - 16] };
                    }
                    Self::from_array(out)
                }
            }
        )+
    };
}

macro_rules! impl_shuffle_x8 {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                /// Builds a vector whose lane `n` is lane `In` of the
                /// concatenation `self ++ rhs` (indices `0..8` pick from
                /// `self`, `8..16` from `rhs`). Indices are checked at
                /// build time.
                #[inline]
                pub fn shuffle<
                    const I0: usize, const I1: usize, const I2: usize, const I3: usize,
                    const I4: usize, const I5: usize, const I6: usize, const I7: usize,
                >(self, rhs: Self) -> Self {
                    const {
                        assert!(
                            I0 < 16 && I1 < 16 && I2 < 16 && I3 < 16
                                && I4 < 16 && I5 < 16 && I6 < 16 && I7 < 16,
                            "shuffle index out of range"
                        )
                    };
                    let a = self.to_array();
                    let b = rhs.to_array();
                    let idx = [I0, I1, I2, I3, I4, I5, I6, I7];
                    let mut out = a;
                    for (lane, &i) in out.iter_mut().zip(idx.iter()) {
                        *lane = if i < 8 { a[i] } else { b[i - 8] };
                    }
                    Self::from_array(out)
                }
            }
        )+
    };
}

macro_rules! impl_shuffle_x4 {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                /// Builds a vector whose lane `n` is lane `In` of the
                /// concatenation `self ++ rhs` (indices `0..4` pick from
                /// `self`, `4..8` from `rhs`). Indices are checked at build
                /// time.
                #[inline]
                pub fn shuffle<
                    const I0: usize, const I1: usize, const I2: usize, const I3: usize,
                >(self, rhs: Self) -> Self {
                    const {
                        assert!(
                            I0 < 8 && I1 < 8 && I2 < 8 && I3 < 8,
                            "shuffle index out of range"
                        )
                    };
                    let a = self.to_array();
                    let b = rhs.to_array();
                    let idx = [I0, I1, I2, I3];
                    let mut out = a;
                    for (lane, &i) in out.iter_mut().zip(idx.iter()) {
                        *lane = if i < 4 { a[i] } else { b[i - 4] };
                    }
                    Self::from_array(out)
                }
            }
        )+
    };
}

macro_rules! impl_shuffle_x2 {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                /// Builds a vector whose lane `n` is lane `In` of the
                /// concatenation `self ++ rhs` (indices `0..2` pick from
                /// `self`, `2..4` from `rhs`). Indices are checked at build
                /// time.
                #[inline]
                pub fn shuffle<const I0: usize, const I1: usize>(self, rhs: Self) -> Self {
                    const { assert!(I0 < 4 && I1 < 4, "shuffle index out of range") };
                    let a = self.to_array();
                    let b = rhs.to_array();
                    let idx = [I0, I1];
                    let mut out = a;
                    for (lane, &i) in out.iter_mut().zip(idx.iter()) {
                        *lane = if i < 2 { a[i] } else { b[i - 2] };
                    }
                    Self::from_array(out)
                }
            }
        )+
    };
}

impl_shuffle_x16!(I8x16, U8x16);
impl_shuffle_x8!(I16x8, U16x8);
impl_shuffle_x4!(I32x4, U32x4, F32x4);
impl_shuffle_x2!(I64x2, U64x2, F64x2);

macro_rules! impl_swizzle {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                /// Builds a vector whose lane `n` is `self`'s lane
                /// `idx.lane[n]`, or zero when that index is 16 or more.
                #[inline]
                pub fn swizzle(self, idx: U8x16) -> Self {
                    Self(kernels::swizzle8(self.0, idx.0))
                }
            }
        )+
    };
}

impl_swizzle!(I8x16, U8x16);
