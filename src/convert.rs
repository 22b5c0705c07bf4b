//! Width-changing conversions.
//!
//! Three families:
//!
//! - **Integer resizing** — `extend_low`/`extend_high` widen half the lanes
//!   (sign- or zero-extending per the source kind); `narrow`/`narrow_u`
//!   concatenate two vectors and halve the lane width, saturating to the
//!   destination range before truncating. `extmul_*`, `extadd_pairwise`,
//!   and `dot` are the widening multiply/add shapes built on the same
//!   extension primitives.
//! - **Float precision** — `promote_low` and `demote` move between f32 and
//!   f64; `demote` rounds to nearest-even and zero-fills the two upper
//!   lanes of the four-lane result.
//! - **Float ↔ int** — `trunc_sat_*` truncates toward zero with the defined
//!   edge policy (NaN lanes become 0, out-of-range lanes clamp to the
//!   destination extremes); `to_f32x4`/`to_f64x2_low` convert integers to
//!   floats, exactly where f64 can represent every input.

use crate::arch::kernels;
use crate::types::{F32x4, F64x2, I16x8, I32x4, I64x2, I8x16, U16x8, U32x4, U64x2, U8x16};

// ===== Sign/zero extension =====

macro_rules! impl_extend {
    ($($name:ident => $wide:ident: $lowk:ident, $highk:ident;)*) => {
        $(
            impl $name {
                /// Widens the lower half of the lanes to double the bit
                /// width.
                #[inline]
                pub fn extend_low(self) -> $wide {
                    $wide(kernels::$lowk(self.0))
                }

                /// Widens the upper half of the lanes to double the bit
                /// width.
                #[inline]
                pub fn extend_high(self) -> $wide {
                    $wide(kernels::$highk(self.0))
                }
            }
        )*
    };
}

impl_extend! {
    I8x16 => I16x8: extend_low_i8, extend_high_i8;
    U8x16 => U16x8: extend_low_u8, extend_high_u8;
    I16x8 => I32x4: extend_low_i16, extend_high_i16;
    U16x8 => U32x4: extend_low_u16, extend_high_u16;
    I32x4 => I64x2: extend_low_i32, extend_high_i32;
    U32x4 => U64x2: extend_low_u32, extend_high_u32;
}

// ===== Saturating narrowing =====

macro_rules! impl_narrow {
    ($($name:ident => $narrow:ident / $narrow_u:ident: $sk:ident, $uk:ident;)*) => {
        $(
            impl $name {
                /// Concatenates `self` and `high`, halving the lane width;
                /// each lane saturates to the signed destination range
                /// before truncation. `self` fills the lower output lanes.
                #[inline]
                pub fn narrow(self, high: Self) -> $narrow {
                    $narrow(kernels::$sk(self.0, high.0))
                }

                /// Concatenates `self` and `high`, halving the lane width;
                /// each lane saturates to the unsigned destination range
                /// (negative lanes become 0) before truncation.
                #[inline]
                pub fn narrow_u(self, high: Self) -> $narrow_u {
                    $narrow_u(kernels::$uk(self.0, high.0))
                }
            }
        )*
    };
}

impl_narrow! {
    I16x8 => I8x16 / U8x16: narrow_i16_i8, narrow_i16_u8;
    I32x4 => I16x8 / U16x8: narrow_i32_i16, narrow_i32_u16;
}

// ===== Widening multiply and pairwise addition =====

macro_rules! impl_extmul {
    ($($name:ident => $wide:ident;)*) => {
        $(
            impl $name {
                /// Multiplies the lower-half lanes of both operands at
                /// double width, so no product overflows.
                #[inline]
                pub fn extmul_low(self, rhs: Self) -> $wide {
                    self.extend_low().mul(rhs.extend_low())
                }

                /// Multiplies the upper-half lanes of both operands at
                /// double width.
                #[inline]
                pub fn extmul_high(self, rhs: Self) -> $wide {
                    self.extend_high().mul(rhs.extend_high())
                }
            }
        )*
    };
}

impl_extmul! {
    I8x16 => I16x8;
    U8x16 => U16x8;
    I16x8 => I32x4;
    U16x8 => U32x4;
    I32x4 => I64x2;
    U32x4 => U64x2;
}

macro_rules! impl_extadd_pairwise {
    ($($name:ident => $wide:ident: $kernel:ident;)*) => {
        $(
            impl $name {
                /// Widens every lane, then sums adjacent pairs, halving the
                /// lane count.
                #[inline]
                pub fn extadd_pairwise(self) -> $wide {
                    $wide(kernels::$kernel(self.0))
                }
            }
        )*
    };
}

impl_extadd_pairwise! {
    I8x16 => I16x8: extadd_pairwise_i8;
    U8x16 => U16x8: extadd_pairwise_u8;
    I16x8 => I32x4: extadd_pairwise_i16;
    U16x8 => U32x4: extadd_pairwise_u16;
}

impl I16x8 {
    /// Multiplies corresponding lanes as full 32-bit products and sums
    /// adjacent pairs.
    #[inline]
    pub fn dot(self, rhs: Self) -> I32x4 {
        I32x4(kernels::dot_i16(self.0, rhs.0))
    }
}

// ===== Float precision =====

impl F32x4 {
    /// Widens the two lower lanes to double precision.
    #[inline]
    pub fn promote_low(self) -> F64x2 {
        F64x2(kernels::promote_low_f32_f64(self.0))
    }

    /// Truncates each lane toward zero into a signed 32-bit lane. NaN lanes
    /// become 0; out-of-range lanes clamp to `i32::MIN`/`i32::MAX`.
    #[inline]
    pub fn trunc_sat_i32x4(self) -> I32x4 {
        let x = self.to_array();
        I32x4::from_array([x[0] as i32, x[1] as i32, x[2] as i32, x[3] as i32])
    }

    /// Truncates each lane toward zero into an unsigned 32-bit lane. NaN
    /// and negative lanes become 0; lanes above `u32::MAX` clamp to it.
    #[inline]
    pub fn trunc_sat_u32x4(self) -> U32x4 {
        let x = self.to_array();
        U32x4::from_array([x[0] as u32, x[1] as u32, x[2] as u32, x[3] as u32])
    }
}

impl F64x2 {
    /// Narrows both lanes to single precision (round-to-nearest-even) and
    /// zero-fills the two upper lanes of the result.
    #[inline]
    pub fn demote(self) -> F32x4 {
        F32x4(kernels::demote_f64_f32(self.0))
    }

    /// Truncates both lanes toward zero into the two lower signed 32-bit
    /// lanes, zero-filling the upper two. NaN lanes become 0; out-of-range
    /// lanes clamp.
    #[inline]
    pub fn trunc_sat_zero_i32x4(self) -> I32x4 {
        let x = self.to_array();
        I32x4::from_array([x[0] as i32, x[1] as i32, 0, 0])
    }

    /// Truncates both lanes toward zero into the two lower unsigned 32-bit
    /// lanes, zero-filling the upper two. NaN and negative lanes become 0;
    /// out-of-range lanes clamp.
    #[inline]
    pub fn trunc_sat_zero_u32x4(self) -> U32x4 {
        let x = self.to_array();
        U32x4::from_array([x[0] as u32, x[1] as u32, 0, 0])
    }
}

// ===== Int → float =====

impl I32x4 {
    /// Converts each lane to f32 (rounded to nearest for magnitudes beyond
    /// 2^24).
    #[inline]
    pub fn to_f32x4(self) -> F32x4 {
        F32x4(kernels::convert_i32_f32(self.0))
    }

    /// Converts the two lower lanes to f64, exactly.
    #[inline]
    pub fn to_f64x2_low(self) -> F64x2 {
        F64x2(kernels::convert_low_i32_f64(self.0))
    }
}

impl U32x4 {
    /// Converts each lane to f32 (rounded to nearest for magnitudes beyond
    /// 2^24).
    #[inline]
    pub fn to_f32x4(self) -> F32x4 {
        F32x4(kernels::convert_u32_f32(self.0))
    }

    /// Converts the two lower lanes to f64, exactly.
    #[inline]
    pub fn to_f64x2_low(self) -> F64x2 {
        F64x2(kernels::convert_low_u32_f64(self.0))
    }
}
