//! Memory transfer operations.
//!
//! The safe entry points move whole `[Scalar; LANES]` arrays, which encodes
//! the element-type match between the vector and the memory operand in the
//! signature. The raw-pointer variants exist for callers indexing into
//! larger buffers; only the `_aligned` forms require 16-byte alignment, and
//! they check it in debug builds.
//!
//! Partial transfers follow the same shape: `load_zero` fills lane 0 and
//! zeroes the rest, `load_splat` broadcasts one element, `load_extend` reads
//! a half-width array and widens each element, and `load_lane`/`store_lane`
//! touch exactly one lane at a build-time-checked index.

use crate::types::{F32x4, F64x2, I16x8, I32x4, I64x2, I8x16, U16x8, U32x4, U64x2, U8x16};
use crate::v128::V128;

impl V128 {
    /// Loads 16 bytes. No alignment requirement.
    #[inline]
    pub fn load(src: &[u8; 16]) -> Self {
        Self::from_le_bytes(*src)
    }

    /// Stores 16 bytes. No alignment requirement.
    #[inline]
    pub fn store(self, dst: &mut [u8; 16]) {
        *dst = self.to_le_bytes();
    }

    /// Loads 16 bytes from a raw pointer.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading 16 bytes. No alignment requirement.
    #[inline]
    pub unsafe fn load_ptr(src: *const u8) -> Self {
        Self::from_le_bytes(core::ptr::read_unaligned(src.cast::<[u8; 16]>()))
    }

    /// Stores 16 bytes to a raw pointer.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writing 16 bytes. No alignment requirement.
    #[inline]
    pub unsafe fn store_ptr(self, dst: *mut u8) {
        core::ptr::write_unaligned(dst.cast::<[u8; 16]>(), self.to_le_bytes());
    }
}

macro_rules! impl_memory {
    ($($name:ident, $scalar:ty, $lanes:expr;)*) => {
        $(
            impl $name {
                /// Loads `LANES` elements. No alignment requirement.
                #[inline]
                pub fn load(src: &[$scalar; $lanes]) -> Self {
                    Self::from_array(*src)
                }

                /// Stores `LANES` elements. No alignment requirement.
                #[inline]
                pub fn store(self, dst: &mut [$scalar; $lanes]) {
                    *dst = self.to_array();
                }

                /// Loads `LANES` consecutive elements from a raw pointer.
                ///
                /// # Safety
                ///
                /// `src` must be valid for reading 16 bytes. No alignment
                /// requirement.
                #[inline]
                pub unsafe fn load_ptr(src: *const $scalar) -> Self {
                    Self::from_array(core::ptr::read_unaligned(src.cast::<[$scalar; $lanes]>()))
                }

                /// Loads `LANES` consecutive elements from a 16-byte-aligned
                /// pointer.
                ///
                /// # Safety
                ///
                /// `src` must be valid for reading 16 bytes and 16-byte
                /// aligned.
                #[inline]
                pub unsafe fn load_ptr_aligned(src: *const $scalar) -> Self {
                    debug_assert_eq!(src as usize % 16, 0, "unaligned vector load");
                    Self::from_array(core::ptr::read(src.cast::<[$scalar; $lanes]>()))
                }

                /// Stores `LANES` consecutive elements to a raw pointer.
                ///
                /// # Safety
                ///
                /// `dst` must be valid for writing 16 bytes. No alignment
                /// requirement.
                #[inline]
                pub unsafe fn store_ptr(self, dst: *mut $scalar) {
                    core::ptr::write_unaligned(dst.cast::<[$scalar; $lanes]>(), self.to_array());
                }

                /// Stores `LANES` consecutive elements to a 16-byte-aligned
                /// pointer.
                ///
                /// # Safety
                ///
                /// `dst` must be valid for writing 16 bytes and 16-byte
                /// aligned.
                #[inline]
                pub unsafe fn store_ptr_aligned(self, dst: *mut $scalar) {
                    debug_assert_eq!(dst as usize % 16, 0, "unaligned vector store");
                    core::ptr::write(dst.cast::<[$scalar; $lanes]>(), self.to_array());
                }

                /// Loads one element and broadcasts it to every lane.
                #[inline]
                pub fn load_splat(src: &$scalar) -> Self {
                    Self::splat(*src)
                }

                /// Returns a copy of `self` with lane `LANE` loaded from
                /// `src`; other lanes are untouched. Build-time index check.
                #[inline]
                pub fn load_lane<const LANE: usize>(self, src: &$scalar) -> Self {
                    self.replace_lane::<LANE>(*src)
                }

                /// Stores lane `LANE` to `dst`. Build-time index check.
                #[inline]
                pub fn store_lane<const LANE: usize>(self, dst: &mut $scalar) {
                    *dst = self.extract_lane::<LANE>();
                }
            }
        )*
    };
}

impl_memory! {
    I8x16, i8, 16;
    U8x16, u8, 16;
    I16x8, i16, 8;
    U16x8, u16, 8;
    I32x4, i32, 4;
    U32x4, u32, 4;
    I64x2, i64, 2;
    U64x2, u64, 2;
    F32x4, f32, 4;
    F64x2, f64, 2;
}

/// `load_zero`: one element into lane 0, all other lanes zero. Defined for
/// the 32- and 64-bit element kinds only.
macro_rules! impl_load_zero {
    ($($name:ident, $scalar:ty, $lanes:expr, $zero:expr;)*) => {
        $(
            impl $name {
                /// Loads one element into lane 0 and zero-fills the rest.
                #[inline]
                pub fn load_zero(src: &$scalar) -> Self {
                    let mut lanes = [$zero; $lanes];
                    lanes[0] = *src;
                    Self::from_array(lanes)
                }
            }
        )*
    };
}

impl_load_zero! {
    I32x4, i32, 4, 0i32;
    U32x4, u32, 4, 0u32;
    I64x2, i64, 2, 0i64;
    U64x2, u64, 2, 0u64;
    F32x4, f32, 4, 0f32;
    F64x2, f64, 2, 0f64;
}

/// `load_extend`: a packed half-width array widened into full lanes,
/// sign-extending for signed kinds and zero-extending for unsigned.
macro_rules! impl_load_extend {
    ($($name:ident, $narrow:ty => $scalar:ty, $lanes:expr;)*) => {
        $(
            impl $name {
                /// Loads `LANES` half-width elements and widens each into a
                /// full lane.
                #[inline]
                pub fn load_extend(src: &[$narrow; $lanes]) -> Self {
                    let mut lanes = [0 as $scalar; $lanes];
                    for (lane, &narrow) in lanes.iter_mut().zip(src.iter()) {
                        *lane = narrow as $scalar;
                    }
                    Self::from_array(lanes)
                }
            }
        )*
    };
}

impl_load_extend! {
    I16x8, i8 => i16, 8;
    U16x8, u8 => u16, 8;
    I32x4, i16 => i32, 4;
    U32x4, u16 => u32, 4;
    I64x2, i32 => i64, 2;
    U64x2, u32 => u64, 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_round_trip() {
        let data = [1i16, -2, 3, -4, 5, -6, 7, -8];
        let v = I16x8::load(&data);
        let mut out = [0i16; 8];
        v.store(&mut out);
        assert_eq!(out, data);
    }

    #[test]
    fn pointer_loads_match_array_loads() {
        let buf: Vec<u32> = (0..8).collect();
        let v = unsafe { U32x4::load_ptr(buf[3..].as_ptr()) };
        assert_eq!(v.to_array(), [3, 4, 5, 6]);
    }

    #[test]
    fn load_zero_fills_upper_lanes() {
        let v = F64x2::load_zero(&2.5);
        assert_eq!(v.to_array(), [2.5, 0.0]);
        let v = U32x4::load_zero(&7);
        assert_eq!(v.to_array(), [7, 0, 0, 0]);
    }

    #[test]
    fn load_extend_widens_each_element() {
        let v = I16x8::load_extend(&[-1i8, 2, -3, 4, -5, 6, -7, 8]);
        assert_eq!(v.to_array(), [-1, 2, -3, 4, -5, 6, -7, 8]);

        // Zero-extension keeps high-bit bytes positive.
        let v = U16x8::load_extend(&[0xFFu8; 8]);
        assert_eq!(v.to_array(), [0xFF; 8]);
    }

    #[test]
    fn lane_loads_touch_one_lane() {
        let v = U8x16::splat(9).load_lane::<5>(&42);
        let mut expected = [9u8; 16];
        expected[5] = 42;
        assert_eq!(v.to_array(), expected);

        let mut out = 0u8;
        v.store_lane::<5>(&mut out);
        assert_eq!(out, 42);
    }
}
