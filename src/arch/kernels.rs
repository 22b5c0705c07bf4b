//! Raw operation kernels.
//!
//! Each kernel takes and returns untyped [`V128`] values; the lane-typed
//! wrappers in the rest of the crate decide which kernel is legal for which
//! type. Every kernel has a portable scalar-loop body, and the ones with a
//! clean single-instruction (or short fixed-sequence) mapping also carry an
//! x86_64 body selected by the `native-intrinsics` feature.
//!
//! The portable bodies are the reference semantics. Operations that have no
//! economical instruction sequence on SSE (8-bit shifts, 64-bit arithmetic
//! shift, unsigned→float conversion, IEEE-aware float min/max) are portable
//! on both backends; the optimizer is free to vectorize those loops.
//!
//! Intrinsic safety status varies across toolchains, so explicit `unsafe`
//! blocks are kept throughout the native arms.

#![allow(unused_unsafe)]

use crate::v128::V128;

#[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
use core::arch::x86_64 as simd_arch;

// ===== Native register shuttling =====

#[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
#[inline]
fn to_m128i(v: V128) -> simd_arch::__m128i {
    let bytes = v.to_le_bytes();
    unsafe { simd_arch::_mm_loadu_si128(bytes.as_ptr().cast()) }
}

#[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
#[inline]
fn from_m128i(v: simd_arch::__m128i) -> V128 {
    let mut bytes = [0u8; 16];
    unsafe { simd_arch::_mm_storeu_si128(bytes.as_mut_ptr().cast(), v) };
    V128::from_le_bytes(bytes)
}

#[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
#[inline]
fn to_m128(v: V128) -> simd_arch::__m128 {
    unsafe { simd_arch::_mm_castsi128_ps(to_m128i(v)) }
}

#[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
#[inline]
fn from_m128(v: simd_arch::__m128) -> V128 {
    from_m128i(unsafe { simd_arch::_mm_castps_si128(v) })
}

#[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
#[inline]
fn to_m128d(v: V128) -> simd_arch::__m128d {
    unsafe { simd_arch::_mm_castsi128_pd(to_m128i(v)) }
}

#[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
#[inline]
fn from_m128d(v: simd_arch::__m128d) -> V128 {
    from_m128i(unsafe { simd_arch::_mm_castpd_si128(v) })
}

// ===== Kernel generator macros =====

/// Binary lanewise kernel: one integer intrinsic or one scalar closure.
macro_rules! binary_kernel {
    ($name:ident, $to:ident / $from:ident, native: $intr:ident, portable: $f:expr) => {
        #[inline]
        pub(crate) fn $name(a: V128, b: V128) -> V128 {
            #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
            {
                from_m128i(unsafe { simd_arch::$intr(to_m128i(a), to_m128i(b)) })
            }
            #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
            {
                let x = a.$to();
                let y = b.$to();
                let mut out = x;
                for i in 0..out.len() {
                    out[i] = ($f)(x[i], y[i]);
                }
                V128::$from(out)
            }
        }
    };
    // Portable-only form: the scalar loop is the implementation on every backend.
    ($name:ident, $to:ident / $from:ident, portable: $f:expr) => {
        #[inline]
        pub(crate) fn $name(a: V128, b: V128) -> V128 {
            let x = a.$to();
            let y = b.$to();
            let mut out = x;
            for i in 0..out.len() {
                out[i] = ($f)(x[i], y[i]);
            }
            V128::$from(out)
        }
    };
}

/// Unary lanewise kernel.
macro_rules! unary_kernel {
    ($name:ident, $to:ident / $from:ident, native: $intr:ident, portable: $f:expr) => {
        #[inline]
        pub(crate) fn $name(a: V128) -> V128 {
            #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
            {
                from_m128i(unsafe { simd_arch::$intr(to_m128i(a)) })
            }
            #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
            {
                let mut out = a.$to();
                for lane in out.iter_mut() {
                    *lane = ($f)(*lane);
                }
                V128::$from(out)
            }
        }
    };
    ($name:ident, $to:ident / $from:ident, portable: $f:expr) => {
        #[inline]
        pub(crate) fn $name(a: V128) -> V128 {
            let mut out = a.$to();
            for lane in out.iter_mut() {
                *lane = ($f)(*lane);
            }
            V128::$from(out)
        }
    };
}

/// Binary float kernel over `__m128` / `__m128d` registers.
macro_rules! binary_kernel_f32 {
    ($name:ident, native: $intr:ident, portable: $f:expr) => {
        #[inline]
        pub(crate) fn $name(a: V128, b: V128) -> V128 {
            #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
            {
                from_m128(unsafe { simd_arch::$intr(to_m128(a), to_m128(b)) })
            }
            #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
            {
                let x = a.to_f32();
                let y = b.to_f32();
                let mut out = x;
                for i in 0..4 {
                    out[i] = ($f)(x[i], y[i]);
                }
                V128::from_f32(out)
            }
        }
    };
}

macro_rules! binary_kernel_f64 {
    ($name:ident, native: $intr:ident, portable: $f:expr) => {
        #[inline]
        pub(crate) fn $name(a: V128, b: V128) -> V128 {
            #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
            {
                from_m128d(unsafe { simd_arch::$intr(to_m128d(a), to_m128d(b)) })
            }
            #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
            {
                let x = a.to_f64();
                let y = b.to_f64();
                let mut out = x;
                for i in 0..2 {
                    out[i] = ($f)(x[i], y[i]);
                }
                V128::from_f64(out)
            }
        }
    };
}

/// Integer comparison kernel; true lanes are all-ones.
macro_rules! cmp_kernel {
    ($name:ident, $to:ident / $from:ident, native: |$na:ident, $nb:ident| $nat:expr, portable: $pred:expr) => {
        #[inline]
        pub(crate) fn $name(a: V128, b: V128) -> V128 {
            #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
            {
                let $na = to_m128i(a);
                let $nb = to_m128i(b);
                from_m128i(unsafe { $nat })
            }
            #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
            {
                let x = a.$to();
                let y = b.$to();
                let mut out = x;
                for i in 0..out.len() {
                    out[i] = 0;
                    if ($pred)(x[i], y[i]) {
                        out[i] = !out[i];
                    }
                }
                V128::$from(out)
            }
        }
    };
}

/// Float comparison kernel; the mask is written as 32/64-bit integer lanes.
macro_rules! fcmp_kernel {
    ($name:ident, f32, native: $intr:ident, portable: $pred:expr) => {
        #[inline]
        pub(crate) fn $name(a: V128, b: V128) -> V128 {
            #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
            {
                from_m128(unsafe { simd_arch::$intr(to_m128(a), to_m128(b)) })
            }
            #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
            {
                let x = a.to_f32();
                let y = b.to_f32();
                let mut out = [0i32; 4];
                for i in 0..4 {
                    out[i] = if ($pred)(x[i], y[i]) { -1 } else { 0 };
                }
                V128::from_i32(out)
            }
        }
    };
    ($name:ident, f64, native: $intr:ident, portable: $pred:expr) => {
        #[inline]
        pub(crate) fn $name(a: V128, b: V128) -> V128 {
            #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
            {
                from_m128d(unsafe { simd_arch::$intr(to_m128d(a), to_m128d(b)) })
            }
            #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
            {
                let x = a.to_f64();
                let y = b.to_f64();
                let mut out = [0i64; 2];
                for i in 0..2 {
                    out[i] = if ($pred)(x[i], y[i]) { -1 } else { 0 };
                }
                V128::from_i64(out)
            }
        }
    };
}

/// Shift kernel. The amount is reduced modulo the lane width before use, so
/// the SSE shift-by-register forms (which zero out for counts >= width) and
/// the scalar `<<`/`>>` agree.
macro_rules! shift_kernel {
    ($name:ident, $to:ident / $from:ident, $bits:expr, native: $intr:ident, portable: $f:expr) => {
        #[inline]
        pub(crate) fn $name(a: V128, amt: u32) -> V128 {
            let amt = amt % $bits;
            #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
            {
                from_m128i(unsafe {
                    simd_arch::$intr(to_m128i(a), simd_arch::_mm_cvtsi32_si128(amt as i32))
                })
            }
            #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
            {
                let mut out = a.$to();
                for lane in out.iter_mut() {
                    *lane = ($f)(*lane, amt);
                }
                V128::$from(out)
            }
        }
    };
    ($name:ident, $to:ident / $from:ident, $bits:expr, portable: $f:expr) => {
        #[inline]
        pub(crate) fn $name(a: V128, amt: u32) -> V128 {
            let amt = amt % $bits;
            let mut out = a.$to();
            for lane in out.iter_mut() {
                *lane = ($f)(*lane, amt);
            }
            V128::$from(out)
        }
    };
}

// ===== Wrapping integer arithmetic =====

binary_kernel!(add8, to_u8 / from_u8, native: _mm_add_epi8, portable: u8::wrapping_add);
binary_kernel!(sub8, to_u8 / from_u8, native: _mm_sub_epi8, portable: u8::wrapping_sub);
binary_kernel!(add16, to_u16 / from_u16, native: _mm_add_epi16, portable: u16::wrapping_add);
binary_kernel!(sub16, to_u16 / from_u16, native: _mm_sub_epi16, portable: u16::wrapping_sub);
binary_kernel!(add32, to_u32 / from_u32, native: _mm_add_epi32, portable: u32::wrapping_add);
binary_kernel!(sub32, to_u32 / from_u32, native: _mm_sub_epi32, portable: u32::wrapping_sub);
binary_kernel!(add64, to_u64 / from_u64, native: _mm_add_epi64, portable: u64::wrapping_add);
binary_kernel!(sub64, to_u64 / from_u64, native: _mm_sub_epi64, portable: u64::wrapping_sub);

binary_kernel!(mul16, to_u16 / from_u16, native: _mm_mullo_epi16, portable: u16::wrapping_mul);
binary_kernel!(mul32, to_u32 / from_u32, native: _mm_mullo_epi32, portable: u32::wrapping_mul);
// No packed 64-bit low multiply below AVX-512; scalar on both backends.
binary_kernel!(mul64, to_u64 / from_u64, portable: u64::wrapping_mul);

// ===== Saturating arithmetic (8/16-bit) =====

binary_kernel!(adds_i8, to_i8 / from_i8, native: _mm_adds_epi8, portable: i8::saturating_add);
binary_kernel!(adds_u8, to_u8 / from_u8, native: _mm_adds_epu8, portable: u8::saturating_add);
binary_kernel!(subs_i8, to_i8 / from_i8, native: _mm_subs_epi8, portable: i8::saturating_sub);
binary_kernel!(subs_u8, to_u8 / from_u8, native: _mm_subs_epu8, portable: u8::saturating_sub);
binary_kernel!(adds_i16, to_i16 / from_i16, native: _mm_adds_epi16, portable: i16::saturating_add);
binary_kernel!(adds_u16, to_u16 / from_u16, native: _mm_adds_epu16, portable: u16::saturating_add);
binary_kernel!(subs_i16, to_i16 / from_i16, native: _mm_subs_epi16, portable: i16::saturating_sub);
binary_kernel!(subs_u16, to_u16 / from_u16, native: _mm_subs_epu16, portable: u16::saturating_sub);

// ===== Rounding average (unsigned 8/16-bit) =====

binary_kernel!(avgr_u8, to_u8 / from_u8, native: _mm_avg_epu8,
    portable: |x: u8, y: u8| ((x as u16 + y as u16 + 1) >> 1) as u8);
binary_kernel!(avgr_u16, to_u16 / from_u16, native: _mm_avg_epu16,
    portable: |x: u16, y: u16| ((x as u32 + y as u32 + 1) >> 1) as u16);

// ===== Absolute value (wrapping at the signed minimum) =====

unary_kernel!(abs_i8, to_i8 / from_i8, native: _mm_abs_epi8, portable: i8::wrapping_abs);
unary_kernel!(abs_i16, to_i16 / from_i16, native: _mm_abs_epi16, portable: i16::wrapping_abs);
unary_kernel!(abs_i32, to_i32 / from_i32, native: _mm_abs_epi32, portable: i32::wrapping_abs);
unary_kernel!(abs_i64, to_i64 / from_i64, portable: i64::wrapping_abs);

// ===== Integer min/max (8/16/32-bit) =====

binary_kernel!(min_i8, to_i8 / from_i8, native: _mm_min_epi8, portable: |x: i8, y: i8| x.min(y));
binary_kernel!(max_i8, to_i8 / from_i8, native: _mm_max_epi8, portable: |x: i8, y: i8| x.max(y));
binary_kernel!(min_u8, to_u8 / from_u8, native: _mm_min_epu8, portable: |x: u8, y: u8| x.min(y));
binary_kernel!(max_u8, to_u8 / from_u8, native: _mm_max_epu8, portable: |x: u8, y: u8| x.max(y));
binary_kernel!(min_i16, to_i16 / from_i16, native: _mm_min_epi16, portable: |x: i16, y: i16| x.min(y));
binary_kernel!(max_i16, to_i16 / from_i16, native: _mm_max_epi16, portable: |x: i16, y: i16| x.max(y));
binary_kernel!(min_u16, to_u16 / from_u16, native: _mm_min_epu16, portable: |x: u16, y: u16| x.min(y));
binary_kernel!(max_u16, to_u16 / from_u16, native: _mm_max_epu16, portable: |x: u16, y: u16| x.max(y));
binary_kernel!(min_i32, to_i32 / from_i32, native: _mm_min_epi32, portable: |x: i32, y: i32| x.min(y));
binary_kernel!(max_i32, to_i32 / from_i32, native: _mm_max_epi32, portable: |x: i32, y: i32| x.max(y));
binary_kernel!(min_u32, to_u32 / from_u32, native: _mm_min_epu32, portable: |x: u32, y: u32| x.min(y));
binary_kernel!(max_u32, to_u32 / from_u32, native: _mm_max_epu32, portable: |x: u32, y: u32| x.max(y));

// ===== Float arithmetic =====

binary_kernel_f32!(add_f32, native: _mm_add_ps, portable: |x: f32, y: f32| x + y);
binary_kernel_f32!(sub_f32, native: _mm_sub_ps, portable: |x: f32, y: f32| x - y);
binary_kernel_f32!(mul_f32, native: _mm_mul_ps, portable: |x: f32, y: f32| x * y);
binary_kernel_f32!(div_f32, native: _mm_div_ps, portable: |x: f32, y: f32| x / y);
binary_kernel_f64!(add_f64, native: _mm_add_pd, portable: |x: f64, y: f64| x + y);
binary_kernel_f64!(sub_f64, native: _mm_sub_pd, portable: |x: f64, y: f64| x - y);
binary_kernel_f64!(mul_f64, native: _mm_mul_pd, portable: |x: f64, y: f64| x * y);
binary_kernel_f64!(div_f64, native: _mm_div_pd, portable: |x: f64, y: f64| x / y);

// Pseudo-minimum/maximum. `pmin(a, b) = b < a ? b : a` is exactly the SSE
// `minps` with swapped operands, which is why the operand swap below is not
// a mistake.
#[inline]
pub(crate) fn pmin_f32(a: V128, b: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128(unsafe { simd_arch::_mm_min_ps(to_m128(b), to_m128(a)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_f32();
        let y = b.to_f32();
        let mut out = x;
        for i in 0..4 {
            out[i] = if y[i] < x[i] { y[i] } else { x[i] };
        }
        V128::from_f32(out)
    }
}

#[inline]
pub(crate) fn pmax_f32(a: V128, b: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128(unsafe { simd_arch::_mm_max_ps(to_m128(b), to_m128(a)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_f32();
        let y = b.to_f32();
        let mut out = x;
        for i in 0..4 {
            out[i] = if x[i] < y[i] { y[i] } else { x[i] };
        }
        V128::from_f32(out)
    }
}

#[inline]
pub(crate) fn pmin_f64(a: V128, b: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128d(unsafe { simd_arch::_mm_min_pd(to_m128d(b), to_m128d(a)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_f64();
        let y = b.to_f64();
        let mut out = x;
        for i in 0..2 {
            out[i] = if y[i] < x[i] { y[i] } else { x[i] };
        }
        V128::from_f64(out)
    }
}

#[inline]
pub(crate) fn pmax_f64(a: V128, b: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128d(unsafe { simd_arch::_mm_max_pd(to_m128d(b), to_m128d(a)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_f64();
        let y = b.to_f64();
        let mut out = x;
        for i in 0..2 {
            out[i] = if x[i] < y[i] { y[i] } else { x[i] };
        }
        V128::from_f64(out)
    }
}

// IEEE-aware min/max: the NaN operand's payload propagates (first operand
// checked first), and -0.0 orders below +0.0. No SSE single instruction has
// these semantics, so both backends run the scalar form.

#[inline]
fn fmin32(x: f32, y: f32) -> f32 {
    if x != x {
        return x;
    }
    if y != y {
        return y;
    }
    if x == y {
        // min(+0, -0) must be -0: merge sign bits.
        return f32::from_bits(x.to_bits() | y.to_bits());
    }
    if x < y {
        x
    } else {
        y
    }
}

#[inline]
fn fmax32(x: f32, y: f32) -> f32 {
    if x != x {
        return x;
    }
    if y != y {
        return y;
    }
    if x == y {
        // max(+0, -0) must be +0: a sign bit survives only if both carry it.
        return f32::from_bits(x.to_bits() & y.to_bits());
    }
    if x > y {
        x
    } else {
        y
    }
}

#[inline]
fn fmin64(x: f64, y: f64) -> f64 {
    if x != x {
        return x;
    }
    if y != y {
        return y;
    }
    if x == y {
        return f64::from_bits(x.to_bits() | y.to_bits());
    }
    if x < y {
        x
    } else {
        y
    }
}

#[inline]
fn fmax64(x: f64, y: f64) -> f64 {
    if x != x {
        return x;
    }
    if y != y {
        return y;
    }
    if x == y {
        return f64::from_bits(x.to_bits() & y.to_bits());
    }
    if x > y {
        x
    } else {
        y
    }
}

binary_kernel!(min_f32, to_f32 / from_f32, portable: fmin32);
binary_kernel!(max_f32, to_f32 / from_f32, portable: fmax32);
binary_kernel!(min_f64, to_f64 / from_f64, portable: fmin64);
binary_kernel!(max_f64, to_f64 / from_f64, portable: fmax64);

// ===== Shifts (amount taken modulo the lane width) =====

shift_kernel!(shl8, to_u8 / from_u8, 8, portable: |x: u8, s: u32| x << s);
shift_kernel!(shr_i8, to_i8 / from_i8, 8, portable: |x: i8, s: u32| x >> s);
shift_kernel!(shr_u8, to_u8 / from_u8, 8, portable: |x: u8, s: u32| x >> s);
shift_kernel!(shl16, to_u16 / from_u16, 16, native: _mm_sll_epi16, portable: |x: u16, s: u32| x << s);
shift_kernel!(shr_i16, to_i16 / from_i16, 16, native: _mm_sra_epi16, portable: |x: i16, s: u32| x >> s);
shift_kernel!(shr_u16, to_u16 / from_u16, 16, native: _mm_srl_epi16, portable: |x: u16, s: u32| x >> s);
shift_kernel!(shl32, to_u32 / from_u32, 32, native: _mm_sll_epi32, portable: |x: u32, s: u32| x << s);
shift_kernel!(shr_i32, to_i32 / from_i32, 32, native: _mm_sra_epi32, portable: |x: i32, s: u32| x >> s);
shift_kernel!(shr_u32, to_u32 / from_u32, 32, native: _mm_srl_epi32, portable: |x: u32, s: u32| x >> s);
shift_kernel!(shl64, to_u64 / from_u64, 64, native: _mm_sll_epi64, portable: |x: u64, s: u32| x << s);
// SSE has no 64-bit arithmetic right shift.
shift_kernel!(shr_i64, to_i64 / from_i64, 64, portable: |x: i64, s: u32| x >> s);
shift_kernel!(shr_u64, to_u64 / from_u64, 64, native: _mm_srl_epi64, portable: |x: u64, s: u32| x >> s);

// ===== Bitwise =====

binary_kernel!(and, to_u64 / from_u64, native: _mm_and_si128, portable: |x: u64, y: u64| x & y);
binary_kernel!(or, to_u64 / from_u64, native: _mm_or_si128, portable: |x: u64, y: u64| x | y);
binary_kernel!(xor, to_u64 / from_u64, native: _mm_xor_si128, portable: |x: u64, y: u64| x ^ y);

/// `a & !b`. The SSE intrinsic complements its *first* operand, hence the
/// operand swap in the native arm.
#[inline]
pub(crate) fn andnot(a: V128, b: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128i(unsafe { simd_arch::_mm_andnot_si128(to_m128i(b), to_m128i(a)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_u64();
        let y = b.to_u64();
        V128::from_u64([x[0] & !y[0], x[1] & !y[1]])
    }
}

// ===== Integer comparisons (true lanes are all-ones) =====

cmp_kernel!(eq8, to_u8 / from_u8,
    native: |a, b| simd_arch::_mm_cmpeq_epi8(a, b),
    portable: |x: u8, y: u8| x == y);
cmp_kernel!(gt_i8, to_i8 / from_i8,
    native: |a, b| simd_arch::_mm_cmpgt_epi8(a, b),
    portable: |x: i8, y: i8| x > y);
cmp_kernel!(gt_u8, to_u8 / from_u8,
    native: |a, b| {
        // No unsigned compare below AVX-512: bias both operands by the sign
        // bit and compare signed.
        let bias = simd_arch::_mm_set1_epi8(i8::MIN);
        simd_arch::_mm_cmpgt_epi8(
            simd_arch::_mm_xor_si128(a, bias),
            simd_arch::_mm_xor_si128(b, bias),
        )
    },
    portable: |x: u8, y: u8| x > y);
cmp_kernel!(eq16, to_u16 / from_u16,
    native: |a, b| simd_arch::_mm_cmpeq_epi16(a, b),
    portable: |x: u16, y: u16| x == y);
cmp_kernel!(gt_i16, to_i16 / from_i16,
    native: |a, b| simd_arch::_mm_cmpgt_epi16(a, b),
    portable: |x: i16, y: i16| x > y);
cmp_kernel!(gt_u16, to_u16 / from_u16,
    native: |a, b| {
        let bias = simd_arch::_mm_set1_epi16(i16::MIN);
        simd_arch::_mm_cmpgt_epi16(
            simd_arch::_mm_xor_si128(a, bias),
            simd_arch::_mm_xor_si128(b, bias),
        )
    },
    portable: |x: u16, y: u16| x > y);
cmp_kernel!(eq32, to_u32 / from_u32,
    native: |a, b| simd_arch::_mm_cmpeq_epi32(a, b),
    portable: |x: u32, y: u32| x == y);
cmp_kernel!(gt_i32, to_i32 / from_i32,
    native: |a, b| simd_arch::_mm_cmpgt_epi32(a, b),
    portable: |x: i32, y: i32| x > y);
cmp_kernel!(gt_u32, to_u32 / from_u32,
    native: |a, b| {
        let bias = simd_arch::_mm_set1_epi32(i32::MIN);
        simd_arch::_mm_cmpgt_epi32(
            simd_arch::_mm_xor_si128(a, bias),
            simd_arch::_mm_xor_si128(b, bias),
        )
    },
    portable: |x: u32, y: u32| x > y);
cmp_kernel!(eq64, to_u64 / from_u64,
    native: |a, b| simd_arch::_mm_cmpeq_epi64(a, b),
    portable: |x: u64, y: u64| x == y);
cmp_kernel!(gt_i64, to_i64 / from_i64,
    native: |a, b| simd_arch::_mm_cmpgt_epi64(a, b),
    portable: |x: i64, y: i64| x > y);
cmp_kernel!(gt_u64, to_u64 / from_u64,
    native: |a, b| {
        let bias = simd_arch::_mm_set1_epi64x(i64::MIN);
        simd_arch::_mm_cmpgt_epi64(
            simd_arch::_mm_xor_si128(a, bias),
            simd_arch::_mm_xor_si128(b, bias),
        )
    },
    portable: |x: u64, y: u64| x > y);

// ===== Float comparisons (IEEE ordered, except ne which is unordered) =====

fcmp_kernel!(eq_f32, f32, native: _mm_cmpeq_ps, portable: |x: f32, y: f32| x == y);
fcmp_kernel!(ne_f32, f32, native: _mm_cmpneq_ps, portable: |x: f32, y: f32| x != y);
fcmp_kernel!(lt_f32, f32, native: _mm_cmplt_ps, portable: |x: f32, y: f32| x < y);
fcmp_kernel!(le_f32, f32, native: _mm_cmple_ps, portable: |x: f32, y: f32| x <= y);
fcmp_kernel!(eq_f64, f64, native: _mm_cmpeq_pd, portable: |x: f64, y: f64| x == y);
fcmp_kernel!(ne_f64, f64, native: _mm_cmpneq_pd, portable: |x: f64, y: f64| x != y);
fcmp_kernel!(lt_f64, f64, native: _mm_cmplt_pd, portable: |x: f64, y: f64| x < y);
fcmp_kernel!(le_f64, f64, native: _mm_cmple_pd, portable: |x: f64, y: f64| x <= y);

// ===== Swizzle (runtime byte permutation, out-of-range selects zero) =====

#[inline]
pub(crate) fn swizzle8(data: V128, idx: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        // pshufb keys off the high bit to zero a lane but otherwise wraps the
        // low nibble, so indices 16..=127 would alias. A saturating add of
        // 0x70 pushes every index >= 16 into high-bit territory first.
        from_m128i(unsafe {
            let idx = simd_arch::_mm_adds_epu8(to_m128i(idx), simd_arch::_mm_set1_epi8(0x70));
            simd_arch::_mm_shuffle_epi8(to_m128i(data), idx)
        })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let src = data.to_u8();
        let sel = idx.to_u8();
        let mut out = [0u8; 16];
        for i in 0..16 {
            if (sel[i] as usize) < 16 {
                out[i] = src[sel[i] as usize];
            }
        }
        V128::from_u8(out)
    }
}

// ===== Narrowing (saturate, then truncate) =====

#[inline]
pub(crate) fn narrow_i16_i8(a: V128, b: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128i(unsafe { simd_arch::_mm_packs_epi16(to_m128i(a), to_m128i(b)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i16();
        let y = b.to_i16();
        let mut out = [0i8; 16];
        for i in 0..8 {
            out[i] = x[i].clamp(i8::MIN as i16, i8::MAX as i16) as i8;
            out[i + 8] = y[i].clamp(i8::MIN as i16, i8::MAX as i16) as i8;
        }
        V128::from_i8(out)
    }
}

#[inline]
pub(crate) fn narrow_i16_u8(a: V128, b: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128i(unsafe { simd_arch::_mm_packus_epi16(to_m128i(a), to_m128i(b)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i16();
        let y = b.to_i16();
        let mut out = [0u8; 16];
        for i in 0..8 {
            out[i] = x[i].clamp(0, u8::MAX as i16) as u8;
            out[i + 8] = y[i].clamp(0, u8::MAX as i16) as u8;
        }
        V128::from_u8(out)
    }
}

#[inline]
pub(crate) fn narrow_i32_i16(a: V128, b: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128i(unsafe { simd_arch::_mm_packs_epi32(to_m128i(a), to_m128i(b)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i32();
        let y = b.to_i32();
        let mut out = [0i16; 8];
        for i in 0..4 {
            out[i] = x[i].clamp(i16::MIN as i32, i16::MAX as i32) as i16;
            out[i + 4] = y[i].clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        }
        V128::from_i16(out)
    }
}

#[inline]
pub(crate) fn narrow_i32_u16(a: V128, b: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128i(unsafe { simd_arch::_mm_packus_epi32(to_m128i(a), to_m128i(b)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i32();
        let y = b.to_i32();
        let mut out = [0u16; 8];
        for i in 0..4 {
            out[i] = x[i].clamp(0, u16::MAX as i32) as u16;
            out[i + 4] = y[i].clamp(0, u16::MAX as i32) as u16;
        }
        V128::from_u16(out)
    }
}

// ===== Widening extensions =====

/// Generates the low/high half extension kernels for one source width.
macro_rules! extend_kernels {
    ($low:ident, $high:ident, $to:ident, $src:ty => $dst:ty, $n:expr, $from:ident,
     native low: $nat_low:ident) => {
        #[inline]
        pub(crate) fn $low(a: V128) -> V128 {
            #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
            {
                from_m128i(unsafe { simd_arch::$nat_low(to_m128i(a)) })
            }
            #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
            {
                let x = a.$to();
                let mut out = [0 as $dst; $n];
                for i in 0..$n {
                    out[i] = x[i] as $dst;
                }
                V128::$from(out)
            }
        }

        #[inline]
        pub(crate) fn $high(a: V128) -> V128 {
            #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
            {
                from_m128i(unsafe {
                    simd_arch::$nat_low(simd_arch::_mm_srli_si128::<8>(to_m128i(a)))
                })
            }
            #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
            {
                let x = a.$to();
                let mut out = [0 as $dst; $n];
                for i in 0..$n {
                    out[i] = x[i + $n] as $dst;
                }
                V128::$from(out)
            }
        }
    };
}

extend_kernels!(extend_low_i8, extend_high_i8, to_i8, i8 => i16, 8, from_i16,
    native low: _mm_cvtepi8_epi16);
extend_kernels!(extend_low_u8, extend_high_u8, to_u8, u8 => u16, 8, from_u16,
    native low: _mm_cvtepu8_epi16);
extend_kernels!(extend_low_i16, extend_high_i16, to_i16, i16 => i32, 4, from_i32,
    native low: _mm_cvtepi16_epi32);
extend_kernels!(extend_low_u16, extend_high_u16, to_u16, u16 => u32, 4, from_u32,
    native low: _mm_cvtepu16_epi32);
extend_kernels!(extend_low_i32, extend_high_i32, to_i32, i32 => i64, 2, from_i64,
    native low: _mm_cvtepi32_epi64);
extend_kernels!(extend_low_u32, extend_high_u32, to_u32, u32 => u64, 2, from_u64,
    native low: _mm_cvtepu32_epi64);

// ===== Int/float conversions =====

#[inline]
pub(crate) fn convert_i32_f32(a: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128(unsafe { simd_arch::_mm_cvtepi32_ps(to_m128i(a)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i32();
        V128::from_f32([x[0] as f32, x[1] as f32, x[2] as f32, x[3] as f32])
    }
}

// No unsigned variant of cvtdq2ps below AVX-512; scalar on both backends.
#[inline]
pub(crate) fn convert_u32_f32(a: V128) -> V128 {
    let x = a.to_u32();
    V128::from_f32([x[0] as f32, x[1] as f32, x[2] as f32, x[3] as f32])
}

#[inline]
pub(crate) fn convert_low_i32_f64(a: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128d(unsafe { simd_arch::_mm_cvtepi32_pd(to_m128i(a)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i32();
        V128::from_f64([x[0] as f64, x[1] as f64])
    }
}

#[inline]
pub(crate) fn convert_low_u32_f64(a: V128) -> V128 {
    let x = a.to_u32();
    V128::from_f64([x[0] as f64, x[1] as f64])
}

#[inline]
pub(crate) fn promote_low_f32_f64(a: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128d(unsafe { simd_arch::_mm_cvtps_pd(to_m128(a)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_f32();
        V128::from_f64([x[0] as f64, x[1] as f64])
    }
}

#[inline]
pub(crate) fn demote_f64_f32(a: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        // cvtpd2ps zero-fills the upper two lanes, which is the required
        // result shape.
        from_m128(unsafe { simd_arch::_mm_cvtpd_ps(to_m128d(a)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_f64();
        V128::from_f32([x[0] as f32, x[1] as f32, 0.0, 0.0])
    }
}

// ===== Widening multiply-accumulate shapes =====

#[inline]
pub(crate) fn dot_i16(a: V128, b: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128i(unsafe { simd_arch::_mm_madd_epi16(to_m128i(a), to_m128i(b)) })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i16();
        let y = b.to_i16();
        let mut out = [0i32; 4];
        for i in 0..4 {
            out[i] = (x[2 * i] as i32 * y[2 * i] as i32)
                + (x[2 * i + 1] as i32 * y[2 * i + 1] as i32);
        }
        V128::from_i32(out)
    }
}

#[inline]
pub(crate) fn extadd_pairwise_i8(a: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        // maddubs multiplies unsigned-by-signed; a vector of unsigned ones on
        // the left leaves the signed operand's pairwise sums.
        from_m128i(unsafe {
            simd_arch::_mm_maddubs_epi16(simd_arch::_mm_set1_epi8(1), to_m128i(a))
        })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i8();
        let mut out = [0i16; 8];
        for i in 0..8 {
            out[i] = x[2 * i] as i16 + x[2 * i + 1] as i16;
        }
        V128::from_i16(out)
    }
}

#[inline]
pub(crate) fn extadd_pairwise_u8(a: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128i(unsafe {
            simd_arch::_mm_maddubs_epi16(to_m128i(a), simd_arch::_mm_set1_epi8(1))
        })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_u8();
        let mut out = [0u16; 8];
        for i in 0..8 {
            out[i] = x[2 * i] as u16 + x[2 * i + 1] as u16;
        }
        V128::from_u16(out)
    }
}

#[inline]
pub(crate) fn extadd_pairwise_i16(a: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        from_m128i(unsafe {
            simd_arch::_mm_madd_epi16(to_m128i(a), simd_arch::_mm_set1_epi16(1))
        })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i16();
        let mut out = [0i32; 4];
        for i in 0..4 {
            out[i] = x[2 * i] as i32 + x[2 * i + 1] as i32;
        }
        V128::from_i32(out)
    }
}

#[inline]
pub(crate) fn extadd_pairwise_u16(a: V128) -> V128 {
    let x = a.to_u16();
    let mut out = [0u32; 4];
    for i in 0..4 {
        out[i] = x[2 * i] as u32 + x[2 * i + 1] as u32;
    }
    V128::from_u32(out)
}

// ===== Horizontal tests, bitmasks, popcount =====

#[inline]
pub(crate) fn any_true(a: V128) -> bool {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        unsafe {
            let zero = simd_arch::_mm_setzero_si128();
            simd_arch::_mm_movemask_epi8(simd_arch::_mm_cmpeq_epi8(to_m128i(a), zero)) != 0xFFFF
        }
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        a.to_bits() != 0
    }
}

/// Generates `all_true` for one lane width: true iff no lane equals zero.
macro_rules! all_true_kernel {
    ($name:ident, $to:ident, native: $cmpeq:ident) => {
        #[inline]
        pub(crate) fn $name(a: V128) -> bool {
            #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
            {
                unsafe {
                    let zero = simd_arch::_mm_setzero_si128();
                    simd_arch::_mm_movemask_epi8(simd_arch::$cmpeq(to_m128i(a), zero)) == 0
                }
            }
            #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
            {
                a.$to().iter().all(|&lane| lane != 0)
            }
        }
    };
}

all_true_kernel!(all_true8, to_u8, native: _mm_cmpeq_epi8);
all_true_kernel!(all_true16, to_u16, native: _mm_cmpeq_epi16);
all_true_kernel!(all_true32, to_u32, native: _mm_cmpeq_epi32);
all_true_kernel!(all_true64, to_u64, native: _mm_cmpeq_epi64);

#[inline]
pub(crate) fn bitmask8(a: V128) -> u16 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        unsafe { simd_arch::_mm_movemask_epi8(to_m128i(a)) as u16 }
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i8();
        let mut mask = 0u16;
        for (i, &lane) in x.iter().enumerate() {
            if lane < 0 {
                mask |= 1 << i;
            }
        }
        mask
    }
}

#[inline]
pub(crate) fn bitmask16(a: V128) -> u8 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        // packsswb keeps each lane's sign through the saturation, so the low
        // eight byte sign bits are the eight word sign bits.
        unsafe {
            let packed = simd_arch::_mm_packs_epi16(to_m128i(a), simd_arch::_mm_setzero_si128());
            (simd_arch::_mm_movemask_epi8(packed) & 0xFF) as u8
        }
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i16();
        let mut mask = 0u8;
        for (i, &lane) in x.iter().enumerate() {
            if lane < 0 {
                mask |= 1 << i;
            }
        }
        mask
    }
}

#[inline]
pub(crate) fn bitmask32(a: V128) -> u8 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        unsafe { simd_arch::_mm_movemask_ps(to_m128(a)) as u8 }
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i32();
        let mut mask = 0u8;
        for (i, &lane) in x.iter().enumerate() {
            if lane < 0 {
                mask |= 1 << i;
            }
        }
        mask
    }
}

#[inline]
pub(crate) fn bitmask64(a: V128) -> u8 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        unsafe { simd_arch::_mm_movemask_pd(to_m128d(a)) as u8 }
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let x = a.to_i64();
        let mut mask = 0u8;
        for (i, &lane) in x.iter().enumerate() {
            if lane < 0 {
                mask |= 1 << i;
            }
        }
        mask
    }
}

#[inline]
pub(crate) fn popcount8(a: V128) -> V128 {
    #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
    {
        // Nibble-indexed pshufb lookup, one table probe per half-byte.
        const LUT: [u8; 16] = [0, 1, 1, 2, 1, 2, 2, 3, 1, 2, 2, 3, 2, 3, 3, 4];
        from_m128i(unsafe {
            let lut = simd_arch::_mm_loadu_si128(LUT.as_ptr().cast());
            let low_mask = simd_arch::_mm_set1_epi8(0x0F);
            let v = to_m128i(a);
            let lo = simd_arch::_mm_and_si128(v, low_mask);
            let hi = simd_arch::_mm_and_si128(simd_arch::_mm_srli_epi16::<4>(v), low_mask);
            simd_arch::_mm_add_epi8(
                simd_arch::_mm_shuffle_epi8(lut, lo),
                simd_arch::_mm_shuffle_epi8(lut, hi),
            )
        })
    }
    #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
    {
        let mut out = a.to_u8();
        for lane in out.iter_mut() {
            *lane = lane.count_ones() as u8;
        }
        V128::from_u8(out)
    }
}
