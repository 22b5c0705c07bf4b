// tests/vector_ops.rs
//
// Construction, lane access, memory transfer, and the basic elementwise
// operation surface across the type catalog.

use lanes128::{reinterpret, vconst};
use lanes128::{F32x4, I16x8, I32x4, I64x2, I8x16, U16x8, U32x4, U8x16, V128};

#[test]
fn splat_then_extract_every_lane() {
    let v = I8x16::splat(-42);
    assert_eq!(v.extract_lane::<0>(), -42);
    assert_eq!(v.extract_lane::<7>(), -42);
    assert_eq!(v.extract_lane::<15>(), -42);

    let v = F32x4::splat(0.5);
    assert_eq!(v.extract_lane::<3>(), 0.5);
}

#[test]
fn replace_extract_round_trip() {
    let v = U16x8::from_array([10, 20, 30, 40, 50, 60, 70, 80]);
    let w = v.replace_lane::<4>(v.extract_lane::<4>());
    assert_eq!(w.to_array(), v.to_array());
}

#[test]
fn replace_lane_copies_rather_than_mutates() {
    let v = I64x2::from_array([1, 2]);
    let w = v.replace_lane::<1>(99);
    assert_eq!(v.to_array(), [1, 2]);
    assert_eq!(w.to_array(), [1, 99]);
}

#[test]
fn const_constructor_matches_from_array() {
    const K: I32x4 = vconst!(I32x4: 1, -2, 3, -4);
    assert_eq!(K.to_array(), I32x4::from_array([1, -2, 3, -4]).to_array());
}

#[test]
fn typed_load_store_round_trip() {
    let data = [1.5f32, -2.5, 3.5, -4.5];
    let v = F32x4::load(&data);
    let mut out = [0.0f32; 4];
    v.store(&mut out);
    assert_eq!(out, data);
}

#[test]
fn untyped_byte_transfer() {
    let bytes: [u8; 16] = core::array::from_fn(|i| i as u8);
    let v = V128::load(&bytes);
    let mut out = [0u8; 16];
    v.store(&mut out);
    assert_eq!(out, bytes);

    // Lane 0 lands in the low bits.
    assert_eq!(v.to_bits() & 0xFF, 0);
    assert_eq!((v.to_bits() >> 120) as u8, 15);
}

#[test]
fn aligned_pointer_transfer() {
    #[repr(align(16))]
    struct Aligned([u32; 8]);

    let buf = Aligned([7; 8]);
    let v = unsafe { U32x4::load_ptr_aligned(buf.0.as_ptr()) };
    assert_eq!(v.to_array(), [7; 4]);

    let mut out = Aligned([0; 8]);
    unsafe { v.store_ptr_aligned(out.0.as_mut_ptr()) };
    assert_eq!(&out.0[..4], &[7; 4]);
}

#[test]
fn wrapping_add_sub_inverse() {
    let a = I16x8::from_array([i16::MAX, i16::MIN, 0, -1, 1, 1000, -1000, 7]);
    let b = I16x8::splat(12345);
    assert_eq!(((a + b) - b).to_array(), a.to_array());
}

#[test]
fn integer_eq_self_is_all_ones() {
    let v = U8x16::from_array([0, 1, 2, 3, 255, 254, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    assert!(v.eq(v).all_true());
    assert_eq!(v.eq(v).bitmask(), 0xFFFF);
}

#[test]
fn reinterpret_is_total_and_bit_preserving() {
    let v = I32x4::from_array([-1, 0, 1, i32::MIN]);
    let as_u8: U8x16 = reinterpret(v);
    let back: I32x4 = reinterpret(as_u8);
    assert_eq!(back.to_array(), v.to_array());

    // Float bits survive untouched, NaN payloads included.
    let f = F32x4::from_array([f32::NAN, -0.0, 1.0, f32::INFINITY]);
    let round: F32x4 = reinterpret(reinterpret::<F32x4, U32x4>(f));
    assert_eq!(round.to_bits(), f.to_bits());
}

#[test]
fn bitselect_with_equal_branches_is_identity() {
    let a = U32x4::from_array([0xDEAD_BEEF, 1, 2, 3]);
    for control in [
        U32x4::splat(0),
        U32x4::splat(u32::MAX),
        U32x4::from_array([0x0F0F_0F0F, 0xFF00_FF00, 0x1234_5678, 0]),
    ] {
        assert_eq!(control.bitselect(a, a).to_array(), a.to_array());
    }
}

#[test]
fn operators_match_named_forms() {
    let a = U32x4::from_array([1, 2, 3, 4]);
    let b = U32x4::splat(3);
    assert_eq!((a + b).to_array(), a.add(b).to_array());
    assert_eq!((a * b).to_array(), a.mul(b).to_array());
    assert_eq!((a & b).to_array(), a.and(b).to_array());
    assert_eq!((a ^ b).to_array(), a.xor(b).to_array());
    assert_eq!((a << 3).to_array(), a.shl(3).to_array());
}
