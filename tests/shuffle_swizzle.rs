// tests/shuffle_swizzle.rs
//
// Compile-time-indexed permutation across two operands and run-time-indexed
// permutation within one, including the out-of-range-selects-zero policy.

use lanes128::{F32x4, I16x8, I64x2, U32x4, U8x16};

#[test]
fn identity_shuffle_returns_the_first_operand() {
    let v = U8x16::from_array([9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 11, 12, 13, 14, 15, 16]);
    let other = U8x16::splat(0xEE);
    let id = v.shuffle::<0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15>(other);
    assert_eq!(id.to_array(), v.to_array());
}

#[test]
fn second_operand_indices_are_offset_by_lane_count() {
    let a = I16x8::from_array([0, 1, 2, 3, 4, 5, 6, 7]);
    let b = I16x8::from_array([10, 11, 12, 13, 14, 15, 16, 17]);
    // All from b, reversed.
    assert_eq!(
        a.shuffle::<15, 14, 13, 12, 11, 10, 9, 8>(b).to_array(),
        [17, 16, 15, 14, 13, 12, 11, 10]
    );
    // Interleave.
    assert_eq!(
        a.shuffle::<0, 8, 1, 9, 2, 10, 3, 11>(b).to_array(),
        [0, 10, 1, 11, 2, 12, 3, 13]
    );
}

#[test]
fn float_lanes_shuffle_too() {
    let a = F32x4::from_array([1.0, 2.0, 3.0, 4.0]);
    let b = F32x4::from_array([5.0, 6.0, 7.0, 8.0]);
    assert_eq!(a.shuffle::<3, 2, 5, 4>(b).to_array(), [4.0, 3.0, 6.0, 5.0]);

    let a = I64x2::from_array([1, 2]);
    let b = I64x2::from_array([3, 4]);
    assert_eq!(a.shuffle::<1, 2>(b).to_array(), [2, 3]);
}

#[test]
fn swizzle_applies_runtime_indices() {
    let data = U8x16::from_array([100, 101, 102, 103, 104, 105, 106, 107, 108, 109, 110, 111, 112, 113, 114, 115]);
    let idx = U8x16::from_array([15, 0, 14, 1, 13, 2, 12, 3, 11, 4, 10, 5, 9, 6, 8, 7]);
    assert_eq!(
        data.swizzle(idx).to_array(),
        [115, 100, 114, 101, 113, 102, 112, 103, 111, 104, 110, 105, 109, 106, 108, 107]
    );
}

#[test]
fn swizzle_out_of_range_yields_zero_not_wraparound() {
    let data = U8x16::from_array([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
    // 16 must NOT wrap to index 0; 0x80-style high bits must not matter.
    let idx = U8x16::from_array([16, 17, 32, 64, 128, 129, 200, 255, 0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(
        data.swizzle(idx).to_array(),
        [0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8]
    );
}

#[test]
fn swizzle_as_lookup_table() {
    // The classic use: byte-level table lookup with masked-off lanes.
    let table = U8x16::from_array([0, 1, 4, 9, 16, 25, 36, 49, 64, 81, 100, 121, 144, 169, 196, 225]);
    let query = U8x16::from_array([3, 7, 15, 200, 0, 5, 5, 5, 12, 1, 2, 9, 10, 11, 255, 14]);
    let out = table.swizzle(query).to_array();
    assert_eq!(out[0], 9);
    assert_eq!(out[1], 49);
    assert_eq!(out[2], 225);
    assert_eq!(out[3], 0); // out of range
    assert_eq!(out[8], 144);
    assert_eq!(out[14], 0); // out of range
}

#[test]
fn unsigned_shuffle_matches_signed_layout() {
    let a = U32x4::from_array([0xA, 0xB, 0xC, 0xD]);
    let b = U32x4::from_array([0x1, 0x2, 0x3, 0x4]);
    assert_eq!(a.shuffle::<6, 6, 0, 0>(b).to_array(), [0x3, 0x3, 0xA, 0xA]);
}
