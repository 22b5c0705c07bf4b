//! Type-safe 128-bit SIMD vectors.
//!
//! This crate exposes the fixed 128-bit vector family as a catalog of
//! lane-typed values — [`I8x16`] through [`F64x2`] plus the boolean masks
//! [`M8x16`]..[`M64x2`] — with the full elementwise operation set:
//! construction and memory transfer, arithmetic and logic, comparison,
//! permutation, width conversion, and horizontal reduction.
//!
//! The types are nominal on purpose. A mask and the same-width unsigned
//! vector share a bit pattern but do not interchange: comparison results
//! cannot drift into arithmetic, and crossing between interpretations takes
//! an explicit, total, zero-cost [`reinterpret`]. Lane indices, shuffle
//! index lists, and [`vconst!`] lanes are compile-time constants, checked at
//! build time.
//!
//! ## Backends
//!
//! Operations compile to one of two kernel backends (see [`Backend`]):
//! portable scalar loops everywhere, or x86_64 SSE2/SSSE3/SSE4 intrinsics
//! behind the `native-intrinsics` feature. The two are observationally
//! identical — every defined edge case (saturation bounds, NaN policies,
//! out-of-range swizzle indices) produces the same bits on both — so the
//! feature only changes codegen, never results.
//!
//! ## Generic call sites
//!
//! The operation names resolve per concrete type, and the trait layer in
//! [`dispatch`] re-exposes them for code that is generic over the element
//! kind:
//!
//! ```
//! use lanes128::{LaneArith, LaneCompare, Select};
//!
//! fn clamp_positive<V>(v: V) -> V
//! where
//!     V: LaneCompare + LaneArith + Default + Select<<V as LaneCompare>::Mask>,
//! {
//!     V::blend(v.gt(V::default()), v, V::default())
//! }
//!
//! let v = lanes128::I32x4::from_array([-5, 3, -1, 8]);
//! assert_eq!(clamp_positive(v).to_array(), [0, 3, 0, 8]);
//! ```
//!
//! There is no shared state anywhere: every value is `Copy`, every
//! operation is pure, and the only memory the crate touches is what the
//! load/store calls are handed.

pub mod arch;
mod arith;
mod bits;
mod cmp;
mod convert;
pub mod dispatch;
mod mask;
mod mem;
mod reduce;
mod shuffle;
mod types;
mod v128;

pub use arch::{verify_cpu_support, Backend};
pub use dispatch::{
    LaneArith, LaneBitwise, LaneCompare, LaneDiv, LaneFloat, LaneMinMax, LaneMul, LaneReduce,
    LaneSaturating, LaneShift, LaneSigned, Vector,
};
pub use mask::Select;
pub use types::{
    reinterpret, F32x4, F64x2, I16x8, I32x4, I64x2, I8x16, M16x8, M32x4, M64x2, M8x16,
    Reinterpret, U16x8, U32x4, U64x2, U8x16,
};
pub use v128::V128;
