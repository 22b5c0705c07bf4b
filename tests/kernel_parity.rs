// tests/kernel_parity.rs
//
// Whichever backend is compiled in, every operation must match a
// straightforward scalar rendering of its semantics. Inputs come from a
// seeded LCG so failures reproduce.

use lanes128::{Backend, F32x4, I16x8, I32x4, I8x16, U16x8, U32x4, U8x16};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
    log::debug!("kernel backend: {}", Backend::active().description());
}

#[test]
fn compiled_backend_runs_on_this_cpu() {
    init();
    assert!(lanes128::verify_cpu_support());
}

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0
    }

    fn bytes16(&mut self) -> [u8; 16] {
        let mut out = [0u8; 16];
        for chunk in out.chunks_mut(8) {
            chunk.copy_from_slice(&self.next().to_le_bytes()[..chunk.len()]);
        }
        out
    }

    fn i16x8(&mut self) -> [i16; 8] {
        let b = self.bytes16();
        core::array::from_fn(|i| i16::from_le_bytes([b[2 * i], b[2 * i + 1]]))
    }

    fn u32x4(&mut self) -> [u32; 4] {
        let b = self.bytes16();
        core::array::from_fn(|i| {
            u32::from_le_bytes([b[4 * i], b[4 * i + 1], b[4 * i + 2], b[4 * i + 3]])
        })
    }
}

#[test]
fn u8_lane_ops_match_scalar() {
    let mut rng = Lcg(0x1234_5678);
    for _ in 0..200 {
        let a = rng.bytes16();
        let b = rng.bytes16();
        let va = U8x16::from_array(a);
        let vb = U8x16::from_array(b);

        assert_eq!((va + vb).to_array(), core::array::from_fn::<u8, 16, _>(|i| a[i].wrapping_add(b[i])));
        assert_eq!(va.saturating_add(vb).to_array(), core::array::from_fn::<u8, 16, _>(|i| a[i].saturating_add(b[i])));
        assert_eq!(va.saturating_sub(vb).to_array(), core::array::from_fn::<u8, 16, _>(|i| a[i].saturating_sub(b[i])));
        assert_eq!(va.min(vb).to_array(), core::array::from_fn::<u8, 16, _>(|i| a[i].min(b[i])));
        assert_eq!(va.max(vb).to_array(), core::array::from_fn::<u8, 16, _>(|i| a[i].max(b[i])));
        assert_eq!(va.avgr(vb).to_array(), core::array::from_fn::<u8, 16, _>(|i| ((a[i] as u16 + b[i] as u16 + 1) >> 1) as u8));
        assert_eq!(va.gt(vb).to_array(), core::array::from_fn::<bool, 16, _>(|i| a[i] > b[i]));
        assert_eq!(va.le(vb).to_array(), core::array::from_fn::<bool, 16, _>(|i| a[i] <= b[i]));
    }
}

#[test]
fn i16_lane_ops_match_scalar() {
    let mut rng = Lcg(0x9999_0001);
    for _ in 0..200 {
        let a = rng.i16x8();
        let b = rng.i16x8();
        let va = I16x8::from_array(a);
        let vb = I16x8::from_array(b);

        assert_eq!((va * vb).to_array(), core::array::from_fn::<i16, 8, _>(|i| a[i].wrapping_mul(b[i])));
        assert_eq!(va.saturating_add(vb).to_array(), core::array::from_fn::<i16, 8, _>(|i| a[i].saturating_add(b[i])));
        assert_eq!(va.min(vb).to_array(), core::array::from_fn::<i16, 8, _>(|i| a[i].min(b[i])));
        assert_eq!(va.abs().to_array(), core::array::from_fn::<i16, 8, _>(|i| a[i].wrapping_abs()));
        assert_eq!((-va).to_array(), core::array::from_fn::<i16, 8, _>(|i| a[i].wrapping_neg()));
        assert_eq!(va.lt(vb).to_array(), core::array::from_fn::<bool, 8, _>(|i| a[i] < b[i]));

        let dot = va.dot(vb).to_array();
        for i in 0..4 {
            let expected =
                a[2 * i] as i32 * b[2 * i] as i32 + a[2 * i + 1] as i32 * b[2 * i + 1] as i32;
            assert_eq!(dot[i], expected);
        }
    }
}

#[test]
fn u32_shift_and_bitwise_match_scalar() {
    let mut rng = Lcg(0xABCD_EF01);
    for round in 0..200u32 {
        let a = rng.u32x4();
        let b = rng.u32x4();
        let va = U32x4::from_array(a);
        let vb = U32x4::from_array(b);
        let amt = round % 40;

        assert_eq!(va.shl(amt).to_array(), core::array::from_fn::<u32, 4, _>(|i| a[i] << (amt % 32)));
        assert_eq!(va.shr(amt).to_array(), core::array::from_fn::<u32, 4, _>(|i| a[i] >> (amt % 32)));
        assert_eq!((va & vb).to_array(), core::array::from_fn::<u32, 4, _>(|i| a[i] & b[i]));
        assert_eq!(va.andnot(vb).to_array(), core::array::from_fn::<u32, 4, _>(|i| a[i] & !b[i]));
        assert_eq!((!va).to_array(), core::array::from_fn::<u32, 4, _>(|i| !a[i]));
    }
}

#[test]
fn narrow_and_extend_match_scalar() {
    let mut rng = Lcg(0x0F0F_0F0F);
    for _ in 0..200 {
        let a = rng.i16x8();
        let b = rng.i16x8();
        let va = I16x8::from_array(a);
        let vb = I16x8::from_array(b);

        let narrowed = va.narrow(vb).to_array();
        for i in 0..16 {
            let src = if i < 8 { a[i] } else { b[i - 8] };
            assert_eq!(narrowed[i] as i16, src.clamp(-128, 127));
        }

        let bytes = rng.bytes16();
        let v = I8x16::from_array(bytes.map(|x| x as i8));
        let low = v.extend_low().to_array();
        let high = v.extend_high().to_array();
        for i in 0..8 {
            assert_eq!(low[i], bytes[i] as i8 as i16);
            assert_eq!(high[i], bytes[i + 8] as i8 as i16);
        }

        let ext = va.extadd_pairwise().to_array();
        for i in 0..4 {
            assert_eq!(ext[i], a[2 * i] as i32 + a[2 * i + 1] as i32);
        }
    }
}

#[test]
fn float_arith_matches_scalar() {
    let mut rng = Lcg(0x5151_5151);
    for _ in 0..200 {
        // Bias into a modest range so products stay finite.
        let a: [f32; 4] = core::array::from_fn(|_| (rng.next() % 2000) as f32 / 8.0 - 100.0);
        // Offset off the 1/8 grid keeps every divisor non-zero.
        let b: [f32; 4] = core::array::from_fn(|_| (rng.next() % 2000) as f32 / 8.0 - 100.0625);
        let va = F32x4::from_array(a);
        let vb = F32x4::from_array(b);

        assert_eq!((va + vb).to_array(), core::array::from_fn::<f32, 4, _>(|i| a[i] + b[i]));
        assert_eq!((va * vb).to_array(), core::array::from_fn::<f32, 4, _>(|i| a[i] * b[i]));
        assert_eq!((va / vb).to_array(), core::array::from_fn::<f32, 4, _>(|i| a[i] / b[i]));
        assert_eq!(
            va.pmin(vb).to_array(),
            core::array::from_fn::<f32, 4, _>(|i| if b[i] < a[i] { b[i] } else { a[i] })
        );
        assert_eq!(va.lt(vb).to_array(), core::array::from_fn::<bool, 4, _>(|i| a[i] < b[i]));
    }
}

#[test]
fn reductions_match_scalar() {
    let mut rng = Lcg(0x7777_0002);
    for _ in 0..200 {
        let a = rng.bytes16();
        let v = U8x16::from_array(a);

        assert_eq!(v.any_true(), a.iter().any(|&x| x != 0));
        assert_eq!(v.all_true(), a.iter().all(|&x| x != 0));

        let counts = v.popcount().to_array();
        for i in 0..16 {
            assert_eq!(counts[i] as u32, a[i].count_ones());
        }

        let m = rng.u32x4().map(|x| x as i32);
        let v = I32x4::from_array(m);
        let mut expected = 0u8;
        for (i, &lane) in m.iter().enumerate() {
            if lane < 0 {
                expected |= 1 << i;
            }
        }
        assert_eq!(v.bitmask(), expected);
    }
}
