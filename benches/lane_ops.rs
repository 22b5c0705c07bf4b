use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use lanes128::{Backend, F32x4, I16x8, U8x16};

fn generate_bytes(len: usize, seed: u64) -> Vec<u8> {
    // Simple LCG for reproducible inputs
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
            (rng >> 16) as u8
        })
        .collect()
}

fn bench_saturating_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("saturating_add_u8x16");
    for size in [1usize << 10, 1 << 14, 1 << 18] {
        let a = generate_bytes(size, 1);
        let b = generate_bytes(size, 2);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| {
                let mut acc = 0u32;
                for (ca, cb) in a.chunks_exact(16).zip(b.chunks_exact(16)) {
                    let va = U8x16::from_array(ca.try_into().unwrap());
                    let vb = U8x16::from_array(cb.try_into().unwrap());
                    acc = acc.wrapping_add(va.saturating_add(vb).bitmask() as u32);
                }
                black_box(acc)
            });
        });
    }
    group.finish();
}

fn bench_dot_i16(c: &mut Criterion) {
    let size = 1usize << 16;
    let raw_a = generate_bytes(size * 2, 3);
    let raw_b = generate_bytes(size * 2, 4);

    c.bench_function("dot_i16x8", |bench| {
        bench.iter(|| {
            let mut acc = 0i64;
            for (ca, cb) in raw_a.chunks_exact(16).zip(raw_b.chunks_exact(16)) {
                let va = unsafe { I16x8::load_ptr(ca.as_ptr().cast()) };
                let vb = unsafe { I16x8::load_ptr(cb.as_ptr().cast()) };
                let dot = va.dot(vb).to_array();
                acc = acc.wrapping_add((dot[0] + dot[1] + dot[2] + dot[3]) as i64);
            }
            black_box(acc)
        });
    });
}

fn bench_float_min(c: &mut Criterion) {
    let count = 1usize << 14;
    let a: Vec<f32> = (0..count).map(|i| (i as f32).sin()).collect();
    let b: Vec<f32> = (0..count).map(|i| (i as f32).cos()).collect();

    c.bench_function("min_f32x4", |bench| {
        bench.iter(|| {
            let mut running = F32x4::splat(f32::INFINITY);
            for (ca, cb) in a.chunks_exact(4).zip(b.chunks_exact(4)) {
                let va = F32x4::from_array(ca.try_into().unwrap());
                let vb = F32x4::from_array(cb.try_into().unwrap());
                running = running.min(va.min(vb));
            }
            black_box(running.to_array())
        });
    });
}

fn bench_swizzle_lookup(c: &mut Criterion) {
    let data = generate_bytes(1 << 16, 9);
    let table = U8x16::from_array(core::array::from_fn(|i| (i * i) as u8));

    c.bench_function("swizzle_table_lookup", |bench| {
        bench.iter(|| {
            let mut acc = 0u32;
            for chunk in data.chunks_exact(16) {
                let idx = U8x16::from_array(chunk.try_into().unwrap());
                acc = acc.wrapping_add(table.swizzle(idx).bitmask() as u32);
            }
            black_box(acc)
        });
    });
}

fn report_backend(_: &mut Criterion) {
    eprintln!("kernel backend: {}", Backend::active().description());
}

criterion_group!(
    benches,
    report_backend,
    bench_saturating_add,
    bench_dot_i16,
    bench_float_min,
    bench_swizzle_lookup
);
criterion_main!(benches);
