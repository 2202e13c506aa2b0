use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use snarkfield::fft::FftDomain;
use snarkfield::field::fp::FrParams;
use snarkfield::{msm, Field, Fq, Fr, G1Affine, G1Projective};

fn bench_field_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Field Operations");

    let a = Fq::random();
    let b = Fq::random();

    group.bench_function("fq/addition", |bench| bench.iter(|| black_box(a + b)));
    group.bench_function("fq/multiplication", |bench| bench.iter(|| black_box(a * b)));
    group.bench_function("fq/squaring", |bench| bench.iter(|| black_box(a.square())));

    // Short-form operands never touch the Montgomery engine.
    let s = Fq::from_i32(12345);
    let t = Fq::from_i32(67890);
    group.bench_function("fq/short_addition", |bench| bench.iter(|| black_box(s + t)));
    group.bench_function("fq/short_multiplication", |bench| {
        bench.iter(|| black_box(s * t))
    });
    group.bench_function("fq/mont_by_word", |bench| bench.iter(|| black_box(a * t)));

    group.finish();
}

fn bench_field_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("Field Inversion");
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(50);

    let a = Fr::random();
    group.bench_function("fr/inversion", |bench| {
        bench.iter(|| black_box(a.inverse().unwrap()))
    });

    for size in [16usize, 256] {
        let elements: Vec<Fr> = (0..size).map(|_| Fr::random()).collect();
        group.bench_with_input(
            BenchmarkId::new("fr/batch_inversion", size),
            &elements,
            |bench, elements| {
                bench.iter(|| {
                    let mut work = elements.clone();
                    Fr::batch_invert(&mut work).unwrap();
                    black_box(work)
                })
            },
        );
    }

    group.finish();
}

fn bench_field_exponentiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Field Exponentiation");
    group.sample_size(50);

    let base = Fq::from_u64(7);
    for (name, exp) in [("small", 42u64), ("medium", 65537), ("large", u32::MAX as u64)] {
        group.bench_with_input(BenchmarkId::new("pow", name), &exp, |bench, &exp| {
            bench.iter(|| black_box(base.pow(exp)))
        });
    }

    group.finish();
}

fn bench_curve_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("Curve Operations");

    let g = G1Projective::generator();
    let p = g.mul_scalar(&Fr::random().to_le_bytes());
    let q = g.mul_scalar(&Fr::random().to_le_bytes());
    let q_affine = q.to_affine();

    group.bench_function("g1/double", |bench| bench.iter(|| black_box(p.double())));
    group.bench_function("g1/add", |bench| bench.iter(|| black_box(p + q)));
    group.bench_function("g1/add_mixed", |bench| {
        bench.iter(|| black_box(p.add_mixed(&q_affine)))
    });

    group.sample_size(20);
    let scalar = Fr::random().to_le_bytes();
    group.bench_function("g1/mul_scalar", |bench| {
        bench.iter(|| black_box(p.mul_scalar(&scalar)))
    });

    group.finish();
}

fn bench_msm(c: &mut Criterion) {
    let mut group = c.benchmark_group("Multi-Scalar Multiplication");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    let g = G1Projective::generator();
    for size in [64usize, 256, 1024] {
        let points: Vec<G1Affine> = (0..size)
            .map(|_| g.mul_scalar(&Fr::random().to_le_bytes()).to_affine())
            .collect();
        let scalars: Vec<[u8; 32]> = (0..size).map(|_| Fr::random().to_le_bytes()).collect();

        group.bench_with_input(
            BenchmarkId::new("g1", size),
            &(points, scalars),
            |bench, (points, scalars)| bench.iter(|| black_box(msm(points, scalars))),
        );
    }

    group.finish();
}

fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    let domain = FftDomain::<FrParams>::new(16);
    for log2_n in [10usize, 14, 16] {
        let coeffs: Vec<Fr> = (0..(1 << log2_n)).map(|_| Fr::random()).collect();

        group.bench_with_input(
            BenchmarkId::new("forward", 1 << log2_n),
            &coeffs,
            |bench, coeffs| {
                bench.iter(|| {
                    let mut work = coeffs.clone();
                    domain.fft(&mut work, 1);
                    black_box(work)
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("forward_4_threads", 1 << log2_n),
            &coeffs,
            |bench, coeffs| {
                bench.iter(|| {
                    let mut work = coeffs.clone();
                    domain.fft(&mut work, 4);
                    black_box(work)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_field_arithmetic,
    bench_field_inverse,
    bench_field_exponentiation,
    bench_curve_operations,
    bench_msm,
    bench_fft,
);
criterion_main!(benches);
