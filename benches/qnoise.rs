use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qnoise::QNoiseGenerator;

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("q_noise_step");
    for &q in &[0.5_f64, 1.0, 1.5] {
        group.bench_with_input(BenchmarkId::from_parameter(q), &q, |b, &q| {
            let mut gen = QNoiseGenerator::with_seed(42);
            let mut eta = 0.0;
            b.iter(|| {
                eta = gen.q_noise_step(black_box(eta), 1.0, q, 0.01, None);
                black_box(eta)
            })
        });
    }
    group.finish();

    c.bench_function("ornstein_uhlenbeck_step", |b| {
        let mut gen = QNoiseGenerator::with_seed(42);
        let mut eta = 0.0;
        b.iter(|| {
            eta = gen.ornstein_uhlenbeck_step(black_box(eta), 1.0, 0.01);
            black_box(eta)
        })
    });
}

fn bench_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_sequence");
    for &n in &[1_000usize, 100_000] {
        group.bench_with_input(BenchmarkId::new("q=1.5", n), &n, |b, &n| {
            let mut gen = QNoiseGenerator::with_seed(7);
            b.iter(|| black_box(gen.generate_sequence(1.0, 1.5, n, 0.01, None, false)))
        });
        group.bench_with_input(BenchmarkId::new("ornstein_uhlenbeck", n), &n, |b, &n| {
            let mut gen = QNoiseGenerator::with_seed(7);
            b.iter(|| {
                black_box(gen.generate_ornstein_uhlenbeck_sequence(1.0, n, 0.01, None, false))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_step, bench_sequence);
criterion_main!(benches);
