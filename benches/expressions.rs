//! Expression Template Benchmarks
//!
//! Compares hand-written closed-form derivatives with the derivatives of the equivalent
//! expression trees.
//!
//! ## Benchmark Structure
//!
//! ### 1. Scalar derivatives (`benchmark_scalar`)
//! `f(x) = sqrt(x³ + 1) * exp(sin(x))`, update and the first three derivatives, against the
//! same quantities written out by hand.
//!
//! ### 2. Neo-Hooke energy (`benchmark_neo_hooke`)
//! Update, value and gradient of the compressible neo-Hooke energy of a 3x3 deformation gradient.
//!
//! ### 3. Batch evaluation (`benchmark_batch`)
//! Sequential loop against the rayon based batch evaluation.
//!
//! ## Usage
//!
//! Run with: `cargo bench --bench expressions`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fung::batch::{evaluate, BatchOptions};
use fung::linear_algebra::gradient;
use fung::models::compressible_neo_hooke;
use fung::prelude::*;
use nalgebra::Matrix3;

/// Hand-written value and derivatives of `sqrt(x³ + 1) * exp(sin(x))`.
struct DirectEvaluator;

impl DirectEvaluator {
    fn evaluate(x: f64) -> [f64; 2] {
        let p = x * x * x + 1.0;
        let dp = 3.0 * x * x;
        let s = p.sqrt();
        let ds = 0.5 * dp / s;
        let e = x.sin().exp();
        let de = x.cos() * e;
        [s * e, ds * e + s * de]
    }
}

fn scalar_function() -> Finalize<
    impl Update<f64, Output = f64>
        + D1<ARGUMENT, f64>
        + D2<ARGUMENT, ARGUMENT, f64, f64>
        + D3<ARGUMENT, ARGUMENT, ARGUMENT, f64, f64, f64>
        + Send
        + Sync,
> {
    let polynomial = Pow::<3>::new(0.0).expect("Failed to create cubic") + 1.0;
    let root = Sqrt::new(1.0)
        .expect("Failed to create square root")
        .of(polynomial)
        .expect("Failed to compose square root");
    let exponential = Exp::new(0.0)
        .expect("Failed to create exponential")
        .of(Sin::new(0.0).expect("Failed to create sine"))
        .expect("Failed to compose exponential");
    finalize(root * exponential)
}

fn benchmark_scalar(c: &mut Criterion) {
    let mut f = scalar_function();
    let mut group = c.benchmark_group("Scalar Derivatives");

    group.bench_function("Direct/d1", |b| {
        b.iter(|| black_box(DirectEvaluator::evaluate(black_box(1.3))))
    });
    group.bench_function("Tree/update+d1", |b| {
        b.iter(|| {
            f.update(black_box(&1.3)).expect("Update failed");
            black_box([f.d0(), f.d1(&1.0)])
        })
    });
    f.update(&1.3).expect("Update failed");
    group.bench_function("Tree/d2", |b| b.iter(|| black_box(f.d2(&1.0, &1.0))));
    group.bench_function("Tree/d3", |b| b.iter(|| black_box(f.d3(&1.0, &1.0, &1.0))));

    group.finish();
}

fn benchmark_neo_hooke(c: &mut Criterion) {
    let f = Matrix3::new(1.1, 0.1, 0.0, -0.2, 0.9, 0.1, 0.0, 0.3, 1.2);
    let df = Matrix3::new(0.2, -0.1, 0.0, 0.3, 0.1, 0.4, 0.0, -0.2, 0.5);
    let mut energy = finalize(
        compressible_neo_hooke(1.0, 0.5, -3.0, Matrix3::identity())
            .expect("Failed to create energy"),
    );

    let mut group = c.benchmark_group("Neo-Hooke");
    group.bench_function("update", |b| {
        b.iter(|| energy.update(black_box(&f)).expect("Update failed"))
    });
    group.bench_function("d2", |b| b.iter(|| black_box(energy.d2(&df, &df))));
    group.bench_function("gradient", |b| {
        b.iter(|| black_box(gradient::<_, 3, 3>(&energy)))
    });
    group.finish();
}

fn benchmark_batch(c: &mut Criterion) {
    let f = scalar_function();
    let mut group = c.benchmark_group("Batch Evaluation");

    for n in [1_000, 100_000] {
        let points: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();

        group.bench_with_input(BenchmarkId::new("Sequential", n), &points, |b, points| {
            b.iter(|| {
                let mut f = f.clone();
                let values: Vec<f64> = points
                    .iter()
                    .map(|x| f.eval(x).expect("Evaluation failed"))
                    .collect();
                black_box(values)
            })
        });
        group.bench_with_input(BenchmarkId::new("Parallel", n), &points, |b, points| {
            b.iter(|| {
                black_box(evaluate(&f, points, &BatchOptions::default()).expect("Evaluation failed"))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_scalar, benchmark_neo_hooke, benchmark_batch);
criterion_main!(benches);
