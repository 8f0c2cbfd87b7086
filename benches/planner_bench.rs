//! Criterion benchmarks for the planning pipeline.
//!
//! Uses seeded synthetic batches: each student blocks out a few random
//! ranges and avoids a handful of random points.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_timeblock::compile::{CompilerConfig, ConstraintCompiler};
use u_timeblock::cp::SolverConfig;
use u_timeblock::model::StudentRequest;
use u_timeblock::planner::{Planner, PlannerConfig, SolveMode};
use u_timeblock::time::Day;

// ===========================================================================
// Synthetic batches
// ===========================================================================

fn synthetic_batch(students: usize, seed: u64) -> Vec<StudentRequest> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..students)
        .map(|i| {
            let hours = rng.random_range(2..=6);
            let mut request = StudentRequest::new(format!("s{i:03}"), hours * 4);
            for _ in 0..rng.random_range(0..4) {
                let day = Day::ALL[rng.random_range(0..Day::COUNT)];
                let start = rng.random_range(1..=30);
                let len = rng.random_range(2..=10);
                request = request.with_impossible_range(day, start..=start + len);
            }
            for _ in 0..rng.random_range(0..6) {
                let day = Day::ALL[rng.random_range(0..Day::COUNT)];
                request = request.with_avoid(day, rng.random_range(1..=40));
            }
            request
        })
        .collect()
}

fn planner(mode: SolveMode, parallel: bool) -> Planner<u_timeblock::cp::BacktrackingSolver> {
    let config = PlannerConfig::default()
        .with_mode(mode)
        .with_parallel(parallel)
        .with_solver(SolverConfig::default().with_time_limit_ms(2_000));
    Planner::new(Default::default(), config)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let compiler = ConstraintCompiler::new(CompilerConfig::default());

    for &n in &[10, 100, 1000] {
        let batch = synthetic_batch(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &batch, |b, batch| {
            b.iter(|| black_box(compiler.compile(black_box(batch))))
        });
    }
    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    group.sample_size(10);

    for &n in &[5, 20, 50] {
        let batch = synthetic_batch(n, 7);
        for (label, mode, parallel) in [
            ("joint", SolveMode::Joint, false),
            ("per_student", SolveMode::PerStudent, false),
            ("per_student_par", SolveMode::PerStudent, true),
        ] {
            let planner = planner(mode, parallel);
            group.bench_with_input(BenchmarkId::new(label, n), &batch, |b, batch| {
                b.iter(|| black_box(planner.plan(black_box(batch))))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_compile, bench_plan);
criterion_main!(benches);
