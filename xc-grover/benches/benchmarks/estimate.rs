use std::hint::black_box;

use criterion::{criterion_group, BenchmarkId, Criterion};
use xc_grover::{estimate_resources, Precision};

use super::generators::windowed_problem;
use xc_grover::encoding::{CoverMap, ExactCoverEncoding};

fn bench_estimate(c: &mut Criterion) {
    let mut g = c.benchmark_group("estimate resources");

    for size in [10, 100, 1_000] {
        let problem = windowed_problem(size, 3);
        let cover = CoverMap::try_new(problem.universe(), problem.simple_subsets()).unwrap();
        let problem_size = cover.problem_size();
        for digits in [50, 200] {
            let precision = Precision::new(digits).unwrap();
            g.bench_with_input(
                BenchmarkId::new(format!("estimate_{digits}_digits"), size),
                &problem_size,
                |b, problem_size| {
                    b.iter(|| black_box(estimate_resources(problem_size, 1.0, precision).unwrap()))
                },
            );
        }
    }
    g.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets =
        bench_estimate,
}
