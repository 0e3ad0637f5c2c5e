use std::hint::black_box;

use criterion::{criterion_group, AxisScale, BenchmarkId, Criterion, PlotConfiguration};
use xc_grover::{ExactCoverSolver, GroverOptions};

use super::generators::windowed_problem;

fn bench_build(c: &mut Criterion) {
    let mut g = c.benchmark_group("build a Grover circuit");
    g.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in [4, 8, 16] {
        let problem = windowed_problem(size, 2);
        let options = GroverOptions {
            num_iterations: Some(4),
            ..Default::default()
        };
        g.bench_with_input(BenchmarkId::new("build", size), &problem, |b, problem| {
            let solver = ExactCoverSolver::new(problem, options).unwrap();
            b.iter(|| black_box(solver.build().unwrap()))
        });
    }
    g.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets =
        bench_build,
}
