mod common;

use criterion::Criterion;
use tol_brain::{
    crossover::{align, crossover},
    random::default_rng,
};

fn bench_crossover(bench: &mut Criterion) {
    let mut rng = default_rng();
    let (mut mutator, seed) = common::seeded();
    let l = common::grown(&mut mutator, &seed, 100, &mut rng);
    let r = common::grown(&mut mutator, &seed, 100, &mut rng);

    bench.bench_function("align", |b| b.iter(|| align(&l, &r)));

    bench.bench_function("crossover-ne", |b| b.iter(|| crossover(&l, &r, &mut rng)));

    bench.bench_function("crossover-eq", |b| b.iter(|| crossover(&l, &l, &mut rng)));
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(1000)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_crossover(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
