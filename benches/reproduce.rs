mod common;

use criterion::Criterion;
use rand::Rng;
use tol_brain::{random::default_rng, reproduce::produce_new_generation, LearnerConfig};

fn bench_reproduce(bench: &mut Criterion) {
    let mut rng = default_rng();
    let (mut mutator, seed) = common::seeded();
    let scored = (0..100)
        .map(|_| {
            let steps = rng.random_range(0..50);
            let genotype = common::grown(&mut mutator, &seed, steps, &mut rng);
            (genotype, rng.random_range(0. ..100.))
        })
        .collect::<Vec<_>>();
    let config = LearnerConfig {
        population_size: 100,
        num_children: 50,
        ..Default::default()
    };

    bench.bench_function("reproduce", |b| {
        b.iter(|| produce_new_generation(&scored, &config, &mut mutator, &mut rng).unwrap())
    });
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
    bench_reproduce(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
