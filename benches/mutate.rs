mod common;

use criterion::Criterion;
use tol_brain::random::default_rng;

fn bench_mutate(bench: &mut Criterion) {
    let mut rng = default_rng();
    let (mut mutator, seed) = common::seeded();
    let genotype = common::grown(&mut mutator, &seed, 100, &mut rng);

    bench.bench_function("mutate-weights", |b| {
        b.iter(|| mutator.mutate_weights(&mut genotype.copy(), 0.8, 5., &mut rng))
    });

    bench.bench_function("mutate-params", |b| {
        b.iter(|| {
            mutator
                .mutate_neuron_params(&mut genotype.copy(), 0.8, &mut rng)
                .unwrap()
        })
    });

    bench.bench_function("mutate-connection", |b| {
        b.iter(|| mutator.add_connection_mutation(&mut genotype.copy(), 1., &mut rng))
    });

    bench.bench_function("mutate-bisection", |b| {
        b.iter(|| {
            mutator
                .add_neuron_mutation(&mut genotype.copy(), &mut rng)
                .unwrap()
        })
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(2000)
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
    bench_mutate(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
