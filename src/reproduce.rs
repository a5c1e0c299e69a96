//! Functions related to producing the next generation: tournament selection, elitism, and the
//! child pipeline of crossover followed by mutation.

use crate::{
    config::LearnerConfig,
    constants::TOL_MIN_SELECTION_POOL,
    crossover::crossover,
    error::{EvoError, EvoResult},
    genome::Genotype,
    mutator::Mutator,
    specie::shared_fitness,
};
use core::cmp::Ordering;
use rand::{seq::index::sample, Rng};
use tracing::{debug, error};

/// Higher fitness first, with NaN ranked below everything
#[inline]
fn descending(l: f64, r: f64) -> Ordering {
    let finite = |f: f64| if f.is_nan() { f64::NEG_INFINITY } else { f };
    finite(r).total_cmp(&finite(l))
}

/// Indices of `pool` sorted by descending fitness
pub fn ranked(pool: &[(Genotype, f64)]) -> Vec<usize> {
    let mut idx = (0..pool.len()).collect::<Vec<_>>();
    idx.sort_by(|&l, &r| descending(pool[l].1, pool[r].1));
    idx
}

/// Sample `tournament_size` distinct indices of `pool`, ranked by descending fitness. The size
/// is clamped up to 2 and down to the size of the pool.
pub fn tournament(
    pool: &[(Genotype, f64)],
    tournament_size: usize,
    rng: &mut impl Rng,
) -> Vec<usize> {
    let amount = tournament_size.max(TOL_MIN_SELECTION_POOL).min(pool.len());
    let mut idx = sample(rng, pool.len(), amount).into_vec();
    idx.sort_by(|&l, &r| descending(pool[l].1, pool[r].1));
    idx
}

/// The two best of a tournament over `pool`, fitter first. A pool of one yields that individual
/// as both parents.
pub fn select_for_tournament<'a>(
    pool: &'a [(Genotype, f64)],
    tournament_size: usize,
    rng: &mut impl Rng,
) -> EvoResult<(&'a Genotype, &'a Genotype)> {
    match tournament(pool, tournament_size, rng).as_slice() {
        [] => Err(EvoError::EmptyPopulation),
        [only] => Ok((&pool[*only].0, &pool[*only].0)),
        [first, second, ..] => Ok((&pool[*first].0, &pool[*second].0)),
    }
}

/// The `count` best of `pool` ( fewer if the pool is smaller ), unchanged
pub fn elites(pool: &[(Genotype, f64)], count: usize) -> Vec<Genotype> {
    ranked(pool)
        .into_iter()
        .take(count)
        .map(|idx| pool[idx].0.copy())
        .collect()
}

fn ensure_valid(genotype: &Genotype, stage: &str) -> EvoResult<()> {
    genotype.validate().inspect_err(|e| {
        error!(stage, "{e}");
    })
}

/// Cross two parents and mutate the child: weights and parameters always get a pass, structure
/// with the configured probability. The child is checked after every stage; an invalid child
/// is returned as an error, never repaired.
pub fn breed_child(
    more_fit: &Genotype,
    less_fit: &Genotype,
    mutator: &mut Mutator,
    config: &LearnerConfig,
    rng: &mut impl Rng,
) -> EvoResult<Genotype> {
    let mut child = crossover(more_fit, less_fit, rng);
    ensure_valid(&child, "crossover")?;

    mutator.mutate_weights(
        &mut child,
        config.weight_mutation_probability,
        config.weight_mutation_sigma,
        rng,
    );
    ensure_valid(&child, "weight mutation")?;

    mutator.mutate_neuron_params(&mut child, config.param_mutation_probability, rng)?;
    ensure_valid(&child, "parameter mutation")?;

    let changed =
        mutator.mutate_structure(&mut child, config.structural_mutation_probability, rng)?;
    ensure_valid(&child, "structural mutation")?;

    debug!(genes = child.num_genes(), structural = changed, "bred child");
    Ok(child)
}

/// Pair every genotype with its shared fitness
pub fn share(scored: &[(Genotype, f64)], config: &LearnerConfig) -> Vec<(Genotype, f64)> {
    let shared = shared_fitness(scored, config.speciation_threshold, &config.coefficients());
    scored
        .iter()
        .zip(shared)
        .map(|((genotype, _), shared)| (genotype.copy(), shared))
        .collect()
}

/// `num_children` children bred from `pool` followed by its elites. `pool` is ranked by the
/// fitness it carries.
pub fn breed(
    pool: &[(Genotype, f64)],
    config: &LearnerConfig,
    mutator: &mut Mutator,
    rng: &mut impl Rng,
) -> EvoResult<Vec<Genotype>> {
    if pool.is_empty() {
        return Err(EvoError::EmptyPopulation);
    }

    let mut next = Vec::with_capacity(config.population_size);
    for _ in 0..config.num_children {
        let (more_fit, less_fit) = select_for_tournament(pool, config.tournament_size, rng)?;
        next.push(breed_child(more_fit, less_fit, mutator, config, rng)?);
    }
    next.extend(elites(pool, config.num_elites()));

    Ok(next)
}

/// Genotypes of the next generation from a scored one. Selection and elitism both rank by
/// shared fitness.
pub fn produce_new_generation(
    scored: &[(Genotype, f64)],
    config: &LearnerConfig,
    mutator: &mut Mutator,
    rng: &mut impl Rng,
) -> EvoResult<Vec<Genotype>> {
    breed(&share(scored, config), config, mutator, rng)
}
