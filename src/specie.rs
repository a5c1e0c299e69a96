//! Fitness sharing. Species are not stored: each individual's niche is recomputed every
//! generation as the set of individuals closer to it than the speciation threshold.

use crate::{
    crossover::{dissimilarity, Coefficients},
    genome::Genotype,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// For each genotype, `1 +` the number of *other* genotypes whose dissimilarity to it is below
/// `threshold`
#[cfg(not(feature = "parallel"))]
pub fn niche_sizes(
    genotypes: &[&Genotype],
    threshold: f64,
    coefficients: &Coefficients,
) -> Vec<usize> {
    let mut sizes = vec![1; genotypes.len()];
    for i in 0..genotypes.len() {
        for j in i + 1..genotypes.len() {
            if dissimilarity(genotypes[i], genotypes[j], coefficients) < threshold {
                sizes[i] += 1;
                sizes[j] += 1;
            }
        }
    }
    sizes
}

/// For each genotype, `1 +` the number of *other* genotypes whose dissimilarity to it is below
/// `threshold`
#[cfg(feature = "parallel")]
pub fn niche_sizes(
    genotypes: &[&Genotype],
    threshold: f64,
    coefficients: &Coefficients,
) -> Vec<usize> {
    (0..genotypes.len())
        .into_par_iter()
        .map(|i| {
            1 + (0..genotypes.len())
                .filter(|&j| {
                    j != i && dissimilarity(genotypes[i], genotypes[j], coefficients) < threshold
                })
                .count()
        })
        .collect()
}

/// Divide every raw fitness by the size of its niche
pub fn shared_fitness(
    scored: &[(Genotype, f64)],
    threshold: f64,
    coefficients: &Coefficients,
) -> Vec<f64> {
    let genotypes = scored.iter().map(|(g, _)| g).collect::<Vec<_>>();
    niche_sizes(&genotypes, threshold, coefficients)
        .into_iter()
        .zip(scored)
        .map(|(size, (_, fitness))| fitness / size as f64)
        .collect()
}
