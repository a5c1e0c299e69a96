//! Functions related to creating, saving and loading whole populations of genotypes.

use crate::{
    error::{EvoError, EvoResult},
    genome::Genotype,
    mutator::Mutator,
};
use rand::Rng;
use std::{fs, path::Path};
use tracing::debug;

/// `size` copies of `seed`, each given one weight mutation pass so that the first generation is
/// not made of clones. The seed must be valid.
pub fn population_init(
    seed: &Genotype,
    size: usize,
    mutator: &Mutator,
    probability: f64,
    sigma: f64,
    rng: &mut impl Rng,
) -> EvoResult<Vec<Genotype>> {
    seed.validate()?;
    Ok((0..size)
        .map(|_| {
            let mut genotype = seed.copy();
            mutator.mutate_weights(&mut genotype, probability, sigma, rng);
            genotype
        })
        .collect())
}

/// Save a population of [Genotype]s to individual files inside of a directory at `path`
pub fn population_to_files<P: AsRef<Path>>(path: P, population: &[Genotype]) -> EvoResult<()> {
    fs::create_dir_all(path.as_ref())?;
    for (idx, genotype) in population.iter().enumerate() {
        genotype.to_file(path.as_ref().join(format!("{idx}.json")))?;
    }

    debug!(path = %path.as_ref().display(), size = population.len(), "saved population");
    Ok(())
}

/// Load a population of [Genotype]s from every `.json` file inside of a directory at `path`, in
/// file name order. Every loaded genotype is validated. Hand the result to
/// [Mutator::resume_after] before mutating it.
pub fn population_from_files<P: AsRef<Path>>(path: P) -> EvoResult<Vec<Genotype>> {
    let mut paths = fs::read_dir(path)?
        .map(|entry| Ok(entry?.path()))
        .collect::<EvoResult<Vec<_>>>()?;
    paths.retain(|p| p.extension().is_some_and(|ext| ext == "json"));
    paths.sort_by_key(|p| {
        let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        (stem.parse::<usize>().unwrap_or(usize::MAX), stem.to_string())
    });

    let population = paths
        .iter()
        .map(|p| {
            let genotype = Genotype::from_file(p)?;
            genotype.validate()?;
            Ok(genotype)
        })
        .collect::<EvoResult<Vec<_>>>()?;

    if population.is_empty() {
        return Err(EvoError::EmptyPopulation);
    }
    Ok(population)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{config::MutatorConfig, genome::test::two_neuron_genotype, spec::BrainSpec};
    use rand::{rngs::StdRng, SeedableRng};
    use std::env::temp_dir;

    fn mutator() -> Mutator {
        Mutator::new(BrainSpec::default(), MutatorConfig::default()).unwrap()
    }

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = temp_dir().join(format!("tol-brain-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_population_init() {
        let mut rng = StdRng::seed_from_u64(0);
        let seed = two_neuron_genotype();
        let population = population_init(&seed, 10, &mutator(), 1., 5., &mut rng).unwrap();
        assert_eq!(population.len(), 10);
        for genotype in population.iter() {
            assert!(genotype.check_validity());
            assert_eq!(genotype.num_genes(), seed.num_genes());
            assert_eq!(genotype.neuron_genes(), seed.neuron_genes());
            assert_ne!(genotype.connection_genes()[0].weight, 0.5);
        }

        let clones = population_init(&seed, 3, &mutator(), 0., 5., &mut rng).unwrap();
        assert!(clones.iter().all(|g| *g == seed));
        assert!(population_init(&seed, 0, &mutator(), 1., 5., &mut rng)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_population_init_invalid_seed() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seed = two_neuron_genotype();
        seed.connection_genes_mut()[0].mark_from = 7;
        assert!(matches!(
            population_init(&seed, 3, &mutator(), 1., 5., &mut rng),
            Err(EvoError::InvalidGenotype { .. })
        ));
    }

    #[test]
    fn test_population_files() {
        let dir = scratch("files");
        let mut rng = StdRng::seed_from_u64(2);
        let population =
            population_init(&two_neuron_genotype(), 12, &mutator(), 1., 5., &mut rng).unwrap();

        population_to_files(&dir, &population).unwrap();
        fs::write(dir.join("notes.txt"), "not a genotype").unwrap();
        let loaded = population_from_files(&dir).unwrap();
        assert_eq!(loaded, population);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_population_from_empty_dir() {
        let dir = scratch("empty");
        fs::create_dir_all(&dir).unwrap();
        assert!(matches!(
            population_from_files(&dir),
            Err(EvoError::EmptyPopulation)
        ));
        fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(population_from_files(&dir), Err(EvoError::Io(_))));
    }
}
