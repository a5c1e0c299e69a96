//! The generation scheduler. Genotypes wait in a queue, one of them is active at a time while
//! an external evaluator measures it, and once every queued genotype is scored the next
//! generation is bred from the scores.

use crate::{
    config::LearnerConfig,
    error::{EvoError, EvoResult},
    genome::Genotype,
    mutator::Mutator,
    population::population_init,
    random::{gauss, WyRng},
    reproduce::{breed, share},
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Something that can measure a genotype. `duration` is the simulated time the genotype should
/// be run for; the evaluator may take as long as it likes to report.
pub trait Evaluator {
    fn evaluate(&mut self, genotype: &Genotype, duration: f64) -> f64;
}

impl<F: FnMut(&Genotype, f64) -> f64> Evaluator for F {
    fn evaluate(&mut self, genotype: &Genotype, duration: f64) -> f64 {
        self(genotype, duration)
    }
}

/// Summary of one scored generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub best_shared_fitness: f64,
    pub mean_genes: f64,
}

impl GenerationStats {
    fn new(generation: usize, scored: &[(Genotype, f64)], pool: &[(Genotype, f64)]) -> Self {
        let len = scored.len().max(1) as f64;
        Self {
            generation,
            best_fitness: scored.iter().map(|(_, f)| *f).fold(f64::NEG_INFINITY, f64::max),
            mean_fitness: scored.iter().map(|(_, f)| f).sum::<f64>() / len,
            best_shared_fitness: pool.iter().map(|(_, f)| *f).fold(f64::NEG_INFINITY, f64::max),
            mean_genes: scored.iter().map(|(g, _)| g.num_genes() as f64).sum::<f64>() / len,
        }
    }
}

#[derive(Debug)]
pub struct Learner<R: Rng = WyRng> {
    config: LearnerConfig,
    mutator: Mutator,
    rng: R,
    queue: VecDeque<Genotype>,
    active: Option<(Genotype, f64)>,
    evaluated: Vec<(Genotype, f64)>,
    generation: usize,
    champion: Option<(Genotype, f64)>,
    history: Vec<GenerationStats>,
}

impl<R: Rng> Learner<R> {
    /// Start a run from an explicit first generation. Every genotype is validated, and the
    /// mutator's counter is moved past their marks.
    pub fn new(
        config: LearnerConfig,
        mutator: Mutator,
        population: Vec<Genotype>,
        rng: R,
    ) -> EvoResult<Self> {
        Self::start(config.sanitized(), mutator, population, rng)
    }

    fn start(
        config: LearnerConfig,
        mut mutator: Mutator,
        population: Vec<Genotype>,
        rng: R,
    ) -> EvoResult<Self> {
        if population.is_empty() {
            return Err(EvoError::EmptyPopulation);
        }
        for genotype in population.iter() {
            genotype.validate()?;
        }
        mutator.resume_after(population.iter());

        let mut learner = Self {
            config,
            mutator,
            rng,
            queue: population.into(),
            active: None,
            evaluated: Vec::new(),
            generation: 0,
            champion: None,
            history: Vec::new(),
        };
        if !learner.is_finished() {
            learner.activate_next();
        }
        Ok(learner)
    }

    /// Start a run from `population_size` weight-mutated copies of `seed`
    pub fn from_seed(
        config: LearnerConfig,
        mutator: Mutator,
        seed: &Genotype,
        mut rng: R,
    ) -> EvoResult<Self> {
        let config = config.sanitized();
        let population = population_init(
            seed,
            config.population_size,
            &mutator,
            config.weight_mutation_probability,
            config.weight_mutation_sigma,
            &mut rng,
        )?;
        Self::start(config, mutator, population, rng)
    }

    #[inline]
    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    #[inline]
    pub fn mutator(&self) -> &Mutator {
        &self.mutator
    }

    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.generation >= self.config.max_generations
    }

    /// The genotype being evaluated, with the simulated time it should run for
    #[inline]
    pub fn active(&self) -> Option<(&Genotype, f64)> {
        self.active.as_ref().map(|(g, d)| (g, *d))
    }

    /// Genotypes still waiting behind the active one
    #[inline]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Genotypes already scored in the current generation
    #[inline]
    pub fn evaluated(&self) -> &[(Genotype, f64)] {
        &self.evaluated
    }

    /// The best genotype by raw fitness over the whole run
    #[inline]
    pub fn champion(&self) -> Option<(&Genotype, f64)> {
        self.champion.as_ref().map(|(g, f)| (g, *f))
    }

    #[inline]
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    fn activate_next(&mut self) {
        self.active = self.queue.pop_front().map(|genotype| {
            let duration = gauss(
                &mut self.rng,
                self.config.evaluation_time,
                self.config.evaluation_time_sigma,
            )
            .max(0.);
            debug!(
                generation = self.generation,
                genes = genotype.num_genes(),
                duration,
                "activated genotype"
            );
            (genotype, duration)
        });
    }

    /// Score the active genotype. Activates the next queued one, or breeds the next generation
    /// when the queue is exhausted. A non-finite fitness is refused and the genotype stays active.
    pub fn report_fitness(&mut self, fitness: f64) -> EvoResult<()> {
        if self.is_finished() {
            return Err(EvoError::Finished);
        }
        if !fitness.is_finite() {
            return Err(EvoError::InvalidFitness(fitness));
        }
        let (genotype, _) = self.active.take().ok_or(EvoError::NoActiveGenotype)?;

        if self
            .champion
            .as_ref()
            .map_or(true, |(_, best)| fitness > *best)
        {
            self.champion = Some((genotype.copy(), fitness));
        }
        self.evaluated.push((genotype, fitness));

        if self.queue.is_empty() {
            self.next_generation()?;
        }
        self.activate_next();
        Ok(())
    }

    fn next_generation(&mut self) -> EvoResult<()> {
        let scored = core::mem::take(&mut self.evaluated);
        let pool = share(&scored, &self.config);

        let stats = GenerationStats::new(self.generation, &scored, &pool);
        info!(
            generation = stats.generation,
            best = stats.best_fitness,
            mean = stats.mean_fitness,
            best_shared = stats.best_shared_fitness,
            mean_genes = stats.mean_genes,
            "generation scored"
        );
        self.history.push(stats);
        self.generation += 1;

        if self.is_finished() {
            info!(generations = self.generation, "learning finished");
            return Ok(());
        }

        let next = breed(&pool, &self.config, &mut self.mutator, &mut self.rng)?;
        self.queue.extend(next);
        Ok(())
    }

    /// Drive the run to completion with `evaluator`, returning the champion
    pub fn run(&mut self, evaluator: &mut impl Evaluator) -> EvoResult<(&Genotype, f64)> {
        while let Some((genotype, duration)) = self.active.as_ref() {
            let fitness = evaluator.evaluate(genotype, *duration);
            self.report_fitness(fitness)?;
        }
        self.champion().ok_or(EvoError::EmptyPopulation)
    }
}
