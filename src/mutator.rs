//! The [Mutator] owns the run-wide innovation counter. Every gene that enters any genotype of a
//! run gets its mark here, which is what makes marks comparable across genotypes.
//!
//! Each structural mutation takes a fresh mark, even when an identical change was already made
//! elsewhere in the population. Two lineages that grow the same edge therefore carry it under
//! different marks.

use crate::{
    config::MutatorConfig,
    constants::TOL_SPLIT_OUT_WEIGHT,
    error::{EvoError, EvoResult},
    genome::{ConnectionGene, Gene, Genotype, Layer, Mark, Neuron, NeuronGene},
    random::{gauss, Happens},
    spec::BrainSpec,
};
use rand::{seq::IndexedRandom, Rng};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Mutator {
    spec: BrainSpec,
    innovation_number: Mark,
    new_connection_sigma: f64,
    max_attempts: usize,
    hidden_neuron_type: String,
    add_connection_prob: f64,
}

impl Mutator {
    /// Fails if `spec` has no entry for the configured hidden neuron type
    pub fn new(spec: BrainSpec, config: MutatorConfig) -> EvoResult<Self> {
        spec.require(&config.hidden_neuron_type)?;
        Ok(Self {
            spec,
            innovation_number: 0,
            new_connection_sigma: config.new_connection_sigma,
            max_attempts: config.max_attempts,
            hidden_neuron_type: config.hidden_neuron_type,
            add_connection_prob: config.add_connection_prob,
        })
    }

    pub fn with_innovation_number(mut self, innovation_number: Mark) -> Self {
        self.innovation_number = innovation_number;
        self
    }

    /// The mark the next gene will receive
    #[inline]
    pub fn innovation_number(&self) -> Mark {
        self.innovation_number
    }

    #[inline]
    pub fn spec(&self) -> &BrainSpec {
        &self.spec
    }

    #[inline]
    pub fn new_connection_sigma(&self) -> f64 {
        self.new_connection_sigma
    }

    /// Move the counter past every mark found in `genotypes`, so genotypes loaded from elsewhere
    /// never collide with freshly invented genes
    pub fn resume_after<'a>(&mut self, genotypes: impl IntoIterator<Item = &'a Genotype>) {
        if let Some(max) = genotypes.into_iter().filter_map(Genotype::max_mark).max() {
            self.innovation_number = self.innovation_number.max(max + 1);
        }
    }

    #[inline]
    fn next_mark(&mut self) -> Mark {
        let mark = self.innovation_number;
        self.innovation_number += 1;
        mark
    }

    /// Wrap `neuron` in a gene with a fresh mark and append it
    pub fn add_neuron(&mut self, neuron: Neuron, genotype: &mut Genotype) -> Mark {
        let mark = self.next_mark();
        genotype.add_neuron_gene(NeuronGene::new(mark, neuron));
        mark
    }

    /// Append an enabled connection with a fresh mark
    pub fn add_connection(
        &mut self,
        mark_from: Mark,
        mark_to: Mark,
        weight: f64,
        genotype: &mut Genotype,
    ) -> Mark {
        let mark = self.next_mark();
        genotype.add_connection_gene(ConnectionGene::new(mark, mark_from, mark_to, weight));
        mark
    }

    /// Perturb each connection weight with chance `probability` by a `Normal(0, sigma)` draw.
    /// Weights are not clamped.
    pub fn mutate_weights(
        &self,
        genotype: &mut Genotype,
        probability: f64,
        sigma: f64,
        rng: &mut impl Rng,
    ) {
        for c in genotype.connection_genes_mut() {
            if rng.happens(probability) {
                c.weight += gauss(rng, 0., sigma);
            }
        }
    }

    /// With chance `probability` per neuron, resample one of its parameters ( chosen uniformly
    /// from its type's schema ). Neurons whose type has no parameters are left alone.
    pub fn mutate_neuron_params(
        &self,
        genotype: &mut Genotype,
        probability: f64,
        rng: &mut impl Rng,
    ) -> EvoResult<()> {
        for n in genotype.neuron_genes_mut() {
            if !rng.happens(probability) {
                continue;
            }
            let spec = self.spec.require(&n.neuron.neuron_type)?;
            if let Some((name, value)) = spec.random_parameter(rng) {
                n.neuron.neuron_params.insert(name.to_string(), value);
            }
        }
        Ok(())
    }

    /// Add one connection between two neurons drawn uniformly with replacement ( self loops
    /// allowed ). Draws that hit an existing enabled connection are retried up to the attempt
    /// limit; returns false, leaving the genotype untouched, once that is exhausted.
    pub fn add_connection_mutation(
        &mut self,
        genotype: &mut Genotype,
        sigma: f64,
        rng: &mut impl Rng,
    ) -> bool {
        for _ in 0..self.max_attempts.max(1) {
            let (Some(from), Some(to)) = (
                genotype.neuron_genes().choose(rng),
                genotype.neuron_genes().choose(rng),
            ) else {
                debug!("add-connection skipped, genotype has no neurons");
                return false;
            };
            let (from, to) = (from.mark, to.mark);

            if !genotype.connection_exists(from, to) {
                let weight = gauss(rng, 0., sigma);
                let mark = self.add_connection(from, to, weight, genotype);
                debug!(mark, from, to, weight, "added connection");
                return true;
            }
        }

        debug!(attempts = self.max_attempts, "add-connection found no free path");
        false
    }

    /// Split an enabled connection `a -> b`: disable it, invent a hidden neuron `n`, and add
    /// `a -> n` carrying the old weight and `n -> b` with weight 1. Returns false if no enabled
    /// connection exists.
    pub fn add_neuron_mutation(
        &mut self,
        genotype: &mut Genotype,
        rng: &mut impl Rng,
    ) -> EvoResult<bool> {
        let enabled = genotype
            .connection_genes()
            .iter()
            .enumerate()
            .filter_map(|(idx, c)| c.enabled.then_some(idx))
            .collect::<Vec<_>>();
        let Some(&idx) = enabled.choose(rng) else {
            debug!("add-neuron skipped, no enabled connection to split");
            return Ok(false);
        };

        let (mark_from, mark_to, weight) = {
            let c = &genotype.connection_genes()[idx];
            (c.mark_from, c.mark_to, c.weight)
        };
        let part_from = genotype
            .find_neuron_by_mark(mark_from)
            .ok_or(EvoError::UnknownMark(mark_from))?
            .neuron
            .body_part_id
            .clone();
        let part_to = genotype
            .find_neuron_by_mark(mark_to)
            .ok_or(EvoError::UnknownMark(mark_to))?
            .neuron
            .body_part_id
            .clone();
        let body_part_id = if rng.happens(0.5) { part_from } else { part_to };

        genotype.connection_genes_mut()[idx].disable();

        let params = self
            .spec
            .require(&self.hidden_neuron_type)?
            .random_parameters(rng);
        let neuron = Neuron::new(
            format!("innov{}", self.innovation_number),
            Layer::Hidden,
            self.hidden_neuron_type.clone(),
            body_part_id,
            params,
        );
        let middle = self.add_neuron(neuron, genotype);
        self.add_connection(mark_from, middle, weight, genotype);
        self.add_connection(middle, mark_to, TOL_SPLIT_OUT_WEIGHT, genotype);

        debug!(
            split = genotype.connection_genes()[idx].mark,
            neuron = middle,
            from = mark_from,
            to = mark_to,
            "added neuron"
        );
        Ok(true)
    }

    /// With chance `probability`, apply one structural mutation: add-connection when the genotype
    /// has no connections, otherwise add-connection or add-neuron. Returns whether the genotype
    /// changed.
    pub fn mutate_structure(
        &mut self,
        genotype: &mut Genotype,
        probability: f64,
        rng: &mut impl Rng,
    ) -> EvoResult<bool> {
        if !rng.happens(probability) {
            return Ok(false);
        }

        if genotype.connection_genes().is_empty() || rng.happens(self.add_connection_prob) {
            Ok(self.add_connection_mutation(genotype, self.new_connection_sigma, rng))
        } else {
            self.add_neuron_mutation(genotype, rng)
        }
    }
}
