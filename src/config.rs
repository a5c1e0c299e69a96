//! Run configuration. Every field has a default from [crate::constants], so a JSON file only
//! needs to name the values it changes.

use crate::{constants::*, crossover::Coefficients, error::EvoResult};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutatorConfig {
    /// standard deviation of weights given to invented connections
    pub new_connection_sigma: f64,
    /// endpoint draws before add-connection gives up
    pub max_attempts: usize,
    /// neuron type of neurons invented by add-neuron
    pub hidden_neuron_type: String,
    /// chance of add-connection ( vs add-neuron ) once a structural mutation happens
    pub add_connection_prob: f64,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        Self {
            new_connection_sigma: TOL_NEW_CONNECTION_SIGMA,
            max_attempts: TOL_MAX_ATTEMPTS,
            hidden_neuron_type: TOL_HIDDEN_NEURON_TYPE.to_string(),
            add_connection_prob: TOL_ADD_CONNECTION_PROB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    pub population_size: usize,
    pub tournament_size: usize,
    pub num_children: usize,
    pub max_generations: usize,
    pub speciation_threshold: f64,
    pub evaluation_time: f64,
    pub evaluation_time_sigma: f64,
    pub weight_mutation_probability: f64,
    pub weight_mutation_sigma: f64,
    pub param_mutation_probability: f64,
    pub structural_mutation_probability: f64,
    pub excess_coef: f64,
    pub disjoint_coef: f64,
    pub weight_diff_coef: f64,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            population_size: TOL_POPULATION_SIZE,
            tournament_size: TOL_TOURNAMENT_SIZE,
            num_children: TOL_NUM_CHILDREN,
            max_generations: 100,
            speciation_threshold: TOL_SPECIATION_THRESHOLD,
            evaluation_time: TOL_EVALUATION_TIME,
            evaluation_time_sigma: TOL_EVALUATION_TIME_SIGMA,
            weight_mutation_probability: TOL_WEIGHT_MUTATION_PROB,
            weight_mutation_sigma: TOL_WEIGHT_MUTATION_SIGMA,
            param_mutation_probability: TOL_PARAM_MUTATION_PROB,
            structural_mutation_probability: TOL_STRUCTURAL_MUTATION_PROB,
            excess_coef: TOL_EXCESS_COEFFICIENT,
            disjoint_coef: TOL_DISJOINT_COEFFICIENT,
            weight_diff_coef: TOL_WEIGHT_DIFF_COEFFICIENT,
        }
    }
}

impl LearnerConfig {
    /// Clamp population and tournament sizes up to the smallest viable pool, and children
    /// down to the population size
    pub fn sanitized(mut self) -> Self {
        if self.population_size < TOL_MIN_SELECTION_POOL {
            warn!(
                requested = self.population_size,
                clamped = TOL_MIN_SELECTION_POOL,
                "population size too small"
            );
            self.population_size = TOL_MIN_SELECTION_POOL;
        }
        if self.tournament_size < TOL_MIN_SELECTION_POOL {
            warn!(
                requested = self.tournament_size,
                clamped = TOL_MIN_SELECTION_POOL,
                "tournament size too small"
            );
            self.tournament_size = TOL_MIN_SELECTION_POOL;
        }
        if self.num_children > self.population_size {
            warn!(
                requested = self.num_children,
                clamped = self.population_size,
                "more children than population"
            );
            self.num_children = self.population_size;
        }
        self
    }

    /// Number of survivors carried over unchanged each generation
    #[inline]
    pub fn num_elites(&self) -> usize {
        self.population_size.saturating_sub(self.num_children)
    }

    #[inline]
    pub fn coefficients(&self) -> Coefficients {
        Coefficients {
            excess: self.excess_coef,
            disjoint: self.disjoint_coef,
            weight_diff: self.weight_diff_coef,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> EvoResult<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> EvoResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
