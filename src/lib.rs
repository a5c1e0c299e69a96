mod macros;

pub mod brain;
pub mod config;
pub mod constants;
pub mod crossover;
pub mod error;
pub mod genome;
pub mod learner;
pub mod mutator;
pub mod population;
pub mod random;
pub mod reproduce;
pub mod spec;
pub mod specie;

pub use brain::{BrainDescription, ConnectionRecord, NeuronRecord};
pub use config::{LearnerConfig, MutatorConfig};
pub use crossover::{crossover, delta, dissimilarity, excess_disjoint, Coefficients};
pub use error::{EvoError, EvoResult};
pub use genome::{ConnectionGene, Gene, Genotype, Layer, Mark, Neuron, NeuronGene};
pub use learner::{Evaluator, GenerationStats, Learner};
pub use mutator::Mutator;
pub use random::{default_rng, Happens, WyRng};
pub use spec::BrainSpec;
