//! Error type shared by every fallible operation of the engine.

use crate::genome::Mark;
use thiserror::Error;

pub type EvoResult<T> = Result<T, EvoError>;

#[derive(Error, Debug)]
pub enum EvoError {
    /// A genotype broke the endpoint invariant. Always fatal to a run.
    #[error("invalid genotype: {reason}\n{dump}")]
    InvalidGenotype { reason: String, dump: String },

    #[error("unknown neuron type: {0}")]
    UnknownNeuronType(String),

    #[error("unknown neuron id: {0}")]
    UnknownNeuron(String),

    #[error("no neuron gene with historical mark {0}")]
    UnknownMark(Mark),

    #[error("population is empty")]
    EmptyPopulation,

    #[error("fitness must be finite, got {0}")]
    InvalidFitness(f64),

    #[error("no genotype is being evaluated")]
    NoActiveGenotype,

    #[error("learning already reached its final generation")]
    Finished,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
