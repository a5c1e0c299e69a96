//! Default evolution parameters. All carry the `TOL_` prefix and back the `Default`
//! implementations in [crate::config].

// ============================================================================
// Population Parameters
// ============================================================================

/// Number of genotypes evaluated per generation
pub const TOL_POPULATION_SIZE: usize = 10;

/// Number of individuals sampled into each tournament
pub const TOL_TOURNAMENT_SIZE: usize = 6;

/// Children bred per generation; the remaining slots go to elites
pub const TOL_NUM_CHILDREN: usize = 5;

/// Smallest population and tournament the learner will run with
pub const TOL_MIN_SELECTION_POOL: usize = 2;

/// Dissimilarity below which two genotypes share fitness
pub const TOL_SPECIATION_THRESHOLD: f64 = 0.5;

// ============================================================================
// Evaluation Parameters
// ============================================================================

/// Mean evaluation time per genotype, in simulation seconds
pub const TOL_EVALUATION_TIME: f64 = 15.0;

/// Standard deviation of the evaluation time
pub const TOL_EVALUATION_TIME_SIGMA: f64 = 2.0;

// ============================================================================
// Mutation Parameters
// ============================================================================

/// Per-connection chance of a weight perturbation
pub const TOL_WEIGHT_MUTATION_PROB: f64 = 0.8;

/// Standard deviation of a weight perturbation
pub const TOL_WEIGHT_MUTATION_SIGMA: f64 = 5.0;

/// Per-neuron chance of resampling one parameter
pub const TOL_PARAM_MUTATION_PROB: f64 = 0.8;

/// Chance of one structural mutation per child
pub const TOL_STRUCTURAL_MUTATION_PROB: f64 = 0.8;

/// Chance of adding a connection rather than splitting one, given a structural mutation
pub const TOL_ADD_CONNECTION_PROB: f64 = 0.5;

/// Standard deviation of the weight given to an invented connection
pub const TOL_NEW_CONNECTION_SIGMA: f64 = 1.0;

/// Endpoint draws allowed before add-connection gives up
pub const TOL_MAX_ATTEMPTS: usize = 100;

/// Neuron type given to neurons invented by splitting a connection
pub const TOL_HIDDEN_NEURON_TYPE: &str = "simple";

/// Weight of the connection leaving a freshly split-in neuron
pub const TOL_SPLIT_OUT_WEIGHT: f64 = 1.0;

// ============================================================================
// Crossover / Dissimilarity Coefficients
// ============================================================================

/// Chance of taking the fitter parent's side of a matched gene
pub const TOL_CROSSOVER_PICK_FITTER_PROB: f64 = 0.5;

/// Coefficient for excess genes in dissimilarity
pub const TOL_EXCESS_COEFFICIENT: f64 = 1.0;

/// Coefficient for disjoint genes in dissimilarity
pub const TOL_DISJOINT_COEFFICIENT: f64 = 1.0;

/// Coefficient for weight differences in dissimilarity ( accepted, not applied )
pub const TOL_WEIGHT_DIFF_COEFFICIENT: f64 = 1.0;
