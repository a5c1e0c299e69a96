use rand::Rng;
use tol_brain::{
    brain::{BrainDescription, ConnectionDescription, NeuronDescription},
    genome::NeuronParams,
    BrainSpec, Genotype, Layer, Mutator, MutatorConfig,
};

/// 4 inputs fully connected to 2 outputs
pub fn seeded() -> (Mutator, Genotype) {
    let mut mutator = Mutator::new(BrainSpec::default(), MutatorConfig::default()).unwrap();
    let neuron = |id: String, layer, neuron_type: &str| NeuronDescription {
        id,
        layer,
        neuron_type: neuron_type.to_string(),
        part_id: "core".to_string(),
        params: NeuronParams::new(),
    };

    let mut brain = BrainDescription::default();
    for i in 0..4 {
        brain.neurons.push(neuron(format!("in{i}"), Layer::Input, "input"));
    }
    for o in 0..2 {
        brain.neurons.push(neuron(format!("out{o}"), Layer::Output, "simple"));
        for i in 0..4 {
            brain.connections.push(ConnectionDescription {
                src: format!("in{i}"),
                dst: format!("out{o}"),
                weight: 1.,
            });
        }
    }

    let genotype = mutator.genotype_from_brain(&brain).unwrap();
    (mutator, genotype)
}

/// `genotype` after `steps` forced structural mutations
pub fn grown(
    mutator: &mut Mutator,
    genotype: &Genotype,
    steps: usize,
    rng: &mut impl Rng,
) -> Genotype {
    let mut genotype = genotype.copy();
    for _ in 0..steps {
        mutator.mutate_structure(&mut genotype, 1., rng).unwrap();
    }
    genotype
}
