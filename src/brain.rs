//! Plain descriptions exchanged with the world outside the engine: the brain a robot is built
//! with, and flat gene records for persistence.

use crate::{
    error::{EvoError, EvoResult},
    genome::{ConnectionGene, Genotype, Layer, Mark, Neuron, NeuronGene, NeuronParams},
    mutator::Mutator,
};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronDescription {
    pub id: String,
    pub layer: Layer,
    #[serde(rename = "type")]
    pub neuron_type: String,
    pub part_id: String,
    #[serde(default)]
    pub params: NeuronParams,
}

impl From<&Neuron> for NeuronDescription {
    fn from(neuron: &Neuron) -> Self {
        Self {
            id: neuron.neuron_id.clone(),
            layer: neuron.layer,
            neuron_type: neuron.neuron_type.clone(),
            part_id: neuron.body_part_id.clone(),
            params: neuron.neuron_params.clone(),
        }
    }
}

impl From<&NeuronDescription> for Neuron {
    fn from(desc: &NeuronDescription) -> Self {
        Neuron::new(
            desc.id.clone(),
            desc.layer,
            desc.neuron_type.clone(),
            desc.part_id.clone(),
            desc.params.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDescription {
    pub src: String,
    pub dst: String,
    pub weight: f64,
}

/// A brain as the simulator sees it, with neurons referenced by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrainDescription {
    pub neurons: Vec<NeuronDescription>,
    pub connections: Vec<ConnectionDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronRecord {
    pub hist_mark: Mark,
    pub enabled: bool,
    pub id: String,
    pub layer: Layer,
    #[serde(rename = "type")]
    pub neuron_type: String,
    pub part_id: String,
    pub params: NeuronParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub hist_mark: Mark,
    pub enabled: bool,
    pub from: Mark,
    pub to: Mark,
    pub weight: f64,
}

impl From<&NeuronGene> for NeuronRecord {
    fn from(gene: &NeuronGene) -> Self {
        let neuron = NeuronDescription::from(&gene.neuron);
        Self {
            hist_mark: gene.mark,
            enabled: gene.enabled,
            id: neuron.id,
            layer: neuron.layer,
            neuron_type: neuron.neuron_type,
            part_id: neuron.part_id,
            params: neuron.params,
        }
    }
}

impl From<&ConnectionGene> for ConnectionRecord {
    fn from(gene: &ConnectionGene) -> Self {
        Self {
            hist_mark: gene.mark,
            enabled: gene.enabled,
            from: gene.mark_from,
            to: gene.mark_to,
            weight: gene.weight,
        }
    }
}

impl Genotype {
    /// Every gene as a flat record, in gene order
    pub fn to_lists(&self) -> (Vec<NeuronRecord>, Vec<ConnectionRecord>) {
        (
            self.neuron_genes().iter().map(NeuronRecord::from).collect(),
            self.connection_genes()
                .iter()
                .map(ConnectionRecord::from)
                .collect(),
        )
    }

    /// The brain expressed by the enabled genes. Connections touching a disabled neuron are left
    /// out; a connection to a mark that names no neuron at all is an error.
    pub fn to_brain(&self) -> EvoResult<BrainDescription> {
        let ids = self
            .neuron_genes()
            .iter()
            .map(|n| (n.mark, (n.enabled, n.neuron.neuron_id.as_str())))
            .collect::<FxHashMap<_, _>>();
        let resolve = |mark: Mark| ids.get(&mark).copied().ok_or(EvoError::UnknownMark(mark));

        let mut connections = Vec::new();
        for c in self.connection_genes().iter().filter(|c| c.enabled) {
            let ((from_enabled, src), (to_enabled, dst)) =
                (resolve(c.mark_from)?, resolve(c.mark_to)?);
            if from_enabled && to_enabled {
                connections.push(ConnectionDescription {
                    src: src.to_string(),
                    dst: dst.to_string(),
                    weight: c.weight,
                });
            }
        }

        Ok(BrainDescription {
            neurons: self
                .neuron_genes()
                .iter()
                .filter(|n| n.enabled)
                .map(|n| NeuronDescription::from(&n.neuron))
                .collect(),
            connections,
        })
    }
}

impl Mutator {
    /// Encode a brain description, marking every neuron and then every connection afresh
    pub fn genotype_from_brain(&mut self, brain: &BrainDescription) -> EvoResult<Genotype> {
        let mut genotype = Genotype::new();
        let mut marks: FxHashMap<&str, Mark> = FxHashMap::default();
        for desc in brain.neurons.iter() {
            if marks.contains_key(desc.id.as_str()) {
                return Err(EvoError::InvalidGenotype {
                    reason: format!("neuron id {} is not unique", desc.id),
                    dump: genotype.debug_string(),
                });
            }
            let mark = self.add_neuron(Neuron::from(desc), &mut genotype);
            marks.insert(desc.id.as_str(), mark);
        }

        let resolve = |id: &str| {
            marks
                .get(id)
                .copied()
                .ok_or_else(|| EvoError::UnknownNeuron(id.to_string()))
        };
        for desc in brain.connections.iter() {
            let (from, to) = (resolve(desc.src.as_str())?, resolve(desc.dst.as_str())?);
            self.add_connection(from, to, desc.weight, &mut genotype);
        }

        Ok(genotype)
    }

    /// Rebuild a genotype from flat records. Only enabled genes are kept, and each is given a
    /// fresh mark; connection endpoints are translated from the old marks.
    pub fn genotype_from_lists(
        &mut self,
        neurons: &[NeuronRecord],
        connections: &[ConnectionRecord],
    ) -> EvoResult<Genotype> {
        let mut genotype = Genotype::new();
        let mut marks: FxHashMap<Mark, Mark> = FxHashMap::default();
        for record in neurons.iter().filter(|r| r.enabled) {
            let neuron = Neuron::new(
                record.id.clone(),
                record.layer,
                record.neuron_type.clone(),
                record.part_id.clone(),
                record.params.clone(),
            );
            marks.insert(record.hist_mark, self.add_neuron(neuron, &mut genotype));
        }

        let resolve = |old: Mark| marks.get(&old).copied().ok_or(EvoError::UnknownMark(old));
        for record in connections.iter().filter(|r| r.enabled) {
            let (from, to) = (resolve(record.from)?, resolve(record.to)?);
            self.add_connection(from, to, record.weight, &mut genotype);
        }

        Ok(genotype)
    }
}
