use super::{Gene, Mark};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameter values of a neuron, keyed by the names its type declares.
/// Ordered so that dumps and serialized genotypes are deterministic.
pub type NeuronParams = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Input,
    Output,
    Hidden,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Hidden => "hidden",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    pub neuron_id: String,
    pub layer: Layer,
    /// key into a [crate::spec::BrainSpec]
    pub neuron_type: String,
    pub body_part_id: String,
    pub neuron_params: NeuronParams,
}

impl Neuron {
    pub fn new(
        neuron_id: impl Into<String>,
        layer: Layer,
        neuron_type: impl Into<String>,
        body_part_id: impl Into<String>,
        neuron_params: NeuronParams,
    ) -> Self {
        Self {
            neuron_id: neuron_id.into(),
            layer,
            neuron_type: neuron_type.into(),
            body_part_id: body_part_id.into(),
            neuron_params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronGene {
    pub mark: Mark,
    pub enabled: bool,
    pub neuron: Neuron,
}

impl NeuronGene {
    pub fn new(mark: Mark, neuron: Neuron) -> Self {
        Self {
            mark,
            enabled: true,
            neuron,
        }
    }
}

impl Gene for NeuronGene {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }
}

impl fmt::Display for NeuronGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} neuron id={} layer={} type={} part={} params={{",
            self.mark,
            if self.enabled { "enabled" } else { "disabled" },
            self.neuron.neuron_id,
            self.neuron.layer,
            self.neuron.neuron_type,
            self.neuron.body_part_id,
        )?;
        for (idx, (name, value)) in self.neuron.neuron_params.iter().enumerate() {
            if idx != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_sorted_params() {
        let gene = NeuronGene::new(
            7,
            Neuron::new(
                "n7",
                Layer::Hidden,
                "simple",
                "root",
                NeuronParams::from([("gain".to_string(), 0.5), ("bias".to_string(), -1.)]),
            ),
        );
        assert_eq!(
            gene.to_string(),
            "[7] enabled neuron id=n7 layer=hidden type=simple part=root \
             params={bias: -1, gain: 0.5}"
        );
    }

    #[test]
    fn test_layer_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Layer::Output).unwrap(), "\"output\"");
        assert_eq!(
            serde_json::from_str::<Layer>("\"hidden\"").unwrap(),
            Layer::Hidden
        );
    }
}
