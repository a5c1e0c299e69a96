//! Parameter schema of neuron types. Each neuron gene names its type, and the type decides
//! which parameters exist and how fresh values for them are drawn.

use crate::{
    error::{EvoError, EvoResult},
    genome::NeuronParams,
};
use rand::{seq::IndexedRandom, Rng};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

/// A single named parameter, drawn uniformly from `[min, max]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        if self.max > self.min {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeuronSpec {
    pub params: Vec<ParamSpec>,
}

impl NeuronSpec {
    pub fn new(params: Vec<ParamSpec>) -> Self {
        Self { params }
    }

    /// A fresh value for every parameter of this type
    pub fn random_parameters(&self, rng: &mut impl Rng) -> NeuronParams {
        self.params
            .iter()
            .map(|p| (p.name.clone(), p.sample(rng)))
            .collect()
    }

    /// One parameter chosen uniformly, with a fresh value. None if the type has no parameters.
    pub fn random_parameter(&self, rng: &mut impl Rng) -> Option<(&str, f64)> {
        self.params
            .choose(rng)
            .map(|p| (p.name.as_str(), p.sample(rng)))
    }
}

/// Neuron type name -> its parameter schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainSpec {
    types: BTreeMap<String, NeuronSpec>,
}

impl BrainSpec {
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    pub fn with_type(mut self, name: impl Into<String>, spec: NeuronSpec) -> Self {
        self.types.insert(name.into(), spec);
        self
    }

    pub fn get(&self, neuron_type: &str) -> Option<&NeuronSpec> {
        self.types.get(neuron_type)
    }

    /// [BrainSpec::get], failing on a type this spec does not know
    pub fn require(&self, neuron_type: &str) -> EvoResult<&NeuronSpec> {
        self.get(neuron_type)
            .ok_or_else(|| EvoError::UnknownNeuronType(neuron_type.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> EvoResult<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> EvoResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

impl Default for BrainSpec {
    fn default() -> Self {
        Self::empty()
            .with_type("input", NeuronSpec::default())
            .with_type(
                "simple",
                NeuronSpec::new(vec![
                    ParamSpec::new("bias", -1., 1.),
                    ParamSpec::new("gain", 0., 1.),
                ]),
            )
            .with_type(
                "sigmoid",
                NeuronSpec::new(vec![
                    ParamSpec::new("bias", -1., 1.),
                    ParamSpec::new("gain", 0., 1.),
                ]),
            )
            .with_type(
                "oscillator",
                NeuronSpec::new(vec![
                    ParamSpec::new("period", 0., 10.),
                    ParamSpec::new("phase_offset", 0., core::f64::consts::PI),
                    ParamSpec::new("amplitude", 0., 10_000.),
                ]),
            )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_random_parameters_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let spec = BrainSpec::default();
        let oscillator = spec.get("oscillator").unwrap();
        for _ in 0..1_000 {
            let params = oscillator.random_parameters(&mut rng);
            assert_eq!(params.len(), 3);
            assert!((0. ..=10.).contains(&params["period"]));
            assert!((0. ..=core::f64::consts::PI).contains(&params["phase_offset"]));
            assert!((0. ..=10_000.).contains(&params["amplitude"]));
        }
    }

    #[test]
    fn test_random_parameter_uniform_choice() {
        let mut rng = StdRng::seed_from_u64(11);
        let simple = BrainSpec::default().get("simple").cloned().unwrap();
        let mut seen_bias = 0;
        let mut seen_gain = 0;
        for _ in 0..2_000 {
            match simple.random_parameter(&mut rng) {
                Some(("bias", v)) => {
                    assert!((-1. ..=1.).contains(&v));
                    seen_bias += 1
                }
                Some(("gain", v)) => {
                    assert!((0. ..=1.).contains(&v));
                    seen_gain += 1
                }
                other => panic!("unexpected parameter {other:?}"),
            }
        }
        assert!(seen_bias > 800 && seen_gain > 800);
    }

    #[test]
    fn test_no_params() {
        let mut rng = StdRng::seed_from_u64(0);
        let input = BrainSpec::default().get("input").cloned().unwrap();
        assert_eq!(input.random_parameter(&mut rng), None);
        assert!(input.random_parameters(&mut rng).is_empty());
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(ParamSpec::new("fixed", 2., 2.).sample(&mut rng), 2.);
    }

    #[test]
    fn test_require_unknown() {
        assert!(matches!(
            BrainSpec::default().require("quantum"),
            Err(EvoError::UnknownNeuronType(t)) if t == "quantum"
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let spec = BrainSpec::default();
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(serde_json::from_str::<BrainSpec>(&json).unwrap(), spec);
    }
}
