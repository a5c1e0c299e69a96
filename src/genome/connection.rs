use super::{Gene, Mark};
use core::fmt;
use serde::{Deserialize, Serialize};

/// A weighted edge between two neuron genes. Endpoints are historical marks, never
/// references, so that a genotype copies without any fixup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionGene {
    pub mark: Mark,
    pub enabled: bool,
    pub mark_from: Mark,
    pub mark_to: Mark,
    pub weight: f64,
}

impl ConnectionGene {
    pub fn new(mark: Mark, mark_from: Mark, mark_to: Mark, weight: f64) -> Self {
        Self {
            mark,
            enabled: true,
            mark_from,
            mark_to,
            weight,
        }
    }

    #[inline]
    pub fn path(&self) -> (Mark, Mark) {
        (self.mark_from, self.mark_to)
    }
}

impl Gene for ConnectionGene {
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

impl Default for ConnectionGene {
    fn default() -> Self {
        Self {
            mark: 0,
            enabled: true,
            mark_from: 0,
            mark_to: 0,
            weight: 0.,
        }
    }
}

impl fmt::Display for ConnectionGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} connection {} -> {} weight={}",
            self.mark,
            if self.enabled { "enabled" } else { "disabled" },
            self.mark_from,
            self.mark_to,
            self.weight,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_disable_keeps_identity() {
        let mut c = ConnectionGene::new(4, 0, 3, 0.25);
        c.disable();
        assert!(!c.enabled());
        assert_eq!(c.mark(), 4);
        assert_eq!(c.path(), (0, 3));
        assert_eq!(c.weight, 0.25);
        c.enable();
        assert!(c.enabled());
    }

    #[test]
    fn test_display() {
        let mut c = ConnectionGene::new(2, 0, 1, 0.5);
        c.disable();
        assert_eq!(c.to_string(), "[2] disabled connection 0 -> 1 weight=0.5");
    }
}
