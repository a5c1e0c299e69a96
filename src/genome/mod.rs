//! The gene store: neuron and connection genes identified by historical marks, and the
//! [Genotype] that owns them.

pub mod connection;
pub mod neuron;

pub use connection::ConnectionGene;
pub use neuron::{Layer, Neuron, NeuronGene, NeuronParams};

use crate::error::{EvoError, EvoResult};
use core::fmt::Write;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Historical mark ( innovation number ) of a gene
pub type Mark = usize;

/// Fields shared by both gene kinds
pub trait Gene {
    /// permanent identity, assigned once by a [crate::Mutator]
    fn mark(&self) -> Mark;

    /// a disabled gene is logically deleted, but kept for lineage
    fn enabled(&self) -> bool;

    fn enable(&mut self);

    fn disable(&mut self);
}

/// A borrowed gene of either kind, used wherever genes of both kinds are walked in mark
/// order ( alignment, crossover, dissimilarity )
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneRef<'a> {
    Neuron(&'a NeuronGene),
    Connection(&'a ConnectionGene),
}

impl GeneRef<'_> {
    #[inline]
    pub fn mark(&self) -> Mark {
        match self {
            Self::Neuron(n) => n.mark,
            Self::Connection(c) => c.mark,
        }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        match self {
            Self::Neuron(n) => n.enabled,
            Self::Connection(c) => c.enabled,
        }
    }
}

/// Genetic encoding of a brain. Connections refer to neurons by mark only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genotype {
    neuron_genes: Vec<NeuronGene>,
    connection_genes: Vec<ConnectionGene>,
}

impl Genotype {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn neuron_genes(&self) -> &[NeuronGene] {
        &self.neuron_genes
    }

    #[inline]
    pub fn neuron_genes_mut(&mut self) -> &mut [NeuronGene] {
        &mut self.neuron_genes
    }

    #[inline]
    pub fn connection_genes(&self) -> &[ConnectionGene] {
        &self.connection_genes
    }

    #[inline]
    pub fn connection_genes_mut(&mut self) -> &mut [ConnectionGene] {
        &mut self.connection_genes
    }

    /// Append a neuron gene. Mark uniqueness is the caller's concern.
    #[inline]
    pub fn add_neuron_gene(&mut self, gene: NeuronGene) {
        self.neuron_genes.push(gene);
    }

    /// Append a connection gene. Mark uniqueness is the caller's concern.
    #[inline]
    pub fn add_connection_gene(&mut self, gene: ConnectionGene) {
        self.connection_genes.push(gene);
    }

    /// Append a copy of `gene` to the sequence of its kind, keeping its mark, enabled flag and
    /// parameters untouched
    pub fn inherit(&mut self, gene: GeneRef<'_>) {
        match gene {
            GeneRef::Neuron(n) => self.add_neuron_gene(n.clone()),
            GeneRef::Connection(c) => self.add_connection_gene(c.clone()),
        }
    }

    #[inline]
    pub fn num_genes(&self) -> usize {
        self.neuron_genes.len() + self.connection_genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_genes() == 0
    }

    /// Linear scan over neurons then connections, returning the first gene carrying `mark`
    pub fn find_gene_by_mark(&self, mark: Mark) -> Option<GeneRef<'_>> {
        self.neuron_genes
            .iter()
            .find(|n| n.mark == mark)
            .map(GeneRef::Neuron)
            .or_else(|| {
                self.connection_genes
                    .iter()
                    .find(|c| c.mark == mark)
                    .map(GeneRef::Connection)
            })
    }

    pub fn find_neuron_by_mark(&self, mark: Mark) -> Option<&NeuronGene> {
        self.neuron_genes.iter().find(|n| n.mark == mark)
    }

    /// Whether an *enabled* connection already runs from `mark_from` to `mark_to`.
    /// Disabled duplicates are ignored.
    pub fn connection_exists(&self, mark_from: Mark, mark_to: Mark) -> bool {
        self.connection_genes
            .iter()
            .any(|c| c.enabled && c.mark_from == mark_from && c.mark_to == mark_to)
    }

    /// Every connection gene's endpoints resolve to a neuron gene of this genotype
    pub fn check_validity(&self) -> bool {
        self.dangling_connection().is_none()
    }

    /// [Genotype::check_validity], but failing with a dump of the genotype
    pub fn validate(&self) -> EvoResult<()> {
        match self.dangling_connection() {
            None => Ok(()),
            Some(c) => Err(EvoError::InvalidGenotype {
                reason: format!(
                    "connection {} ({} -> {}) references a missing neuron",
                    c.mark, c.mark_from, c.mark_to
                ),
                dump: self.debug_string(),
            }),
        }
    }

    fn dangling_connection(&self) -> Option<&ConnectionGene> {
        let marks = self
            .neuron_genes
            .iter()
            .map(|n| n.mark)
            .collect::<FxHashSet<_>>();
        self.connection_genes
            .iter()
            .find(|c| !marks.contains(&c.mark_from) || !marks.contains(&c.mark_to))
    }

    /// Independent deep copy; marks, weights and params are preserved
    #[inline]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// All genes of both kinds, sorted by mark ascending
    pub fn genes_by_mark(&self) -> Vec<GeneRef<'_>> {
        let mut genes = Vec::with_capacity(self.num_genes());
        genes.extend(self.neuron_genes.iter().map(GeneRef::Neuron));
        genes.extend(self.connection_genes.iter().map(GeneRef::Connection));
        genes.sort_by_key(GeneRef::mark);
        genes
    }

    /// Highest mark carried by any gene
    pub fn max_mark(&self) -> Option<Mark> {
        self.neuron_genes
            .iter()
            .map(|n| n.mark)
            .chain(self.connection_genes.iter().map(|c| c.mark))
            .max()
    }

    /// Deterministic listing of every gene in storage order, neurons first
    pub fn debug_string(&self) -> String {
        let mut out = String::new();
        out.push_str("neurons:\n");
        for n in &self.neuron_genes {
            let _ = writeln!(out, "  {n}");
        }
        out.push_str("connections:\n");
        for c in &self.connection_genes {
            let _ = writeln!(out, "  {c}");
        }
        out
    }

    pub fn to_string(&self) -> EvoResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> EvoResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> EvoResult<()> {
        fs::write(path, self.to_string()?)?;
        Ok(())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> EvoResult<Self> {
        Self::from_str(&fs::read_to_string(path)?)
    }
}
