//! Alignment of two genotypes by historical mark, and the operators built on it: crossover and
//! the excess / disjoint dissimilarity used for fitness sharing.

use crate::{
    constants::{
        TOL_CROSSOVER_PICK_FITTER_PROB, TOL_DISJOINT_COEFFICIENT, TOL_EXCESS_COEFFICIENT,
        TOL_WEIGHT_DIFF_COEFFICIENT,
    },
    genome::{GeneRef, Genotype, Mark},
    random::Happens,
};
use core::cmp::{max, Ordering};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Genes sharing one mark: ( left side, right side )
pub type GenePair<'a> = (Option<GeneRef<'a>>, Option<GeneRef<'a>>);

/// Merge the genes of both genotypes by mark, ascending. One pair per distinct mark present in
/// either genotype.
pub fn align<'a>(l: &'a Genotype, r: &'a Genotype) -> Vec<GenePair<'a>> {
    let mut l_genes = l.genes_by_mark().into_iter().peekable();
    let mut r_genes = r.genes_by_mark().into_iter().peekable();
    let mut pairs = Vec::with_capacity(max(l.num_genes(), r.num_genes()));

    loop {
        let pair = match (
            l_genes.peek().map(GeneRef::mark),
            r_genes.peek().map(GeneRef::mark),
        ) {
            (None, None) => break,
            (Some(_), None) => (l_genes.next(), None),
            (None, Some(_)) => (None, r_genes.next()),
            (Some(l_mark), Some(r_mark)) => match l_mark.cmp(&r_mark) {
                Ordering::Less => (l_genes.next(), None),
                Ordering::Greater => (None, r_genes.next()),
                Ordering::Equal => (l_genes.next(), r_genes.next()),
            },
        };
        pairs.push(pair);
    }

    pairs
}

/// Produce a child from two parents without touching either. Matched genes come from either
/// side by a fair coin, genes only the fitter parent has are always inherited, and genes only
/// the less fit parent has never are. Inherited genes keep their marks, flags and weights.
pub fn crossover(
    more_fit: &Genotype,
    less_fit: &Genotype,
    rng: &mut impl RngCore,
) -> Genotype {
    let mut child = Genotype::new();
    for pair in align(more_fit, less_fit) {
        match pair {
            (Some(fit), Some(less)) => {
                if rng.happens(TOL_CROSSOVER_PICK_FITTER_PROB) {
                    child.inherit(fit)
                } else {
                    child.inherit(less)
                }
            }
            (Some(fit), None) => child.inherit(fit),
            (None, _) => {}
        }
    }
    child
}

fn mark_range(genotype: &Genotype) -> Option<(Mark, Mark)> {
    let mut marks = genotype
        .neuron_genes()
        .iter()
        .map(|n| n.mark)
        .chain(genotype.connection_genes().iter().map(|c| c.mark));
    let first = marks.next()?;
    Some(marks.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m))))
}

#[inline]
fn outside(mark: Mark, range: Option<(Mark, Mark)>) -> bool {
    !matches!(range, Some((lo, hi)) if (lo..=hi).contains(&mark))
}

/// Count genes present in only one genotype as ( excess, disjoint ). A gene is excess when its
/// mark falls outside the other genotype's mark range, disjoint otherwise.
pub fn excess_disjoint(l: &Genotype, r: &Genotype) -> (usize, usize) {
    let (l_range, r_range) = (mark_range(l), mark_range(r));
    align(l, r)
        .into_iter()
        .fold((0, 0), |(excess, disjoint), pair| match pair {
            (Some(g), None) if outside(g.mark(), r_range) => (excess + 1, disjoint),
            (None, Some(g)) if outside(g.mark(), l_range) => (excess + 1, disjoint),
            (Some(_), None) | (None, Some(_)) => (excess, disjoint + 1),
            _ => (excess, disjoint),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub excess: f64,
    pub disjoint: f64,
    /// accepted for configuration, not part of the distance
    pub weight_diff: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            excess: TOL_EXCESS_COEFFICIENT,
            disjoint: TOL_DISJOINT_COEFFICIENT,
            weight_diff: TOL_WEIGHT_DIFF_COEFFICIENT,
        }
    }
}

/// `(disjoint_coef * disjoint + excess_coef * excess) / max(num_genes)`. Two empty genotypes
/// are identical.
pub fn dissimilarity(l: &Genotype, r: &Genotype, coefficients: &Coefficients) -> f64 {
    let size = max(l.num_genes(), r.num_genes());
    if size == 0 {
        return 0.;
    }
    let (excess, disjoint) = excess_disjoint(l, r);
    (coefficients.disjoint * disjoint as f64 + coefficients.excess * excess as f64) / size as f64
}

/// [dissimilarity] with the default coefficients
#[inline]
pub fn delta(l: &Genotype, r: &Genotype) -> f64 {
    dissimilarity(l, r, &Coefficients::default())
}
