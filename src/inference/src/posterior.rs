use indexmap::IndexMap;
use located_error::prelude::*;
use log::trace;

use pedigree::Population;

use crate::{
    assignment::{check_known, GeneAssignment, TraitAssignment},
    error::InferenceError,
    model::GeneCount,
};

/// Gene and trait distributions of a single individual.
/// # Fields:
/// - `genes` : probability mass of carrying 0, 1 or 2 copies of the gene (indexed by `GeneCount`)
/// - `traits`: probability mass of not expressing / expressing the trait (indexed by `has_trait as usize`)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Distribution {
    genes : [f64; 3],
    traits: [f64; 2],
}

impl Distribution {
    /// Build a distribution from raw probability masses. `traits` is ordered as `[false, true]`
    pub fn new(genes: [f64; 3], traits: [f64; 2]) -> Self {
        Self { genes, traits }
    }

    #[inline]
    pub fn gene(&self, genes: GeneCount) -> f64 {
        self.genes[genes.index()]
    }

    #[inline]
    pub fn has_trait(&self, has_trait: bool) -> f64 {
        self.traits[has_trait as usize]
    }

    pub fn gene_sum(&self) -> f64 {
        self.genes.iter().sum()
    }

    pub fn trait_sum(&self) -> f64 {
        self.traits.iter().sum()
    }

    #[inline]
    fn add(&mut self, genes: GeneCount, has_trait: bool, p: f64) {
        self.genes[genes.index()]       += p;
        self.traits[has_trait as usize] += p;
    }

    /// Check both distributions can be normalized, and return their respective sums.
    fn normalizing_constants(&self, label: &str) -> Result<(f64, f64), InferenceError> {
        let check = |distribution: &'static str, sum: f64| match sum.is_finite() && sum > 0.0 {
            true  => Ok(sum),
            false => Err(InferenceError::DegenerateDistribution{label: label.to_string(), distribution, sum}),
        };
        Ok((check("gene", self.gene_sum())?, check("trait", self.trait_sum())?))
    }

    fn scale(&mut self, gene_sum: f64, trait_sum: f64) {
        self.genes.iter_mut().for_each(|p| *p /= gene_sum);
        self.traits.iter_mut().for_each(|p| *p /= trait_sum);
    }
}

/// Per-individual posterior distributions, accumulated over every enumerated assignment.
///
/// Entries are created once, zero-initialized, for every individual of the population. `update()` is then
/// expected to be called exactly once per (gene, trait) assignment, followed by a single call to `normalize()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Posteriors {
    distributions: IndexMap<String, Distribution>,
}

impl Posteriors {
    /// Create zero-initialized distributions for every member of `population`.
    pub fn new(population: &Population) -> Self {
        let distributions = population.labels()
            .map(|label| (label.to_string(), Distribution::default()))
            .collect();
        Self { distributions }
    }

    /// Add the joint probability `p` of an assignment to the distributions of every individual.
    /// Each individual's gene (resp. trait) distribution receives `p` at the gene count (resp. trait value)
    /// it was assigned.
    ///
    /// # Errors
    /// - `UnknownIndividual` if an assignment references an individual without distributions.
    /// - `InvalidWeight` if `p` is negative, or not finite.
    pub fn update(&mut self, genes: &GeneAssignment, traits: &TraitAssignment, p: f64) -> Result<()> {
        let loc_msg = "While updating posterior distributions";
        if !(p.is_finite() && p >= 0.0) {
            return Err(InferenceError::InvalidWeight(p)).loc(loc_msg)
        }
        let is_known = |label: &str| self.distributions.contains_key(label);
        check_known(genes.one_gene().chain(genes.two_genes()), &is_known).loc(loc_msg)?;
        check_known(traits.have_trait(), &is_known).loc(loc_msg)?;

        for (label, distribution) in self.distributions.iter_mut() {
            distribution.add(genes.genes(label), traits.has_trait(label), p);
        }
        Ok(())
    }

    /// Rescale every distribution so that it sums to one, preserving the ratios between its entries.
    ///
    /// Every distribution is checked before anything gets rescaled: on error, `self` is left untouched.
    ///
    /// # Errors
    /// - `DegenerateDistribution` if any gene or trait distribution sums to zero (or is not finite).
    pub fn normalize(&mut self) -> Result<()> {
        let constants = self.distributions.iter()
            .map(|(label, distribution)| distribution.normalizing_constants(label))
            .collect::<Result<Vec<_>, _>>()
            .loc("While normalizing posterior distributions")?;

        for ((label, distribution), (gene_sum, trait_sum)) in self.distributions.iter_mut().zip(constants) {
            trace!("Normalizing {label}: gene sum = {gene_sum:e} | trait sum = {trait_sum:e}");
            distribution.scale(gene_sum, trait_sum);
        }
        Ok(())
    }

    /// Check whether every distribution sums to one, within `tolerance`.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        self.distributions.values().all(|distribution| {
            (distribution.gene_sum() - 1.0).abs() <= tolerance && (distribution.trait_sum() - 1.0).abs() <= tolerance
        })
    }

    pub fn get(&self, label: &str) -> Option<&Distribution> {
        self.distributions.get(label)
    }

    /// Iterate over (label, distribution) pairs, in population order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Distribution)> {
        self.distributions.iter().map(|(label, distribution)| (label.as_str(), distribution))
    }

    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }
}
