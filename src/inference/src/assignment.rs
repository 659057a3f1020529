use ahash::AHashSet;

use pedigree::Population;

use crate::{error::InferenceError, model::GeneCount};

/// A complete assignment of gene counts to every individual of a population.
///
/// Represented by the set of individuals carrying exactly one copy, and the set of individuals
/// carrying exactly two copies. Any individual absent from both sets carries no copy of the gene.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneAssignment<'a> {
    one_gene : AHashSet<&'a str>,
    two_genes: AHashSet<&'a str>,
}

impl<'a> GeneAssignment<'a> {
    /// An assignment where no individual carries the gene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an assignment from raw sets. Note that the two sets are not checked for overlap here:
    /// see `GeneAssignment::validate()`
    pub fn from_sets<I, J>(one_gene: I, two_genes: J) -> Self
    where I: IntoIterator<Item = &'a str>,
          J: IntoIterator<Item = &'a str>,
    {
        Self { one_gene: one_gene.into_iter().collect(), two_genes: two_genes.into_iter().collect() }
    }

    /// Build an assignment from explicit (label, gene count) pairs.
    pub fn from_counts<I>(counts: I) -> Self
    where I: IntoIterator<Item = (&'a str, GeneCount)>
    {
        counts.into_iter().fold(Self::new(), |mut assignment, (label, genes)| {
            assignment.assign(label, genes);
            assignment
        })
    }

    /// Assign `genes` copies to `label`, overriding any previous assignment.
    pub fn assign(&mut self, label: &'a str, genes: GeneCount) {
        self.one_gene.remove(label);
        self.two_genes.remove(label);
        match genes {
            GeneCount::Zero => {},
            GeneCount::One  => {self.one_gene.insert(label);},
            GeneCount::Two  => {self.two_genes.insert(label);},
        }
    }

    /// Gene count of `label`. Individuals absent from both sets carry no copy.
    #[inline]
    pub fn genes(&self, label: &str) -> GeneCount {
        if self.two_genes.contains(label) {
            GeneCount::Two
        } else if self.one_gene.contains(label) {
            GeneCount::One
        } else {
            GeneCount::Zero
        }
    }

    pub fn one_gene(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.one_gene.iter().copied()
    }

    pub fn two_genes(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.two_genes.iter().copied()
    }

    /// Ensure both sets only reference known individuals, and do not overlap.
    /// # Errors
    /// - `UnknownIndividual` if any label is not part of `population`
    /// - `OverlappingGeneSets` if a label is found within both sets.
    pub fn validate(&self, population: &Population) -> Result<(), InferenceError> {
        check_known(self.one_gene.iter().chain(self.two_genes.iter()).copied(), |label| population.contains(label))?;
        match self.one_gene.intersection(&self.two_genes).next() {
            Some(label) => Err(InferenceError::OverlappingGeneSets(label.to_string())),
            None        => Ok(()),
        }
    }
}

/// A complete assignment of trait expression to every individual of a population.
/// Individuals absent from the set do not express the trait.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraitAssignment<'a> {
    have_trait: AHashSet<&'a str>,
}

impl<'a> TraitAssignment<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_set<I>(have_trait: I) -> Self
    where I: IntoIterator<Item = &'a str>
    {
        Self { have_trait: have_trait.into_iter().collect() }
    }

    /// Build an assignment from explicit (label, has_trait) pairs.
    pub fn from_values<I>(values: I) -> Self
    where I: IntoIterator<Item = (&'a str, bool)>
    {
        Self::from_set(values.into_iter().filter_map(|(label, has_trait)| has_trait.then_some(label)))
    }

    #[inline]
    pub fn has_trait(&self, label: &str) -> bool {
        self.have_trait.contains(label)
    }

    pub fn have_trait(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.have_trait.iter().copied()
    }

    /// Check whether this assignment agrees with every observed trait status of `population`.
    pub fn is_consistent_with(&self, population: &Population) -> bool {
        population.iter().all(|ind| ind.trait_status.is_consistent_with(self.has_trait(&ind.label)))
    }

    /// Ensure this assignment only references known individuals.
    pub fn validate(&self, population: &Population) -> Result<(), InferenceError> {
        check_known(self.have_trait.iter().copied(), |label| population.contains(label))
    }
}

/// Return an `UnknownIndividual` error for the first label rejected by `is_known`.
pub(crate) fn check_known<'a, I, F>(mut labels: I, is_known: F) -> Result<(), InferenceError>
where I: Iterator<Item = &'a str>,
      F: Fn(&str) -> bool,
{
    match labels.find(|label| !is_known(label)) {
        Some(label) => Err(InferenceError::UnknownIndividual(label.to_string())),
        None        => Ok(()),
    }
}
