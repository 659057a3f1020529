use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use itertools::Itertools;
use located_error::prelude::*;
use log::{debug, info, warn};

use pedigree::Population;

use crate::{
    assignment::{GeneAssignment, TraitAssignment},
    error::InferenceError,
    joint::joint_probability,
    model::{GeneCount, ProbabilityModel},
    posterior::Posteriors,
};

/// Default maximal number of individuals accepted for exact enumeration (6^10 ~ 6e7 assignments).
pub const DEFAULT_MAX_INDIVIDUALS: usize = 10;

/// Hard upper bound on the number of individuals: 6^24 assignments still fit within a u64 counter.
pub const MAX_ENUMERABLE_INDIVIDUALS: usize = 24;

const PROGRESS_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} trait assignments ({eta})";

/// Outcome of a full enumeration.
/// # Fields:
/// - `posteriors` : normalized gene and trait distributions of every individual.
/// - `evidence`   : summed joint probability of every enumerated assignment, i.e. the probability
///                  of the observed trait statuses under the model.
/// - `assignments`: number of (gene, trait) assignments that were evaluated.
#[derive(Debug, Clone)]
pub struct Inference {
    pub posteriors : Posteriors,
    pub evidence   : f64,
    pub assignments: u64,
}

/// Exact inference by enumeration, over every assignment of gene counts and trait values which agrees
/// with the observed trait statuses of a population.
pub struct Enumerator<'a> {
    population     : &'a Population,
    model          : &'a ProbabilityModel,
    max_individuals: usize,
    progress       : ProgressBar,
}

impl<'a> Enumerator<'a> {
    pub fn new(population: &'a Population, model: &'a ProbabilityModel) -> Self {
        Self { population, model, max_individuals: DEFAULT_MAX_INDIVIDUALS, progress: ProgressBar::hidden() }
    }

    /// Override the maximal number of individuals accepted for enumeration. Values above
    /// `MAX_ENUMERABLE_INDIVIDUALS` are capped.
    pub fn max_individuals(mut self, max_individuals: usize) -> Self {
        self.max_individuals = max_individuals;
        self
    }

    /// Display enumeration progress within the provided `MultiProgress`
    pub fn with_progress(mut self, multi: &MultiProgress) -> Self {
        let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        self.progress = multi.add(ProgressBar::new(0).with_style(style));
        self
    }

    /// Every trait assignment consistent with the observed trait statuses: individuals with an unknown
    /// status are enumerated on both branches, while observed individuals are fixed to their observation.
    pub fn trait_assignments(&self) -> impl Iterator<Item = TraitAssignment<'a>> + 'a {
        let labels: Vec<&'a str> = self.population.labels().collect();
        self.population.iter()
            .map(|ind| ind.trait_status.candidates().iter().copied())
            .multi_cartesian_product()
            .map(move |values| TraitAssignment::from_values(labels.iter().copied().zip(values)))
    }

    /// Every assignment of 0, 1 or 2 copies of the gene to each individual, each generated exactly once.
    pub fn gene_assignments(&self) -> impl Iterator<Item = GeneAssignment<'a>> + 'a {
        let labels: Vec<&'a str> = self.population.labels().collect();
        std::iter::repeat(GeneCount::ALL)
            .take(labels.len())
            .map(IntoIterator::into_iter)
            .multi_cartesian_product()
            .map(move |counts| GeneAssignment::from_counts(labels.iter().copied().zip(counts)))
    }

    /// Number of trait assignments consistent with the evidence.
    pub fn n_trait_assignments(&self) -> u64 {
        self.population.iter()
            .map(|ind| ind.trait_status.candidates().len() as u64)
            .fold(1, u64::saturating_mul)
    }

    /// Number of gene assignments (3^n). Saturates at `u64::MAX`.
    pub fn n_gene_assignments(&self) -> u64 {
        u32::try_from(self.population.len()).ok()
            .and_then(|n| 3u64.checked_pow(n))
            .unwrap_or(u64::MAX)
    }

    /// Enumerate every consistent (gene, trait) assignment, accumulate their joint probability within
    /// the posterior distributions of each individual, and finally normalize these distributions.
    ///
    /// # Errors
    /// - `EmptyPopulation` if the population has no individual.
    /// - `PopulationTooLarge` if the population exceeds `self.max_individuals`.
    /// - any error raised while computing joint probabilities, or while normalizing.
    pub fn run(&self) -> Result<Inference> {
        let loc_msg = "While performing inference by enumeration";
        self.check_population_size().loc(loc_msg)?;
        self.model.validate().loc(loc_msg)?;

        let n_traits = self.n_trait_assignments();
        let n_genes  = self.n_gene_assignments();
        info!("Enumerating {} assignments ({n_genes} gene x {n_traits} trait assignments) over {} individuals.",
            n_genes.saturating_mul(n_traits), self.population.len()
        );

        let mut posteriors  = Posteriors::new(self.population);
        let mut evidence    = 0.0;
        let mut assignments = 0;
        self.progress.set_length(n_traits);
        for traits in self.trait_assignments() {
            debug_assert!(traits.is_consistent_with(self.population));
            for genes in self.gene_assignments() {
                let p = joint_probability(self.population, self.model, &genes, &traits).loc(loc_msg)?;
                posteriors.update(&genes, &traits, p).loc(loc_msg)?;
                evidence    += p;
                assignments += 1;
            }
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        debug!("Evaluated {assignments} assignments. P(evidence) = {evidence:e}");
        if evidence == 0.0 {
            warn!("The observed trait statuses have a null probability under the provided model.");
        }
        posteriors.normalize().loc(loc_msg)?;
        Ok(Inference { posteriors, evidence, assignments })
    }

    fn check_population_size(&self) -> Result<(), InferenceError> {
        let max = self.max_individuals.min(MAX_ENUMERABLE_INDIVIDUALS);
        match self.population.len() {
            0 => Err(InferenceError::EmptyPopulation),
            size if size > max => Err(InferenceError::PopulationTooLarge{size, max}),
            _ => Ok(())
        }
    }
}

/// Convenience wrapper around `Enumerator::run()`, using default settings.
pub fn infer(population: &Population, model: &ProbabilityModel) -> Result<Inference> {
    Enumerator::new(population, model).run()
}
