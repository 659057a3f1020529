use indexmap::IndexMap;
use located_error::prelude::*;
use log::trace;

mod individual;
pub use individual::{Individual, Parents, TraitStatus};

mod error;
pub use error::PopulationError;

/// A family of individuals, linked through parent-offspring relationships.
/// # Fields:
/// - `individuals`: IndexMap containing all members of the population (founders and offspring)
///                  - Key  : (String)     - Label of the individual
///                  - Value: (Individual) - the individual itself.
///                  Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: IndexMap<String, Individual>,
}

impl Population {
    /// Instantiate a blank population.
    pub fn new() -> Population {
        Population { individuals: IndexMap::new() }
    }

    /// Instantiate and include a new individual within this population.
    /// # Arguments:
    /// - `label`       : name of the individual (e.g. "Harry")
    /// - `parents`     : Optional name of the parents (e.g. ["Lily", "James"]).
    ///                   This should be set to `None` if the individual is a founder.
    /// - `trait_status`: observed trait status of the individual.
    ///
    /// # Errors:
    /// - `EmptyLabel` if `label` is empty.
    /// - `DuplicateIndividual` if `label` is already part of this population.
    /// - `UnknownParent` if any of the parents cannot be found within `self.individuals`
    /// - `SelfParent` if the individual is declared as its own parent.
    pub fn add_individual(&mut self, label: &str, parents: Option<[&str; 2]>, trait_status: TraitStatus) -> Result<()> {
        use PopulationError::{DuplicateIndividual, EmptyLabel};
        let loc_msg = || format!("While attempting to add individual '{label}' to the population");
        if label.is_empty() {
            return Err(EmptyLabel).with_loc(loc_msg)
        }
        if self.individuals.contains_key(label) {
            return Err(DuplicateIndividual(label.to_string())).with_loc(loc_msg)
        }
        if let Some(parents) = parents {
            self.check_parents(label, parents).with_loc(loc_msg)?;
        }
        trace!("Adding individual {label} (parents: {parents:?}, trait: {trait_status})");
        self.individuals.insert(label.to_string(), Individual::new(label, parents, trait_status));
        Ok(())
    }

    /// Define the parents of a given offspring individual.
    /// # Arguments:
    /// - `ind`    : name of the target individual.
    /// - `parents`: names of the target individual's parents.
    ///
    /// # Errors
    /// - `UnknownIndividual` if the target individual cannot be found.
    /// - `UnknownParent` if any of the parents cannot be found within `self.individuals`
    /// - `SelfParent` if `ind` is one of the provided parents.
    pub fn set_relationship(&mut self, ind: &str, parents: [&str; 2]) -> Result<()> {
        let loc_msg = || format!("While attempting to set the parents of '{ind}'");
        self.check_parents(ind, parents).with_loc(loc_msg)?;
        self.individuals.get_mut(ind)
            .ok_or_else(|| PopulationError::UnknownIndividual(ind.to_string()))
            .with_loc(loc_msg)?
            .set_parents(parents);
        Ok(())
    }

    fn check_parents(&self, offspring: &str, parents: [&str; 2]) -> Result<(), PopulationError> {
        for parent in parents {
            if parent == offspring {
                return Err(PopulationError::SelfParent(offspring.to_string()))
            }
            if !self.individuals.contains_key(parent) {
                return Err(PopulationError::UnknownParent{offspring: offspring.to_string(), parent: parent.to_string()})
            }
        }
        Ok(())
    }

    /// Access an individual through its label.
    pub fn get(&self, label: &str) -> Option<&Individual> {
        self.individuals.get(label)
    }

    /// Access an individual through its label, and raise an `UnknownIndividual` error if it is missing.
    pub fn try_get(&self, label: &str) -> Result<&Individual, PopulationError> {
        self.get(label).ok_or_else(|| PopulationError::UnknownIndividual(label.to_string()))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.individuals.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Iterate over every individual, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.values()
    }

    /// Iterate over the labels of every individual, in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.individuals.keys().map(String::as_str)
    }

    /// Iterate over the founder individuals of this population.
    pub fn founders(&self) -> impl Iterator<Item = &Individual> {
        self.iter().filter(|ind| ind.is_founder())
    }

    /// Iterate over the offspring of this population.
    pub fn offsprings(&self) -> impl Iterator<Item = &Individual> {
        self.iter().filter(|ind| !ind.is_founder())
    }

    /// Iterate over the individuals whose trait status was observed.
    pub fn observed(&self) -> impl Iterator<Item = &Individual> {
        self.iter().filter(|ind| ind.trait_status != TraitStatus::Unknown)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = indexmap::map::Values<'a, String, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.values()
    }
}
