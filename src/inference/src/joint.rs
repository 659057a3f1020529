use located_error::prelude::*;
use pedigree::{Individual, Population};

use crate::{
    assignment::{GeneAssignment, TraitAssignment},
    error::InferenceError,
    model::{GeneCount, ProbabilityModel},
};

/// Probability that a parent carrying `parent` copies of the gene passes on the variant to its offspring.
#[inline]
pub fn transmission_probability(model: &ProbabilityModel, parent: GeneCount) -> f64 {
    match parent {
        GeneCount::Zero => model.mutation(),
        GeneCount::One  => 0.5,
        GeneCount::Two  => 1.0 - model.mutation(),
    }
}

/// Probability that an offspring carries `child` copies of the gene, given the gene counts of its parents.
///
/// Each parent independently transmits one copy, which is the variant with probability
/// `transmission_probability()`.
#[inline]
pub fn inheritance_probability(model: &ProbabilityModel, parents: [GeneCount; 2], child: GeneCount) -> f64 {
    let [a, b] = parents.map(|parent| transmission_probability(model, parent));
    match child {
        GeneCount::Two  => a * b,
        GeneCount::One  => a * (1.0 - b) + (1.0 - a) * b,
        GeneCount::Zero => (1.0 - a) * (1.0 - b),
    }
}

/// Probability that `ind` carries the number of copies specified by `genes`.
/// - founders: unconditional probability of the model.
/// - offspring: inheritance probability, given the gene counts assigned to its parents.
///
/// # Errors
/// - `MissingParent` if any parent of `ind` is not part of `population`.
pub fn gene_factor(population: &Population, model: &ProbabilityModel, genes: &GeneAssignment, ind: &Individual) -> Result<f64, InferenceError> {
    let own = genes.genes(&ind.label);
    let Some(parents) = ind.parents() else {
        return Ok(model.gene(own))
    };

    let mut parent_genes = [GeneCount::Zero; 2];
    for (slot, parent) in parent_genes.iter_mut().zip(parents.iter()) {
        // `Population` rejects unknown parents on insertion, so this only guards hand-built individuals.
        if !population.contains(parent) {
            return Err(InferenceError::MissingParent{offspring: ind.label.clone(), parent: parent.clone()})
        }
        *slot = genes.genes(parent);
    }
    Ok(inheritance_probability(model, parent_genes, own))
}

/// Probability that `ind` expresses (or not) the trait, as specified by `traits`, given its assigned gene count.
#[inline]
pub fn trait_factor(model: &ProbabilityModel, genes: &GeneAssignment, traits: &TraitAssignment, ind: &Individual) -> f64 {
    model.trait_given(genes.genes(&ind.label), traits.has_trait(&ind.label))
}

/// Compute the joint probability that:
/// - every individual of `genes.one_gene()` carries one copy of the gene,
/// - every individual of `genes.two_genes()` carries two copies of the gene,
/// - every other individual carries no copy of the gene,
/// - every individual of `traits.have_trait()` expresses the trait,
/// - every other individual does not express the trait.
///
/// # Errors
/// - `UnknownIndividual` if an assignment references an individual outside of `population`.
/// - `OverlappingGeneSets` if an individual is assigned both one and two copies.
/// - `MissingParent` if a parent reference of the population cannot be resolved.
pub fn joint_probability(population: &Population, model: &ProbabilityModel, genes: &GeneAssignment, traits: &TraitAssignment) -> Result<f64> {
    let loc_msg = "While computing the joint probability of an assignment";
    debug_assert!(model.validate().is_ok(), "Invalid probability model: {:?}", model.validate());
    genes.validate(population).loc(loc_msg)?;
    traits.validate(population).loc(loc_msg)?;

    let mut probability = 1.0;
    for ind in population {
        probability *= gene_factor(population, model, genes, ind)
            .with_loc(|| format!("{loc_msg}: failed to compute the gene factor of '{}'", ind.label))?;
        probability *= trait_factor(model, genes, traits, ind);
    }
    Ok(probability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use pedigree::TraitStatus;

    const EPSILON: f64 = 1e-12;

    fn family() -> Result<Population> {
        let mut population = Population::new();
        population.add_individual("Harry", None, TraitStatus::Unknown)?;
        population.add_individual("James", None, TraitStatus::Present)?;
        population.add_individual("Lily", None, TraitStatus::Absent)?;
        population.set_relationship("Harry", ["Lily", "James"])?;
        Ok(population)
    }

    fn single(status: TraitStatus) -> Result<Population> {
        let mut population = Population::new();
        population.add_individual("A", None, status)?;
        Ok(population)
    }

    #[test]
    fn transmission() {
        let model = ProbabilityModel::default();
        assert_eq!(transmission_probability(&model, GeneCount::Zero), 0.01);
        assert_eq!(transmission_probability(&model, GeneCount::One), 0.5);
        assert_eq!(transmission_probability(&model, GeneCount::Two), 0.99);
    }

    #[test]
    fn inheritance_from_non_carriers() {
        let model = ProbabilityModel::default();
        let parents = [GeneCount::Zero, GeneCount::Zero];
        assert!(approx_eq!(f64, inheritance_probability(&model, parents, GeneCount::Two), 0.0001, epsilon = EPSILON));
        assert!(approx_eq!(f64, inheritance_probability(&model, parents, GeneCount::One), 0.0198, epsilon = EPSILON));
        assert!(approx_eq!(f64, inheritance_probability(&model, parents, GeneCount::Zero), 0.9801, epsilon = EPSILON));
    }

    #[test]
    fn inheritance_sums_to_one() {
        let model = ProbabilityModel::default();
        for mother in GeneCount::ALL {
            for father in GeneCount::ALL {
                let sum: f64 = GeneCount::ALL.iter()
                    .map(|child| inheritance_probability(&model, [mother, father], *child))
                    .sum();
                assert!(approx_eq!(f64, sum, 1.0, epsilon = EPSILON), "{mother} x {father} -> {sum}");
            }
        }
    }

    #[test]
    fn inheritance_is_symmetric() {
        let model = ProbabilityModel::default();
        for child in GeneCount::ALL {
            let lhs = inheritance_probability(&model, [GeneCount::Two, GeneCount::Zero], child);
            let rhs = inheritance_probability(&model, [GeneCount::Zero, GeneCount::Two], child);
            assert!(approx_eq!(f64, lhs, rhs, epsilon = EPSILON));
        }
    }

    #[test]
    fn founder_without_gene() -> Result<()> {
        let model = ProbabilityModel::default();
        let population = family()?;
        let lily = population.try_get("Lily")?;
        for genes in [GeneAssignment::new(), GeneAssignment::from_sets(["Harry"], ["James"])] {
            assert_eq!(gene_factor(&population, &model, &genes, lily)?, model.gene(GeneCount::Zero));
        }
        Ok(())
    }

    #[test]
    fn single_individual_no_gene_no_trait() -> Result<()> {
        let model = ProbabilityModel::default();
        let population = single(TraitStatus::Unknown)?;
        let p = joint_probability(&population, &model, &GeneAssignment::new(), &TraitAssignment::new())?;
        assert!(approx_eq!(f64, p, 0.9504, epsilon = EPSILON));
        Ok(())
    }

    #[test]
    fn single_individual_sums_to_one() -> Result<()> {
        let model = ProbabilityModel::default();
        let population = single(TraitStatus::Unknown)?;
        let mut total = 0.0;
        for genes in GeneCount::ALL {
            for has_trait in [false, true] {
                let gene_assignment  = GeneAssignment::from_counts([("A", genes)]);
                let trait_assignment = TraitAssignment::from_values([("A", has_trait)]);
                total += joint_probability(&population, &model, &gene_assignment, &trait_assignment)?;
            }
        }
        assert!(approx_eq!(f64, total, 1.0, epsilon = EPSILON));
        Ok(())
    }

    #[test]
    fn family_joint_probability() -> Result<()> {
        let model = ProbabilityModel::default();
        let population = family()?;
        let genes  = GeneAssignment::from_sets(["Harry"], ["James"]);
        let traits = TraitAssignment::from_set(["James"]);
        let p = joint_probability(&population, &model, &genes, &traits)?;
        assert!(approx_eq!(f64, p, 0.0026643247488, epsilon = EPSILON));
        Ok(())
    }

    #[test]
    fn explicit_defaults_match_implicit_defaults() -> Result<()> {
        let model = ProbabilityModel::default();
        let population = family()?;
        let implicit = GeneAssignment::from_sets([], ["James"]);
        let explicit = GeneAssignment::from_counts([("Harry", GeneCount::Zero), ("Lily", GeneCount::Zero), ("James", GeneCount::Two)]);
        let traits_implicit = TraitAssignment::from_set(["James"]);
        let traits_explicit = TraitAssignment::from_values([("Harry", false), ("Lily", false), ("James", true)]);
        assert_eq!(
            joint_probability(&population, &model, &implicit, &traits_implicit)?,
            joint_probability(&population, &model, &explicit, &traits_explicit)?,
        );
        Ok(())
    }

    #[test]
    fn unknown_individual_is_rejected() -> Result<()> {
        let model = ProbabilityModel::default();
        let population = family()?;
        let err = joint_probability(&population, &model, &GeneAssignment::from_sets(["Ron"], []), &TraitAssignment::new())
            .expect_err("Ron is not part of the family");
        assert_eq!(err.downcast_ref::<InferenceError>(), Some(&InferenceError::UnknownIndividual("Ron".into())));

        let err = joint_probability(&population, &model, &GeneAssignment::new(), &TraitAssignment::from_set(["Ron"]))
            .expect_err("Ron is not part of the family");
        assert!(matches!(err.downcast_ref::<InferenceError>(), Some(InferenceError::UnknownIndividual(_))));
        Ok(())
    }

    #[test]
    fn unresolved_parent_is_rejected() -> Result<()> {
        let model = ProbabilityModel::default();
        let population = family()?;
        let ron = Individual::new("Ron", Some(["Molly", "Arthur"]), TraitStatus::Unknown);
        let err = gene_factor(&population, &model, &GeneAssignment::new(), &ron).expect_err("Molly is not part of the family");
        assert_eq!(err, InferenceError::MissingParent{offspring: "Ron".into(), parent: "Molly".into()});
        Ok(())
    }

    #[test]
    fn overlapping_sets_are_rejected() -> Result<()> {
        let model = ProbabilityModel::default();
        let population = family()?;
        let genes = GeneAssignment::from_sets(["James"], ["James"]);
        let err = joint_probability(&population, &model, &genes, &TraitAssignment::new()).expect_err("Overlap should fail");
        assert!(matches!(err.downcast_ref::<InferenceError>(), Some(InferenceError::OverlappingGeneSets(_))));
        Ok(())
    }

    #[test]
    fn result_is_a_probability() -> Result<()> {
        let model = ProbabilityModel::default();
        let population = family()?;
        for one in [vec![], vec!["Harry"], vec!["Harry", "Lily"]] {
            for two in [vec![], vec!["James"]] {
                let genes = GeneAssignment::from_sets(one.clone(), two.clone());
                let p = joint_probability(&population, &model, &genes, &TraitAssignment::from_set(["James"]))?;
                assert!(p > 0.0 && p <= 1.0);
            }
        }
        Ok(())
    }
}
