use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid gene count '{0}'. Individuals may only carry 0, 1 or 2 copies of the gene")]
    InvalidGeneCount(u8),

    #[error("Missing unconditional probability for {0} cop(y|ies) of the gene")]
    MissingGeneProbability(u8),

    #[error("Missing probability of trait={has_trait} given {genes} cop(y|ies) of the gene")]
    MissingTraitProbability{genes: u8, has_trait: bool},

    #[error("{name} must lie within [0, 1]. Got {value}")]
    OutOfRange{name: String, value: f64},

    #[error("Unconditional gene probabilities must sum to 1. Got {0}")]
    UnnormalizedGeneTable(f64),

    #[error("Trait probabilities given {genes} cop(y|ies) of the gene must sum to 1. Got {sum}")]
    UnnormalizedTraitTable{genes: u8, sum: f64},
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Assignment references individual '{0}', which is not part of the population")]
    UnknownIndividual(String),

    #[error("Individual '{0}' is assigned both one and two copies of the gene")]
    OverlappingGeneSets(String),

    #[error("Parent '{parent}' of individual '{offspring}' is not part of the population")]
    MissingParent{offspring: String, parent: String},

    #[error("Invalid joint probability weight: {0}")]
    InvalidWeight(f64),

    #[error("Cannot normalize the {distribution} distribution of '{label}': its entries sum to {sum}")]
    DegenerateDistribution{label: String, distribution: &'static str, sum: f64},

    #[error("Cannot perform inference on an empty population")]
    EmptyPopulation,

    #[error("Population contains {size} individuals, which exceeds the enumeration limit ({max}). Exact inference would require evaluating 6^{size} assignments")]
    PopulationTooLarge{size: usize, max: usize},
}
