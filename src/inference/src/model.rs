use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::error::ModelError;

/// Tolerance used when checking that a probability table sums to one.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Number of copies of the target gene variant carried by an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneCount {
    Zero = 0,
    One  = 1,
    Two  = 2,
}

impl GeneCount {
    pub const ALL: [GeneCount; 3] = [Self::Zero, Self::One, Self::Two];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for GeneCount {
    type Error = ModelError;

    fn try_from(copies: u8) -> Result<Self, Self::Error> {
        match copies {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(ModelError::InvalidGeneCount(other)),
        }
    }
}

impl From<GeneCount> for u8 {
    fn from(genes: GeneCount) -> u8 {
        genes as u8
    }
}

impl std::fmt::Display for GeneCount {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Fixed conditional probability tables of the network.
/// # Fields:
/// - `gene`    : unconditional probability of carrying 0, 1 or 2 copies of the gene (indexed by `GeneCount`).
/// - `traits`  : probability of (not) expressing the trait given the gene count. `traits[genes][has_trait as usize]`
/// - `mutation`: probability that a transmitted copy of the gene flips state during inheritance.
///
/// (De)serializes as:
/// ```yaml
/// gene:
///   0: 0.96
///   1: 0.03
///   2: 0.01
/// trait:
///   0: {false: 0.99, true: 0.01}
///   1: {false: 0.44, true: 0.56}
///   2: {false: 0.35, true: 0.65}
/// mutation: 0.01
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelTables", into = "ModelTables")]
pub struct ProbabilityModel {
    gene    : [f64; 3],
    traits  : [[f64; 2]; 3],
    mutation: f64,
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self {
            gene    : [0.96, 0.03, 0.01],
            traits  : [
                [0.99, 0.01],
                [0.44, 0.56],
                [0.35, 0.65],
            ],
            mutation: 0.01,
        }
    }
}

impl ProbabilityModel {
    /// Build and validate a new probability model.
    /// # Errors
    /// - if any probability lies outside of [0, 1]
    /// - if the unconditional gene table, or any row of the trait table does not sum to one.
    pub fn new(gene: [f64; 3], traits: [[f64; 2]; 3], mutation: f64) -> Result<Self, ModelError> {
        let model = Self { gene, traits, mutation };
        model.validate()?;
        Ok(model)
    }

    /// Check every probability lies within [0, 1], and that each distribution sums to one.
    pub fn validate(&self) -> Result<(), ModelError> {
        use ModelError::{OutOfRange, UnnormalizedGeneTable, UnnormalizedTraitTable};
        let check_range = |name: String, value: f64| match (0.0..=1.0).contains(&value) {
            true  => Ok(()),
            false => Err(OutOfRange{name, value}),
        };

        check_range("mutation rate".to_string(), self.mutation)?;
        for genes in GeneCount::ALL {
            check_range(format!("P(gene={genes})"), self.gene[genes.index()])?;
            for has_trait in [false, true] {
                check_range(format!("P(trait={has_trait} | gene={genes})"), self.traits[genes.index()][has_trait as usize])?;
            }
        }

        let gene_sum: f64 = self.gene.iter().sum();
        if (gene_sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(UnnormalizedGeneTable(gene_sum))
        }

        for genes in GeneCount::ALL {
            let sum: f64 = self.traits[genes.index()].iter().sum();
            if (sum - 1.0).abs() > SUM_TOLERANCE {
                return Err(UnnormalizedTraitTable{genes: genes.into(), sum})
            }
        }
        Ok(())
    }

    /// Unconditional probability of carrying `genes` copies of the gene.
    #[inline]
    pub fn gene(&self, genes: GeneCount) -> f64 {
        self.gene[genes.index()]
    }

    /// Probability that an individual carrying `genes` copies does (not) express the trait.
    #[inline]
    pub fn trait_given(&self, genes: GeneCount, has_trait: bool) -> f64 {
        self.traits[genes.index()][has_trait as usize]
    }

    #[inline]
    pub fn mutation(&self) -> f64 {
        self.mutation
    }
}

/// Human-readable, serializable form of `ProbabilityModel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelTables {
    gene: BTreeMap<u8, f64>,
    #[serde(rename = "trait")]
    traits: BTreeMap<u8, BTreeMap<bool, f64>>,
    mutation: f64,
}

impl TryFrom<ModelTables> for ProbabilityModel {
    type Error = ModelError;

    fn try_from(tables: ModelTables) -> Result<Self, Self::Error> {
        use ModelError::{MissingGeneProbability, MissingTraitProbability};
        for key in tables.gene.keys().chain(tables.traits.keys()) {
            GeneCount::try_from(*key)?;
        }

        let mut gene   = [0.0; 3];
        let mut traits = [[0.0; 2]; 3];
        for genes in GeneCount::ALL {
            let copies = u8::from(genes);
            gene[genes.index()] = *tables.gene.get(&copies).ok_or(MissingGeneProbability(copies))?;
            for has_trait in [false, true] {
                traits[genes.index()][has_trait as usize] = *tables.traits.get(&copies)
                    .and_then(|row| row.get(&has_trait))
                    .ok_or(MissingTraitProbability{genes: copies, has_trait})?;
            }
        }
        Self::new(gene, traits, tables.mutation)
    }
}

impl From<ProbabilityModel> for ModelTables {
    fn from(model: ProbabilityModel) -> Self {
        let gene = GeneCount::ALL.iter()
            .map(|genes| (u8::from(*genes), model.gene(*genes)))
            .collect();
        let traits = GeneCount::ALL.iter()
            .map(|genes| {
                let row = [false, true].into_iter().map(|t| (t, model.trait_given(*genes, t))).collect();
                (u8::from(*genes), row)
            })
            .collect();
        Self { gene, traits, mutation: model.mutation }
    }
}
