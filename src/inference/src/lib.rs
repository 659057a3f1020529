//! Exact inference of gene copy and trait posteriors over a pedigree.
//!
//! Every individual carries 0, 1 or 2 copies of a gene, which influences whether it expresses a trait.
//! Founders draw their gene count from an unconditional distribution, while offspring inherit one copy
//! from each parent, subject to mutation. Posteriors are obtained by summing the joint probability of every
//! (gene, trait) assignment which agrees with the observed trait statuses, before normalizing.

pub mod model;
pub use model::{GeneCount, ProbabilityModel};

pub mod assignment;
pub use assignment::{GeneAssignment, TraitAssignment};

pub mod joint;
pub use joint::joint_probability;

pub mod posterior;
pub use posterior::{Distribution, Posteriors};

pub mod enumerate;
pub use enumerate::{infer, Enumerator, Inference, DEFAULT_MAX_INDIVIDUALS, MAX_ENUMERABLE_INDIVIDUALS};

mod error;
pub use error::{InferenceError, ModelError};
