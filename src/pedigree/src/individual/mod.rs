use std::{
    cmp::{Ord, Ordering, PartialOrd},
    hash::{Hash, Hasher},
};

mod parents;
pub use parents::Parents;

/// Space padding lengths used for `std::fmt::Display` of Individual
const LABEL_DISPLAY_LEN  : usize = 10; // Space padding of `self.label`
const PARENTS_DISPLAY_LEN: usize = 25; // Space padding of `self.parents`

/// Observed trait status of an individual, as found within the input dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraitStatus {
    Present,
    Absent,
    #[default]
    Unknown,
}

impl TraitStatus {
    /// Observed value of the trait, if any.
    pub fn observed(&self) -> Option<bool> {
        match self {
            Self::Present => Some(true),
            Self::Absent  => Some(false),
            Self::Unknown => None,
        }
    }

    /// Trait values an assignment may give to this individual without contradicting the evidence.
    /// Unknown individuals must be explored on both branches.
    pub fn candidates(&self) -> &'static [bool] {
        match self {
            Self::Present => &[true],
            Self::Absent  => &[false],
            Self::Unknown => &[false, true],
        }
    }

    /// Check whether an assumed trait value agrees with this observation.
    pub fn is_consistent_with(&self, has_trait: bool) -> bool {
        self.observed().map_or(true, |observed| observed == has_trait)
    }
}

impl From<Option<bool>> for TraitStatus {
    fn from(observed: Option<bool>) -> Self {
        match observed {
            Some(true)  => Self::Present,
            Some(false) => Self::Absent,
            None        => Self::Unknown,
        }
    }
}

impl std::fmt::Display for TraitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let status = match self {
            Self::Present => "present",
            Self::Absent  => "absent",
            Self::Unknown => "unknown",
        };
        write!(f, "{status}")
    }
}

/// Pedigree Individual.
/// # Fields:
/// - `label`       : User-defined name of the individual (e.g. 'Harry', 'Lily', 'James')
/// - `parents`     : Optional labels of the individual's parents.
///                     - `None`          if the individual is a founder.
///                     - `Some(parents)` if the individual is an offspring.
/// - `trait_status`: Observed trait status of the individual.
#[derive(Debug, Clone)]
pub struct Individual {
    pub label       : String,
    parents         : Option<Parents>,
    pub trait_status: TraitStatus,
}

impl std::fmt::Display for Individual {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let parents = match &self.parents {
            None => "None".to_string(),
            Some(parents) => format!("{parents}")
        };
        write!(f, "label: {: <LABEL_DISPLAY_LEN$} - parents: {: <PARENTS_DISPLAY_LEN$} - trait: {}", self.label, parents, self.trait_status)
    }
}

impl PartialEq for Individual {
    fn eq(&self, other: &Individual) -> bool {
        self.label == other.label
    }
}

impl Eq for Individual {}

impl Hash for Individual {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

impl Ord for Individual {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.label).cmp(&(other.label))
    }
}

impl PartialOrd for Individual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Individual {
    /// Instantiate a new individual.
    /// # Arguments
    /// - `label`       : name of the individual (e.g. "Harry")
    /// - `parents`     : labels of the individual's parents, or `None` for a founder.
    /// - `trait_status`: observed trait status.
    pub fn new(label: &str, parents: Option<[&str; 2]>, trait_status: TraitStatus) -> Individual {
        Individual { label: label.to_string(), parents: parents.map(Parents::new), trait_status }
    }

    /// Manually set the individual's parents.
    pub fn set_parents(&mut self, parents: [&str; 2]) {
        self.parents = Some(Parents::new(parents));
    }

    /// Return a reference to this individual's parents, if any.
    pub fn parents(&self) -> Option<&Parents> {
        self.parents.as_ref()
    }

    /// Returns `true` if `self.parents == None`
    #[inline(always)]
    pub fn is_founder(&self) -> bool {
        self.parents.is_none()
    }
}
