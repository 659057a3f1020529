use std::ops::Deref;

/// Labels of the two parents of an offspring. Individuals always carry either both parents,
/// or none at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parents([String; 2]);

impl Parents {
    pub fn new(parents: [&str; 2]) -> Parents {
        Parents([parents[0].to_string(), parents[1].to_string()])
    }

    pub fn mother(&self) -> &str {
        &self.0[0]
    }

    pub fn father(&self) -> &str {
        &self.0[1]
    }
}

impl Deref for Parents {
    type Target = [String; 2];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for Parents {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.0[0], self.0[1])
    }
}
