use thiserror::Error;

#[derive(Error, Debug)]
pub enum PopulationError {
    #[error("Individual '{0}' is defined more than once")]
    DuplicateIndividual(String),

    #[error("Individual '{0}' is not part of the population")]
    UnknownIndividual(String),

    #[error("Parent '{parent}' of individual '{offspring}' is not part of the population")]
    UnknownParent{offspring: String, parent: String},

    #[error("Individual '{0}' cannot be its own parent")]
    SelfParent(String),

    #[error("Individual labels cannot be empty")]
    EmptyLabel,
}
