use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError{
    #[error("File {0} does not exist")]
    MissingFile(String),

    #[error("{0} is not a file")]
    NotAFile(String),

    #[error("--max-individuals must lie between 1 and {0}")]
    InvalidMaxIndividuals(usize),

    #[error("Failed to serialize command line arguments")]
    SerializeArgs(#[source] serde_yaml::Error),

    #[error("Failed to deserialize command line arguments")]
    DeserializeArgs(#[source] serde_yaml::Error),
}
