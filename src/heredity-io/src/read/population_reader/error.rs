use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PopulationReaderError {
    #[error("Failed to open pedigree file '{}'", path.display())]
    OpenFile{path: PathBuf, #[source] err: std::io::Error},

    #[error("Missing '{0}' column. Pedigree files must carry a header line with columns 'name,mother,father,trait'")]
    MissingColumn(&'static str),

    #[error("Failed to parse record")]
    InvalidRecord(#[from] csv::Error),

    #[error("Individual '{name}' (line {line}) has a single parent. Either specify both a mother and a father, or none")]
    OneParentMissing{name: String, line: u64},

    #[error("Invalid trait value '{value}' for individual '{name}' (line {line}). Expected '1', '0' or an empty field")]
    InvalidTrait{name: String, value: String, line: u64},

    #[error("Pedigree file does not define any individual")]
    EmptyPopulation,
}
