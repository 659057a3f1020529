mod population_reader;
pub use population_reader::{PopulationReader, PopulationReaderError, POPULATION_COLUMNS};
