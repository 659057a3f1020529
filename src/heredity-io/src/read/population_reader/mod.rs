use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::Result;
use located_error::LocatedError;
use log::{debug, trace};

use pedigree::{Population, TraitStatus};

mod error;
pub use error::PopulationReaderError;

/// Required columns of a pedigree file, in their canonical order.
pub const POPULATION_COLUMNS: [&str; 4] = ["name", "mother", "father", "trait"];

/// Column indices of the required fields, as found within the header line.
#[derive(Debug, Clone, Copy)]
struct Columns {
    name  : usize,
    mother: usize,
    father: usize,
    traits: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, PopulationReaderError> {
        let find = |column: &'static str| headers.iter()
            .position(|header| header.eq_ignore_ascii_case(column))
            .ok_or(PopulationReaderError::MissingColumn(column));
        let [name, mother, father, traits] = POPULATION_COLUMNS;
        Ok(Self { name: find(name)?, mother: find(mother)?, father: find(father)?, traits: find(traits)? })
    }
}

/// A single, parsed line of a pedigree file.
#[derive(Debug)]
struct Record {
    name        : String,
    parents     : Option<[String; 2]>,
    trait_status: TraitStatus,
}

impl Record {
    fn parse(record: &csv::StringRecord, columns: Columns) -> Result<Self, PopulationReaderError> {
        use PopulationReaderError::{OneParentMissing, InvalidTrait};
        let field = |index: usize| record.get(index).unwrap_or("");
        let line  = record.position().map_or(0, csv::Position::line);
        let name  = field(columns.name).to_string();

        let parents = match (field(columns.mother), field(columns.father)) {
            ("", "")         => None,
            ("", _) | (_, "") => return Err(OneParentMissing{name, line}),
            (mother, father) => Some([mother.to_string(), father.to_string()]),
        };

        let trait_status = match field(columns.traits) {
            "1"   => TraitStatus::Present,
            "0"   => TraitStatus::Absent,
            ""    => TraitStatus::Unknown,
            value => return Err(InvalidTrait{name, value: value.to_string(), line}),
        };
        Ok(Self { name, parents, trait_status })
    }
}

/// Pedigree file reader (`.csv` extension)
/// ### File characteristics:
/// - Comma-separated fields, with a header line.
/// - Columns: `name`, `mother`, `father`, `trait` (in any order. Additional columns are ignored)
/// - `mother` and `father` must either both be empty (founder) or both name an individual of the file.
/// - `trait`: `1` (expressed), `0` (not expressed) or empty (unknown).
///
/// Individuals may be referenced as parents before being defined. Population order follows the file.
#[derive(Debug, Clone)]
pub struct PopulationReader {
    pub source_file: PathBuf,
    pub population : Population,
}

impl PopulationReader {
    /// Instantiate a population from a pedigree `.csv` file
    /// # Errors
    /// - if `path` cannot be opened.
    /// - if the contents of the file are invalid (see `PopulationReader::parse()`)
    pub fn new(path: &Path) -> Result<Self> {
        let loc_msg = || format!("While reading pedigree file '{}'", path.display());
        let file = File::open(path)
            .map_err(|err| PopulationReaderError::OpenFile{path: path.to_path_buf(), err})
            .with_loc(loc_msg)?;
        let population = Self::parse(file).with_loc(loc_msg)?;
        debug!("Loaded {} individuals from {}", population.len(), path.display());
        Ok(Self { source_file: path.to_path_buf(), population })
    }

    /// Parse a population out of any csv-formatted source.
    ///
    /// # Errors
    /// - `MissingColumn` if the header line lacks any of the required columns.
    /// - `InvalidRecord` if a line is malformed (e.g. invalid number of fields).
    /// - `OneParentMissing` if an individual only specifies one of its parents.
    /// - `InvalidTrait` if a trait field is neither `1`, `0` nor empty.
    /// - `EmptyPopulation` if the source does not contain any individual.
    /// - any `PopulationError` raised while building the pedigree (duplicate names, unknown or self parents, etc.)
    pub fn parse<R: Read>(source: R) -> Result<Population> {
        let loc_msg = "While parsing pedigree records";
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader.headers().map_err(PopulationReaderError::from).loc(loc_msg)?;
        let columns = Columns::from_headers(headers).loc(loc_msg)?;

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record.map_err(PopulationReaderError::from).loc(loc_msg)?;
            records.push(Record::parse(&record, columns).loc(loc_msg)?);
        }

        // ---- Parents may be defined after their offspring: define every individual first, then link them.
        let mut population = Population::new();
        for record in &records {
            trace!("{record:?}");
            population.add_individual(&record.name, None, record.trait_status).loc(loc_msg)?;
        }
        for record in &records {
            if let Some([mother, father]) = &record.parents {
                population.set_relationship(&record.name, [mother.as_str(), father.as_str()]).loc(loc_msg)?;
            }
        }

        if population.is_empty() {
            return Err(PopulationReaderError::EmptyPopulation).loc(loc_msg)
        }
        Ok(population)
    }
}
