use std::{
    fs::File,
    path::{Path, PathBuf},
    fmt::{self, Display, Formatter},
    ffi::OsStr,
};

use located_error::*;

use clap::{Parser, Subcommand, Args, ArgEnum};
use serde::{Serialize, Deserialize};
use log::debug;
use anyhow::{anyhow, Result};

mod error;
pub use error::ParserError;

/// Largest accepted value for `--max-individuals`. Beyond this, assignment counts overflow a u64.
pub const MAX_INDIVIDUALS_UPPER_BOUND: usize = 24;

#[derive(Parser, Debug, Serialize, Deserialize)]
#[clap(name="heredity-rs", author, version, about, long_about = None)]
#[clap(propagate_version = true)]
/// heredity-rs: Posterior gene and trait probabilities within a pedigree, by exact enumeration.
pub struct Cli {
    ///Set the verbosity level (-v -vv -vvv)
    ///
    /// Set the verbosity level of this program. Multiple levels allowed {n}
    ///
    /// -v: Info  |  -vv: Debug  | -vvv: Trace {n}
    ///
    /// Note that the program will still output warnings by default, even when this flag is off.
    /// Use The --quiet/-q to disable them
    #[clap(short='v', long, parse(from_occurrences), global=true)]
    pub verbose: u8,

    /// Disable warnings.
    ///
    /// By default, warnings are emmited and redirected to the console, even when verbose mode is off.
    /// Use this argument to disable this. Only errors will be displayed.
    #[clap(short='q', long, global=true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub commands: Commands,
}

impl Cli {
    /// Logger verbosity requested by the user: 0 = Error | 1 = Warn | 2 = Info | 3 = Debug | 4+ = Trace
    pub fn verbosity(&self) -> u8 {
        if self.quiet {0} else {self.verbose.saturating_add(1)}
    }

    /// Serialize command line arguments within a `.yaml` file.
    ///
    /// # Behavior
    /// - Arguments are always logged at the debug level.
    /// - When `infer` is given an `--output` file, arguments are also written next to it. File naming follows
    ///   the convention '{current time}-heredity-infer.yaml'. current time follows the format
    ///   `YYYY`-`MM`-`DD`T`hhmmss`
    ///
    /// # Errors
    /// - if `serde_yaml` fails to parse `Self` to a string.
    /// - if the output `.yaml` file cannot be written.
    pub fn serialize(&self) -> Result<()> {
        // Parse arguments to yaml and print to console.
        let serialized = serde_yaml::to_string(&self)
            .map_err(ParserError::SerializeArgs)
            .loc("Failed to serialize command line arguments")?;

        debug!("\n---- Command line args ----\n{}\n---", serialized);

        let Commands::Infer { infer } = &self.commands else {
            return Ok(())
        };
        let Some(output) = &infer.output else {
            return Ok(())
        };

        let current_time = chrono::offset::Local::now().format("%Y-%m-%dT%H%M%S").to_string();
        let output_file  = serialized_args_path(output, &current_time);
        if let Some(dir) = output_file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).with_loc(|| format!("Unable to create output directory {}", dir.display()))?;
        }
        std::fs::write(&output_file, serialized)
            .with_loc(|| format!("Unable to serialize arguments into {}", output_file.display()))
    }

    /// Deserialize a `.yaml` file into Command line arguments.
    ///
    /// # Errors
    ///
    /// - Returns `FileNotFound` or `PermissionDenied` if the provided `.yaml` is invalid,
    ///   or does not carry read permissions
    /// - if `serde_yaml` fails to parse the provided file to `Self`.
    pub fn deserialize(yaml: &Path) -> Result<Self> {
        let loc_msg = || format!("Unable to deserialize arguments from {}", yaml.display());
        let file = File::open(yaml).with_loc(loc_msg)?;
        serde_yaml::from_reader(file).map_err(ParserError::DeserializeArgs).with_loc(loc_msg)
    }
}

/// Location of the serialized command line arguments of a run writing its results to `output`.
pub fn serialized_args_path(output: &Path, current_time: &str) -> PathBuf {
    output.with_file_name(format!("{current_time}-heredity-infer.yaml"))
}

#[derive(Subcommand, Debug, Serialize, Deserialize)]
pub enum Commands {
    /// Compute the posterior gene and trait distributions of every individual within a pedigree.
    ///
    /// Every assignment of gene copies and trait expression which agrees with the observed trait
    /// statuses is enumerated. Note that the cost of inference grows as 6^n for n individuals.
    Infer {
        #[clap(flatten)]
        infer: Infer
    },

    /// Print the default probability model, in YAML format.
    ///
    /// The output may be used as a template for the --model argument of the 'infer' subcommand.
    Model,

    /// Run heredity-rs using a previously generated .yaml configuration file.
    ///
    /// This allows users to easily re-apply a heredity-rs command using the exact same parameters
    /// and arguments.
    FromYaml {
        yaml: PathBuf,
    },
}

/// Output format of posterior distributions.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ArgEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Indented, human-readable report.
    #[default]
    Pretty,
    /// Tab-separated table, with a header line.
    Tsv,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Tsv    => write!(f, "tsv"),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct Infer {
    /// Input pedigree file.
    ///
    /// Comma-separated file, with a header line and columns 'name,mother,father,trait'. Founders
    /// leave both 'mother' and 'father' empty. 'trait' is either '1' (expressed), '0' (not expressed)
    /// or left empty when unknown.
    #[clap(parse(try_from_os_str=valid_input_file))]
    pub data: PathBuf,

    /// Probability model definition file.
    ///
    /// YAML file specifying the unconditional gene distribution, the trait distribution given each gene
    /// count, and the mutation rate. Use the 'model' subcommand to obtain a template. By default, heredity-rs
    /// uses its built-in probability model.
    #[clap(short='m', long, parse(try_from_os_str=valid_input_file))]
    pub model: Option<PathBuf>,

    /// Output file where results will be written.
    ///
    /// Results are printed to the standard output by default. Note that heredity-rs will create any missing
    /// parent directory.
    #[clap(short='o', long)]
    pub output: Option<PathBuf>,

    /// Output format.
    #[clap(short='f', long, arg_enum, default_value("pretty"))]
    pub format: OutputFormat,

    /// Number of decimals used when printing probabilities.
    #[clap(short='p', long, default_value("4"))]
    pub precision: usize,

    /// Maximal number of individuals accepted within the pedigree.
    ///
    /// Exact inference evaluates 6^n assignments for n individuals, which quickly becomes untractable.
    /// Values range from 1 to 24.
    #[clap(short='N', long, default_value("10"), parse(try_from_str=parse_max_individuals))]
    pub max_individuals: usize,

    /// Overwrite existing output files.
    ///
    /// By default, heredity-rs does not allow itself from overwriting existing results files. Use this flag
    /// to force this behaviour.
    #[clap(short='w', long)]
    pub overwrite: bool,
}

/// Ensure the provided argument points to an existing file.
fn valid_input_file(s: &OsStr) -> Result<PathBuf> {
    use ParserError::{MissingFile, NotAFile};
    let path = Path::new(s);
    let loc_msg = "While checking for file validity";
    if ! path.exists() {
        return Err(MissingFile(path.display().to_string())).loc(loc_msg)
    }
    if ! path.is_file() {
        return Err(NotAFile(path.display().to_string())).loc(loc_msg)
    }
    Ok(path.to_path_buf())
}

fn parse_max_individuals(s: &str) -> Result<usize> {
    let max = s.parse::<usize>().with_loc(|| format!("While parsing {s}"))?;
    match max {
        1..=MAX_INDIVIDUALS_UPPER_BOUND => Ok(max),
        _ => Err(anyhow!(ParserError::InvalidMaxIndividuals(MAX_INDIVIDUALS_UPPER_BOUND))).with_loc(|| format!("While parsing {s}")),
    }
}
