use std::{fs::File, path::Path};

use anyhow::Result;
use located_error::LocatedError;
use log::{info, debug};

use parser::{Cli, Commands, Infer};
use inference::{Enumerator, Inference, ProbabilityModel};
use heredity_io::{
    read::PopulationReader,
    write::{GenericWriter, PosteriorReport},
    parse,
};

/// Load a probability model from a `.yaml` file, or fall back to the built-in model if `path` is `None`.
/// # Errors
/// - if the file cannot be opened, or does not describe a valid probability model.
pub fn load_model(path: Option<&Path>) -> Result<ProbabilityModel> {
    let Some(path) = path else {
        debug!("Using the default probability model");
        return Ok(ProbabilityModel::default())
    };
    let loc_msg = || format!("While loading probability model from '{}'", path.display());
    let file  = File::open(path).with_loc(loc_msg)?;
    let model = serde_yaml::from_reader(file).with_loc(loc_msg)?;
    info!("Loaded probability model from {}", path.display());
    Ok(model)
}

/// Run exact inference on the pedigree provided through `args`, and write the resulting posteriors.
/// # Errors
/// - if `--output` already exists and `--overwrite` was not requested.
/// - if the model or the pedigree file are invalid.
/// - if inference fails (e.g. the pedigree exceeds `--max-individuals`)
pub fn infer(args: &Infer) -> Result<Inference> {
    let loc_msg = "While running inference";
    if let Some(output) = &args.output {
        parse::can_write_file(args.overwrite, output).loc(loc_msg)?;
    }

    let model = load_model(args.model.as_deref()).loc(loc_msg)?;

    info!("Loading pedigree from {}", args.data.display());
    let population = PopulationReader::new(&args.data).loc(loc_msg)?.population;
    info!("Found {} individuals ({} founders, {} observed trait statuses)",
        population.len(), population.founders().count(), population.observed().count()
    );

    let mut enumerator = Enumerator::new(&population, &model).max_individuals(args.max_individuals);
    if let Some(multi) = logger::Logger::multi() {
        enumerator = enumerator.with_progress(multi);
    }
    let inference = enumerator.run().loc(loc_msg)?;
    info!("P(evidence) = {:e} ({} assignments)", inference.evidence, inference.assignments);

    if let Some(output) = &args.output {
        parse::create_parent_directory(output).loc(loc_msg)?;
        info!("Writing posterior distributions to {}", output.display());
    }
    let mut writer = GenericWriter::new(args.output.as_ref()).loc(loc_msg)?;
    PosteriorReport::new(&inference.posteriors, args.format, args.precision).write(&mut writer).loc(loc_msg)?;
    Ok(inference)
}

/// Write `model` in YAML format, using `writer`.
/// # Errors
/// - if the model cannot be serialized, or written.
pub fn write_model(model: &ProbabilityModel, writer: &mut GenericWriter) -> Result<()> {
    let loc_msg = "While writing probability model";
    let yaml = serde_yaml::to_string(model).loc(loc_msg)?;
    writer.write_iter([yaml.trim_end()]).loc(loc_msg)
}

/// Print the built-in probability model in YAML format.
pub fn print_model() -> Result<()> {
    write_model(&ProbabilityModel::default(), &mut GenericWriter::new(None::<&Path>)?)
}

/// Unpack command line arguments and run the appropriate module.
pub fn run(cli: Cli) -> Result<()> {
    match cli.commands {
        Commands::Infer {infer: args} => {
            self::infer(&args)?;
        },

        Commands::Model => {
            print_model()?;
        },

        Commands::FromYaml {yaml} => {
            let cli = Cli::deserialize(&yaml)?;
            logger::Logger::set_level(cli.verbosity());
            self::run(cli)?;
        },
    };
    Ok(())
}
