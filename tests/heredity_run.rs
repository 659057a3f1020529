mod common;
use common::{Fixture, HeredityRunnerBuilder};
#[cfg(test)] use pretty_assertions::assert_eq;

use float_cmp::approx_eq;
use heredity_io::{parse::ParseError, read::PopulationReader, write::GenericWriter};
use inference::{Enumerator, GeneCount, InferenceError, ProbabilityModel};
use parser::OutputFormat;

#[test]
fn test_heredity_run_family0() {
    let runner = HeredityRunnerBuilder::new("family0.csv").set_output("family0.txt").build();
    runner.run().expect("Inference failed");
    validate_file!("expect/family0.txt", runner.output().expect("Missing output"));
}

#[test]
fn test_heredity_run_family1() {
    let runner = HeredityRunnerBuilder::new("family1.csv").set_output("family1.txt").build();
    runner.run().expect("Inference failed");
    validate_file!("expect/family1.txt", runner.output().expect("Missing output"));
}

#[test]
fn test_heredity_run_family2() {
    let runner = HeredityRunnerBuilder::new("family2.csv").set_output("family2.txt").build();
    runner.run().expect("Inference failed");
    validate_file!("expect/family2.txt", runner.output().expect("Missing output"));
}

#[test]
fn test_heredity_run_tsv() {
    let runner = HeredityRunnerBuilder::new("family2.csv")
        .set_output("results/family2.tsv")
        .set_format(OutputFormat::Tsv)
        .set_precision(6)
        .build();
    runner.run().expect("Inference failed");
    validate_file!("expect/family2-precision6.tsv", runner.output().expect("Missing output"));
}

#[test]
fn test_heredity_run_custom_model() {
    let runner = HeredityRunnerBuilder::new("single.csv")
        .set_model("model.yaml")
        .set_output("single.txt")
        .build();
    runner.run().expect("Inference failed");
    validate_file!("expect/single-custom-model.txt", runner.output().expect("Missing output"));
}

#[test]
fn test_heredity_run_invalid_model() {
    let runner = HeredityRunnerBuilder::new("single.csv")
        .set_model("invalid-model.yaml")
        .set_output("single.txt")
        .build();
    let err = runner.run().expect_err("Unnormalized gene table should be rejected");
    assert!(format!("{err:?}").contains("must sum to 1"));
    assert!(!runner.output().expect("Missing output").exists());
}

#[test]
fn test_heredity_run_overwrite() {
    let runner = HeredityRunnerBuilder::new("family0.csv").set_output("family0.txt").build();
    runner.run().expect("Inference failed");

    let err = runner.run().expect_err("Existing output should not be overwritten");
    assert!(matches!(err.downcast_ref::<ParseError>(), Some(ParseError::OverwriteDisallowed{..})));

    let runner = HeredityRunnerBuilder::new("family0.csv").set_output("family0.txt").overwrite().build();
    runner.run().expect("Inference failed");
    runner.run().expect("--overwrite should allow rewriting results");
    validate_file!("expect/family0.txt", runner.output().expect("Missing output"));
}

#[test]
fn test_heredity_run_too_large() {
    let runner = HeredityRunnerBuilder::new("too-large.csv").set_output("too-large.txt").build();
    let err = runner.run().expect_err("11 individuals exceed the default limit");
    assert_eq!(err.downcast_ref::<InferenceError>(), Some(&InferenceError::PopulationTooLarge{size: 11, max: 10}));

    let runner = HeredityRunnerBuilder::new("family1.csv").set_max_individuals(4).build();
    let err = runner.run().expect_err("5 individuals exceed a limit of 4");
    assert_eq!(err.downcast_ref::<InferenceError>(), Some(&InferenceError::PopulationTooLarge{size: 5, max: 4}));
}

#[test]
fn test_heredity_serialized_args() -> anyhow::Result<()> {
    let runner = HeredityRunnerBuilder::new("family0.csv").set_output("family0.txt").build();
    let cli    = runner.cli();
    cli.serialize()?;
    heredity_rs::run(cli)?;

    let dir = runner.output().and_then(std::path::Path::parent).expect("Missing output directory");
    let yaml = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .find(|path| path.to_string_lossy().ends_with("-heredity-infer.yaml"))
        .expect("Missing serialized arguments");

    // ---- Re-running from the serialized arguments must be refused, unless overwrite is allowed.
    let from_yaml = parser::Cli { verbose: 0, quiet: true, commands: parser::Commands::FromYaml { yaml: yaml.clone() } };
    let err = heredity_rs::run(from_yaml).expect_err("Output already exists");
    assert!(matches!(err.downcast_ref::<ParseError>(), Some(ParseError::OverwriteDisallowed{..})));

    let mut cli = parser::Cli::deserialize(&yaml)?;
    if let parser::Commands::Infer { infer } = &mut cli.commands {
        infer.overwrite = true;
    }
    heredity_rs::run(cli)?;
    validate_file!("expect/family0.txt", runner.output().expect("Missing output"));
    Ok(())
}

#[test]
fn test_family_evidence() -> anyhow::Result<()> {
    let model = ProbabilityModel::default();
    for (file, want) in [("family0.csv", 0.03181759000000001), ("family1.csv", 0.029767837559581404), ("family2.csv", 0.025388131944849256)] {
        let data = Fixture::copy(file);
        let population = PopulationReader::new(&data)?.population;
        let inference  = Enumerator::new(&population, &model).run()?;
        assert!(approx_eq!(f64, inference.evidence, want, epsilon = 1e-12), "{file}: {} != {want}", inference.evidence);
        assert!(inference.posteriors.is_normalized(1e-9));
    }
    Ok(())
}

#[test]
fn test_family1_posteriors() -> anyhow::Result<()> {
    let data = Fixture::copy("family1.csv");
    let population = PopulationReader::new(&data)?.population;
    let inference  = inference::infer(&population, &ProbabilityModel::default())?;

    let molly = inference.posteriors.get("Molly").expect("Missing Molly");
    assert!(approx_eq!(f64, molly.gene(GeneCount::Two), 0.040399459909416784, epsilon = 1e-12));
    assert!(approx_eq!(f64, molly.has_trait(true), 0.07679214326921184, epsilon = 1e-12));

    let rose = inference.posteriors.get("Rose").expect("Missing Rose");
    assert!(approx_eq!(f64, rose.gene(GeneCount::One), 0.7021623393317316, epsilon = 1e-12));
    assert_eq!(rose.has_trait(true), 1.0);
    Ok(())
}

#[test]
fn test_invalid_model_file() {
    let model = Fixture::copy("invalid-model.yaml");
    let err = heredity_rs::load_model(Some(&*model)).expect_err("Invalid model");
    assert!(err.chain().any(|cause| cause.to_string().contains("Unconditional gene probabilities must sum to 1")));
}

#[test]
fn test_default_model_roundtrip() -> anyhow::Result<()> {
    let template = Fixture::blank("default-model.yaml");
    heredity_rs::write_model(&ProbabilityModel::default(), &mut GenericWriter::new(Some(&*template))?)?;
    assert_eq!(heredity_rs::load_model(Some(&*template))?, ProbabilityModel::default());

    // The written template is a valid '--model' argument.
    let custom = template.sibling("custom-model.yaml");
    let yaml   = std::fs::read_to_string(&*template)?.replace("mutation: 0.01", "mutation: 0.02");
    std::fs::write(&custom, yaml)?;
    let model  = heredity_rs::load_model(Some(custom.as_path()))?;
    assert!(approx_eq!(f64, model.mutation(), 0.02, epsilon = 1e-12));
    assert!(approx_eq!(f64, model.gene(GeneCount::Zero), 0.96, epsilon = 1e-12));
    Ok(())
}

#[test]
fn test_model_with_unknown_field() {
    let tables = "gene: {0: 0.96, 1: 0.03, 2: 0.01}\n\
                  trait: {0: {true: 0.01, false: 0.99}, 1: {true: 0.56, false: 0.44}, 2: {true: 0.65, false: 0.35}}\n\
                  mutation: 0.01\n";
    let model = Fixture::with_contents("model.yaml", tables);
    assert_eq!(heredity_rs::load_model(Some(&*model)).expect("Valid model"), ProbabilityModel::default());

    let model = Fixture::with_contents("model.yaml", &format!("{tables}seed: 42\n"));
    let err   = heredity_rs::load_model(Some(&*model)).expect_err("Unknown fields should be rejected");
    assert!(err.chain().any(|cause| cause.to_string().contains("unknown field")));
}
