use std::{ffi::OsString, path::Path};
use clap::Parser;

use parser::OutputFormat;

use super::Fixture;

/// Assemble an `infer` command line around test fixtures.
pub struct HeredityRunnerBuilder {
    data           : String,
    model          : Option<String>,
    output         : Option<String>,
    format         : Option<OutputFormat>,
    precision      : Option<usize>,
    max_individuals: Option<usize>,
    overwrite      : bool,
}

impl HeredityRunnerBuilder {
    pub fn new(data: &str) -> Self {
        Self { data: data.to_string(), model: None, output: None, format: None, precision: None, max_individuals: None, overwrite: false }
    }

    pub fn set_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// Write results within a temporary directory, under `filename`, rather than to stdout.
    pub fn set_output(mut self, filename: &str) -> Self {
        self.output = Some(filename.to_string());
        self
    }

    pub fn set_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn set_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn set_max_individuals(mut self, max: usize) -> Self {
        self.max_individuals = Some(max);
        self
    }

    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    pub fn build(self) -> HeredityRunner {
        let data   = Fixture::copy(&self.data);
        let model  = self.model.as_deref().map(Fixture::copy);
        let output = self.output.as_deref().map(Fixture::blank);

        let mut args: Vec<OsString> = vec!["heredity-rs".into(), "infer".into(), data.as_os_str().into()];
        if let Some(model) = &model {
            args.extend(["--model".into(), model.as_os_str().into()]);
        }
        if let Some(output) = &output {
            args.extend(["--output".into(), output.as_os_str().into()]);
        }
        if let Some(format) = self.format {
            args.extend(["--format".into(), format.to_string().into()]);
        }
        if let Some(precision) = self.precision {
            args.extend(["--precision".into(), precision.to_string().into()]);
        }
        if let Some(max) = self.max_individuals {
            args.extend(["--max-individuals".into(), max.to_string().into()]);
        }
        if self.overwrite {
            args.push("--overwrite".into());
        }
        HeredityRunner { args, _data: data, _model: model, output }
    }
}

pub struct HeredityRunner {
    args   : Vec<OsString>,
    _data  : Fixture,
    _model : Option<Fixture>,
    output : Option<Fixture>,
}

impl HeredityRunner {
    pub fn cli(&self) -> parser::Cli {
        parser::Cli::try_parse_from(&self.args).expect("Failed to parse command line arguments")
    }

    pub fn run(&self) -> anyhow::Result<()> {
        heredity_rs::run(self.cli())
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}
