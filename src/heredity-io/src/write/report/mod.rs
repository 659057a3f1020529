use std::fmt::{self, Display, Formatter};

use anyhow::Result;
use located_error::LocatedError;

use inference::{Distribution, GeneCount, Posteriors};
use parser::OutputFormat;

use super::GenericWriter;

/// Header line of tab-separated reports.
pub const TSV_HEADER: &str = "name\tgene_2\tgene_1\tgene_0\ttrait_true\ttrait_false";

/// Gene counts, in reporting order.
const GENE_ORDER: [GeneCount; 3] = [GeneCount::Two, GeneCount::One, GeneCount::Zero];

/// Posterior distributions of a single individual, formatted for output.
#[derive(Debug, Clone, Copy)]
pub struct ReportEntry<'a> {
    label       : &'a str,
    distribution: &'a Distribution,
    format      : OutputFormat,
    precision   : usize,
}

impl ReportEntry<'_> {
    fn fmt_pretty(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = self.precision;
        writeln!(f, "{}:", self.label)?;
        writeln!(f, "  Gene:")?;
        for genes in GENE_ORDER {
            writeln!(f, "    {genes}: {:.precision$}", self.distribution.gene(genes))?;
        }
        writeln!(f, "  Trait:")?;
        writeln!(f, "    True: {:.precision$}", self.distribution.has_trait(true))?;
        write!(f, "    False: {:.precision$}", self.distribution.has_trait(false))
    }

    fn fmt_tsv(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = self.precision;
        write!(f, "{}", self.label)?;
        for genes in GENE_ORDER {
            write!(f, "\t{:.precision$}", self.distribution.gene(genes))?;
        }
        for has_trait in [true, false] {
            write!(f, "\t{:.precision$}", self.distribution.has_trait(has_trait))?;
        }
        Ok(())
    }
}

impl Display for ReportEntry<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.format {
            OutputFormat::Pretty => self.fmt_pretty(f),
            OutputFormat::Tsv    => self.fmt_tsv(f),
        }
    }
}

/// Formatted report of the posterior distributions of a population.
pub struct PosteriorReport<'a> {
    posteriors: &'a Posteriors,
    format    : OutputFormat,
    precision : usize,
}

impl<'a> PosteriorReport<'a> {
    pub fn new(posteriors: &'a Posteriors, format: OutputFormat, precision: usize) -> Self {
        Self { posteriors, format, precision }
    }

    /// One entry per individual, in population order.
    pub fn entries(&self) -> impl Iterator<Item = ReportEntry<'a>> + '_ {
        self.posteriors.iter().map(|(label, distribution)| {
            ReportEntry { label, distribution, format: self.format, precision: self.precision }
        })
    }

    /// Write the report using `writer`, header included.
    /// # Errors
    /// - if any line fails to get written.
    pub fn write(&self, writer: &mut GenericWriter) -> Result<()> {
        let loc_msg = "While writing posterior distributions";
        if self.format == OutputFormat::Tsv {
            writer.write_iter([TSV_HEADER]).loc(loc_msg)?;
        }
        writer.write_iter(self.entries()).loc(loc_msg)
    }
}
