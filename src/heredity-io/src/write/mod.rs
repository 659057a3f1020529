mod generic_writer;
pub use generic_writer::{GenericWriter, WriterError};

mod report;
pub use report::{PosteriorReport, ReportEntry, TSV_HEADER};
