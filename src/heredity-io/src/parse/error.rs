use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to create parent directory")]
    CreateParentDirectory(#[source] std::io::Error),

    #[error("'{}' already exists. Use '--overwrite' to force, or specify a different file with '--output'", path.display())]
    OverwriteDisallowed{path: PathBuf},
}
