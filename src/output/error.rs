use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output file '{0}'")]
    FileCreate(PathBuf, #[source] std::io::Error),

    #[error("Failed to assemble DataFrame for '{0}'")]
    Frame(PathBuf, #[source] PolarsError),

    #[error("Failed to write CSV to '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Failed to render chart '{path}': {message}")]
    Chart { path: PathBuf, message: String },
}
