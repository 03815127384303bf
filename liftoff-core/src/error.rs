use liftoff_scanner::ScanError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Table is missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("Row {row}: invalid {column} '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Invalid horizon: {0}")]
    InvalidHorizon(String),

    #[error("Crawl failed: {0}")]
    Scan(#[from] ScanError),
}

pub type Result<T> = std::result::Result<T, DataError>;
