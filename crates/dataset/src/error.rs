use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: cannot parse order date '{value}' with any configured format")]
    InvalidDate { line: u64, value: String },

    #[error("Line {line}: invalid {column} amount '{value}'")]
    InvalidAmount {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Line {line}: {source}")]
    InvalidRecord {
        line: u64,
        #[source]
        source: core_types::CoreError,
    },
}
