use std::path::PathBuf;

use thiserror::Error;

/// Evaluation dataset loading errors
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON
    #[error("invalid JSON in dataset {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file is not valid CSV
    #[error("invalid CSV in dataset {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file parsed but does not hold a list of records
    #[error("dataset {} has an unexpected shape: {reason}", .path.display())]
    InvalidShape { path: PathBuf, reason: String },

    /// No converter handles the file extension
    #[error("unsupported file type {}: provide a JSON or CSV file", .path.display())]
    UnsupportedFileType { path: PathBuf },
}

pub type Result<T, E = DatasetError> = std::result::Result<T, E>;
