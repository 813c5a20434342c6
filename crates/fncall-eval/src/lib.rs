//! Evaluation datasets for the agent's tools
//!
//! Question/answer sets are kept as JSON or CSV files next to the kit and
//! loaded into named, ordered records.

mod converter;
mod error;

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

pub use converter::{CsvDatasetConverter, DatasetConverter, DatasetFormat, JsonDatasetConverter, create_converter};
pub use error::{DatasetError, Result};

/// One record: column name to value, in file order
pub type Row = IndexMap<String, serde_json::Value>;

/// A named list of records
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub name: String,
    pub rows: Vec<Row>,
}

/// Loads a dataset file under a given name
#[derive(Debug, Clone)]
pub struct DatasetManager {
    name: String,
    path: PathBuf,
}

impl DatasetManager {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the file type is unsupported or the file cannot
    /// be loaded
    pub fn create_dataset(&self) -> Result<Dataset> {
        let rows = create_converter(&self.path)?.convert();

        tracing::debug!(
            name = %self.name,
            path = %self.path.display(),
            rows = rows.len(),
            "dataset loaded"
        );

        Ok(Dataset {
            name: self.name.clone(),
            rows,
        })
    }
}
