use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::{
    Row,
    error::{DatasetError, Result},
};

/// On-disk dataset formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// A JSON array of objects
    Json,
    /// Comma-separated values with a header row (`.csv` or `.txt`)
    Csv,
}

impl DatasetFormat {
    /// Pick the format from a file extension, ignoring case
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::UnsupportedFileType`] for any other extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv" | "txt") => Ok(Self::Csv),
            _ => Err(DatasetError::UnsupportedFileType {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Turns a dataset file into a list of records
pub trait DatasetConverter {
    fn convert(&self) -> Vec<Row>;
}

/// Build the converter matching the file extension
///
/// # Errors
///
/// Returns an error if the extension is unsupported or the file cannot
/// be loaded
pub fn create_converter(path: &Path) -> Result<Box<dyn DatasetConverter>> {
    match DatasetFormat::from_path(path)? {
        DatasetFormat::Json => Ok(Box::new(JsonDatasetConverter::open(path)?)),
        DatasetFormat::Csv => Ok(Box::new(CsvDatasetConverter::open(path)?)),
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Records stored as a JSON array of objects
#[derive(Debug)]
pub struct JsonDatasetConverter {
    rows: Vec<Row>,
}

impl JsonDatasetConverter {
    /// # Errors
    ///
    /// Returns an error if the file is missing, is not JSON, or is not an
    /// array of objects
    pub fn open(path: &Path) -> Result<Self> {
        let text = read(path)?;

        let document: JsonDocument = serde_json::from_str(&text).map_err(|source| DatasetError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let reason = match document {
            JsonDocument::Records(rows) => return Ok(Self { rows }),
            JsonDocument::Other(Value::Array(_)) => "every array element must be an object",
            JsonDocument::Other(_) => "expected a JSON array of objects",
        };

        Err(DatasetError::InvalidShape {
            path: path.to_path_buf(),
            reason: reason.to_owned(),
        })
    }
}

/// A dataset file read in one pass: records when the shape fits, the raw
/// value otherwise so the shape error can say what was found
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Records(Vec<Row>),
    Other(Value),
}

impl DatasetConverter for JsonDatasetConverter {
    fn convert(&self) -> Vec<Row> {
        self.rows.clone()
    }
}

/// Records stored as CSV with a header row
#[derive(Debug)]
pub struct CsvDatasetConverter {
    rows: Vec<Row>,
}

impl CsvDatasetConverter {
    /// # Errors
    ///
    /// Returns an error if the file is missing or is not well-formed CSV
    pub fn open(path: &Path) -> Result<Self> {
        let text = read(path)?;
        let csv_error = |source| DatasetError::Csv {
            path: PathBuf::from(path),
            source,
        };

        let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
        let headers = reader.headers().map_err(csv_error)?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let row: Row = headers
                .iter()
                .zip(record.iter())
                .map(|(column, cell)| (column.to_owned(), cell_value(cell)))
                .collect();
            rows.push(row);
        }

        Ok(Self { rows })
    }
}

impl DatasetConverter for CsvDatasetConverter {
    fn convert(&self) -> Vec<Row> {
        self.rows.clone()
    }
}

/// Integers and floats become numbers, empty cells become `null`
fn cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }

    if let Ok(int) = cell.parse::<i64>() {
        return Value::from(int);
    }

    if let Ok(float) = cell.parse::<f64>()
        && float.is_finite()
    {
        return Value::from(float);
    }

    Value::String(cell.to_owned())
}
