//! Error types for graph building.
//!
//! Every failure carries enough context (file path, line number, column name)
//! to locate the offending input. Nothing is retried or silently dropped.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    /// Input header is missing one or more required columns
    #[error("Schema error: {} is missing required columns: {}", .path.display(), .missing.join(", "))]
    Schema { path: PathBuf, missing: Vec<String> },

    /// A value could not be parsed or violates a data invariant
    #[error("Data integrity error: {location}: {message}")]
    DataIntegrity { location: String, message: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl GraphError {
    /// Integrity failure tied to one cell of an input file.
    pub fn cell(path: &std::path::Path, line: u64, column: &str, message: impl Into<String>) -> Self {
        GraphError::DataIntegrity {
            location: format!("{} line {} column '{}'", path.display(), line, column),
            message: message.into(),
        }
    }

    /// Integrity failure with no file position (e.g. derived node data).
    pub fn integrity(location: impl Into<String>, message: impl Into<String>) -> Self {
        GraphError::DataIntegrity {
            location: location.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
