//! CSV writers for the node and edge tables.
//!
//! Column order comes from the field order of [`Node`] and [`Edge`]. Floats
//! use the shortest representation that parses back to the same value, so an
//! edge weight read back compares against the threshold exactly as it did
//! here.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::models::{Edge, Node};

/// Column headers written for an empty node table.
pub const NODE_COLUMNS: [&str; 11] = [
    "id",
    "label",
    "artist",
    "avg_sentiment_score",
    "anger_score",
    "disgust_score",
    "fear_score",
    "joy_score",
    "neutral_score",
    "sadness_score",
    "surprise_score",
];

pub const EDGE_COLUMNS: [&str; 3] = ["source", "target", "weight"];

pub fn write_nodes(path: &Path, nodes: &[Node]) -> Result<()> {
    write_file(path, |w| write_rows(w, path, &NODE_COLUMNS, nodes))
}

pub fn write_edges(path: &Path, edges: &[Edge]) -> Result<()> {
    write_file(path, |w| write_rows(w, path, &EDGE_COLUMNS, edges))
}

fn write_file<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(std::fs::File) -> Result<()>,
{
    let file = std::fs::File::create(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    body(file)
}

/// Serialize rows with a header. An empty table still gets its header line.
pub fn write_rows<W: Write, T: Serialize>(writer: W, path: &Path, columns: &[&str], rows: &[T]) -> Result<()> {
    let csv_err = |source: csv::Error| GraphError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(columns).map_err(csv_err)?;
    for row in rows {
        wtr.serialize(row).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
