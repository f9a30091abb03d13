//! Reader for the per-line annotation file.
//!
//! Rows are turned into typed [`LineRecord`]s in a single pass. Any cell that
//! cannot be parsed fails the whole read: dropping a row would silently skew
//! the song means.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{GraphError, Result};
use crate::models::{Emotion, LineRecord, SentimentLabel, EMOTION_COUNT};
use crate::progress::Phase;
use crate::schema::{self, ColumnIndex};

/// Read every line record from a CSV file on disk, reporting progress as
/// "Phase 1".
pub fn read_line_records(path: &Path) -> Result<Vec<LineRecord>> {
    let file = std::fs::File::open(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let phase = Phase::start("Phase 1: Reading line records");
    let records = read_records(file, path, |count| phase.tick(count))?;
    phase.finish(format!("Phase 1: Read {} line records", records.len()));
    Ok(records)
}

/// Read line records from any reader. `path` is only used in error messages.
pub fn read_line_records_from<R: Read>(reader: R, path: &Path) -> Result<Vec<LineRecord>> {
    read_records(reader, path, |_| {})
}

/// `on_row` is called with the running record count after each row.
fn read_records<R, F>(reader: R, path: &Path, mut on_row: F) -> Result<Vec<LineRecord>>
where
    R: Read,
    F: FnMut(usize),
{
    let csv_err = |source: csv::Error| GraphError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let columns = schema::validate_headers(rdr.headers().map_err(csv_err)?.iter(), path)?;

    let mut records = Vec::new();
    let mut row = StringRecord::new();
    while rdr.read_record(&mut row).map_err(csv_err)? {
        // Header is line 1, so the first data row is line 2.
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(records.len() as u64 + 2);
        records.push(parse_record(&row, &columns, path, line)?);
        on_row(records.len());
    }

    tracing::debug!("Read {} line records from {}", records.len(), path.display());
    Ok(records)
}

fn parse_record(row: &StringRecord, columns: &ColumnIndex, path: &Path, line: u64) -> Result<LineRecord> {
    let cells = Cells { row, path, line };

    let label: SentimentLabel = cells
        .get(columns.label, schema::LABEL_COLUMN)?
        .parse()
        .map_err(|msg: String| GraphError::cell(path, line, schema::LABEL_COLUMN, msg))?;

    let mut emotions = [0.0; EMOTION_COUNT];
    for emotion in Emotion::ALL {
        emotions[emotion.index()] = cells.number(columns.emotions[emotion.index()], emotion.column())?;
    }

    Ok(LineRecord {
        artist: cells.text(columns.artist, schema::ARTIST_COLUMN)?,
        title: cells.text(columns.title, schema::TITLE_COLUMN)?,
        label,
        score: cells.number(columns.score, schema::SCORE_COLUMN)?,
        emotions,
    })
}

/// Cell access for one row, with positioned errors.
struct Cells<'a> {
    row: &'a StringRecord,
    path: &'a Path,
    line: u64,
}

impl<'a> Cells<'a> {
    fn get(&self, idx: usize, name: &str) -> Result<&'a str> {
        self.row
            .get(idx)
            .ok_or_else(|| GraphError::cell(self.path, self.line, name, "value is missing"))
    }

    /// Non-empty text, kept verbatim (no trimming or case folding).
    fn text(&self, idx: usize, name: &str) -> Result<String> {
        let value = self.get(idx, name)?;
        if value.is_empty() {
            return Err(GraphError::cell(self.path, self.line, name, "value is empty"));
        }
        Ok(value.to_string())
    }

    fn number(&self, idx: usize, name: &str) -> Result<f64> {
        let raw = self.get(idx, name)?;
        let value: f64 = raw.trim().parse().map_err(|_| {
            GraphError::cell(self.path, self.line, name, format!("not a number: '{}'", raw))
        })?;
        if !value.is_finite() {
            return Err(GraphError::cell(
                self.path,
                self.line,
                name,
                format!("not a finite number: '{}'", raw),
            ));
        }
        Ok(value)
    }
}
