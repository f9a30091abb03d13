//! Header validation for the annotated lines file.
//!
//! The header is checked once; the resulting column positions are what the
//! reader uses to build typed records, so no later stage looks columns up
//! by name.

use std::path::Path;

use crate::error::{GraphError, Result};
use crate::models::{Emotion, EMOTION_COUNT};

pub const ARTIST_COLUMN: &str = "artist";
pub const TITLE_COLUMN: &str = "title";
pub const LABEL_COLUMN: &str = "label";
pub const SCORE_COLUMN: &str = "score";

/// Every column the input must expose, in canonical order.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![ARTIST_COLUMN, TITLE_COLUMN, LABEL_COLUMN, SCORE_COLUMN];
    columns.extend(Emotion::ALL.iter().map(|e| e.column()));
    columns
}

/// Positions of the required columns within an input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    pub artist: usize,
    pub title: usize,
    pub label: usize,
    pub score: usize,
    pub emotions: [usize; EMOTION_COUNT],
}

/// Validate a header row, naming every missing column on failure.
///
/// Extra columns are ignored. When a column name appears more than once the
/// first occurrence wins.
pub fn validate_headers<'a, I>(headers: I, path: &Path) -> Result<ColumnIndex>
where
    I: IntoIterator<Item = &'a str>,
{
    let headers: Vec<&str> = headers.into_iter().collect();
    let position = |name: &str| headers.iter().position(|h| *h == name);

    let missing: Vec<String> = required_columns()
        .into_iter()
        .filter(|c| position(*c).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(GraphError::Schema {
            path: path.to_path_buf(),
            missing,
        });
    }

    // All present; the lookups below cannot miss.
    let find = |name: &str| position(name).unwrap_or_default();
    let mut emotions = [0usize; EMOTION_COUNT];
    for emotion in Emotion::ALL {
        emotions[emotion.index()] = find(emotion.column());
    }

    Ok(ColumnIndex {
        artist: find(ARTIST_COLUMN),
        title: find(TITLE_COLUMN),
        label: find(LABEL_COLUMN),
        score: find(SCORE_COLUMN),
        emotions,
    })
}
