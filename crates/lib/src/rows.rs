//! # Row Parsing
//!
//! Turns raw CSV text into an ordered list of `Row`s. The header line names the
//! columns; blank lines are skipped by the `csv` reader. Records are allowed to
//! be ragged: a short record only exposes the columns it has, and fields past
//! the end of the header are dropped.

use crate::errors::ExtractError;
use tracing::debug;

/// One CSV data line, keyed by the header names in their original order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Iterates `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Decodes an uploaded file body as UTF-8, replacing invalid sequences.
pub fn decode_upload(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parses CSV text into rows, treating the first line as the header.
pub fn parse_rows(text: &str) -> Result<Vec<Row>, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers.iter().zip(record.iter()).collect();
        if !row.is_empty() {
            rows.push(row);
        }
    }

    debug!(columns = headers.len(), rows = rows.len(), "Parsed CSV input");
    Ok(rows)
}
