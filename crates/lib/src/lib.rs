//! # CSV to JSON Archive Extraction
//!
//! This crate pulls JSON documents out of a CSV column and packages them as
//! `<slug>.json` files inside a zip archive. The pipeline runs in three stages:
//!
//! 1. [`rows`] parses the CSV text into ordered rows.
//! 2. [`resolve`] picks the slug and JSON columns of each row by name.
//! 3. [`normalize`] validates the JSON and [`archive`] collects and seals the
//!    admitted entries.
//!
//! Per-row problems never abort the run; only unparseable input, an empty
//! result, a rejected duplicate, or a failure while writing the zip do.

pub mod archive;
pub mod errors;
pub mod normalize;
pub mod resolve;
pub mod rows;
pub mod types;

pub use archive::{attachment_name, ArchiveEntry, ExtractionResult};
pub use errors::ExtractError;
pub use resolve::{resolve_fields, ResolvedFields};
pub use rows::{decode_upload, parse_rows, Row};
pub use types::{DuplicatePolicy, ExtractOptions, ValidationMode};

use normalize::judge;
use tracing::{debug, info};

/// A sealed archive ready to be served or written to disk.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub result: ExtractionResult,
    pub bytes: Vec<u8>,
    pub file_name: String,
}

impl Extraction {
    pub fn processed(&self) -> usize {
        self.result.processed()
    }
}

/// Runs the row pipeline without sealing the archive.
///
/// An empty result is not an error here; callers decide what zero entries mean.
pub fn collect(csv_text: &str, options: &ExtractOptions) -> Result<ExtractionResult, ExtractError> {
    let rows = parse_rows(csv_text)?;
    info!("Parsed {} rows from CSV", rows.len());

    let mut result = ExtractionResult::new(options.duplicates);
    for (line, row) in rows.iter().enumerate() {
        let fields = resolve_fields(row);
        if !fields.is_complete() {
            debug!(row = line + 1, "Skipping row without slug or JSON content");
            continue;
        }

        let verdict = judge(&fields.slug, &fields.json_text, options.validation);
        if verdict.is_admitted() {
            result.insert(&fields.slug, &fields.json_text)?;
        } else {
            debug!(row = line + 1, slug = %fields.slug, "Dropping row with invalid JSON");
        }
    }

    info!("Successfully processed {} JSON files", result.processed());
    Ok(result)
}

/// Runs the full pipeline and seals the archive.
///
/// # Errors
///
/// Returns `ExtractError::NoValidJson` when no row produced an entry.
pub fn extract(csv_text: &str, options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    let result = collect(csv_text, options)?;
    if result.processed() == 0 {
        return Err(ExtractError::NoValidJson);
    }

    let bytes = result.seal()?;
    let file_name = attachment_name(result.processed());
    Ok(Extraction {
        result,
        bytes,
        file_name,
    })
}
