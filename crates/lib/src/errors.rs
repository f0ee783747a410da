use thiserror::Error;

/// Errors that abort a whole extraction.
///
/// Per-row problems (missing slug, JSON that fails validation) never surface
/// here; they are logged and the row is skipped or salvaged.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to parse CSV input: {0}")]
    MalformedInput(#[from] csv::Error),
    #[error("No valid JSON data found in CSV")]
    NoValidJson,
    #[error("Duplicate slug '{0}' found in CSV")]
    DuplicateSlug(String),
    #[error("Failed to build zip archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("I/O error while writing archive: {0}")]
    Io(#[from] std::io::Error),
}
