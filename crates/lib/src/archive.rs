//! # Archive Assembly
//!
//! `ExtractionResult` collects `slug -> JSON text` pairs while rows are being
//! processed, then seals them into a zip exactly once. Entries keep the order
//! in which their slug was first written.

use crate::errors::ExtractError;
use crate::types::DuplicatePolicy;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use tracing::{debug, warn};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

/// One file destined for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub slug: String,
    pub content: String,
}

impl ArchiveEntry {
    /// The file name inside the archive.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.slug)
    }
}

/// Accumulates the entries of one extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    entries: Vec<ArchiveEntry>,
    index: HashMap<String, usize>,
    processed: usize,
    duplicates: DuplicatePolicy,
}

impl ExtractionResult {
    pub fn new(duplicates: DuplicatePolicy) -> Self {
        Self {
            duplicates,
            ..Self::default()
        }
    }

    /// Records `slug.json`. Every successful call counts towards `processed`,
    /// including one that replaces an earlier entry.
    pub fn insert(&mut self, slug: &str, content: &str) -> Result<(), ExtractError> {
        match self.index.get(slug) {
            Some(&position) => {
                if self.duplicates == DuplicatePolicy::Reject {
                    return Err(ExtractError::DuplicateSlug(slug.to_string()));
                }
                warn!(slug, "Duplicate slug found; replacing earlier entry");
                if let Some(entry) = self.entries.get_mut(position) {
                    entry.content = content.to_string();
                }
            }
            None => {
                self.index.insert(slug.to_string(), self.entries.len());
                self.entries.push(ArchiveEntry {
                    slug: slug.to_string(),
                    content: content.to_string(),
                });
            }
        }
        self.processed += 1;
        Ok(())
    }

    pub fn get(&self, slug: &str) -> Option<&str> {
        self.index
            .get(slug)
            .and_then(|&position| self.entries.get(position))
            .map(|entry| entry.content.as_str())
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Number of successful writes.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Number of distinct files in the archive.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes all entries into a deflate-compressed zip.
    pub fn seal(&self) -> Result<Vec<u8>, ExtractError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            writer.start_file(entry.file_name(), options)?;
            writer.write_all(entry.content.as_bytes())?;
        }

        let bytes = writer.finish()?.into_inner();
        debug!(
            entries = self.entries.len(),
            size = bytes.len(),
            "Sealed zip archive"
        );
        Ok(bytes)
    }
}

/// The download file name for an archive holding `processed` writes.
pub fn attachment_name(processed: usize) -> String {
    format!("json-files-{processed}.zip")
}
