//! # JSON Validation
//!
//! Decides whether a resolved row is admitted into the archive. Validation is
//! purely a check: the archive always stores the text exactly as resolved.

use crate::resolve::looks_like_object;
use crate::types::ValidationMode;
use serde::de::IgnoredAny;
use tracing::warn;

/// The outcome of validating one row's JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The text parsed as JSON.
    Valid,
    /// The text failed to parse but is kept because it looks like an object.
    Salvaged,
    /// The row is dropped.
    Rejected,
}

impl Verdict {
    pub fn is_admitted(self) -> bool {
        matches!(self, Verdict::Valid | Verdict::Salvaged)
    }
}

/// Parses the text as JSON after collapsing any leftover doubled quotes.
pub fn validate_json(json_text: &str) -> Result<(), serde_json::Error> {
    serde_json::from_str::<IgnoredAny>(&json_text.replace("\"\"", "\"")).map(|_| ())
}

/// Validates a row's JSON and applies the lenient fallback when enabled.
pub fn judge(slug: &str, json_text: &str, mode: ValidationMode) -> Verdict {
    match validate_json(json_text) {
        Ok(()) => Verdict::Valid,
        Err(e) => {
            warn!(slug, error = %e, "Error validating JSON");
            if mode == ValidationMode::Lenient && looks_like_object(json_text) {
                Verdict::Salvaged
            } else {
                Verdict::Rejected
            }
        }
    }
}
