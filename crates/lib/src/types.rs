//! # Extraction Options
//!
//! The knobs that change how rows are admitted into the archive. Both enums
//! deserialize from lowercase snake-case strings so they can be set from
//! `config.yml` or environment variables.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How a row whose JSON fails strict parsing is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Keep rows that fail parsing as long as they look like an object (`{...}`).
    #[default]
    Lenient,
    /// Only keep rows whose JSON parses.
    Strict,
}

/// What happens when two rows resolve to the same slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later row replaces the earlier entry and a warning is logged.
    #[default]
    LastWriteWins,
    /// The extraction fails with `ExtractError::DuplicateSlug`.
    Reject,
}

/// Options for a single extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ExtractOptions {
    #[serde(default)]
    pub validation: ValidationMode,
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

impl ExtractOptions {
    pub fn strict() -> Self {
        Self {
            validation: ValidationMode::Strict,
            ..Self::default()
        }
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Lenient => write!(f, "lenient"),
            ValidationMode::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(ValidationMode::Lenient),
            "strict" => Ok(ValidationMode::Strict),
            other => Err(format!("Unknown validation mode: {other}")),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::LastWriteWins => write!(f, "last_write_wins"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last_write_wins" => Ok(DuplicatePolicy::LastWriteWins),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(format!("Unknown duplicate policy: {other}")),
        }
    }
}
