//! # Application Configuration
//!
//! This module defines the configuration structure for the `jsonzip-server` and
//! provides the logic for loading it from a `config.yml` file and environment
//! variables. Layers are applied in this order, later ones winning:
//!
//! 1. Programmatic defaults.
//! 2. The YAML file, with `${VAR}` placeholders substituted from the environment.
//! 3. Plain environment variables for top-level keys (`PORT`, `MAX_UPLOAD_BYTES`).
//! 4. `JSONZIP_`-prefixed variables for nested keys
//!    (e.g. `JSONZIP_EXTRACTION__VALIDATION=strict`).

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use jsonzip::ExtractOptions;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The largest accepted upload, in bytes. Loaded from `MAX_UPLOAD_BYTES` env var.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// How rows are validated and how duplicate slugs are handled.
    #[serde(default)]
    pub extraction: ExtractOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            extraction: ExtractOptions::default(),
        }
    }
}

fn default_port() -> u16 {
    9090
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

// Reads a file and substitutes `${VAR}` placeholders from the environment.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded_content.into_owned()))
}

/// Loads the application configuration from a file and environment variables.
///
/// With `config_path_override` the given file must exist. Without it,
/// `config.yml` next to this crate's manifest is used when present, and the
/// defaults otherwise.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults.
        .set_default("port", i64::from(defaults.port))?
        .set_default("max_upload_bytes", defaults.max_upload_bytes as i64)?
        .set_default(
            "extraction.validation",
            defaults.extraction.validation.to_string(),
        )?
        .set_default(
            "extraction.duplicates",
            defaults.extraction.duplicates.to_string(),
        )?;

    // Layer 2: YAML file.
    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            let default_path = format!("{}/config.yml", env!("CARGO_MANIFEST_DIR"));
            if let Some(content) = read_and_substitute(&default_path)? {
                info!("Loading configuration from '{default_path}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            } else {
                info!("'{default_path}' not found. Using built-in defaults.");
            }
        }
    }

    let settings = builder
        // Layer 3: Environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 4: Prefixed environment variables for nested overrides.
        .add_source(
            Environment::with_prefix("JSONZIP")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
