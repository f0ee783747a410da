//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The state is read-only: each request builds its
//! own rows and archive, so nothing mutable is shared between handlers.

use crate::config::AppConfig;
use jsonzip::ExtractOptions;
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// The extraction options applied to every upload.
    pub fn extract_options(&self) -> ExtractOptions {
        self.config.extraction
    }
}

/// Builds the shared application state from the configuration.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    if config.max_upload_bytes == 0 {
        return Err(anyhow::anyhow!("max_upload_bytes must be greater than zero"));
    }

    info!(
        validation = %config.extraction.validation,
        duplicates = %config.extraction.duplicates,
        max_upload_bytes = config.max_upload_bytes,
        "Initialized extraction settings."
    );

    Ok(AppState {
        config: Arc::new(config),
    })
}
