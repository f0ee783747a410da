//! # API Route Handlers
//!
//! This module organizes the Axum route handlers for the `jsonzip-server`.

pub mod general;
pub mod process_csv;

// Re-export all handlers so the router can reach them under `handlers::`.
pub use general::*;
pub use process_csv::*;

// Shared items used by the handler modules.
use super::{errors::AppError, state::AppState};
