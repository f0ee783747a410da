//! # CSV Upload Handler
//!
//! Accepts a multipart form with a `file` field holding CSV text and responds
//! with a zip of `<slug>.json` files.

use super::{AppError, AppState};
use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use jsonzip::decode_upload;
use tracing::{info, warn};

/// The name of the form field carrying the CSV file.
pub const FILE_FIELD: &str = "file";

/// Handler for `POST /api/process-csv`.
pub async fn process_csv_handler(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let mut multipart = multipart?;
    let mut upload: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        if name == FILE_FIELD {
            let file_name = field.file_name().unwrap_or("upload.csv").to_string();
            let bytes = field.bytes().await?;
            info!(file_name = %file_name, size = bytes.len(), "Received CSV upload");
            upload = Some(bytes.to_vec());
        } else {
            warn!("Ignoring unknown multipart field: {}", name);
        }
    }

    let upload = upload.ok_or(AppError::NoFile)?;
    let csv_text = decode_upload(&upload);
    let extraction = jsonzip::extract(&csv_text, &app_state.extract_options())?;

    info!(
        processed = extraction.processed(),
        entries = extraction.result.entry_count(),
        size = extraction.bytes.len(),
        "Returning zip archive"
    );

    let headers = [
        (CONTENT_TYPE, "application/zip".to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename={}", extraction.file_name),
        ),
    ];
    Ok((headers, extraction.bytes).into_response())
}
