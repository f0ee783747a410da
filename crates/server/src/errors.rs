use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::multipart::{MultipartError, MultipartRejection};
use jsonzip::ExtractError;
use serde_json::json;
use tracing::{error, warn};

/// The generic message returned for any failure the client cannot fix.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error processing CSV file";

/// A custom error type for the server application.
///
/// This enum encapsulates the failures of the upload endpoint and converts them
/// into JSON error responses. Internal details are logged, never returned.
#[derive(Debug)]
pub enum AppError {
    /// The multipart form had no `file` field.
    NoFile,
    /// The request body was not a readable multipart form.
    InvalidUpload(String),
    /// The upload exceeded `max_upload_bytes`.
    UploadTooLarge,
    /// Errors originating from the extraction pipeline.
    Extract(ExtractError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Extract(err)
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::InvalidUpload(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::UploadTooLarge
        } else if status.is_client_error() {
            AppError::InvalidUpload(err.body_text())
        } else {
            AppError::Internal(err.into())
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::NoFile => {
                warn!("Upload rejected: no file provided");
                (StatusCode::BAD_REQUEST, "No file provided".to_string())
            }
            AppError::InvalidUpload(detail) => {
                warn!("Upload rejected: {detail}");
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid multipart request".to_string(),
                )
            }
            AppError::UploadTooLarge => {
                warn!("Upload rejected: body exceeds the configured limit");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Uploaded file is too large".to_string(),
                )
            }
            AppError::Extract(err) => match err {
                ExtractError::NoValidJson => {
                    warn!("Upload rejected: no valid JSON rows");
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                ExtractError::DuplicateSlug(_) => {
                    warn!("Upload rejected: {err}");
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                ExtractError::MalformedInput(e) => {
                    warn!("Upload rejected: malformed CSV: {e}");
                    (
                        StatusCode::BAD_REQUEST,
                        "Could not parse CSV file".to_string(),
                    )
                }
                ExtractError::Archive(_) | ExtractError::Io(_) => {
                    error!("Error processing CSV: {err:?}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        INTERNAL_ERROR_MESSAGE.to_string(),
                    )
                }
            },
            AppError::Internal(err) => {
                error!("Error processing CSV: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
