use crate::constants::MAX_UPLOAD_SIZE;
use crate::models::StatusReport;
use crate::server::api::{outcome_response, ChartResponse};
use crate::server::AppState;
use crate::services::{load, DataSource, LoadOutcome};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument, warn};

const MAX_FILENAME_LENGTH: usize = 200;

/// POST /api/upload - Chart a CSV file chosen in the page's file picker
///
/// Expects one multipart file field (normally named `file`). Only the first
/// file is charted. Columns are read with the CSV tokenizer and resolved by
/// header name.
#[instrument(skip_all)]
pub async fn upload_csv_handler(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read multipart body");
                return error_response(StatusCode::BAD_REQUEST, &format!("Invalid upload: {}", e));
            }
        };

        let filename = match field.file_name() {
            Some(name) => sanitize_filename(name),
            None => {
                warn!(field = ?field.name(), "Field without filename, skipping");
                continue;
            }
        };

        if filename.is_empty() {
            return error_response(StatusCode::BAD_REQUEST, "Invalid filename");
        }

        let data = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Failed to read file data");
                return error_response(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    &format!("File size exceeds {}MB limit", MAX_UPLOAD_SIZE / (1024 * 1024)),
                );
            }
        };

        info!(filename = %filename, size = data.len(), "Processing upload");
        let outcome = load_upload(&app_state, filename, data.to_vec()).await;
        return outcome_response(outcome);
    }

    error_response(StatusCode::BAD_REQUEST, "No file provided")
}

/// Run the upload entry point over one file's bytes
pub async fn load_upload(app_state: &AppState, filename: String, data: Vec<u8>) -> LoadOutcome {
    let source = DataSource::Bytes {
        name: filename,
        data,
    };
    load(&source, &app_state.config.upload_options()).await
}

/// Sanitize filename to prevent security issues
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim_start_matches('.')
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .collect()
}

/// Build error response for failures before a load starts
fn error_response(status: StatusCode, message: &str) -> Response {
    let response = ChartResponse {
        status: StatusReport::error(message),
        chart: None,
        skipped: Vec::new(),
        error: None,
    };

    (status, axum::Json(response)).into_response()
}
