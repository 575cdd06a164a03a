use crate::models::{ChartSpec, StatusReport};
use crate::server::AppState;
use crate::services::{load, LoadFailure, LoadOutcome};
use crate::services::page::index_page;
use axum::{
    extract::{Json, State},
    http::{header::{CACHE_CONTROL, CONTENT_TYPE}, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Body returned by both chart entry points
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub status: StatusReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRowResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<LoadFailure>,
}

#[derive(Debug, Serialize)]
pub struct SkippedRowResponse {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub data_source: String,
    pub offset_mode: &'static str,
}

/// HTTP status for a finished load
pub fn outcome_status(outcome: &LoadOutcome) -> StatusCode {
    match outcome.error {
        None => StatusCode::OK,
        Some(LoadFailure::Acquisition) => StatusCode::BAD_GATEWAY,
        Some(LoadFailure::InvalidInput) => StatusCode::BAD_REQUEST,
        Some(LoadFailure::NoValidData) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(LoadFailure::Other) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Turn a load outcome into the JSON response
pub fn outcome_response(outcome: LoadOutcome) -> Response {
    let status_code = outcome_status(&outcome);
    let body = ChartResponse {
        status: outcome.status,
        chart: outcome.chart,
        skipped: outcome
            .skipped
            .into_iter()
            .map(|row| SkippedRowResponse {
                line: row.line,
                reason: row.reason.to_string(),
            })
            .collect(),
        error: outcome.error,
    };

    (status_code, Json(body)).into_response()
}

/// GET /api/chart - Load the configured CSV source and return the chart
///
/// Mirrors the page-load fetch: one attempt, plain comma split.
#[instrument(skip(app_state))]
pub async fn chart_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let config = &app_state.config;
    let source = config.data_source();
    debug!(%source, "Received chart request");

    let outcome = load(&source, &config.fetch_options()).await;
    info!(
        status = %outcome.status,
        skipped = outcome.skipped.len(),
        "Returning chart"
    );

    outcome_response(outcome)
}

/// GET /data.csv - Serve the configured CSV file
#[instrument(skip(app_state))]
pub async fn data_csv_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let path = &app_state.config.data_file;

    match tokio::fs::read(path).await {
        Ok(data) => (
            StatusCode::OK,
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8"),
                (CACHE_CONTROL, "no-cache"),
            ],
            data,
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Failed to read data file");
            (StatusCode::NOT_FOUND, "data.csv not found").into_response()
        }
    }
}

/// GET / - Chart page from the public dir, or the built-in copy
#[instrument(skip(app_state))]
pub async fn index_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let index_path = app_state.config.public_dir.join("index.html");

    match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => {
            debug!("Serving chart page from {}", index_path.display());
            Html(html).into_response()
        }
        Err(_) => {
            debug!("No index.html in public dir, serving built-in page");
            Html(index_page()).into_response()
        }
    }
}

/// GET /health
#[instrument(skip(app_state))]
pub async fn health_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let config = &app_state.config;
    let health = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        data_source: config.data_source().to_string(),
        offset_mode: config.load.parse.offset_mode.as_str(),
    };

    (StatusCode::OK, Json(health)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::ServerConfig;
    use crate::services::LoadOptions;
    use axum::body::to_bytes;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn state(data_file: PathBuf) -> State<AppState> {
        State(AppState::new(ServerConfig {
            data_file,
            data_url: None,
            public_dir: PathBuf::from("does-not-exist"),
            load: LoadOptions::default(),
        }))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_chart_handler_success() {
        let file = csv_file(
            "Datetime,Open,High,Low,Close,Volume\n2026-02-01 18:10:00-05:00,100,105,95,102,1000\n2026-02-01 18:15:00-05:00,102,103,98,99,700\n",
        );
        let response = chart_handler(state(file.path().to_path_buf())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"]["class"], "success");
        assert_eq!(json["status"]["message"], "Successfully loaded 2 data points");
        assert_eq!(json["chart"]["candles"]["data"][0]["time"], 1769969400);
        assert_eq!(json["chart"]["volume"]["data"][1]["color"], "#ef5350");
        assert!(json.get("skipped").is_none());
    }

    #[tokio::test]
    async fn test_chart_handler_no_valid_data() {
        let file = csv_file("Datetime,Open,High,Low,Close,Volume\nx,1,2\n");
        let response = chart_handler(state(file.path().to_path_buf())).await.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["status"]["class"], "error");
        assert_eq!(json["error"], "no_valid_data");
        assert_eq!(json["skipped"][0]["line"], 2);
        assert!(json.get("chart").is_none());
    }

    #[tokio::test]
    async fn test_chart_handler_missing_file() {
        let response = chart_handler(state(PathBuf::from("missing.csv"))).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_data_csv_handler() {
        let file = csv_file("Datetime,Open,High,Low,Close,Volume\n");
        let response = data_csv_handler(state(file.path().to_path_buf())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );

        let response = data_csv_handler(state(PathBuf::from("missing.csv"))).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_index_handler_falls_back_to_builtin() {
        let response = index_handler(state(PathBuf::from("data.csv"))).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("csvInput"));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler(state(PathBuf::from("data.csv"))).await.into_response();
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["offset_mode"], "legacy");
        assert_eq!(json["data_source"], "file data.csv");
    }
}
