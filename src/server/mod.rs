pub mod api;
pub mod upload;

use crate::constants::MAX_UPLOAD_SIZE;
use crate::services::{DataSource, LoadOptions, Splitter};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Server settings, resolved once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Local CSV served at `/data.csv` and charted on page load
    pub data_file: PathBuf,
    /// Remote CSV fetched instead of `data_file` when set
    pub data_url: Option<String>,
    pub public_dir: PathBuf,
    pub load: LoadOptions,
}

impl ServerConfig {
    /// Source charted by `GET /api/chart`
    pub fn data_source(&self) -> DataSource {
        match &self.data_url {
            Some(url) => DataSource::Url(url.clone()),
            None => DataSource::File(self.data_file.clone()),
        }
    }

    /// Load options for the fetch entry point (plain comma split)
    pub fn fetch_options(&self) -> LoadOptions {
        let mut options = self.load;
        options.parse.splitter = Splitter::Comma;
        options
    }

    /// Load options for the upload entry point (CSV tokenizer)
    pub fn upload_options(&self) -> LoadOptions {
        let mut options = self.load;
        options.parse.splitter = Splitter::Tokenized;
        options
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Build the router with all routes
pub fn router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any);

    let public_dir = app_state.config.public_dir.clone();

    Router::new()
        .route("/", get(api::index_handler))
        .route("/data.csv", get(api::data_csv_handler))
        .route("/health", get(api::health_handler))
        .route("/api/chart", get(api::chart_handler))
        .route(
            "/api/upload",
            // Leave room for multipart framing around the file itself
            post(upload::upload_csv_handler)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 64 * 1024)),
        )
        .nest_service("/public", ServeDir::new(public_dir))
        .layer(cors)
        .with_state(app_state)
}

/// Start the axum server
pub async fn serve(config: ServerConfig, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting candleview server");
    tracing::info!("Chart data source: {}", config.data_source());
    tracing::info!("Using public directory: {}", config.public_dir.display());
    tracing::info!(
        offset_mode = config.load.parse.offset_mode.as_str(),
        volume = config.load.chart.volume,
        "Load options"
    );

    tracing::info!("Registering routes:");
    tracing::info!("  GET  /            (chart page)");
    tracing::info!("  GET  /data.csv    ({})", config.data_file.display());
    tracing::info!("  GET  /api/chart");
    tracing::info!("  POST /api/upload  (multipart field 'file')");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /public/*    (static files)");

    let app = router(AppState::new(config));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
