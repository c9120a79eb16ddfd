//! Stocktake API Server implementation
//!
//! HTTP server using Axum. The uploaded ledger is the request body; the
//! converted workbook comes back as a download.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::error::{StocktakeError, StocktakeResult};
use crate::layout::PeriodLabels;
use crate::transform::TransformOptions;

/// API Server configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted upload, in bytes
    pub max_upload_bytes: usize,
    /// Closing month used for the quantity labels
    pub period_month: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 20 * 1024 * 1024,
            period_month: PeriodLabels::DEFAULT_MONTH,
        }
    }
}

impl ApiConfig {
    /// Convert an upload limit given in megabytes to bytes
    pub fn upload_limit_from_mb(megabytes: usize) -> StocktakeResult<usize> {
        megabytes
            .checked_mul(1024 * 1024)
            .ok_or_else(|| {
                StocktakeError::Validation(format!(
                    "upload limit of {} MB overflows the byte count",
                    megabytes
                ))
            })
    }
}

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub version: String,
    pub options: TransformOptions,
}

impl AppState {
    pub fn new(options: TransformOptions) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            options,
        }
    }
}

/// Build the router; split out so tests can drive it without a socket
pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Core API endpoints
        .route("/api/v1/convert", post(handlers::convert))
        .route("/api/v1/preview", post(handlers::preview))
        // State and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stocktake=info,tower_http=info".into()),
        )
        .init();

    let options = TransformOptions {
        period: PeriodLabels::new(config.period_month)?,
        ..TransformOptions::default()
    };
    let state = Arc::new(AppState::new(options));
    let app = router(state, config.max_upload_bytes);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("📦 Stocktake API Server starting on http://{}", addr);
    info!("   Endpoints: /api/v1/convert, /api/v1/preview");
    info!("   Health: /health, Version: /version");
    info!(
        "   Period month: {}, upload limit: {} bytes",
        config.period_month, config.max_upload_bytes
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Stocktake API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
