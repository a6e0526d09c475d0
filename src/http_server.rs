//! HTTP API for CV classification
//!
//! Provides endpoints for:
//! - POST /classify - multipart upload, field `file` holding the PDF
//! - GET /health - liveness, version and loaded model
//!
//! Errors are returned as `{"detail": "..."}` with 400 for input errors
//! and 500 for everything else.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::pipeline::{ClassifyResponse, CvClassifier, UploadedDocument};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const FILE_FIELD: &str = "file";

// ============================================================================
// AppState
// ============================================================================

#[derive(Clone)]
struct AppState {
    classifier: Arc<CvClassifier>,
    start_time: Instant,
}

// ============================================================================
// Error type
// ============================================================================

struct AppError(PipelineError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(serde_json::json!({"detail": self.0.public_message()}))).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError(e)
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    model: String,
    uptime_secs: u64,
}

// ============================================================================
// Handlers
// ============================================================================

// POST /classify
async fn classify_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ClassifyResponse>, AppError> {
    let mut upload: Option<UploadedDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PipelineError::ProcessingFailure(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue; // ignore unknown fields
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| PipelineError::ProcessingFailure(format!("Read error: {}", e)))?;
        upload = Some(UploadedDocument::new(filename, content.to_vec()));
    }

    let document = upload.ok_or(PipelineError::InvalidInputKind)?;

    // Extraction and inference are CPU-bound
    let classifier = state.classifier.clone();
    let response = tokio::task::spawn_blocking(move || classifier.handle(&document))
        .await
        .map_err(|e| PipelineError::ProcessingFailure(e.to_string()))??;

    Ok(Json(response))
}

// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        model: state.classifier.model_id().to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

// ============================================================================
// Router / server
// ============================================================================

/// Build the application router around a loaded classifier.
pub fn router(classifier: Arc<CvClassifier>) -> Router {
    let state = AppState {
        classifier,
        start_time: Instant::now(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/classify", post(classify_handler))
        .route("/health", get(health_handler))
        // uploads are not size-capped
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `bind_addr` and serve until Ctrl-C.
pub async fn serve(classifier: Arc<CvClassifier>, bind_addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, "listening");

    axum::serve(listener, router(classifier))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => warn!(error = %e, "failed to listen for shutdown signal"),
    }
}
