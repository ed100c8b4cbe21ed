//! HTTP trigger adapter.
//!
//! Thin layer over the upload pipeline: decodes the inbound JSON request,
//! runs the pipeline, and maps the result onto a response status.

use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::UploadError;
use crate::request::LargeUploadRequest;
use crate::upload::{self, UploadOutcome};

/// Builds the trigger router. `max_body_bytes` caps the inbound body, which
/// carries the whole payload base64-encoded.
pub fn router(max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/LargeFileUpload", post(large_file_upload))
        .route("/api/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(max_body_bytes))
}

/// Serves the trigger until the process is stopped.
pub async fn serve(addr: SocketAddr, max_body_bytes: usize) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!("upload trigger listening on {addr}");
    axum::serve(listener, router(max_body_bytes)).await?;
    Ok(())
}

/// Handler for `POST /api/LargeFileUpload`.
async fn large_file_upload(
    Json(request): Json<LargeUploadRequest>,
) -> (StatusCode, Json<UploadOutcome>) {
    match upload::run(&request).await {
        Ok(outcome) if outcome.success => (StatusCode::OK, Json(outcome)),
        Ok(outcome) => (StatusCode::BAD_REQUEST, Json(outcome)),
        Err(err) => {
            error!(error = %err, "upload failed");
            (
                failure_status(&err),
                Json(UploadOutcome::failed(err.to_string())),
            )
        }
    }
}

/// Maps a pipeline error onto the trigger's response status: typed remote
/// rejections and validation failures map to 400, transport-level faults
/// are unexpected and map to 422.
fn failure_status(error: &UploadError) -> StatusCode {
    match error {
        UploadError::Transport(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_REQUEST,
    }
}
