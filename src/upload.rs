//! End-to-end upload orchestration.

use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::chunk::{self, CHUNK_SIZE_BYTES};
use crate::client::ContentHubClient;
use crate::error::UploadError;
use crate::request::{self, LargeUploadRequest};
use crate::rest_types::FinalizeResponse;

/// Terminal result of one upload attempt. Either a full success payload or
/// a failure with a message, never both.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub success: bool,
    pub message: String,
    pub asset_id: i64,
    pub asset_identifier: String,
}

impl UploadOutcome {
    pub fn succeeded(descriptor: FinalizeResponse) -> Self {
        Self {
            success: true,
            message: "Upload finalized".to_string(),
            asset_id: descriptor.asset_id,
            asset_identifier: descriptor.asset_identifier,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            asset_id: 0,
            asset_identifier: String::new(),
        }
    }
}

/// Runs one upload end to end: validate, chunk, create a session, transmit
/// every chunk in order, signal completion, finalize.
///
/// Strictly linear with no retries; the first component failure aborts the
/// remaining steps. A rejected completion signal is logged and does not
/// block finalize.
pub async fn run(request: &LargeUploadRequest) -> Result<UploadOutcome, UploadError> {
    let failures = request::validate(request);
    if !failures.is_empty() {
        return Err(UploadError::Validation(failures));
    }

    let chunks = chunk::split(&request.file_content, CHUNK_SIZE_BYTES)?;
    let total = chunks.len();

    let host = Url::parse(request.content_hub_host_name.trim())?;
    let client = ContentHubClient::new(host, request.content_hub_token.clone());

    let session = client
        .initiate_session(
            &request.filename,
            request.file_size,
            request.upload_configuration_name(),
        )
        .await?;
    info!(file = %request.filename, chunks = total, "upload session created");

    client
        .transmit_chunks(&session, &chunks, &request.media_type, &request.filename)
        .await?;

    if let Err(err) = client.signal_complete(&session, total).await {
        warn!(error = %err, "completion signal rejected, proceeding to finalize");
    }

    let outcome = client.finalize(&session.continuation).await?;
    if outcome.success {
        info!(asset_id = outcome.asset_id, "upload finalized");
    } else {
        warn!(message = %outcome.message, "finalize rejected the upload");
    }
    Ok(outcome)
}
