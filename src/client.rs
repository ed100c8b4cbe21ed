//! Content Hub upload API client.
//!
//! Drives the v2.0 chunked upload protocol: create an upload session, post
//! each chunk to the session location, signal completion, then finalize the
//! session into an asset.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, header};
use tracing::debug;
use url::Url;

use crate::chunk::Chunk;
use crate::error::UploadError;
use crate::rest_types::{FinalizeResponse, NewUploadRequest};
use crate::upload::UploadOutcome;

const UPLOAD_ROUTE: &str = "api/v2.0/upload";
const FINALIZE_ROUTE: &str = "api/v2.0/upload/finalize";

const AUTH_HEADER: &str = "X-Auth-Token";
const MIME_TYPE: &str = "application/json";

/// A server-issued upload session scoping one chunked upload.
#[derive(Debug, Clone)]
pub struct UploadSession {
    /// Base URL every chunk post and the completion signal target.
    pub location_url: String,
    /// Raw session response body; must reach finalize untouched.
    pub continuation: Vec<u8>,
}

pub struct ContentHubClient {
    client: Client,
    base_url: Url,
    auth_token: String,
}

impl ContentHubClient {
    pub fn new(base_url: Url, auth_token: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            auth_token,
        }
    }

    /// Requests a new upload session for the named asset.
    ///
    /// The `Location` response header becomes the session location and the
    /// raw response body is kept as the opaque continuation handle.
    pub async fn initiate_session(
        &self,
        file_name: &str,
        file_size: i64,
        configuration: &str,
    ) -> Result<UploadSession, UploadError> {
        let url = self.base_url.join(UPLOAD_ROUTE)?;
        let body = NewUploadRequest::new_asset(file_name, file_size, configuration);

        let response = self
            .client
            .post(url)
            .header(AUTH_HEADER, &self.auth_token)
            .header(header::ACCEPT, MIME_TYPE)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::SessionInitiation {
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }

        let location_url = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .ok_or(UploadError::MissingLocation)?;
        let continuation = response.bytes().await?.to_vec();

        debug!(location = %location_url, "upload session created");
        Ok(UploadSession {
            location_url,
            continuation,
        })
    }

    /// Posts every chunk to the session location in ascending index order.
    ///
    /// Transmission is strictly sequential and stops at the first rejected
    /// chunk; the remote side assembles by arrival combined with index, so
    /// chunks after a failure are never sent.
    pub async fn transmit_chunks(
        &self,
        session: &UploadSession,
        chunks: &[Chunk],
        media_type: &str,
        file_name: &str,
    ) -> Result<(), UploadError> {
        let total = chunks.len();

        for chunk in chunks {
            let url = session_url(&session.location_url, total, Some(chunk.index))?;
            let part = Part::bytes(chunk.bytes.clone())
                .file_name(file_name.to_owned())
                .mime_str(media_type)?;

            let response = self
                .client
                .post(url)
                .header(AUTH_HEADER, &self.auth_token)
                .multipart(Form::new().part("file", part))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(UploadError::ChunkUpload {
                    index: chunk.index,
                    status,
                    body: response.text().await.unwrap_or_default(),
                });
            }
            debug!(chunk = chunk.index, total, "chunk accepted");
        }

        Ok(())
    }

    /// Tells Content Hub the chunk stream is closed: a bodyless post to the
    /// session location carrying only the total chunk count.
    pub async fn signal_complete(
        &self,
        session: &UploadSession,
        total_chunks: usize,
    ) -> Result<(), UploadError> {
        let url = session_url(&session.location_url, total_chunks, None)?;

        let response = self
            .client
            .post(url)
            .header(AUTH_HEADER, &self.auth_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Completion {
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Submits the continuation handle and decodes the resulting asset
    /// descriptor.
    ///
    /// Non-success statuses yield a failed outcome carrying the raw status
    /// and body; a success response whose body does not decode is an error,
    /// never a silent empty success.
    pub async fn finalize(&self, continuation: &[u8]) -> Result<UploadOutcome, UploadError> {
        let url = self.base_url.join(FINALIZE_ROUTE)?;

        let response = self
            .client
            .post(url)
            .header(AUTH_HEADER, &self.auth_token)
            .header(header::CONTENT_TYPE, MIME_TYPE)
            .header(header::ACCEPT, MIME_TYPE)
            .body(continuation.to_vec())
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => {
                let body = response.bytes().await?;
                let descriptor: FinalizeResponse =
                    serde_json::from_slice(&body).map_err(UploadError::FinalizeDecode)?;
                Ok(UploadOutcome::succeeded(descriptor))
            }
            _ => Ok(UploadOutcome::failed(format!(
                "finalize failed with {status}: {}",
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}

/// Builds the per-request session URL: the location with the running chunk
/// count appended and, for chunk posts, the chunk index. The location's own
/// query string is preserved.
fn session_url(location: &str, total: usize, index: Option<usize>) -> Result<Url, UploadError> {
    let mut url = Url::parse(location)?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("chunks", &total.to_string());
        if let Some(index) = index {
            pairs.append_pair("chunk", &index.to_string());
        }
    }
    Ok(url)
}
