//! Error taxonomy for the upload pipeline.

use reqwest::StatusCode;

use crate::request::FieldError;

/// Errors produced while driving a chunked upload end to end.
///
/// Every variant aborts the remaining pipeline steps except [`Completion`],
/// which the orchestrator records and tolerates.
///
/// [`Completion`]: UploadError::Completion
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The inbound request failed field validation; no network call was made.
    #[error("invalid upload request: {}", format_fields(.0))]
    Validation(Vec<FieldError>),

    /// The file content was not valid base64.
    #[error("file content is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The session-creation call was rejected by Content Hub.
    #[error("upload session request failed with {status}: {body}")]
    SessionInitiation { status: StatusCode, body: String },

    /// The session response carried no `Location` header to post chunks to.
    #[error("upload session response is missing a location header")]
    MissingLocation,

    /// A request URL could not be built from the host or session location.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// A chunk post was rejected; chunks after `index` were never sent.
    #[error("chunk {index} upload failed with {status}: {body}")]
    ChunkUpload {
        index: usize,
        status: StatusCode,
        body: String,
    },

    /// The completion signal was rejected.
    #[error("completion signal failed with {status}: {body}")]
    Completion { status: StatusCode, body: String },

    /// Finalize reported success but its body did not decode into an asset
    /// descriptor.
    #[error("finalize response could not be decoded: {0}")]
    FinalizeDecode(#[source] serde_json::Error),

    /// Transport-level failure talking to Content Hub.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

fn format_fields(failures: &[FieldError]) -> String {
    failures
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_every_failing_field() {
        let err = UploadError::Validation(vec![
            FieldError {
                field: "ContentHubToken",
                message: "a non-empty value is required",
            },
            FieldError {
                field: "FileSize",
                message: "must be at least 1 byte",
            },
        ]);

        let message = err.to_string();
        assert!(message.contains("ContentHubToken"));
        assert!(message.contains("FileSize"));
    }

    #[test]
    fn chunk_error_carries_the_failing_index() {
        let err = UploadError::ChunkUpload {
            index: 7,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        };
        assert!(err.to_string().contains("chunk 7"));
    }
}
