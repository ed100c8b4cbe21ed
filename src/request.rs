//! Inbound upload request and its validation rules.

use std::fmt;

use serde::Deserialize;
use url::Url;

/// Server-side upload configuration used when the caller does not name one.
pub const DEFAULT_UPLOAD_CONFIGURATION: &str = "AssetUploadConfiguration";

/// One large-file upload request, as posted to the trigger.
///
/// Missing fields deserialize to empty defaults so [`validate`] can name the
/// offending field instead of surfacing an opaque decode error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LargeUploadRequest {
    /// File name with extension.
    #[serde(default)]
    pub filename: String,
    /// Media/MIME type of the file.
    #[serde(default)]
    pub media_type: String,
    /// Declared file size in bytes.
    #[serde(default)]
    pub file_size: i64,
    /// Base64-encoded file contents.
    #[serde(default)]
    pub file_content: String,
    /// Content Hub instance URL, e.g. `https://example.sitecorecontenthub.cloud`.
    #[serde(default)]
    pub content_hub_host_name: String,
    /// Content Hub access token.
    #[serde(default)]
    pub content_hub_token: String,
    /// Upload configuration name; defaults to [`DEFAULT_UPLOAD_CONFIGURATION`].
    pub upload_configuration: Option<String>,
}

impl LargeUploadRequest {
    pub fn upload_configuration_name(&self) -> &str {
        self.upload_configuration
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_UPLOAD_CONFIGURATION)
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

const REQUIRED: &str = "a non-empty value is required";

/// Checks the request against the rule set and returns every failure.
///
/// An empty result means the request may proceed to the network.
pub fn validate(request: &LargeUploadRequest) -> Vec<FieldError> {
    let mut failures = Vec::new();

    let required = [
        ("Filename", request.filename.trim().is_empty()),
        ("MediaType", request.media_type.trim().is_empty()),
        ("FileContent", request.file_content.is_empty()),
        (
            "ContentHubHostName",
            request.content_hub_host_name.trim().is_empty(),
        ),
        (
            "ContentHubToken",
            request.content_hub_token.trim().is_empty(),
        ),
    ];
    for (field, missing) in required {
        if missing {
            failures.push(FieldError {
                field,
                message: REQUIRED,
            });
        }
    }

    if request.file_size < 1 {
        failures.push(FieldError {
            field: "FileSize",
            message: "must be at least 1 byte",
        });
    }

    let host = request.content_hub_host_name.trim();
    if !host.is_empty() && Url::parse(host).is_err() {
        failures.push(FieldError {
            field: "ContentHubHostName",
            message: "must be an absolute URL",
        });
    }

    failures
}
