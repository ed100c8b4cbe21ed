use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the session-creation call, `POST api/v2.0/upload`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUploadRequest {
    pub action: UploadAction,
    pub file_name: String,
    /// Content Hub expects the declared size as a string, not a number.
    pub file_size: String,
    pub upload_configuration: UploadConfigurationRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadAction {
    pub name: String,
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadConfigurationRef {
    pub name: String,
    pub parameters: Map<String, Value>,
}

impl NewUploadRequest {
    /// Describes a `NewAsset` upload of `file_size` bytes under the named
    /// upload configuration.
    pub fn new_asset(file_name: &str, file_size: i64, configuration: &str) -> Self {
        Self {
            action: UploadAction {
                name: "NewAsset".to_string(),
                parameters: Map::new(),
            },
            file_name: file_name.to_string(),
            file_size: file_size.to_string(),
            upload_configuration: UploadConfigurationRef {
                name: configuration.to_string(),
                parameters: Map::new(),
            },
        }
    }
}

/// Asset descriptor returned by a successful finalize call.
#[derive(Debug, Clone, Deserialize)]
pub struct FinalizeResponse {
    pub asset_id: i64,
    pub asset_identifier: String,
}
