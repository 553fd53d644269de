use serde::{Deserialize, Serialize};

/// Success payload returned by the file upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    pub pathname: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
}

/// Error payload returned by the file upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadErrorBody {
    pub error: String,
}

pub mod upload;
