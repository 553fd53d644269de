use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::api::{UploadErrorBody, UploadResponse};
use crate::core::attachments::{Attachment, FileSource};
use crate::utils::url::construct_api_url;

pub const UPLOAD_ENDPOINT: &str = "api/files/upload";

/// Ways a single upload can fail. Failures are terminal per file; the
/// client never retries.
#[derive(Debug)]
pub enum UploadError {
    /// The server answered with a well-formed `{ "error": ... }` payload.
    Server { message: String },

    /// The request never completed (connection, TLS, body transfer).
    Transport { source: reqwest::Error },

    /// The server reported success but the payload did not parse.
    Malformed { source: serde_json::Error },
}

impl UploadError {
    /// Text suitable for a user-facing notice. Server-supplied messages are
    /// passed through; everything else collapses to a generic failure.
    pub fn notice_text(&self) -> String {
        match self {
            UploadError::Server { message } => message.clone(),
            UploadError::Transport { .. } | UploadError::Malformed { .. } => {
                "Failed to upload file, please try again!".to_string()
            }
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Server { message } => {
                write!(f, "Upload rejected by server: {message}")
            }
            UploadError::Transport { source } => {
                write!(f, "Upload request failed: {source}")
            }
            UploadError::Malformed { source } => {
                write!(f, "Upload response did not parse: {source}")
            }
        }
    }
}

impl StdError for UploadError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            UploadError::Server { .. } => None,
            UploadError::Transport { source } => Some(source),
            UploadError::Malformed { source } => Some(source),
        }
    }
}

/// Seam between the composer and the upload transport. The composer fans
/// out over this trait; tests substitute an in-memory implementation.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, file: FileSource) -> Result<Attachment, UploadError>;
}

/// Thin client for the file upload endpoint.
#[derive(Clone)]
pub struct UploadClient {
    client: reqwest::Client,
    base_url: String,
}

impl UploadClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Send one file as a multipart request and normalize the response into
    /// an [`Attachment`]. No timeout is applied; a hung request holds its
    /// queue entry until the transport gives up.
    pub async fn upload(&self, file: FileSource) -> Result<Attachment, UploadError> {
        let upload_url = construct_api_url(&self.base_url, UPLOAD_ENDPOINT);
        debug!(file = %file.name, "dispatching upload");

        let part = Part::bytes(file.bytes).file_name(file.name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| UploadError::Transport { source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| UploadError::Transport { source })?;

        if !status.is_success() {
            return Err(server_error_from_body(&body));
        }

        let parsed: UploadResponse =
            serde_json::from_str(&body).map_err(|source| UploadError::Malformed { source })?;
        debug!(file = %file.name, url = %parsed.url, "upload settled");
        Ok(Attachment::from_response(parsed))
    }
}

#[async_trait]
impl Uploader for UploadClient {
    async fn upload(&self, file: FileSource) -> Result<Attachment, UploadError> {
        UploadClient::upload(self, file).await
    }
}

/// Interpret a non-success body. A well-formed `{ "error": ... }` payload
/// carries the server's own message; anything else degrades to the generic
/// failure text.
fn server_error_from_body(body: &str) -> UploadError {
    match serde_json::from_str::<UploadErrorBody>(body) {
        Ok(parsed) => UploadError::Server {
            message: parsed.error,
        },
        Err(_) => UploadError::Server {
            message: "Failed to upload file, please try again!".to_string(),
        },
    }
}
