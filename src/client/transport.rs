//! Upload transport.
//!
//! One POST per upload, no retries. The HTTP implementation speaks the
//! ingestion service's multipart contract and hands back the returned URL.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::api::uploads::UploadResponse;
use crate::{Error, Result};

/// Multipart field the ingestion service reads the file from.
const FILE_FIELD: &str = "files";

/// Transport for sending one file to the ingestion endpoint.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Send the bytes as a single multipart file part. Returns the durable
    /// URL the server assigned.
    async fn upload(&self, data: Vec<u8>, file_name: &str, content_type: &str) -> Result<String>;
}

/// HTTP transport posting to a shutterbox ingestion endpoint.
pub struct HttpUploadTransport {
    client: Client,
    endpoint: String,
}

impl HttpUploadTransport {
    /// Create a transport for the given `/upload` endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl UploadTransport for HttpUploadTransport {
    async fn upload(&self, data: Vec<u8>, file_name: &str, content_type: &str) -> Result<String> {
        let part = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Transfer(format!(
                "Server responded with {}",
                response.status()
            )));
        }

        let body: UploadResponse = response.json().await?;
        Ok(body.url)
    }
}
