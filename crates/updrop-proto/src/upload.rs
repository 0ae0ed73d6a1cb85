//! Upload transport: the `Uploader` seam and its reqwest implementation.

use std::future::Future;
use std::path::PathBuf;

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Url};
use thiserror::Error;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::config::EndpointConfig;
use crate::protocol::{SelectedFile, ServerReply, UploadResponse};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The request never completed (connection refused, reset, TLS, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The endpoint answered, but not with JSON.
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    /// The task driving the request died before reporting back.
    #[error("upload task aborted: {0}")]
    Aborted(String),
}

/// Sends one file to the upload endpoint.
///
/// One call is one request: no retries, no timeout, no cancellation.
pub trait Uploader: Send + Sync + 'static {
    fn upload(
        &self,
        file: SelectedFile,
    ) -> impl Future<Output = Result<ServerReply, UploadError>> + Send;
}

/// Multipart `POST` over reqwest.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    client: reqwest::Client,
    endpoint: Url,
    field_name: String,
}

impl HttpUploader {
    pub fn new(endpoint: &str, field_name: impl Into<String>) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("invalid upload endpoint {:?}", endpoint))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            field_name: field_name.into(),
        })
    }

    pub fn from_config(config: &EndpointConfig) -> anyhow::Result<Self> {
        Self::new(&config.url, config.field_name.clone())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Uploader for HttpUploader {
    async fn upload(&self, file: SelectedFile) -> Result<ServerReply, UploadError> {
        debug!(
            "POST {} field={} name={} bytes={}",
            self.endpoint,
            self.field_name,
            file.name,
            file.size()
        );

        let part = file_part(&file).await?.file_name(file.name);
        let form = Form::new().part(self.field_name.clone(), part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body: UploadResponse = serde_json::from_slice(&bytes)?;
        debug!("upload reply: status={} body={:?}", status, body);

        Ok(ServerReply { status, body })
    }
}

/// Multipart part for `file`: in-memory bytes as-is, files on disk streamed
/// with the length they have now.
async fn file_part(file: &SelectedFile) -> Result<Part, UploadError> {
    if let Some(bytes) = file.in_memory() {
        return Ok(Part::bytes(bytes.to_vec()));
    }
    let io_err = |source| UploadError::Io {
        path: file.path.clone(),
        source,
    };
    let handle = tokio::fs::File::open(&file.path).await.map_err(io_err)?;
    let len = handle.metadata().await.map_err(io_err)?.len();
    let body = Body::wrap_stream(ReaderStream::new(handle));
    Ok(Part::stream_with_length(body, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_endpoint() {
        assert!(HttpUploader::new("not a url", "file").is_err());
    }

    #[test]
    fn builds_from_config() {
        let uploader = HttpUploader::from_config(&EndpointConfig::default()).unwrap();
        assert_eq!(uploader.endpoint().as_str(), "http://127.0.0.1:5000/upload");
    }
}
