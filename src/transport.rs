//! The HTTP collaborator seam. The pipelines only ever ask for "the body
//! behind this URL", so tests can substitute canned transports and the
//! production implementation stays a thin wrapper around `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("Invalid request URL '{url}': {detail}")]
    InvalidUrl { url: String, detail: String },
}

/// Issues one GET request and returns the response body.
///
/// Implementations surface any non-success status as
/// [`TransportError::HttpStatus`]; the pipelines treat every transport
/// failure as fatal for the sub-span being fetched.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: Url, headers: &[(&str, &str)]) -> Result<String, TransportError>;
}

/// Production transport backed by a shared `reqwest::Client`.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: Url, headers: &[(&str, &str)]) -> Result<String, TransportError> {
        let url_text = url.to_string();

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::NetworkRequest(url_text.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                url: url_text,
                status,
            });
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::NetworkRequest(url_text, e))
    }
}
