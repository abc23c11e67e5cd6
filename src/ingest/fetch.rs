//! File-store payload retrieval.
//!
//! The remote store is a narrow collaborator: one GET per source, bearer
//! auth, UTF-8 delimited text back. The trait seam exists so the
//! coordinator can be driven by mock fetchers in tests.

use crate::types::SourceDescriptor;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Per-source retrieval errors.
///
/// All variants are swallowed at the coordinator level — a failed source
/// contributes nothing and never aborts its siblings.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid source address: {0}")]
    InvalidAddress(String),

    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("File store returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Response body is not decodable text: {0}")]
    UndecodableBody(String),
}

/// Retrieves one raw payload per source descriptor.
#[async_trait]
pub trait PayloadFetch: Send + Sync {
    /// Fetch the raw delimited-text payload for one source.
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError>;
}

/// Production fetcher backed by the remote file store.
#[derive(Clone)]
pub struct HttpPayloadFetch {
    http: reqwest::Client,
    bearer_token: Option<String>,
}

impl HttpPayloadFetch {
    /// Build a fetcher with the given per-request timeout.
    ///
    /// `bearer_token` is injected by the caller (from the environment, not
    /// from config files — see `config::bearer_token_from_env`).
    pub fn new(timeout: Duration, bearer_token: Option<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Transport)?;

        Ok(Self { http, bearer_token })
    }
}

#[async_trait]
impl PayloadFetch for HttpPayloadFetch {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError> {
        if source.url.is_empty() {
            return Err(FetchError::InvalidAddress(source.id.clone()));
        }

        let mut request = self.http.get(&source.url).header("Accept", "text/csv");
        if let Some(ref token) = self.bearer_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // `text()` replaces invalid UTF-8 rather than failing; a payload
        // with no parseable rows then degrades to zero points downstream.
        response
            .text()
            .await
            .map_err(|e| FetchError::UndecodableBody(e.to_string()))
    }
}
