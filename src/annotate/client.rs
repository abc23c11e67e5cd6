//! Analysis-service client.
//!
//! Speaks the chat-completions wire shape: POST a user message, read back
//! `choices[0].message.content`. The response parser is deliberately
//! liberal — any decodable body counts as an answer, with the structured
//! shape as the preferred path and raw text as the fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Per-request analysis errors.
///
/// A JSON-shape mismatch is NOT an error — the raw body is returned
/// instead. Only transport problems and truly undecodable bodies fail.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to build request body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Analysis service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Response body is not decodable text: {0}")]
    UndecodableBody(String),
}

/// Issues one free-text analysis request per serialized sample chunk.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit a prompt and return the service's free-text answer.
    async fn analyze(&self, prompt: &str) -> Result<String, AnalysisError>;
}

// ---- Wire shapes ----

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Production client backed by the remote analysis service.
#[derive(Clone)]
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    bearer_token: Option<String>,
}

impl HttpAnalysisClient {
    /// Build a client with the given endpoint, model, and timeout.
    pub fn new(
        endpoint: &str,
        model: &str,
        timeout: Duration,
        bearer_token: Option<String>,
    ) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AnalysisError::Transport)?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            bearer_token,
        })
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisClient {
    async fn analyze(&self, prompt: &str) -> Result<String, AnalysisError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let body = serde_json::to_vec(&body)?;

        let mut request = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .body(body);
        if let Some(ref token) = self.bearer_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Status(status));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AnalysisError::UndecodableBody(e.to_string()))?;

        Ok(extract_answer(&text))
    }
}

/// Pull the answer out of a response body.
///
/// Prefers `choices[0].message.content`; any shape mismatch falls back to
/// the raw body text.
pub fn extract_answer(body: &str) -> String {
    match serde_json::from_str::<ChatResponse>(body) {
        Ok(parsed) => match parsed.choices.into_iter().next() {
            Some(choice) => choice.message.content,
            None => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_answer_structured() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"steady alpha rhythm"}}]}"#;
        assert_eq!(extract_answer(body), "steady alpha rhythm");
    }

    #[test]
    fn test_extract_answer_falls_back_on_shape_mismatch() {
        let body = r#"{"result": "unexpected schema"}"#;
        assert_eq!(extract_answer(body), body);
    }

    #[test]
    fn test_extract_answer_falls_back_on_plain_text() {
        assert_eq!(extract_answer("not json at all"), "not json at all");
    }

    #[test]
    fn test_extract_answer_empty_choices_falls_back() {
        let body = r#"{"choices":[]}"#;
        assert_eq!(extract_answer(body), body);
    }
}
