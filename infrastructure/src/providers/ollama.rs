//! Local Ollama generate adapter

use super::{status_failure, transport_failure};
use crate::config::FileOllamaConfig;
use async_trait::async_trait;
use chorus_application::ProviderAdapter;
use chorus_domain::{FailureKind, ProviderId, ProviderResponse};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Adapter for `POST {base}/api/generate` against a local Ollama
/// server. No auth; a server that is not running settles as `Network`.
pub struct OllamaAdapter {
    client: reqwest::Client,
    config: FileOllamaConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

impl OllamaAdapter {
    pub fn new(config: FileOllamaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn extract(payload: GenerateResponse) -> Result<String, (FailureKind, String)> {
        payload
            .response
            .filter(|t| !t.trim().is_empty())
            .ok_or((
                FailureKind::MalformedPayload,
                "Response carried no text".to_string(),
            ))
    }
}

#[async_trait]
impl ProviderAdapter for OllamaAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Ollama
    }

    async fn complete(&self, prompt: &str, budget: Duration) -> ProviderResponse {
        let id = self.id();

        let url = format!("{}/api/generate", self.config.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
        });

        debug!("Querying Ollama model {}", self.config.model);
        let response = match self.client.post(&url).timeout(budget).json(&body).send().await {
            Ok(r) => r,
            Err(e) => {
                return ProviderResponse::fallback(
                    id,
                    transport_failure(&e),
                    format!("Request to Ollama failed: {}", e),
                );
            }
        };

        if let Some(kind) = status_failure(response.status()) {
            return ProviderResponse::fallback(
                id,
                kind,
                format!("Ollama returned HTTP {}", response.status()),
            );
        }

        let payload: GenerateResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                return ProviderResponse::fallback(
                    id,
                    FailureKind::MalformedPayload,
                    format!("Could not decode Ollama response: {}", e),
                );
            }
        };

        match Self::extract(payload) {
            Ok(text) => ProviderResponse::completed(id, text),
            Err((kind, message)) => ProviderResponse::fallback(id, kind, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_response_field() {
        let payload: GenerateResponse =
            serde_json::from_value(serde_json::json!({ "response": "Local answer" })).unwrap();
        assert_eq!(OllamaAdapter::extract(payload).unwrap(), "Local answer");
    }

    #[test]
    fn test_missing_response_is_malformed() {
        let payload: GenerateResponse =
            serde_json::from_value(serde_json::json!({ "done": true })).unwrap();
        let (kind, _) = OllamaAdapter::extract(payload).unwrap_err();
        assert_eq!(kind, FailureKind::MalformedPayload);
    }
}
