//! Anthropic messages adapter

use super::{api_key, status_failure, transport_failure};
use crate::config::FileAnthropicConfig;
use async_trait::async_trait;
use chorus_application::ProviderAdapter;
use chorus_domain::{FailureKind, ProviderId, ProviderResponse};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Adapter for `POST {base}/v1/messages` with `x-api-key` auth.
pub struct AnthropicAdapter {
    client: reqwest::Client,
    config: FileAnthropicConfig,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

impl AnthropicAdapter {
    pub fn new(config: FileAnthropicConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Extract the first text block from a decoded payload.
    fn extract(payload: MessagesResponse) -> Result<String, (FailureKind, String)> {
        if payload.stop_reason.as_deref() == Some("refusal") {
            return Err((
                FailureKind::ContentFilter,
                "The model refused to answer".to_string(),
            ));
        }
        payload
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or((
                FailureKind::MalformedPayload,
                "Response carried no text block".to_string(),
            ))
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    async fn complete(&self, prompt: &str, budget: Duration) -> ProviderResponse {
        let id = self.id();

        let Some(key) = api_key(&self.config.api_key_env) else {
            return ProviderResponse::fallback(
                id,
                FailureKind::Unconfigured,
                format!("{} is not set; request not sent", self.config.api_key_env),
            );
        };

        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });

        debug!("Querying Anthropic model {}", self.config.model);
        let response = match self
            .client
            .post(&url)
            .header("x-api-key", key)
            .header("anthropic-version", &self.config.api_version)
            .timeout(budget)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return ProviderResponse::fallback(
                    id,
                    transport_failure(&e),
                    format!("Request to Anthropic failed: {}", e),
                );
            }
        };

        if let Some(kind) = status_failure(response.status()) {
            return ProviderResponse::fallback(
                id,
                kind,
                format!("Anthropic returned HTTP {}", response.status()),
            );
        }

        let payload: MessagesResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                return ProviderResponse::fallback(
                    id,
                    FailureKind::MalformedPayload,
                    format!("Could not decode Anthropic response: {}", e),
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

    fn decode(json: serde_json::Value) -> MessagesResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_extracts_first_text_block() {
        let payload = decode(serde_json::json!({
            "content": [
                { "type": "thinking", "text": null },
                { "type": "text", "text": "The real answer" }
            ],
            "stop_reason": "end_turn"
        }));
        assert_eq!(AnthropicAdapter::extract(payload).unwrap(), "The real answer");
    }

    #[test]
    fn test_refusal_maps_to_content_filter() {
        let payload = decode(serde_json::json!({
            "content": [],
            "stop_reason": "refusal"
        }));
        let (kind, _) = AnthropicAdapter::extract(payload).unwrap_err();
        assert_eq!(kind, FailureKind::ContentFilter);
    }

    #[test]
    fn test_missing_text_block_is_malformed() {
        let payload = decode(serde_json::json!({
            "content": [{ "type": "tool_use", "text": null }],
            "stop_reason": "end_turn"
        }));
        let (kind, _) = AnthropicAdapter::extract(payload).unwrap_err();
        assert_eq!(kind, FailureKind::MalformedPayload);
    }
}
