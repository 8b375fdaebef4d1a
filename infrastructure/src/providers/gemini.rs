//! Google Gemini generateContent adapter

use super::{api_key, status_failure, transport_failure};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use chorus_application::ProviderAdapter;
use chorus_domain::{FailureKind, ProviderId, ProviderResponse};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Adapter for `POST {base}/v1beta/models/{model}:generateContent`.
///
/// Gemini authenticates with a `key` query parameter rather than a
/// header.
pub struct GeminiAdapter {
    client: reqwest::Client,
    config: FileGeminiConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiAdapter {
    pub fn new(config: FileGeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Extract the first candidate's text from a decoded payload.
    fn extract(payload: GenerateContentResponse) -> Result<String, (FailureKind, String)> {
        let Some(candidate) = payload.candidates.into_iter().next() else {
            return Err((
                FailureKind::MalformedPayload,
                "Response carried no candidates".to_string(),
            ));
        };
        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err((
                FailureKind::ContentFilter,
                "Generation stopped by the safety filter".to_string(),
            ));
        }
        candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.trim().is_empty())
            .ok_or((
                FailureKind::MalformedPayload,
                "Response carried no text".to_string(),
            ))
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
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

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        debug!("Querying Gemini model {}", self.config.model);
        let response = match self
            .client
            .post(&url)
            .query(&[("key", key)])
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
                    format!("Request to Gemini failed: {}", e),
                );
            }
        };

        if let Some(kind) = status_failure(response.status()) {
            return ProviderResponse::fallback(
                id,
                kind,
                format!("Gemini returned HTTP {}", response.status()),
            );
        }

        let payload: GenerateContentResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                return ProviderResponse::fallback(
                    id,
                    FailureKind::MalformedPayload,
                    format!("Could not decode Gemini response: {}", e),
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

    fn decode(json: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_joins_candidate_parts() {
        let payload = decode(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Two " }, { "text": "parts" }] },
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(GeminiAdapter::extract(payload).unwrap(), "Two parts");
    }

    #[test]
    fn test_safety_finish_maps_to_content_filter() {
        let payload = decode(serde_json::json!({
            "candidates": [{ "content": null, "finishReason": "SAFETY" }]
        }));
        let (kind, _) = GeminiAdapter::extract(payload).unwrap_err();
        assert_eq!(kind, FailureKind::ContentFilter);
    }

    #[test]
    fn test_empty_candidates_is_malformed() {
        let payload = decode(serde_json::json!({ "candidates": [] }));
        let (kind, _) = GeminiAdapter::extract(payload).unwrap_err();
        assert_eq!(kind, FailureKind::MalformedPayload);
    }
}
