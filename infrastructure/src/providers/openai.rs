//! OpenAI chat-completions adapter

use super::{api_key, status_failure, transport_failure};
use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use chorus_application::ProviderAdapter;
use chorus_domain::{FailureKind, ProviderId, ProviderResponse};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Adapter for `POST {base}/chat/completions` with bearer auth.
pub struct OpenAiAdapter {
    client: reqwest::Client,
    config: FileOpenAiConfig,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiAdapter {
    pub fn new(config: FileOpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Extract the completion text from a decoded payload.
    fn extract(payload: ChatCompletionResponse) -> Result<String, (FailureKind, String)> {
        let Some(choice) = payload.choices.into_iter().next() else {
            return Err((
                FailureKind::MalformedPayload,
                "Response carried no choices".to_string(),
            ));
        };
        if choice.finish_reason.as_deref() == Some("content_filter") {
            return Err((
                FailureKind::ContentFilter,
                "Completion stopped by the content filter".to_string(),
            ));
        }
        match choice.content() {
            Some(text) => Ok(text),
            None => Err((
                FailureKind::MalformedPayload,
                "Response carried no text".to_string(),
            )),
        }
    }
}

impl ChatChoice {
    fn content(self) -> Option<String> {
        self.message.content.filter(|t| !t.trim().is_empty())
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
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
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        debug!("Querying OpenAI model {}", self.config.model);
        let response = match self
            .client
            .post(&url)
            .bearer_auth(key)
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
                    format!("Request to OpenAI failed: {}", e),
                );
            }
        };

        if let Some(kind) = status_failure(response.status()) {
            return ProviderResponse::fallback(
                id,
                kind,
                format!("OpenAI returned HTTP {}", response.status()),
            );
        }

        let payload: ChatCompletionResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                return ProviderResponse::fallback(
                    id,
                    FailureKind::MalformedPayload,
                    format!("Could not decode OpenAI response: {}", e),
                );
            }
        };

        match Self::extract(payload) {
            Ok(text) => ProviderResponse::completed(id, text),
            Err((kind, message)) => ProviderResponse::fallback(id, kind, message),
        }
    }
}
