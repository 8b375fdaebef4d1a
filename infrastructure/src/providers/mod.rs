//! Concrete provider adapters
//!
//! One adapter per [`ProviderId`], each owning a `reqwest::Client` and
//! its section of the file configuration. All adapters share the same
//! failure mapping: missing key env → `Unconfigured` (request never
//! sent), 401/403 → `Auth`, 429 → `Quota`, other non-success statuses
//! and undecodable payloads → `MalformedPayload`, transport errors →
//! `Network` or `Timeout`. No failure is ever raised past the adapter.

mod anthropic;
mod gemini;
mod ollama;
mod openai;

pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use ollama::OllamaAdapter;
pub use openai::OpenAiAdapter;

use crate::config::FileProvidersConfig;
use chorus_application::ProviderAdapter;
use chorus_domain::{FailureKind, ProviderId};
use std::sync::Arc;

/// Build one adapter per requested provider, in the given order.
///
/// Construction is keyed by the closed [`ProviderId`] enum; adding a
/// provider means adding a variant and an arm here, never matching on
/// service-name strings.
pub fn build_adapters(
    providers: &[ProviderId],
    config: &FileProvidersConfig,
) -> Vec<Arc<dyn ProviderAdapter>> {
    providers
        .iter()
        .map(|id| match id {
            ProviderId::OpenAi => {
                Arc::new(OpenAiAdapter::new(config.openai.clone())) as Arc<dyn ProviderAdapter>
            }
            ProviderId::Anthropic => Arc::new(AnthropicAdapter::new(config.anthropic.clone())),
            ProviderId::Gemini => Arc::new(GeminiAdapter::new(config.gemini.clone())),
            ProviderId::Ollama => Arc::new(OllamaAdapter::new(config.ollama.clone())),
        })
        .collect()
}

/// Read an API key from the named environment variable.
///
/// Empty values count as unset so a blank export does not send a
/// request doomed to fail auth.
pub(crate) fn api_key(env_name: &str) -> Option<String> {
    std::env::var(env_name).ok().filter(|k| !k.trim().is_empty())
}

/// Map a non-success HTTP status to its absorbed failure kind.
pub(crate) fn status_failure(status: reqwest::StatusCode) -> Option<FailureKind> {
    use reqwest::StatusCode;

    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureKind::Auth,
        StatusCode::TOO_MANY_REQUESTS => FailureKind::Quota,
        _ => FailureKind::MalformedPayload,
    })
}

/// Map a reqwest transport error to its absorbed failure kind.
pub(crate) fn transport_failure(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileProvidersConfig;
    use reqwest::StatusCode;

    #[test]
    fn test_build_adapters_preserves_order() {
        let config = FileProvidersConfig::default();
        let adapters = build_adapters(
            &[ProviderId::Gemini, ProviderId::OpenAi],
            &config,
        );
        let ids: Vec<ProviderId> = adapters.iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![ProviderId::Gemini, ProviderId::OpenAi]);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_failure(StatusCode::OK), None);
        assert_eq!(
            status_failure(StatusCode::UNAUTHORIZED),
            Some(FailureKind::Auth)
        );
        assert_eq!(
            status_failure(StatusCode::FORBIDDEN),
            Some(FailureKind::Auth)
        );
        assert_eq!(
            status_failure(StatusCode::TOO_MANY_REQUESTS),
            Some(FailureKind::Quota)
        );
        assert_eq!(
            status_failure(StatusCode::INTERNAL_SERVER_ERROR),
            Some(FailureKind::MalformedPayload)
        );
    }

    #[test]
    fn test_blank_api_key_counts_as_unset() {
        // SAFETY: test-local variable name, no reader races on it
        unsafe { std::env::set_var("CHORUS_TEST_BLANK_KEY", "   ") };
        assert!(api_key("CHORUS_TEST_BLANK_KEY").is_none());
        assert!(api_key("CHORUS_TEST_MISSING_KEY").is_none());
    }
}
