//! Aggregation value objects - immutable result types for one fan-out.
//!
//! These types represent the outputs of each aggregation stage:
//! - [`ProviderResponse`] - one provider's answer or synthetic fallback
//! - [`SynthesisResult`] - the merged answer with its confidence annotation
//! - [`ChorusResult`] - complete result covering the whole fan-out

use serde::{Deserialize, Serialize};

use crate::core::provider::ProviderId;
use crate::synthesis::tier::{Approach, ConfidenceTier};

/// How a provider attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Credentials rejected by the provider
    Auth,
    /// Rate or usage limits exhausted
    Quota,
    /// The provider refused the content
    ContentFilter,
    /// Upstream payload could not be decoded or carried no text
    MalformedPayload,
    /// Transport-level failure reaching the provider
    Network,
    /// The per-adapter budget expired before a response arrived
    Timeout,
    /// No credentials configured, request never sent
    Unconfigured,
}

impl FailureKind {
    /// Get the string identifier for this failure kind
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Auth => "auth",
            FailureKind::Quota => "quota",
            FailureKind::ContentFilter => "content_filter",
            FailureKind::MalformedPayload => "malformed_payload",
            FailureKind::Network => "network",
            FailureKind::Timeout => "timeout",
            FailureKind::Unconfigured => "unconfigured",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a single provider attempt produced
///
/// Exactly one of the two shapes holds; the enum makes a response that is
/// both completed and failed unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseBody {
    /// The provider returned generated text
    Completed { text: String },
    /// A synthetic fallback substituted for a failed or skipped call
    Fallback { kind: FailureKind, message: String },
}

/// Response from a single provider within one fan-out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The provider that produced this response
    pub source: ProviderId,
    /// Generated text or a synthetic fallback
    #[serde(flatten)]
    pub body: ResponseBody,
}

impl ProviderResponse {
    /// Creates a successful response carrying generated text.
    pub fn completed(source: ProviderId, text: impl Into<String>) -> Self {
        Self {
            source,
            body: ResponseBody::Completed { text: text.into() },
        }
    }

    /// Creates a synthetic fallback for a failed or unconfigured call.
    ///
    /// The message distinguishes the failure mode so a human inspecting
    /// raw responses can tell an auth failure from generated text.
    pub fn fallback(source: ProviderId, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            source,
            body: ResponseBody::Fallback {
                kind,
                message: message.into(),
            },
        }
    }

    /// Returns `true` if this response carries real generated text.
    ///
    /// Synthetic fallbacks are excluded from similarity scoring and from
    /// `sources_used`.
    pub fn is_valid(&self) -> bool {
        matches!(self.body, ResponseBody::Completed { .. })
    }

    /// The generated text, if any.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Completed { text } => Some(text),
            ResponseBody::Fallback { .. } => None,
        }
    }

    /// The failure kind and message, if this is a synthetic fallback.
    pub fn failure(&self) -> Option<(FailureKind, &str)> {
        match &self.body {
            ResponseBody::Completed { .. } => None,
            ResponseBody::Fallback { kind, message } => Some((*kind, message)),
        }
    }
}

/// Final synthesized answer with its confidence annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    /// The unified answer text
    pub answer: String,
    /// Discrete confidence classification
    pub tier: ConfidenceTier,
    /// Numeric confidence in [0, 100]
    pub confidence: u8,
    /// Which merge algorithm produced the answer
    pub approach: Approach,
    /// Valid providers, in registration order
    pub sources_used: Vec<ProviderId>,
    /// Human-readable justification for the confidence
    pub reasoning: String,
}

/// Complete result of one aggregation fan-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChorusResult {
    /// The original prompt
    pub prompt: String,
    /// Providers that were queried, in registration order
    pub providers: Vec<ProviderId>,
    /// One response per queried provider, in registration order
    pub responses: Vec<ProviderResponse>,
    /// The merged answer
    pub synthesis: SynthesisResult,
    /// Total wall-clock time for the fan-out, in milliseconds
    pub elapsed_ms: u64,
}

impl ChorusResult {
    /// Creates a complete ChorusResult from the fan-out's outputs.
    pub fn new(
        prompt: impl Into<String>,
        providers: Vec<ProviderId>,
        responses: Vec<ProviderResponse>,
        synthesis: SynthesisResult,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            providers,
            responses,
            synthesis,
            elapsed_ms,
        }
    }

    /// Number of providers queried in this fan-out.
    pub fn providers_queried(&self) -> usize {
        self.providers.len()
    }

    /// Number of providers that returned generated text.
    pub fn providers_succeeded(&self) -> usize {
        self.responses.iter().filter(|r| r.is_valid()).count()
    }

    /// Returns an iterator over only the valid responses.
    pub fn valid_responses(&self) -> impl Iterator<Item = &ProviderResponse> {
        self.responses.iter().filter(|r| r.is_valid())
    }

    /// Returns an iterator over only the synthetic fallback responses.
    pub fn failed_responses(&self) -> impl Iterator<Item = &ProviderResponse> {
        self.responses.iter().filter(|r| !r.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_response_is_valid() {
        let response = ProviderResponse::completed(ProviderId::OpenAi, "Answer text");
        assert!(response.is_valid());
        assert_eq!(response.text(), Some("Answer text"));
        assert!(response.failure().is_none());
    }

    #[test]
    fn test_fallback_response_is_not_valid() {
        let response = ProviderResponse::fallback(
            ProviderId::Gemini,
            FailureKind::Timeout,
            "No response within 15s",
        );
        assert!(!response.is_valid());
        assert!(response.text().is_none());
        let (kind, message) = response.failure().unwrap();
        assert_eq!(kind, FailureKind::Timeout);
        assert!(message.contains("15s"));
    }

    #[test]
    fn test_response_serializes_with_status_tag() {
        let response = ProviderResponse::completed(ProviderId::OpenAi, "hi there");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["source"], "openai");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["text"], "hi there");
    }

    #[test]
    fn test_fallback_serializes_kind() {
        let response =
            ProviderResponse::fallback(ProviderId::Ollama, FailureKind::Network, "refused");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "fallback");
        assert_eq!(json["kind"], "network");
    }

    #[test]
    fn test_chorus_result_counts() {
        let responses = vec![
            ProviderResponse::completed(ProviderId::OpenAi, "one"),
            ProviderResponse::fallback(ProviderId::Anthropic, FailureKind::Auth, "bad key"),
            ProviderResponse::completed(ProviderId::Gemini, "two"),
        ];
        let synthesis = SynthesisResult {
            answer: "one".to_string(),
            tier: ConfidenceTier::Medium,
            confidence: 50,
            approach: Approach::Balanced,
            sources_used: vec![ProviderId::OpenAi, ProviderId::Gemini],
            reasoning: String::new(),
        };
        let result = ChorusResult::new(
            "prompt",
            vec![ProviderId::OpenAi, ProviderId::Anthropic, ProviderId::Gemini],
            responses,
            synthesis,
            1200,
        );

        assert_eq!(result.providers_queried(), 3);
        assert_eq!(result.providers_succeeded(), 2);
        assert_eq!(result.valid_responses().count(), 2);
        assert_eq!(result.failed_responses().count(), 1);
    }
}
