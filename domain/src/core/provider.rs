//! Provider identity value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;

/// Configured text-generation providers (Value Object)
///
/// This is a closed enumeration: the fan-out is generic over however many
/// adapters are registered, so adding a provider means adding a variant
/// plus an adapter implementation. Core logic never branches on provider
/// name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenAi,
    Anthropic,
    Gemini,
    Ollama,
}

impl ProviderId {
    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Gemini => "gemini",
            ProviderId::Ollama => "ollama",
        }
    }

    /// Human-readable name for console output
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Anthropic => "Anthropic",
            ProviderId::Gemini => "Gemini",
            ProviderId::Ollama => "Ollama",
        }
    }

    /// All known providers in canonical registration order
    pub fn all() -> Vec<ProviderId> {
        vec![
            ProviderId::OpenAi,
            ProviderId::Anthropic,
            ProviderId::Gemini,
            ProviderId::Ollama,
        ]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderId::OpenAi),
            "anthropic" => Ok(ProviderId::Anthropic),
            "gemini" => Ok(ProviderId::Gemini),
            "ollama" => Ok(ProviderId::Ollama),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

impl Serialize for ProviderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_roundtrip() {
        for provider in ProviderId::all() {
            let s = provider.to_string();
            let parsed: ProviderId = s.parse().unwrap();
            assert_eq!(provider, parsed);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let parsed: ProviderId = "OpenAI".parse().unwrap();
        assert_eq!(parsed, ProviderId::OpenAi);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result: Result<ProviderId, _> = "bedrock".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&ProviderId::Anthropic).unwrap();
        assert_eq!(json, "\"anthropic\"");
    }

    #[test]
    fn test_registration_order_is_stable() {
        let all = ProviderId::all();
        assert_eq!(all[0], ProviderId::OpenAi);
        assert_eq!(all.len(), 4);
    }
}
