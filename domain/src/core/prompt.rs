//! Prompt value object

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A validated prompt to fan out to every provider (Value Object)
///
/// Represents the input query that will be sent concurrently to all
/// registered providers for independent completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    content: String,
}

impl Prompt {
    /// Maximum accepted prompt length in characters
    pub const MAX_CHARS: usize = 2000;

    /// Try to create a new prompt
    ///
    /// Rejects content that is empty after trimming or longer than
    /// [`Prompt::MAX_CHARS`] characters.
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyPrompt);
        }
        let chars = content.chars().count();
        if chars > Self::MAX_CHARS {
            return Err(DomainError::PromptTooLong {
                chars,
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self { content })
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
