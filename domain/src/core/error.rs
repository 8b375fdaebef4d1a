//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("Prompt is {chars} characters, maximum is {max}")]
    PromptTooLong { chars: usize, max: usize },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}
