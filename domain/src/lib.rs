//! Domain layer for llm-chorus
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Chorus
//!
//! One prompt, many voices: every registered provider answers the same
//! prompt independently, and the answers are merged into a single
//! response with a calibrated confidence annotation.
//!
//! - **Fan-out**: all providers are queried concurrently, each racing its
//!   own timeout, and every provider settles with a result or a fallback
//! - **Agreement**: valid answers are compared pairwise with token-set
//!   Jaccard similarity
//! - **Synthesis**: the agreement level selects the merge algorithm
//!   (consensus, balanced, or comparative)

pub mod aggregation;
pub mod analysis;
pub mod core;
pub mod synthesis;

// Re-export commonly used types
pub use aggregation::{ChorusResult, FailureKind, ProviderResponse, ResponseBody, SynthesisResult};
pub use analysis::{SimilarityMatrix, jaccard, token_set};
pub use core::{error::DomainError, prompt::Prompt, provider::ProviderId};
pub use synthesis::{
    Approach, ConfidenceTier, HIGH_AGREEMENT, LexicalSynthesis, MODERATE_AGREEMENT,
    SynthesisStrategy, split_sentences,
};
