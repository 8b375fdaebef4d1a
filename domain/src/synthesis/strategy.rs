//! Synthesis strategy trait
//!
//! Different strategies can be plugged in to change how provider
//! responses are merged into one answer.

use async_trait::async_trait;

use crate::aggregation::value_objects::{ProviderResponse, SynthesisResult};

/// Trait for synthesis strategies
///
/// Implementations receive every response from the fan-out, synthetic
/// fallbacks included, and decide which count as contributions. The
/// shipped implementation is [`super::lexical::LexicalSynthesis`];
/// a model-assisted strategy can implement the same contract without
/// touching the fan-out.
///
/// Synthesis never fails: any input combination, including all
/// responses being fallbacks, yields a well-formed [`SynthesisResult`].
#[async_trait]
pub trait SynthesisStrategy: Send + Sync {
    /// Get the name of this strategy
    fn name(&self) -> &'static str;

    /// Merge the fan-out's responses into a synthesis result.
    async fn synthesize(&self, responses: &[ProviderResponse]) -> SynthesisResult;
}
