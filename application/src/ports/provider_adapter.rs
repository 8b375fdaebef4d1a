//! Provider adapter port
//!
//! Defines the uniform contract wrapping one provider's call, auth, and
//! error semantics. Implementations (adapters) live in the
//! infrastructure layer.

use async_trait::async_trait;
use chorus_domain::{ProviderId, ProviderResponse};
use std::time::Duration;

/// Uniform async contract over one text-generation provider
///
/// `complete` is deliberately infallible: ordinary failure modes (auth
/// failure, quota exhaustion, content-safety rejection, malformed
/// upstream payload, network error) are absorbed inside the adapter and
/// returned as synthetic fallback responses. The fan-out and the
/// synthesis strategies then branch only on response counts and
/// similarity values, never on provider-level faults.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// The provider this adapter wraps
    fn id(&self) -> ProviderId;

    /// Request a completion for the prompt.
    ///
    /// `budget` is the time this call may take; adapters hand it to
    /// their transport so stalled requests fail inside the budget
    /// rather than waiting for the orchestrator's race to fire.
    async fn complete(&self, prompt: &str, budget: Duration) -> ProviderResponse;
}
