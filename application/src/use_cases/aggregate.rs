//! Aggregate use case
//!
//! Orchestrates one fan-out: every registered adapter is queried
//! concurrently for the same prompt, each racing an independent timeout,
//! and the settled responses are merged by the synthesis strategy.

use crate::config::FanOutParams;
use crate::ports::progress::{AdapterEvent, AdapterOutcome, NoProgress, ProgressNotifier};
use crate::ports::provider_adapter::ProviderAdapter;
use chorus_domain::{
    ChorusResult, FailureKind, Prompt, ProviderId, ProviderResponse, SynthesisStrategy,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur during aggregation
///
/// Provider-level faults are never errors here; they settle as synthetic
/// fallback responses inside the fan-out.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("No adapters registered")]
    NoAdapters,
}

/// Use case for aggregating provider responses into one answer
///
/// Adapters and the synthesis strategy are injected at construction, so
/// tests can substitute deterministic fakes without process-wide state.
pub struct AggregateUseCase {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    strategy: Arc<dyn SynthesisStrategy>,
    params: FanOutParams,
}

impl AggregateUseCase {
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>, strategy: Arc<dyn SynthesisStrategy>) -> Self {
        Self {
            adapters,
            strategy,
            params: FanOutParams::default(),
        }
    }

    pub fn with_params(mut self, params: FanOutParams) -> Self {
        self.params = params;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, prompt: &Prompt) -> Result<ChorusResult, AggregateError> {
        self.execute_with_progress(prompt, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        prompt: &Prompt,
        progress: &dyn ProgressNotifier,
    ) -> Result<ChorusResult, AggregateError> {
        if self.adapters.is_empty() {
            return Err(AggregateError::NoAdapters);
        }

        let providers: Vec<ProviderId> = self.adapters.iter().map(|a| a.id()).collect();
        info!(
            "Starting fan-out to {} providers with {}s budget",
            providers.len(),
            self.params.adapter_timeout.as_secs()
        );
        progress.on_fan_out_start(&providers);

        let started = Instant::now();
        let responses = self.fan_out(prompt, started, progress).await;

        let synthesis = self.strategy.synthesize(&responses).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let succeeded = responses.iter().filter(|r| r.is_valid()).count();
        progress.on_fan_out_complete(succeeded, providers.len(), elapsed_ms);
        info!(
            "Fan-out complete: {}/{} providers succeeded, tier {} in {}ms",
            succeeded,
            providers.len(),
            synthesis.tier,
            elapsed_ms
        );

        Ok(ChorusResult::new(
            prompt.content(),
            providers,
            responses,
            synthesis,
            elapsed_ms,
        ))
    }

    /// Query all adapters in parallel with all-settle semantics.
    ///
    /// Returns one response per registered adapter in registration
    /// order, regardless of completion order. A timeout settles that
    /// adapter alone; the rest of the fan-out keeps running.
    async fn fan_out(
        &self,
        prompt: &Prompt,
        started: Instant,
        progress: &dyn ProgressNotifier,
    ) -> Vec<ProviderResponse> {
        let budget = self.params.adapter_timeout;
        let mut join_set = JoinSet::new();

        for (index, adapter) in self.adapters.iter().enumerate() {
            let adapter = Arc::clone(adapter);
            let prompt = prompt.content().to_string();

            join_set.spawn(async move {
                let id = adapter.id();
                // The timeout wraps this task only; expiry abandons the
                // in-flight call without touching sibling adapters
                let response = match tokio::time::timeout(budget, adapter.complete(&prompt, budget))
                    .await
                {
                    Ok(response) => response,
                    Err(_) => ProviderResponse::fallback(
                        id,
                        FailureKind::Timeout,
                        format!("No response from {} within {}s", id.display_name(), budget.as_secs()),
                    ),
                };
                (index, response)
            });
        }

        let mut settled: Vec<(usize, ProviderResponse)> = Vec::with_capacity(self.adapters.len());

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, response)) => {
                    let elapsed_ms = started.elapsed().as_millis() as u64;
                    let outcome = match response.failure() {
                        None => {
                            debug!("{} settled ok after {}ms", response.source, elapsed_ms);
                            AdapterOutcome::Ok
                        }
                        Some((kind, message)) => {
                            debug!("{} settled with {}: {}", response.source, kind, message);
                            AdapterOutcome::Failed(kind)
                        }
                    };
                    progress.on_adapter_settled(&AdapterEvent {
                        provider: response.source,
                        outcome,
                        elapsed_ms,
                    });
                    settled.push((index, response));
                }
                Err(e) => {
                    warn!("Fan-out task join error: {}", e);
                }
            }
        }

        // Every registered provider settles exactly once, even if its
        // task panicked before reporting
        for (index, adapter) in self.adapters.iter().enumerate() {
            if !settled.iter().any(|(i, _)| *i == index) {
                settled.push((
                    index,
                    ProviderResponse::fallback(
                        adapter.id(),
                        FailureKind::Network,
                        "Adapter task ended before settling",
                    ),
                ));
            }
        }

        settled.sort_by_key(|(index, _)| *index);
        settled.into_iter().map(|(_, response)| response).collect()
    }
}
