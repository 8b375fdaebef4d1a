//! Progress notification port
//!
//! Defines the interface for observing one fan-out as it runs.
//! Implementations live in the presentation layer (progress bars) and
//! the infrastructure layer (JSONL event log); the use case emits the
//! events whether or not anyone observes them.

use chorus_domain::{FailureKind, ProviderId};
use serde::Serialize;

/// How one adapter settled within a fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterOutcome {
    /// The adapter returned generated text
    Ok,
    /// The adapter settled with a synthetic fallback
    Failed(FailureKind),
}

impl AdapterOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, AdapterOutcome::Ok)
    }
}

/// One adapter's settlement within a fan-out
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdapterEvent {
    /// The provider that settled
    pub provider: ProviderId,
    /// Success or the absorbed failure kind
    pub outcome: AdapterOutcome,
    /// Time from fan-out start to this settlement, in milliseconds
    pub elapsed_ms: u64,
}

/// Callback for progress updates during a fan-out
///
/// Implementations can display progress in various ways (spinners,
/// plain lines, an event log). All methods are fire-and-forget; the
/// aggregation never depends on an event being observed.
pub trait ProgressNotifier: Send + Sync {
    /// Called once when the fan-out starts, with the registered providers
    fn on_fan_out_start(&self, providers: &[ProviderId]);

    /// Called once per adapter as it settles (success, failure, or timeout)
    fn on_adapter_settled(&self, event: &AdapterEvent);

    /// Called once when every adapter has settled
    fn on_fan_out_complete(&self, succeeded: usize, queried: usize, elapsed_ms: u64);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_fan_out_start(&self, _providers: &[ProviderId]) {}
    fn on_adapter_settled(&self, _event: &AdapterEvent) {}
    fn on_fan_out_complete(&self, _succeeded: usize, _queried: usize, _elapsed_ms: u64) {}
}
