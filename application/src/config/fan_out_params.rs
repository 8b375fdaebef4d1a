//! Fan-out parameters — aggregation control.
//!
//! [`FanOutParams`] groups the static parameters that control one
//! fan-out in [`AggregateUseCase`](crate::use_cases::aggregate::AggregateUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-adapter timeout budget in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Fan-out control parameters.
///
/// The timeout budget is fixed for the duration of one fan-out; every
/// adapter races against its own independent copy of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanOutParams {
    /// Maximum time each adapter may take before its call is abandoned.
    pub adapter_timeout: Duration,
}

impl Default for FanOutParams {
    fn default() -> Self {
        Self {
            adapter_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FanOutParams {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.adapter_timeout = timeout;
        self
    }

    /// Creates params with the timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            adapter_timeout: Duration::from_secs(seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = FanOutParams::default();
        assert_eq!(params.adapter_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_builder() {
        let params = FanOutParams::default().with_timeout(Duration::from_millis(250));
        assert_eq!(params.adapter_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_from_seconds() {
        let params = FanOutParams::with_timeout_seconds(30);
        assert_eq!(params.adapter_timeout, Duration::from_secs(30));
    }
}
