//! Aggregation configuration from TOML (`[aggregation]` section)

use crate::config::ConfigError;
use chorus_domain::ProviderId;
use serde::{Deserialize, Serialize};

/// Raw aggregation configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAggregationConfig {
    /// Per-adapter timeout budget in seconds
    pub timeout_secs: u64,
    /// Provider names to query, in registration order
    pub providers: Vec<String>,
}

impl Default for FileAggregationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            providers: ProviderId::all().iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl FileAggregationConfig {
    /// Parse the configured provider names into ids, preserving order.
    pub fn provider_ids(&self) -> Result<Vec<ProviderId>, ConfigError> {
        self.providers
            .iter()
            .map(|name| {
                name.parse()
                    .map_err(|_| ConfigError::UnknownProvider(name.clone()))
            })
            .collect()
    }
}
