//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; every section is optional and falls
//! back to its defaults.

mod aggregation;
mod output;
mod providers;

pub use aggregation::FileAggregationConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{
    FileAnthropicConfig, FileGeminiConfig, FileOllamaConfig, FileOpenAiConfig, FileProvidersConfig,
};

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Fan-out settings (timeout, provider set)
    pub aggregation: FileAggregationConfig,
    /// Per-provider settings (model, key env, base URL)
    pub providers: FileProvidersConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Render the resolved configuration as TOML (for `--show-config`).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
