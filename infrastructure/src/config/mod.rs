//! Configuration file loading for llm-chorus
//!
//! This module handles file I/O and merging of configuration from
//! multiple sources. The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file (replaces the project layer)
//! 2. Project root: `./chorus.toml` or `./.chorus.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/llm-chorus/config.toml`
//! 4. Fallback: `~/.config/llm-chorus/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAggregationConfig, FileAnthropicConfig, FileConfig, FileGeminiConfig, FileOllamaConfig,
    FileOpenAiConfig, FileOutputConfig, FileOutputFormat, FileProvidersConfig,
};
pub use loader::ConfigLoader;

use thiserror::Error;

/// Errors raised by configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not load configuration: {0}")]
    Load(#[source] Box<figment::Error>),

    #[error("Unknown provider in aggregation.providers: {0}")]
    UnknownProvider(String),
}
