//! Infrastructure layer for llm-chorus
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the concrete HTTP provider adapters, configuration
//! file loading, and the JSONL event log.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileAggregationConfig, FileConfig, FileOutputConfig,
    FileOutputFormat, FileProvidersConfig,
};
pub use logging::JsonlEventLog;
pub use providers::{
    AnthropicAdapter, GeminiAdapter, OllamaAdapter, OpenAiAdapter, build_adapters,
};
