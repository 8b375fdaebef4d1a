//! Application layer for llm-chorus
//!
//! This crate contains the aggregation use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::FanOutParams;
pub use ports::{
    composite_progress::CompositeNotifier,
    progress::{AdapterEvent, AdapterOutcome, NoProgress, ProgressNotifier},
    provider_adapter::ProviderAdapter,
};
pub use use_cases::aggregate::{AggregateError, AggregateUseCase};
