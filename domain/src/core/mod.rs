//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderId`] — the configured text-generation providers
//! - [`prompt::Prompt`] — a validated prompt to fan out to all providers
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod prompt;
pub mod provider;
