//! Aggregation domain
//!
//! Value objects describing one fan-out: what each provider produced,
//! how the answers were merged, and the final result handed to callers.

pub mod value_objects;

pub use value_objects::{
    ChorusResult, FailureKind, ProviderResponse, ResponseBody, SynthesisResult,
};
