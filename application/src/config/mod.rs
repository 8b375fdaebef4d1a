//! Application-level configuration.
//!
//! Configuration types that control how the use cases behave:
//!
//! - [`FanOutParams`] — fan-out control (per-adapter timeout budget)

pub mod fan_out_params;

pub use fan_out_params::FanOutParams;
