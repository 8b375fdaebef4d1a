//! Logging infrastructure — structured fan-out event logging.
//!
//! Provides [`JsonlEventLog`], a JSONL file writer that implements the
//! [`ProgressNotifier`](chorus_application::ProgressNotifier) port.

mod event_log;

pub use event_log::JsonlEventLog;
