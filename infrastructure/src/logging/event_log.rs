//! JSONL file writer for fan-out events.
//!
//! Each settlement event is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered
//! writer. I/O errors degrade to a `warn!`; they never fail the
//! aggregation.

use chorus_application::ports::progress::{AdapterEvent, ProgressNotifier};
use chorus_domain::ProviderId;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL event log that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes per event and on
/// `Drop` — the file is append-only within one run.
pub struct JsonlEventLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLog {
    /// Create a new event log writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, event_type: &str, mut payload: serde_json::Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        if let serde_json::Value::Object(map) = &mut payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
        }

        let Ok(line) = serde_json::to_string(&payload) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line) {
                warn!("Could not append to event log: {}", e);
            }
            let _ = writer.flush();
        }
    }
}

impl ProgressNotifier for JsonlEventLog {
    fn on_fan_out_start(&self, providers: &[ProviderId]) {
        self.write(
            "fan_out_start",
            serde_json::json!({ "providers": providers }),
        );
    }

    fn on_adapter_settled(&self, event: &AdapterEvent) {
        let outcome = match event.outcome {
            chorus_application::AdapterOutcome::Ok => "ok".to_string(),
            chorus_application::AdapterOutcome::Failed(kind) => kind.to_string(),
        };
        self.write(
            "adapter_settled",
            serde_json::json!({
                "provider": event.provider,
                "outcome": outcome,
                "elapsed_ms": event.elapsed_ms,
            }),
        );
    }

    fn on_fan_out_complete(&self, succeeded: usize, queried: usize, elapsed_ms: u64) {
        self.write(
            "fan_out_complete",
            serde_json::json!({
                "succeeded": succeeded,
                "queried": queried,
                "elapsed_ms": elapsed_ms,
            }),
        );
    }
}

impl Drop for JsonlEventLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
