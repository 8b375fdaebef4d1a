//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

/// Output format for chorus results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutputFormat {
    /// Full formatted output with per-provider status
    #[default]
    Full,
    /// Only the synthesized answer text
    Answer,
    /// JSON output
    Json,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format
    pub format: FileOutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: FileOutputFormat::Full,
            color: true,
        }
    }
}
