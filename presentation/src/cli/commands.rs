//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for chorus results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with per-provider status
    Full,
    /// Only the synthesized answer
    Answer,
    /// JSON output
    Json,
}

/// CLI arguments for llm-chorus
#[derive(Parser, Debug)]
#[command(name = "llm-chorus")]
#[command(author, version, about = "Query multiple LLM providers at once and merge their answers")]
#[command(long_about = r#"
llm-chorus sends one prompt to several LLM providers in parallel, measures
how much their answers agree, and merges them into a single response.

High agreement yields a consensus answer, moderate agreement a balanced
answer with noted disagreements, low agreement a side-by-side comparison.
A provider that fails or times out never aborts the run; it is reported
alongside the merged answer.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./chorus.toml or ./.chorus.toml        Project-level config
3. ~/.config/llm-chorus/config.toml       Global config

Example:
  llm-chorus "What's the best way to handle errors in Rust?"
  llm-chorus -p openai -p anthropic "Compare async/await patterns"
  llm-chorus --timeout 30 -o json "Summarize the borrow checker"
"#)]
pub struct Cli {
    /// The prompt to send to every provider
    pub prompt: Option<String>,

    /// Providers to query (can be specified multiple times)
    #[arg(short, long, value_name = "PROVIDER")]
    pub provider: Vec<String>,

    /// Per-provider timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators and the header
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show the effective configuration and file locations, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Append fan-out events to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Write tracing output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
