//! CLI entrypoint for llm-chorus
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use chorus_application::{AggregateUseCase, CompositeNotifier, FanOutParams, ProgressNotifier};
use chorus_domain::{LexicalSynthesis, Prompt, ProviderId};
use chorus_infrastructure::{ConfigLoader, FileOutputFormat, JsonlEventLog, build_adapters};
use chorus_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress};
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // The guard must outlive main so buffered log lines are flushed
    let _log_guard = match &cli.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("could not open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(false),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            None
        }
    };

    info!("Starting llm-chorus");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    if cli.show_config {
        println!("{}", config.to_toml());
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let Some(prompt_text) = cli.prompt else {
        bail!("A prompt is required. Run with --help for usage.");
    };
    let prompt = Prompt::try_new(prompt_text)?;

    // CLI provider flags override the configured roster
    let providers: Vec<ProviderId> = if cli.provider.is_empty() {
        config.aggregation.provider_ids()?
    } else {
        cli.provider
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<_>, _>>()?
    };

    let timeout_secs = cli.timeout.unwrap_or(config.aggregation.timeout_secs);

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let adapters = build_adapters(&providers, &config.providers);
    let use_case = AggregateUseCase::new(adapters, Arc::new(LexicalSynthesis::new()))
        .with_params(FanOutParams::with_timeout_seconds(timeout_secs));

    // Print header
    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|                llm-chorus - Provider Chorus                |");
        println!("+============================================================+");
        println!();
        println!("Prompt: {}", prompt.content());
        println!(
            "Providers: {}",
            providers
                .iter()
                .map(|p| p.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Timeout: {}s per provider", timeout_secs);
        println!();
    }

    // Assemble progress observers: console (unless quiet) plus the
    // optional JSONL event log
    let console_progress: Option<Box<dyn ProgressNotifier>> = if cli.quiet {
        None
    } else if std::io::stderr().is_terminal() {
        Some(Box::new(ProgressReporter::new()))
    } else {
        Some(Box::new(SimpleProgress))
    };
    let event_log = cli.event_log.as_ref().and_then(JsonlEventLog::new);

    let mut delegates: Vec<&dyn ProgressNotifier> = Vec::new();
    if let Some(progress) = &console_progress {
        delegates.push(progress.as_ref());
    }
    if let Some(log) = &event_log {
        delegates.push(log);
    }
    let progress = CompositeNotifier::new(delegates);

    let result = use_case.execute_with_progress(&prompt, &progress).await?;

    // Output results
    let format = cli.output.unwrap_or(match config.output.format {
        FileOutputFormat::Full => OutputFormat::Full,
        FileOutputFormat::Answer => OutputFormat::Answer,
        FileOutputFormat::Json => OutputFormat::Json,
    });
    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Answer => ConsoleFormatter::format_answer_only(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };

    println!("{}", output);

    Ok(())
}
