//! Progress reporting for the fan-out

use chorus_application::{AdapterEvent, AdapterOutcome, ProgressNotifier};
use chorus_domain::ProviderId;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Reports fan-out progress with one spinner per provider
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<ProviderId, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_fan_out_start(&self, providers: &[ProviderId]) {
        let mut bars = self.bars.lock().unwrap();
        for provider in providers {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(Self::spinner_style());
            pb.set_prefix(provider.display_name());
            pb.set_message("querying...");
            pb.enable_steady_tick(Duration::from_millis(100));
            bars.insert(*provider, pb);
        }
    }

    fn on_adapter_settled(&self, event: &AdapterEvent) {
        if let Some(pb) = self.bars.lock().unwrap().get(&event.provider) {
            let status = match &event.outcome {
                AdapterOutcome::Ok => {
                    format!("{} ({} ms)", "v".green(), event.elapsed_ms)
                }
                AdapterOutcome::Failed(kind) => {
                    format!("{} {} ({} ms)", "x".red(), kind, event.elapsed_ms)
                }
            };
            pb.finish_with_message(status);
        }
    }

    fn on_fan_out_complete(&self, succeeded: usize, queried: usize, elapsed_ms: u64) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.finish_with_message(format!(
            "{} {}/{} providers in {} ms",
            "done:".bold(),
            succeeded,
            queried,
            elapsed_ms
        ));
        self.bars.lock().unwrap().clear();
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_fan_out_start(&self, providers: &[ProviderId]) {
        let names: Vec<&str> = providers.iter().map(|p| p.display_name()).collect();
        eprintln!(
            "{} querying {} providers: {}",
            "->".cyan(),
            providers.len(),
            names.join(", ")
        );
    }

    fn on_adapter_settled(&self, event: &AdapterEvent) {
        match &event.outcome {
            AdapterOutcome::Ok => {
                eprintln!(
                    "  {} {} ({} ms)",
                    "v".green(),
                    event.provider.display_name(),
                    event.elapsed_ms
                );
            }
            AdapterOutcome::Failed(kind) => {
                eprintln!(
                    "  {} {} ({}, {} ms)",
                    "x".red(),
                    event.provider.display_name(),
                    kind,
                    event.elapsed_ms
                );
            }
        }
    }

    fn on_fan_out_complete(&self, succeeded: usize, queried: usize, elapsed_ms: u64) {
        eprintln!("  {}/{} providers in {} ms\n", succeeded, queried, elapsed_ms);
    }
}
