//! Console output formatter for chorus results

use crate::output::formatter::OutputFormatter;
use chorus_domain::{ChorusResult, ConfidenceTier};
use colored::{ColoredString, Colorize};

/// Formats chorus results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete chorus result
    pub fn format(result: &ChorusResult) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("LLM Chorus Results"));
        output.push('\n');

        // Prompt
        output.push_str(&format!(
            "{} {}\n\n",
            "Prompt:".cyan().bold(),
            result.prompt
        ));

        // Provider status
        output.push_str(&Self::section_header("Providers"));
        for response in &result.responses {
            match response.failure() {
                None => {
                    let len = response.text().map(|t| t.chars().count()).unwrap_or(0);
                    output.push_str(&format!(
                        "  {} {} ({} chars)\n",
                        "v".green(),
                        response.source.display_name(),
                        len
                    ));
                }
                Some((kind, message)) => {
                    output.push_str(&format!(
                        "  {} {} ({}): {}\n",
                        "x".red(),
                        response.source.display_name(),
                        kind,
                        message
                    ));
                }
            }
        }

        // Answer
        output.push_str(&Self::section_header("Answer"));
        output.push('\n');
        output.push_str(&result.synthesis.answer);
        output.push('\n');

        // Confidence
        output.push_str(&format!(
            "\n{} {} ({}%, {} synthesis)\n",
            "Confidence:".cyan().bold(),
            Self::tier_label(result.synthesis.tier),
            result.synthesis.confidence,
            result.synthesis.approach
        ));

        if !result.synthesis.sources_used.is_empty() {
            let sources: Vec<&str> = result
                .synthesis
                .sources_used
                .iter()
                .map(|p| p.display_name())
                .collect();
            output.push_str(&format!(
                "{} {}\n",
                "Sources:".cyan().bold(),
                sources.join(", ")
            ));
        }

        output.push_str(&format!(
            "{} {}\n",
            "Reasoning:".dimmed(),
            result.synthesis.reasoning.dimmed()
        ));

        output.push_str(&format!(
            "{}\n",
            format!("Completed in {} ms", result.elapsed_ms).dimmed()
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &ChorusResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the synthesized answer only (concise output)
    pub fn format_answer_only(result: &ChorusResult) -> String {
        let mut output = String::new();
        output.push_str(&result.synthesis.answer);
        output.push('\n');
        output.push_str(&format!(
            "\n{}\n",
            format!(
                "[{} confidence, {}/{} providers]",
                result.synthesis.tier,
                result.providers_succeeded(),
                result.providers_queried()
            )
            .dimmed()
        ));
        output
    }

    fn tier_label(tier: ConfidenceTier) -> ColoredString {
        match tier {
            ConfidenceTier::High => tier.as_str().green().bold(),
            ConfidenceTier::Medium => tier.as_str().yellow().bold(),
            ConfidenceTier::Low | ConfidenceTier::None => tier.as_str().red().bold(),
            ConfidenceTier::Single => tier.as_str().yellow(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &ChorusResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &ChorusResult) -> String {
        Self::format_json(result)
    }

    fn format_answer_only(&self, result: &ChorusResult) -> String {
        Self::format_answer_only(result)
    }
}
