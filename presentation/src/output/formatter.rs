//! Output formatter trait

use chorus_domain::ChorusResult;

/// Trait for formatting chorus results
pub trait OutputFormatter {
    /// Format the complete chorus result
    fn format(&self, result: &ChorusResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &ChorusResult) -> String;

    /// Format the synthesized answer only (concise output)
    fn format_answer_only(&self, result: &ChorusResult) -> String;
}
