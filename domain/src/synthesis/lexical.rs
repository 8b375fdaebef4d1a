//! Deterministic lexical synthesis.
//!
//! Merges the valid responses of one fan-out into a single answer using
//! token-overlap agreement only. No model calls and no randomness: the
//! same responses always produce the same synthesis.

use async_trait::async_trait;

use crate::aggregation::value_objects::{ProviderResponse, SynthesisResult};
use crate::analysis::similarity::{SimilarityMatrix, jaccard};
use crate::core::provider::ProviderId;

use super::sentences::split_sentences;
use super::strategy::SynthesisStrategy;
use super::tier::{Approach, ConfidenceTier};

/// Sentences at or above this similarity to a base sentence are
/// near-duplicates and excluded from consensus insights
const NEAR_DUPLICATE: f64 = 0.70;

/// Sentence agreement above this (strict) qualifies as a common theme
const THEME_MATCH: f64 = 0.60;

/// Maximum insight sentences appended by consensus synthesis
const MAX_INSIGHTS: usize = 3;

/// Maximum common themes reported by balanced synthesis
const MAX_THEMES: usize = 4;

/// Maximum disagreement statements reported by balanced synthesis
const MAX_DISAGREEMENTS: usize = 2;

/// Maximum key points per provider in comparative synthesis
const MAX_KEY_POINTS: usize = 3;

/// Key-point sentence length bounds in characters, both exclusive
const KEY_POINT_MIN_CHARS: usize = 30;
const KEY_POINT_MAX_CHARS: usize = 200;

/// Keyword pairs whose joint presence across responses signals a
/// disagreement between providers
const ANTONYM_PAIRS: [(&str, &str); 9] = [
    ("yes", "no"),
    ("recommend", "avoid"),
    ("increase", "decrease"),
    ("positive", "negative"),
    ("support", "oppose"),
    ("good", "bad"),
    ("should", "shouldn't"),
    ("best", "worst"),
    ("agree", "disagree"),
];

/// Keywords marking a sentence as a key point
const KEY_POINT_INDICATORS: [&str; 9] = [
    "recommend",
    "suggest",
    "important",
    "key",
    "should",
    "best",
    "main",
    "first",
    "consider",
];

/// Token-overlap synthesis strategy
///
/// Tier selection and all three merge algorithms operate on the valid
/// responses only; synthetic fallbacks are ignored entirely.
#[derive(Debug, Clone, Default)]
pub struct LexicalSynthesis;

impl LexicalSynthesis {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core of the strategy.
    ///
    /// Exposed so pure callers and tests can avoid the async wrapper.
    pub fn run(&self, responses: &[ProviderResponse]) -> SynthesisResult {
        let valid: Vec<&ProviderResponse> = responses.iter().filter(|r| r.is_valid()).collect();

        if valid.is_empty() {
            return Self::none_result();
        }
        if let [only] = valid.as_slice() {
            return Self::single_result(only);
        }

        let texts: Vec<&str> = valid.iter().filter_map(|r| r.text()).collect();
        let matrix = SimilarityMatrix::compute(&texts);
        let mean = matrix.mean();
        let tier = ConfidenceTier::classify(valid.len(), mean);

        let answer = if tier == ConfidenceTier::High {
            Self::compose_consensus(&valid)
        } else if tier == ConfidenceTier::Medium {
            Self::compose_balanced(&valid)
        } else {
            Self::compose_comparative(&valid)
        };

        let sources_used: Vec<ProviderId> = valid.iter().map(|r| r.source).collect();
        let approach = tier.approach();

        SynthesisResult {
            answer,
            tier,
            confidence: tier.confidence(mean),
            approach,
            sources_used,
            reasoning: format!(
                "{} providers responded with {}% average agreement; applied {} synthesis.",
                valid.len(),
                (mean * 100.0).round() as u8,
                approach,
            ),
        }
    }

    /// Terminal result when no provider returned generated text.
    fn none_result() -> SynthesisResult {
        SynthesisResult {
            answer: "No providers were able to generate a response. \
                     Check provider configuration and try again."
                .to_string(),
            tier: ConfidenceTier::None,
            confidence: 0,
            approach: Approach::Error,
            sources_used: Vec::new(),
            reasoning: "No successful responses from any provider.".to_string(),
        }
    }

    /// Terminal result when exactly one provider responded.
    ///
    /// The answer is that provider's text verbatim.
    fn single_result(response: &ProviderResponse) -> SynthesisResult {
        SynthesisResult {
            answer: response.text().unwrap_or_default().to_string(),
            tier: ConfidenceTier::Single,
            confidence: 50,
            approach: Approach::Single,
            sources_used: vec![response.source],
            reasoning: "Only one provider responded; returning its answer unmodified.".to_string(),
        }
    }

    /// High agreement: longest response as the base answer plus up to
    /// three non-duplicate insight sentences from the other responses.
    fn compose_consensus(valid: &[&ProviderResponse]) -> String {
        let base_idx = longest_index(valid);
        let base_text = valid[base_idx].text().unwrap_or_default();
        let base_sentences = split_sentences(base_text);

        let mut insights: Vec<String> = Vec::new();
        for (idx, response) in valid.iter().enumerate() {
            if idx == base_idx || insights.len() >= MAX_INSIGHTS {
                continue;
            }
            let Some(text) = response.text() else { continue };
            for sentence in split_sentences(text) {
                if insights.len() >= MAX_INSIGHTS {
                    break;
                }
                let near_duplicate = base_sentences
                    .iter()
                    .any(|b| jaccard(b, &sentence).unwrap_or(0.0) >= NEAR_DUPLICATE);
                if !near_duplicate {
                    insights.push(format!(
                        "{}. ({})",
                        sentence,
                        response.source.display_name()
                    ));
                }
            }
        }

        let mut answer = base_text.trim().to_string();
        if !insights.is_empty() {
            answer.push_str("\n\nAdditional insights:\n");
            for insight in &insights {
                answer.push_str("- ");
                answer.push_str(insight);
                answer.push('\n');
            }
        }
        answer.trim_end().to_string()
    }

    /// Moderate agreement: common themes plus disagreement statements.
    ///
    /// When no theme qualifies, the longest response leads the answer so
    /// the result is never empty.
    fn compose_balanced(valid: &[&ProviderResponse]) -> String {
        let themes = Self::common_themes(valid);
        let disagreements = Self::disagreements(valid);

        let mut sections: Vec<String> = Vec::new();
        if themes.is_empty() {
            let base_text = valid[longest_index(valid)].text().unwrap_or_default();
            sections.push(base_text.trim().to_string());
        } else {
            let mut block = String::from("Common ground across providers:\n");
            for theme in &themes {
                block.push_str(&bullet(theme));
                block.push('\n');
            }
            sections.push(block.trim_end().to_string());
        }

        if !disagreements.is_empty() {
            let mut block = String::from("Points of divergence:\n");
            for statement in &disagreements {
                block.push_str("- ");
                block.push_str(statement);
                block.push('\n');
            }
            sections.push(block.trim_end().to_string());
        }

        sections.join("\n\n")
    }

    /// Sentences that agree (above [`THEME_MATCH`]) with a sentence from
    /// a different provider. Each theme is counted once; its matched
    /// counterparts are suppressed so near-identical sentences cannot
    /// produce duplicate themes.
    fn common_themes(valid: &[&ProviderResponse]) -> Vec<String> {
        let mut sentences: Vec<(usize, String)> = Vec::new();
        for (idx, response) in valid.iter().enumerate() {
            if let Some(text) = response.text() {
                for sentence in split_sentences(text) {
                    sentences.push((idx, sentence));
                }
            }
        }

        let mut themes: Vec<String> = Vec::new();
        let mut suppressed = vec![false; sentences.len()];

        for i in 0..sentences.len() {
            if themes.len() >= MAX_THEMES {
                break;
            }
            if suppressed[i] {
                continue;
            }
            let mut matched = false;
            for j in 0..sentences.len() {
                if i == j || suppressed[j] || sentences[j].0 == sentences[i].0 {
                    continue;
                }
                if jaccard(&sentences[i].1, &sentences[j].1).unwrap_or(0.0) > THEME_MATCH {
                    suppressed[j] = true;
                    matched = true;
                }
            }
            if matched {
                suppressed[i] = true;
                themes.push(sentences[i].1.clone());
            }
        }
        themes
    }

    /// Antonym-pair scan over lowercased full texts.
    ///
    /// A pair fires when at least one response contains the first
    /// keyword and at least one contains the second; the statement names
    /// the providers on each side.
    fn disagreements(valid: &[&ProviderResponse]) -> Vec<String> {
        let lowered: Vec<(ProviderId, String)> = valid
            .iter()
            .filter_map(|r| r.text().map(|t| (r.source, t.to_lowercase())))
            .collect();

        let mut statements: Vec<String> = Vec::new();
        for (first, second) in ANTONYM_PAIRS {
            if statements.len() >= MAX_DISAGREEMENTS {
                break;
            }
            let holding_first: Vec<&str> = lowered
                .iter()
                .filter(|(_, text)| text.contains(first))
                .map(|(source, _)| source.display_name())
                .collect();
            let holding_second: Vec<&str> = lowered
                .iter()
                .filter(|(_, text)| text.contains(second))
                .map(|(source, _)| source.display_name())
                .collect();
            if !holding_first.is_empty() && !holding_second.is_empty() {
                statements.push(format!(
                    "\"{}\" ({}) vs \"{}\" ({})",
                    first,
                    holding_first.join(", "),
                    second,
                    holding_second.join(", "),
                ));
            }
        }
        statements
    }

    /// Low agreement: one section per provider listing its key points,
    /// closed by a line recommending the approaches be combined.
    fn compose_comparative(valid: &[&ProviderResponse]) -> String {
        let mut sections: Vec<String> = Vec::new();
        for response in valid {
            let Some(text) = response.text() else { continue };
            let sentences = split_sentences(text);
            let mut points: Vec<String> = sentences
                .iter()
                .filter(|s| {
                    let chars = s.chars().count();
                    chars > KEY_POINT_MIN_CHARS && chars < KEY_POINT_MAX_CHARS && has_indicator(s)
                })
                .take(MAX_KEY_POINTS)
                .cloned()
                .collect();
            if points.is_empty() {
                if let Some(first) = sentences.first() {
                    points.push(first.clone());
                } else if !text.trim().is_empty() {
                    points.push(text.trim().to_string());
                }
            }

            let mut block = format!("{}:\n", response.source.display_name());
            for point in &points {
                block.push_str(&bullet(point));
                block.push('\n');
            }
            sections.push(block.trim_end().to_string());
        }
        sections.push(
            "These perspectives differ; combining their approaches may give the most complete \
             picture."
                .to_string(),
        );
        sections.join("\n\n")
    }
}

#[async_trait]
impl SynthesisStrategy for LexicalSynthesis {
    fn name(&self) -> &'static str {
        "lexical"
    }

    async fn synthesize(&self, responses: &[ProviderResponse]) -> SynthesisResult {
        self.run(responses)
    }
}

/// Index of the longest text by character count.
///
/// Strict comparison keeps the earliest response on ties, preserving
/// registration order as the tiebreak.
fn longest_index(valid: &[&ProviderResponse]) -> usize {
    let mut best = 0;
    let mut best_len = 0;
    for (idx, response) in valid.iter().enumerate() {
        let len = response.text().map(|t| t.chars().count()).unwrap_or(0);
        if len > best_len {
            best = idx;
            best_len = len;
        }
    }
    best
}

fn has_indicator(sentence: &str) -> bool {
    let lowered = sentence.to_lowercase();
    KEY_POINT_INDICATORS.iter().any(|kw| lowered.contains(kw))
}

/// Render a list item, adding terminal punctuation only when missing.
fn bullet(text: &str) -> String {
    if text.ends_with(['.', '!', '?']) {
        format!("- {}", text)
    } else {
        format!("- {}.", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::value_objects::FailureKind;

    fn completed(source: ProviderId, text: &str) -> ProviderResponse {
        ProviderResponse::completed(source, text)
    }

    fn timed_out(source: ProviderId) -> ProviderResponse {
        ProviderResponse::fallback(source, FailureKind::Timeout, "no response within budget")
    }

    #[test]
    fn test_no_valid_responses_is_error_tier() {
        let strategy = LexicalSynthesis::new();
        let responses = vec![timed_out(ProviderId::OpenAi), timed_out(ProviderId::Gemini)];

        let result = strategy.run(&responses);

        assert_eq!(result.tier, ConfidenceTier::None);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.approach, Approach::Error);
        assert!(result.sources_used.is_empty());
        assert!(!result.answer.is_empty());
        assert_eq!(
            result.reasoning,
            "No successful responses from any provider."
        );
    }

    #[test]
    fn test_empty_input_is_error_tier() {
        let result = LexicalSynthesis::new().run(&[]);
        assert_eq!(result.tier, ConfidenceTier::None);
        assert_eq!(result.approach, Approach::Error);
    }

    #[test]
    fn test_single_response_returned_verbatim() {
        let strategy = LexicalSynthesis::new();
        let text = "Only one provider had anything to say about this.";
        let responses = vec![
            timed_out(ProviderId::OpenAi),
            completed(ProviderId::Anthropic, text),
            timed_out(ProviderId::Gemini),
        ];

        let result = strategy.run(&responses);

        assert_eq!(result.tier, ConfidenceTier::Single);
        assert_eq!(result.confidence, 50);
        assert_eq!(result.approach, Approach::Single);
        assert_eq!(result.sources_used, vec![ProviderId::Anthropic]);
        assert_eq!(result.answer, text);
    }

    #[test]
    fn test_high_agreement_selects_consensus() {
        let strategy = LexicalSynthesis::new();
        // Token sets: 7 shared of 10 total, similarity exactly 0.70
        let short = "alpha beta gamma delta epsilon zeta eta";
        let long = "alpha beta gamma delta epsilon zeta eta omega sigma tau";
        let responses = vec![
            completed(ProviderId::OpenAi, short),
            completed(ProviderId::Anthropic, long),
        ];

        let result = strategy.run(&responses);

        assert_eq!(result.tier, ConfidenceTier::High);
        assert_eq!(result.confidence, 70);
        assert_eq!(result.approach, Approach::Consensus);
        assert!(result.answer.starts_with(long));
        assert_eq!(
            result.sources_used,
            vec![ProviderId::OpenAi, ProviderId::Anthropic]
        );
    }

    #[test]
    fn test_consensus_appends_tagged_insights() {
        let strategy = LexicalSynthesis::new();
        let base = "Static typing catches interface drift early in large systems. Exhaustive \
                    pattern matching keeps refactors honest and mechanical across large codebases.";
        let extra = "Static typing catches interface drift early in large systems. Exhaustive \
                     pattern matching keeps refactors honest. Consider fuzzing the parser.";
        let responses = vec![
            completed(ProviderId::OpenAi, base),
            completed(ProviderId::Anthropic, base),
            completed(ProviderId::Gemini, extra),
        ];

        let result = strategy.run(&responses);

        assert_eq!(result.tier, ConfidenceTier::High);
        assert_eq!(result.approach, Approach::Consensus);
        // The two identical responses tie on length; the earliest wins
        assert!(result.answer.starts_with(base));
        assert!(result.answer.contains("Additional insights:"));
        assert!(result.answer.contains("Consider fuzzing the parser"));
        assert!(result.answer.contains("(Gemini)"));
    }

    #[test]
    fn test_consensus_with_identical_responses_has_no_insights() {
        let strategy = LexicalSynthesis::new();
        let text = "Every voice in the chorus happened to sing the same line today.";
        let responses = vec![
            completed(ProviderId::OpenAi, text),
            completed(ProviderId::Anthropic, text),
            completed(ProviderId::Gemini, text),
        ];

        let result = strategy.run(&responses);

        assert_eq!(result.tier, ConfidenceTier::High);
        assert_eq!(result.confidence, 100);
        assert_eq!(result.answer, text);
        assert!(!result.answer.contains("Additional insights"));
    }

    #[test]
    fn test_moderate_boundary_selects_balanced() {
        let strategy = LexicalSynthesis::new();
        // Token sets: 3 shared of 10 total, similarity exactly 0.30
        let a = "alpha beta gamma delta epsilon zeta eta";
        let b = "alpha beta gamma omega sigma tau";
        let responses = vec![
            completed(ProviderId::OpenAi, a),
            completed(ProviderId::Anthropic, b),
        ];

        let result = strategy.run(&responses);

        assert_eq!(result.tier, ConfidenceTier::Medium);
        assert_eq!(result.confidence, 30);
        assert_eq!(result.approach, Approach::Balanced);
        // No sentence pair crosses the theme threshold, so the longest
        // response leads the answer
        assert!(result.answer.starts_with(a));
    }

    #[test]
    fn test_balanced_reports_common_themes() {
        let strategy = LexicalSynthesis::new();
        let a = "Prefer composition over inheritance for shared behavior plainly. Unrelated \
                 filler about deployment windows and rollback plans tonight.";
        let b = "Prefer composition over inheritance for shared behavior mostly. Completely \
                 different commentary regarding database indexes and query planners.";
        let responses = vec![
            completed(ProviderId::OpenAi, a),
            completed(ProviderId::Anthropic, b),
        ];

        let result = strategy.run(&responses);

        assert_eq!(result.tier, ConfidenceTier::Medium);
        assert_eq!(result.approach, Approach::Balanced);
        assert!(result.answer.contains("Common ground across providers:"));
        assert!(
            result
                .answer
                .contains("Prefer composition over inheritance for shared behavior plainly")
        );
        assert!(!result.answer.contains("Completely different commentary"));
    }

    #[test]
    fn test_balanced_reports_disagreements() {
        let strategy = LexicalSynthesis::new();
        let shared = "Service boundaries should follow team ownership lines across the whole \
                      organization.";
        let a = format!("{} I recommend proceeding now today.", shared);
        let b = format!("{} Better to avoid changes this quarter.", shared);
        let responses = vec![
            completed(ProviderId::OpenAi, &a),
            completed(ProviderId::Anthropic, &b),
        ];

        let result = strategy.run(&responses);

        assert_eq!(result.tier, ConfidenceTier::Medium);
        assert_eq!(result.confidence, 55);
        assert!(result.answer.contains("Points of divergence:"));
        assert!(result.answer.contains("\"recommend\" (OpenAI)"));
        assert!(result.answer.contains("\"avoid\" (Anthropic)"));
    }

    #[test]
    fn test_low_agreement_selects_comparative() {
        let strategy = LexicalSynthesis::new();
        let responses = vec![
            completed(
                ProviderId::OpenAi,
                "Recommend caching hot rows aggressively throughout.",
            ),
            completed(ProviderId::Anthropic, "Use Postgres for this. It scales fine."),
            completed(
                ProviderId::Gemini,
                "Important metrics deserve continuous monitoring dashboards.",
            ),
        ];

        let result = strategy.run(&responses);

        assert_eq!(result.tier, ConfidenceTier::Low);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.approach, Approach::Comparative);
        // One grouped section per provider
        assert!(result.answer.contains("OpenAI:"));
        assert!(result.answer.contains("Anthropic:"));
        assert!(result.answer.contains("Gemini:"));
        assert!(
            result
                .answer
                .contains("Recommend caching hot rows aggressively throughout")
        );
        // No sentence qualified as a key point, so the first sentence
        // stands in
        assert!(result.answer.contains("Use Postgres for this"));
        assert!(result.answer.contains("combining"));
    }

    #[test]
    fn test_valid_but_unscorable_texts_fall_back_to_comparative() {
        let strategy = LexicalSynthesis::new();
        // Every token is under three characters, so no pair scores
        let responses = vec![
            completed(ProviderId::OpenAi, "ok ye"),
            completed(ProviderId::Anthropic, "no ha"),
        ];

        let result = strategy.run(&responses);

        assert_eq!(result.tier, ConfidenceTier::Low);
        assert_eq!(result.confidence, 0);
        assert!(result.answer.contains("ok ye"));
    }

    #[test]
    fn test_sources_keep_registration_order() {
        let strategy = LexicalSynthesis::new();
        let filler = "Each of these answers shares absolutely zero meaningful vocabulary.";
        let responses = vec![
            completed(ProviderId::OpenAi, filler),
            timed_out(ProviderId::Anthropic),
            completed(ProviderId::Gemini, "Entirely different words appear here instead."),
            completed(ProviderId::Ollama, "Nothing matches anywhere throughout this reply."),
        ];

        let result = strategy.run(&responses);

        assert_eq!(
            result.sources_used,
            vec![ProviderId::OpenAi, ProviderId::Gemini, ProviderId::Ollama]
        );
    }

    #[test]
    fn test_reasoning_reports_count_and_agreement() {
        let strategy = LexicalSynthesis::new();
        let text = "Identical answers from both voices in this run.";
        let responses = vec![
            completed(ProviderId::OpenAi, text),
            completed(ProviderId::Anthropic, text),
        ];

        let result = strategy.run(&responses);

        assert_eq!(
            result.reasoning,
            "2 providers responded with 100% average agreement; applied consensus synthesis."
        );
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let strategy = LexicalSynthesis::new();
        let responses = vec![
            completed(
                ProviderId::OpenAi,
                "Prefer a queue between the services. Backpressure should stay explicit.",
            ),
            completed(
                ProviderId::Anthropic,
                "Direct calls are simpler to trace. Retries belong at the edge only.",
            ),
            timed_out(ProviderId::Gemini),
        ];

        let first = strategy.run(&responses);
        let second = strategy.run(&responses);

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_strategy_trait_matches_run() {
        let strategy = LexicalSynthesis::new();
        let responses = vec![completed(ProviderId::Ollama, "A lone answer for the trait path.")];

        let via_trait = strategy.synthesize(&responses).await;

        assert_eq!(via_trait, strategy.run(&responses));
        assert_eq!(strategy.name(), "lexical");
    }
}
