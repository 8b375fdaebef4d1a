//! Sentence extraction shared by the synthesis strategies.

/// Fragments of this many characters or fewer are discarded as noise
const MIN_SENTENCE_CHARS: usize = 10;

/// Split a response into candidate sentences.
///
/// Splits on `.`, `!`, and `?`, trims surrounding whitespace, and drops
/// fragments of [`MIN_SENTENCE_CHARS`] characters or fewer. Terminal
/// punctuation is not preserved.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_terminators() {
        let sentences = split_sentences(
            "Prefer borrowing over cloning. Does the lifetime matter here? It usually does not!",
        );
        assert_eq!(
            sentences,
            vec![
                "Prefer borrowing over cloning",
                "Does the lifetime matter here",
                "It usually does not",
            ]
        );
    }

    #[test]
    fn test_short_fragments_dropped() {
        let sentences = split_sentences("Yes. This sentence is long enough to keep.");
        assert_eq!(sentences, vec!["This sentence is long enough to keep"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let sentences = split_sentences("  Leading and trailing space goes away.  ");
        assert_eq!(sentences, vec!["Leading and trailing space goes away"]);
    }

    #[test]
    fn test_boundary_length_is_exclusive() {
        // Exactly ten characters is still discarded
        let sentences = split_sentences("abcdefghij. abcdefghijk.");
        assert_eq!(sentences, vec!["abcdefghijk"]);
    }
}
