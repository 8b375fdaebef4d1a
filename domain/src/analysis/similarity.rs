//! Token-set similarity scoring.
//!
//! Agreement between two responses is the Jaccard similarity of their
//! token sets: |intersection| / |union|, in [0, 1]. Word order and
//! repetition do not matter; identical vocabulary scores 1.0.

use std::collections::HashSet;

/// Tokens shorter than this many characters are discarded before comparison
pub const MIN_TOKEN_LEN: usize = 3;

/// Split a text into its comparison token set.
///
/// Lowercases, splits on whitespace, and drops tokens shorter than
/// [`MIN_TOKEN_LEN`] characters to suppress stopword and punctuation
/// fragments.
pub fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN)
        .map(|w| w.to_string())
        .collect()
}

/// Jaccard similarity between two texts.
///
/// Returns `None` when either token set is empty; callers exclude such
/// pairs from aggregate scoring instead of dividing by zero.
pub fn jaccard(a: &str, b: &str) -> Option<f64> {
    let set_a = token_set(a);
    let set_b = token_set(b);
    if set_a.is_empty() || set_b.is_empty() {
        return None;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    Some(intersection as f64 / union as f64)
}

/// Pairwise similarity between the valid responses of one fan-out.
///
/// Symmetric and immutable once computed. Pairs where either text
/// produced an empty token set carry no score and are excluded from
/// the mean.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    /// Upper-triangle scores keyed by (i, j) with i < j
    scores: Vec<((usize, usize), Option<f64>)>,
}

impl SimilarityMatrix {
    /// Compute all pairwise scores for the given texts.
    pub fn compute(texts: &[&str]) -> Self {
        let mut scores = Vec::new();
        for i in 0..texts.len() {
            for j in (i + 1)..texts.len() {
                scores.push(((i, j), jaccard(texts[i], texts[j])));
            }
        }
        Self { scores }
    }

    /// Similarity between texts `a` and `b`, in either order.
    ///
    /// Unscored pairs report 0.0.
    pub fn score(&self, a: usize, b: usize) -> f64 {
        let key = (a.min(b), a.max(b));
        self.scores
            .iter()
            .find(|(pair, _)| *pair == key)
            .and_then(|(_, score)| *score)
            .unwrap_or(0.0)
    }

    /// Arithmetic mean over all scored pairs.
    ///
    /// 0.0 when no pair produced a score.
    pub fn mean(&self) -> f64 {
        let scored: Vec<f64> = self.scores.iter().filter_map(|(_, score)| *score).collect();
        if scored.is_empty() {
            return 0.0;
        }
        scored.iter().sum::<f64>() / scored.len() as f64
    }

    /// Number of pairs that produced a score.
    pub fn scored_pairs(&self) -> usize {
        self.scores.iter().filter(|(_, score)| score.is_some()).count()
    }
}
