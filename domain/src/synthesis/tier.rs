//! Confidence tiers and approach selection.
//!
//! The tier is decided first by valid-response count (0 and 1 are
//! terminal cases), then by mean agreement against two thresholds.
//! Both thresholds are closed lower bounds: a mean of exactly 0.70
//! classifies High and exactly 0.30 classifies Medium.

use serde::{Deserialize, Serialize};

/// Mean agreement at or above this selects consensus synthesis
pub const HIGH_AGREEMENT: f64 = 0.70;

/// Mean agreement at or above this, below [`HIGH_AGREEMENT`], selects
/// balanced synthesis
pub const MODERATE_AGREEMENT: f64 = 0.30;

/// Discrete confidence classification for a synthesized answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    Single,
    None,
}

impl ConfidenceTier {
    /// Classify a fan-out by valid-response count and mean agreement.
    pub fn classify(valid_count: usize, mean_similarity: f64) -> Self {
        match valid_count {
            0 => ConfidenceTier::None,
            1 => ConfidenceTier::Single,
            _ => {
                if mean_similarity >= HIGH_AGREEMENT {
                    ConfidenceTier::High
                } else if mean_similarity >= MODERATE_AGREEMENT {
                    ConfidenceTier::Medium
                } else {
                    ConfidenceTier::Low
                }
            }
        }
    }

    /// The merge approach this tier implies.
    pub fn approach(&self) -> Approach {
        match self {
            ConfidenceTier::High => Approach::Consensus,
            ConfidenceTier::Medium => Approach::Balanced,
            ConfidenceTier::Low => Approach::Comparative,
            ConfidenceTier::Single => Approach::Single,
            ConfidenceTier::None => Approach::Error,
        }
    }

    /// Numeric confidence in [0, 100] for this tier.
    ///
    /// None is fixed at 0 and Single at 50; the multi-response tiers
    /// report the rounded mean agreement percentage.
    pub fn confidence(&self, mean_similarity: f64) -> u8 {
        match self {
            ConfidenceTier::None => 0,
            ConfidenceTier::Single => 50,
            _ => (mean_similarity * 100.0).round() as u8,
        }
    }

    /// Get the string identifier for this tier
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
            ConfidenceTier::Single => "single",
            ConfidenceTier::None => "none",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which merge algorithm produced the final answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Approach {
    Consensus,
    Balanced,
    Comparative,
    Single,
    Error,
}

impl Approach {
    /// Get the string identifier for this approach
    pub fn as_str(&self) -> &'static str {
        match self {
            Approach::Consensus => "consensus",
            Approach::Balanced => "balanced",
            Approach::Comparative => "comparative",
            Approach::Single => "single",
            Approach::Error => "error",
        }
    }
}

impl std::fmt::Display for Approach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_responses_classify_none() {
        // The mean is irrelevant when nothing responded
        assert_eq!(ConfidenceTier::classify(0, 0.95), ConfidenceTier::None);
    }

    #[test]
    fn test_one_response_classifies_single() {
        assert_eq!(ConfidenceTier::classify(1, 0.0), ConfidenceTier::Single);
    }

    #[test]
    fn test_high_boundary_is_closed() {
        assert_eq!(ConfidenceTier::classify(2, 0.70), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::classify(2, 0.699), ConfidenceTier::Medium);
    }

    #[test]
    fn test_moderate_boundary_is_closed() {
        assert_eq!(ConfidenceTier::classify(2, 0.30), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::classify(2, 0.299), ConfidenceTier::Low);
    }

    #[test]
    fn test_each_tier_implies_one_approach() {
        assert_eq!(ConfidenceTier::High.approach(), Approach::Consensus);
        assert_eq!(ConfidenceTier::Medium.approach(), Approach::Balanced);
        assert_eq!(ConfidenceTier::Low.approach(), Approach::Comparative);
        assert_eq!(ConfidenceTier::Single.approach(), Approach::Single);
        assert_eq!(ConfidenceTier::None.approach(), Approach::Error);
    }

    #[test]
    fn test_confidence_values() {
        assert_eq!(ConfidenceTier::None.confidence(0.9), 0);
        assert_eq!(ConfidenceTier::Single.confidence(0.9), 50);
        assert_eq!(ConfidenceTier::High.confidence(0.856), 86);
        assert_eq!(ConfidenceTier::Low.confidence(0.124), 12);
    }

    #[test]
    fn test_labels_are_lowercase() {
        assert_eq!(ConfidenceTier::High.to_string(), "high");
        assert_eq!(Approach::Comparative.to_string(), "comparative");
        let json = serde_json::to_string(&Approach::Consensus).unwrap();
        assert_eq!(json, "\"consensus\"");
    }
}
