//! Synthesis domain
//!
//! Merging the fan-out's responses into one answer. The confidence tier
//! is a pure function of valid-response count and mean agreement, and
//! each tier implies one merge algorithm:
//!
//! - **High** agreement → consensus (longest answer plus extra insights)
//! - **Medium** agreement → balanced (common themes and divergences)
//! - **Low** agreement → comparative (one section per provider)
//!
//! The shipped [`lexical::LexicalSynthesis`] strategy is fully
//! deterministic; alternative strategies plug in behind
//! [`strategy::SynthesisStrategy`].

pub mod lexical;
pub mod sentences;
pub mod strategy;
pub mod tier;

pub use lexical::LexicalSynthesis;
pub use sentences::split_sentences;
pub use strategy::SynthesisStrategy;
pub use tier::{Approach, ConfidenceTier, HIGH_AGREEMENT, MODERATE_AGREEMENT};
