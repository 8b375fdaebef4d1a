//! Analysis domain
//!
//! Lexical agreement scoring between provider responses. Deliberately
//! token-based rather than semantic so results stay deterministic and
//! reproducible.

pub mod similarity;

pub use similarity::{SimilarityMatrix, jaccard, token_set};
