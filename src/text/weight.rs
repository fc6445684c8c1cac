//! Semantic weight scoring for individual content blocks

use crate::error::{MuveraError, Result};
use crate::utils::{lexical_diversity, round2};
use regex::Regex;

/// Character-length band that earns the optimal-length boost
const OPTIMAL_CHARS: std::ops::Range<usize> = 101..200;

/// Scores how much a single block is worth to downstream retrieval
///
/// The weight is a deterministic function of the block's tag and text:
/// a per-tag importance factor adjusted by query-intent and lexical-richness
/// boosts. Weights feed into passage ranking and are never recomputed after
/// segmentation.
pub struct WeightCalculator {
    interrogative: Regex,
}

impl WeightCalculator {
    pub fn new() -> Result<Self> {
        let interrogative = Regex::new(r"(?i)\b(how|what|why|when|where|who)\b").map_err(|e| {
            MuveraError::TextProcessing(format!("Failed to compile interrogative regex: {}", e))
        })?;

        Ok(Self { interrogative })
    }

    /// Importance factor by element tag; unrecognized tags are neutral
    fn tag_factor(tag: &str) -> f64 {
        match tag {
            "h1" => 3.0,
            "h2" => 2.5,
            "h3" => 2.0,
            "article" => 2.5,
            "section" => 2.0,
            "p" => 1.0,
            "li" => 0.8,
            "div" => 0.6,
            _ => 1.0,
        }
    }

    /// Compute the semantic weight of a block, rounded to two decimals
    pub fn weight(&self, tag: &str, text: &str) -> f64 {
        let mut weight = 1.0 * Self::tag_factor(tag);

        // Query-intent indicators
        if text.contains('?') {
            weight += 0.3;
        }
        if self.interrogative.is_match(text) {
            weight += 0.2;
        }

        // Length sweet spot for embedding-sized blocks
        if OPTIMAL_CHARS.contains(&text.chars().count()) {
            weight += 0.2;
        }

        // Lexical richness
        weight += lexical_diversity(text) * 0.5;

        round2(weight)
    }
}
