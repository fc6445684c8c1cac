//! Passage quality scoring
//!
//! Two independent heuristics are computed per finished passage: how well
//! its shape suits a vector embedding, and how likely it is to satisfy a
//! search query. Both are 0-100 integers with no normalization across a
//! passage set, so scores are comparable within one document run only.

use regex::Regex;

use crate::config::SegmentationConfig;
use crate::error::{MuveraError, Result};
use crate::text::segmenter::Passage;
use crate::text::sentence::SentenceSplitter;
use crate::utils::lexical_diversity;

/// Sentence-count band that earns the information-density bonus
const DENSE_SENTENCES: std::ops::Range<usize> = 2..6;

/// Character length above which a question-bearing passage reads as a
/// question-answer pair
const QA_MIN_CHARS: usize = 100;

/// Scores finished passages for embedding fitness and retrieval potential
pub struct QualityScorer {
    config: SegmentationConfig,
    splitter: SentenceSplitter,
    interrogative: Regex,
    transition: Regex,
    procedural: Regex,
    exemplar: Regex,
    value: Regex,
    enumeration: Regex,
}

impl QualityScorer {
    pub fn new(config: SegmentationConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            splitter: SentenceSplitter::new()?,
            interrogative: keyword_pattern("how|what|why|when|where|who")?,
            transition: keyword_pattern("first|second|third|finally|however|therefore|because")?,
            procedural: keyword_pattern("step|method|process|guide|tutorial")?,
            exemplar: keyword_pattern("example|instance|case|sample")?,
            value: keyword_pattern("benefit|advantage|feature|solution")?,
            enumeration: keyword_pattern("include|such as|for example|namely")?,
        })
    }

    /// Fill in both quality scores on a passage
    pub fn score(&self, passage: &mut Passage) {
        passage.vector_quality =
            self.vector_quality(&passage.text, passage.word_count, passage.semantic_weight);
        passage.retrieval_score = self.retrieval_score(&passage.text, passage.word_count);
    }

    /// Heuristic 0-100 proxy for how well the passage will embed
    pub fn vector_quality(&self, text: &str, word_count: usize, semantic_weight: f64) -> u8 {
        // Distance from the target length, two points per word
        let target = self.config.target_length as f64;
        let length_score = (100.0 - (word_count as f64 - target).abs() * 2.0).max(0.0);

        let mut score = length_score * 0.4;
        score += semantic_weight * 15.0;

        // Information density: a handful of sentences, not one and not many
        if DENSE_SENTENCES.contains(&self.splitter.split(text).len()) {
            score += 20.0;
        }

        // Query-answering potential
        if self.interrogative.is_match(text) {
            score += 15.0;
        }
        if text.contains('?') {
            score += 10.0;
        }

        score += lexical_diversity(text) * 25.0;

        // Structural flow markers
        if self.transition.is_match(text) {
            score += 10.0;
        }

        score.round().clamp(0.0, 100.0) as u8
    }

    /// Heuristic 0-100 proxy for how likely the passage satisfies a query
    pub fn retrieval_score(&self, text: &str, word_count: usize) -> u8 {
        let mut score = 0u32;

        if word_count >= self.config.min_length && word_count <= self.config.max_length {
            score += 30;
        }

        // Content-type markers
        if self.procedural.is_match(text) {
            score += 20;
        }
        if self.exemplar.is_match(text) {
            score += 15;
        }
        if self.value.is_match(text) {
            score += 15;
        }

        // Question-answer format
        if text.contains('?') && text.chars().count() > QA_MIN_CHARS {
            score += 20;
        }

        // Enumerations point at answer-shaped content
        if self.enumeration.is_match(text) {
            score += 10;
        }

        score.min(100) as u8
    }
}

/// Case-insensitive whole-word matcher over an alternation of keywords
fn keyword_pattern(keywords: &str) -> Result<Regex> {
    Regex::new(&format!(r"(?i)\b({})\b", keywords)).map_err(|e| {
        MuveraError::TextProcessing(format!("Failed to compile keyword regex: {}", e))
    })
}
