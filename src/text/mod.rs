//! Text segmentation and scoring functionality for muvera-rs
//!
//! This module provides sentence splitting, semantic weighting, the passage
//! segmentation state machine, and passage quality scoring.

pub mod scoring;
pub mod segmenter;
pub mod sentence;
pub mod weight;

// Re-export main types and functions
pub use scoring::QualityScorer;
pub use segmenter::{DEFAULT_SECTION, Passage, PassageBuilder, TextBlock, WeightedBlock};
pub use sentence::SentenceSplitter;
pub use weight::WeightCalculator;
