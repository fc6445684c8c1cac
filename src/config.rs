//! Configuration for muvera-rs
//!
//! All tunables live here: the word-count bounds driving passage
//! segmentation and the settings for the optional LLM analysis call.

use crate::error::{MuveraError, Result};
use serde::{Deserialize, Serialize};

/// Word-count bounds for passage segmentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Preferred passage length in words
    pub target_length: usize,

    /// Minimum words required before a passage may be emitted
    pub min_length: usize,

    /// Maximum words a passage may hold before it is split
    pub max_length: usize,

    /// Trailing words repeated at the start of the next passage after a split
    pub overlap: usize,

    /// Characters of passage text included in analysis previews
    pub preview_length: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            target_length: 150,
            min_length: 50,
            max_length: 250,
            overlap: 30,
            preview_length: 300,
        }
    }
}

impl SegmentationConfig {
    /// Validate bound ordering. Inverted or zero bounds are contract
    /// violations and are rejected up front rather than producing
    /// nonsensical passages.
    pub fn validate(&self) -> Result<()> {
        if self.target_length == 0 || self.min_length == 0 || self.max_length == 0 {
            return Err(MuveraError::Config(
                "segmentation lengths must be non-zero".to_string(),
            ));
        }
        if self.min_length > self.target_length || self.target_length > self.max_length {
            return Err(MuveraError::Config(format!(
                "length bounds must satisfy min <= target <= max (got {} <= {} <= {})",
                self.min_length, self.target_length, self.max_length
            )));
        }
        if self.overlap >= self.max_length {
            return Err(MuveraError::Config(format!(
                "overlap ({}) must be smaller than max_length ({})",
                self.overlap, self.max_length
            )));
        }
        if self.preview_length == 0 {
            return Err(MuveraError::Config(
                "preview_length must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the Gemini analysis client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// API key; analysis is skipped entirely when this is empty
    pub api_key: Option<String>,

    /// Base URL of the generative language API
    pub base_url: String,

    /// Model name used for content analysis
    pub model: String,

    /// Sampling temperature
    pub temperature: f64,

    /// Maximum tokens the model may produce
    pub max_output_tokens: u32,

    /// Nucleus sampling cutoff
    pub top_p: f64,

    /// Top-k sampling cutoff
    pub top_k: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.1,
            max_output_tokens: 8192,
            top_p: 0.8,
            top_k: 40,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    pub segmentation: SegmentationConfig,
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Validate all sub-configurations
    pub fn validate(&self) -> Result<()> {
        self.segmentation.validate()
    }
}
