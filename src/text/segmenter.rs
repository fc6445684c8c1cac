//! Passage segmentation state machine
//!
//! This module turns an ordered sequence of weighted text blocks into
//! length-bounded passages. A rolling buffer accumulates words until a
//! boundary condition fires: a heading arrives, the buffer would overflow
//! the maximum length, or the target length is reached at the end of a
//! section. Blocks that alone exceed the maximum are re-chunked along
//! sentence boundaries, with a word-level overlap carried between the
//! resulting passages to preserve context.

use serde::{Deserialize, Serialize};

use crate::config::SegmentationConfig;
use crate::error::Result;
use crate::text::sentence::SentenceSplitter;
use crate::utils::truncate_chars;

/// Section label used before the first heading is seen
pub const DEFAULT_SECTION: &str = "Main Content";

/// Characters of heading text carried as the section label
const SECTION_LABEL_CHARS: usize = 50;

/// A single content block handed over by the extraction layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Whitespace-normalized block text
    pub text: String,
    /// Whether the block is a heading (h1-h6)
    pub is_heading: bool,
    /// Lowercase source element name
    pub tag: String,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, is_heading: bool, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_heading,
            tag: tag.into(),
        }
    }
}

/// A text block annotated with its semantic weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedBlock {
    pub block: TextBlock,
    pub semantic_weight: f64,
}

/// A finalized, length-bounded span of words ready for embedding and retrieval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Zero-padded sequential identifier in emission order ("P00", "P01", ...)
    pub id: String,
    /// Constituent words joined with single spaces
    pub text: String,
    /// Number of words in `text`
    pub word_count: usize,
    /// Label of the most recently seen heading, truncated to 50 characters
    pub section: String,
    /// Maximum semantic weight among contributing blocks
    pub semantic_weight: f64,
    /// Heuristic 0-100 score for embedding fitness
    pub vector_quality: u8,
    /// Heuristic 0-100 score for retrieval potential
    pub retrieval_score: u8,
}

/// Segmentation state machine
///
/// State carried across the scan: the word buffer, the current section
/// label, the running weight (maximum over contributing blocks), and the
/// next passage ordinal. The builder is single-use: [`segment`](Self::segment)
/// consumes it and returns the emitted passages in order.
///
/// Emitted passages carry zeroed quality scores;
/// [`QualityScorer`](crate::text::QualityScorer) assigns them afterwards.
pub struct PassageBuilder {
    config: SegmentationConfig,
    splitter: SentenceSplitter,
    buffer: Vec<String>,
    current_section: String,
    running_weight: f64,
    next_id: usize,
    passages: Vec<Passage>,
}

impl PassageBuilder {
    pub fn new(config: SegmentationConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            splitter: SentenceSplitter::new()?,
            buffer: Vec::new(),
            current_section: DEFAULT_SECTION.to_string(),
            running_weight: 0.0,
            next_id: 0,
            passages: Vec::new(),
        })
    }

    /// Scan the ordered block sequence and return the finalized passages
    pub fn segment(mut self, blocks: &[WeightedBlock]) -> Vec<Passage> {
        for (index, weighted) in blocks.iter().enumerate() {
            if weighted.block.is_heading {
                self.start_section(&weighted.block.text);
                continue;
            }

            let word_total = weighted.block.text.split_whitespace().count();
            if word_total > self.config.max_length {
                self.rechunk_oversized(&weighted.block.text, weighted.semantic_weight);
            } else {
                let next_is_heading = blocks
                    .get(index + 1)
                    .is_some_and(|next| next.block.is_heading);
                let at_boundary = next_is_heading || index + 1 == blocks.len();
                self.push_block(&weighted.block.text, weighted.semantic_weight, at_boundary);
            }
        }

        // Remaining content flush; an undersized trailing buffer is dropped.
        if self.buffer.len() >= self.config.min_length {
            self.flush_current();
        }

        self.passages
    }

    /// Heading transition: a buffer that reached the minimum is emitted, a
    /// shorter one is discarded, and the section label moves to the heading.
    fn start_section(&mut self, heading: &str) {
        if self.buffer.len() >= self.config.min_length {
            self.flush_current();
        } else {
            self.buffer.clear();
            self.running_weight = 0.0;
        }
        self.current_section = truncate_chars(heading, SECTION_LABEL_CHARS);
    }

    /// Normal-flow block: split with overlap on overflow, otherwise
    /// accumulate, completing eagerly at a section boundary once the target
    /// length is reached.
    fn push_block(&mut self, text: &str, weight: f64, at_boundary: bool) {
        let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();

        if self.buffer.len() + words.len() > self.config.max_length
            && self.buffer.len() >= self.config.min_length
        {
            let buffer = std::mem::take(&mut self.buffer);
            let running_weight = self.running_weight;
            self.buffer = self.emit_and_carry(buffer, running_weight, words);
            self.running_weight = weight;
        } else {
            self.buffer.extend(words);
            self.running_weight = self.running_weight.max(weight);

            // Eager completion fires only against an upcoming section break,
            // never mid-section.
            if self.buffer.len() >= self.config.target_length && at_boundary {
                self.flush_current();
            }
        }
    }

    /// Sentence-level re-chunking for a block that alone exceeds the maximum
    /// passage length
    ///
    /// The surrounding buffer is flushed first when it qualifies. Sentences
    /// then fill a temporary buffer that spills into passages of its own; an
    /// undersized tail is not dropped but becomes the seed buffer for the
    /// blocks that follow.
    fn rechunk_oversized(&mut self, text: &str, weight: f64) {
        if self.buffer.len() >= self.config.min_length {
            self.flush_current();
        }

        let mut temp: Vec<String> = Vec::new();
        let mut temp_weight = 0.0_f64;

        for sentence in self.splitter.split(text) {
            let words: Vec<String> = sentence.split_whitespace().map(str::to_string).collect();

            if temp.len() + words.len() > self.config.max_length
                && temp.len() >= self.config.min_length
            {
                temp = self.emit_and_carry(temp, temp_weight, words);
                temp_weight = weight;
            } else {
                temp.extend(words);
                temp_weight = temp_weight.max(weight);
            }
        }

        if temp.len() >= self.config.min_length {
            self.push_passage(temp, temp_weight);
        } else {
            self.buffer = temp;
            self.running_weight = temp_weight;
        }
    }

    /// Emit `buffer` as a passage and return the seed for its successor: the
    /// last `overlap` words of the emitted text followed by `seed`.
    ///
    /// Both the normal overflow split and the oversized re-chunk run through
    /// here, so overlap behavior cannot drift between the two paths.
    fn emit_and_carry(&mut self, buffer: Vec<String>, weight: f64, seed: Vec<String>) -> Vec<String> {
        let tail_start = buffer.len().saturating_sub(self.config.overlap);
        let mut carried = buffer[tail_start..].to_vec();
        self.push_passage(buffer, weight);
        carried.extend(seed);
        carried
    }

    fn flush_current(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        let weight = std::mem::replace(&mut self.running_weight, 0.0);
        self.push_passage(buffer, weight);
    }

    fn push_passage(&mut self, words: Vec<String>, weight: f64) {
        let word_count = words.len();
        self.passages.push(Passage {
            id: format!("P{:02}", self.next_id),
            text: words.join(" "),
            word_count,
            section: self.current_section.clone(),
            semantic_weight: weight,
            vector_quality: 0,
            retrieval_score: 0,
        });
        self.next_id += 1;
    }
}
