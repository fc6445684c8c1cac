//! Sentence splitting for passage re-chunking and scoring

use crate::error::{MuveraError, Result};
use regex::Regex;

/// Minimum characters a trimmed sentence must have to survive splitting
const MIN_SENTENCE_CHARS: usize = 10;

/// Splits text into sentence-like units
///
/// A sentence is a maximal run of non-terminator characters followed by one
/// or more terminators (`.`, `!`, `?`), or the trailing remainder of the text
/// when no terminator follows. Results are trimmed and fragments shorter than
/// ten characters are dropped. The splitter never returns an empty list: when
/// nothing survives, the input text is returned as a single sentence so
/// downstream word counting stays well-defined.
pub struct SentenceSplitter {
    boundary: Regex,
}

impl SentenceSplitter {
    /// Create a splitter with its boundary pattern compiled once
    pub fn new() -> Result<Self> {
        let boundary = Regex::new(r"[^.!?]+[.!?]+|[^.!?]+$").map_err(|e| {
            MuveraError::TextProcessing(format!("Failed to compile sentence regex: {}", e))
        })?;

        Ok(Self { boundary })
    }

    /// Split `text` into trimmed sentences
    pub fn split(&self, text: &str) -> Vec<String> {
        let sentences: Vec<String> = self
            .boundary
            .find_iter(text)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
            .collect();

        if sentences.is_empty() {
            vec![text.to_string()]
        } else {
            sentences
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter() -> SentenceSplitter {
        SentenceSplitter::new().unwrap()
    }

    #[test]
    fn test_splits_on_terminators() {
        let sentences = splitter().split(
            "The first sentence is here. The second one follows! Does a third one exist?",
        );
        assert_eq!(
            sentences,
            vec![
                "The first sentence is here.",
                "The second one follows!",
                "Does a third one exist?"
            ]
        );
    }

    #[test]
    fn test_tail_without_terminator_is_kept() {
        let sentences = splitter().split("A complete sentence. and then a trailing fragment");
        assert_eq!(
            sentences,
            vec!["A complete sentence.", "and then a trailing fragment"]
        );
    }

    #[test]
    fn test_short_fragments_are_dropped() {
        let sentences = splitter().split("This sentence is long enough to keep. Tiny. No?");
        assert_eq!(sentences, vec!["This sentence is long enough to keep."]);
    }

    #[test]
    fn test_repeated_terminators_stay_attached() {
        let sentences = splitter().split("Is this really happening?! It certainly seems so...");
        assert_eq!(
            sentences,
            vec!["Is this really happening?!", "It certainly seems so..."]
        );
    }

    #[test]
    fn test_never_returns_empty() {
        // Every fragment is below the length floor, so the original text
        // comes back as a single sentence.
        let sentences = splitter().split("Tiny. No. Hm?");
        assert_eq!(sentences, vec!["Tiny. No. Hm?"]);

        let sentences = splitter().split("");
        assert_eq!(sentences, vec![""]);
    }

    #[test]
    fn test_exactly_ten_chars_survives() {
        // "Ten chars!" is exactly ten characters after trimming.
        let sentences = splitter().split("Ten chars! No.");
        assert_eq!(sentences, vec!["Ten chars!"]);
    }
}
