//! Utility functions for muvera-rs
//!
//! This module provides common text helpers used throughout the project.

use std::collections::HashSet;

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Take the first `max_chars` characters of a string, char-boundary safe
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Ratio of distinct lowercase tokens to total tokens
///
/// Empty text has no tokens and yields 0.0 rather than dividing by zero.
pub fn lexical_diversity(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let distinct: HashSet<&str> = tokens.iter().copied().collect();
    distinct.len() as f64 / tokens.len() as f64
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n b\t\tc  "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
        assert_eq!(truncate_chars("short", 50), "short");
        // Multi-byte characters must not be split mid-boundary
        assert_eq!(truncate_chars("héllo wörld", 6), "héllo ");
    }

    #[test]
    fn test_lexical_diversity() {
        assert_relative_eq!(lexical_diversity("one two three"), 1.0);
        assert_relative_eq!(lexical_diversity("same same same same"), 0.25);
        // Case-insensitive token identity
        assert_relative_eq!(lexical_diversity("Word word"), 0.5);
        assert_relative_eq!(lexical_diversity(""), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_relative_eq!(round2(1.005), 1.0);
        assert_relative_eq!(round2(2.678), 2.68);
        assert_relative_eq!(round2(3.0), 3.0);
    }
}
