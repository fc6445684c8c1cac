//! Error types for muvera-rs
//!
//! This module provides error handling for all muvera operations, including
//! text segmentation, HTML extraction, configuration, and the LLM analysis
//! client.

use thiserror::Error;

/// Main error type for muvera operations
#[derive(Error, Debug)]
pub enum MuveraError {
    /// Text segmentation/scoring errors
    #[error("Text processing error: {0}")]
    TextProcessing(String),

    /// HTML extraction errors
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM analysis errors
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for muvera operations
pub type Result<T> = std::result::Result<T, MuveraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MuveraError::TextProcessing("test error".to_string());
        assert_eq!(error.to_string(), "Text processing error: test error");
    }

    #[test]
    fn test_error_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let muvera_error = MuveraError::from(io_error);

        match muvera_error {
            MuveraError::Io(_) => (),
            _ => panic!("Expected Io error"),
        }
    }
}
