//! # muvera-rs
//!
//! Semantic passage segmentation and scoring for multi-vector retrieval,
//! following the MuVeRA line of work from Google Research: documents are
//! split into length-bounded, context-overlapping passages, and each passage
//! is scored for embedding fitness and retrieval potential before it ever
//! reaches a vector index.
//!
//! ## Quick Start
//!
//! ```rust
//! use muvera_rs::PassageAnalyzer;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = PassageAnalyzer::new(None)?;
//!
//!     let html = r#"
//!         <h1>Vector Retrieval</h1>
//!         <p>Multi-vector retrieval splits documents into passages so that
//!         each embedding captures one coherent idea. Splitting well means
//!         respecting sentence boundaries, carrying overlap across passage
//!         breaks, and keeping every passage inside the length window the
//!         embedding model handles best. Passages that run too short lose
//!         their context, while passages that run too long dilute the one
//!         idea a vector is supposed to hold.</p>
//!     "#;
//!
//!     for passage in analyzer.analyze_html(html)? {
//!         println!(
//!             "{} [{} words] vector={} retrieval={}",
//!             passage.id, passage.word_count, passage.vector_quality, passage.retrieval_score
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod report;
pub mod text;
pub mod utils;

// Re-export main API types
pub use api::{AnalysisContext, GeminiClient, PassageAnalyzer, build_analysis_prompt};
pub use config::{AnalysisConfig, Config, SegmentationConfig};
pub use error::{MuveraError, Result};

// Re-export commonly used types
pub use extract::HtmlExtractor;
pub use report::{AnalysisReport, QualityTiers, RetrievalTiers, SegmentationStats};
pub use text::{Passage, TextBlock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_imports() {
        // Ensure all major types can be imported
        let _config = Config::default();
    }
}
