//! API layer for muvera-rs
//!
//! This module provides the main public interfaces for segmenting documents
//! into scored passages and for the optional LLM-backed content analysis.

pub mod analysis;
pub mod analyzer;

// Re-export main API types
pub use analysis::{AnalysisContext, GeminiClient, build_analysis_prompt};
pub use analyzer::PassageAnalyzer;
