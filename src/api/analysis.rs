//! LLM content analysis
//!
//! Builds the MuVeRA analysis prompt from a scored passage set and sends it
//! to the Gemini API. The model is an opaque text-in/text-out collaborator:
//! nothing here reads back into segmentation or scoring, and a missing API
//! key simply means the analysis section is skipped.

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::{MuveraError, Result};
use crate::report::SegmentationStats;
use crate::text::Passage;
use crate::utils::truncate_chars;

/// Document-level context lines included in the prompt header
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    /// Document title, when known
    pub title: String,
    /// Source label (URL or file path)
    pub source: String,
}

/// Compact passage view serialized into the prompt
#[derive(Debug, Serialize)]
struct PassageDigest<'a> {
    id: &'a str,
    section: &'a str,
    words: usize,
    vector_quality: u8,
    retrieval_score: u8,
    semantic_weight: f64,
    preview: String,
}

/// Build the full analysis prompt for a scored passage set
pub fn build_analysis_prompt(
    passages: &[Passage],
    context: &AnalysisContext,
    preview_length: usize,
) -> Result<String> {
    let stats = SegmentationStats::from_passages(passages);

    let digests: Vec<PassageDigest> = passages
        .iter()
        .map(|p| PassageDigest {
            id: &p.id,
            section: &p.section,
            words: p.word_count,
            vector_quality: p.vector_quality,
            retrieval_score: p.retrieval_score,
            semantic_weight: p.semantic_weight,
            preview: preview(&p.text, preview_length),
        })
        .collect();

    let mut section_groups: Vec<(String, Vec<String>)> = Vec::new();
    for passage in passages {
        match section_groups.iter_mut().find(|(s, _)| *s == passage.section) {
            Some((_, ids)) => ids.push(passage.id.clone()),
            None => section_groups.push((passage.section.clone(), vec![passage.id.clone()])),
        }
    }
    let section_map: serde_json::Value = section_groups
        .into_iter()
        .map(|(section, ids)| (section, serde_json::json!(ids)))
        .collect::<serde_json::Map<String, serde_json::Value>>()
        .into();

    Ok(format!(
        "You are conducting a MuVeRA (Multi-Vector Retrieval Augmented) analysis inspired by \
Google Research. Focus on optimizing content for fast, accurate vector-based retrieval systems.\n\
\n\
## DOCUMENT ANALYSIS\n\
- Source: {source}\n\
- Title: {title}\n\
- Total Passages: {total}\n\
- Vector Quality Avg: {avg_vq}\n\
- Retrieval Score Avg: {avg_rs}\n\
\n\
## PASSAGE DATA (Vector-Optimized)\n\
{passage_data}\n\
\n\
## SECTION MAPPING\n\
{section_mapping}\n\
\n\
## ANALYSIS REQUIREMENTS\n\
\n\
### 1. VECTOR EMBEDDING OPTIMIZATION\n\
- Identify passages with vector_quality >80 (excellent for embeddings)\n\
- Flag passages with vector_quality <60 (problematic for retrieval)\n\
- Recommend optimal passage lengths and content density\n\
\n\
### 2. MULTI-VECTOR RETRIEVAL STRATEGY\n\
- Top passages for the primary vector index (highest retrieval potential)\n\
- Secondary passages for context augmentation\n\
- Passage clustering opportunities (related content grouping)\n\
\n\
### 3. CONTENT GAPS & OPPORTUNITIES\n\
- Missing query-intent passages (what users actually search for)\n\
- Passages that need question-answer formatting\n\
\n\
### 4. SEMANTIC STRUCTURE OPTIMIZATION\n\
- Merge recommendations (specify exact passages and rationale)\n\
- Split recommendations (identify break points and new focus areas)\n\
\n\
### 5. ACTIONABLE IMPLEMENTATION PLAN\n\
Provide 8 specific actions ranked by impact, each naming the affected \
passage ids, the reason, and the concrete steps.\n\
\n\
Focus on practical, implementable recommendations that directly improve \
multi-vector retrieval performance while maintaining content quality.",
        source = context.source,
        title = context.title,
        total = stats.total_passages,
        avg_vq = stats.avg_vector_quality,
        avg_rs = stats.avg_retrieval_score,
        passage_data = serde_json::to_string_pretty(&digests)?,
        section_mapping = serde_json::to_string_pretty(&section_map)?,
    ))
}

/// Truncated passage preview with a trailing ellipsis when text was cut
fn preview(text: &str, preview_length: usize) -> String {
    if text.chars().count() > preview_length {
        format!("{}...", truncate_chars(text, preview_length))
    } else {
        text.to_string()
    }
}

/// Gemini `generateContent` response shape, reduced to what is read
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
    }
}

/// Client for the Gemini content-analysis endpoint
pub struct GeminiClient {
    http: reqwest::Client,
    config: AnalysisConfig,
}

impl GeminiClient {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Whether a usable API key is configured
    pub fn is_configured(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Send the prompt and return the model's analysis text
    pub async fn analyze(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| MuveraError::Analysis("no API key configured".to_string()))?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            api_key
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_output_tokens,
                "topP": self.config.top_p,
                "topK": self.config.top_k,
            }
        });

        log::info!("Requesting analysis from model {}", self.config.model);
        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MuveraError::Analysis(format!("API error: {}", status)));
        }

        let payload: GenerateContentResponse = response.json().await?;
        payload
            .first_text()
            .ok_or_else(|| MuveraError::Analysis("no content in response".to_string()))
    }
}
