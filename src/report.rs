//! Report assembly and formatting
//!
//! Aggregates a scored passage set into summary statistics and tier
//! partitions, and renders the human-readable analysis report. This is a
//! display layer over the pipeline output: nothing here feeds back into
//! segmentation or scoring.

use serde::{Deserialize, Serialize};

use crate::config::SegmentationConfig;
use crate::text::Passage;
use crate::utils::{round2, truncate_chars};

/// Vector-quality tier thresholds
const QUALITY_EXCELLENT: u8 = 80;
const QUALITY_GOOD: u8 = 60;

/// Retrieval-score tier thresholds
const RETRIEVAL_HIGH: u8 = 70;
const RETRIEVAL_MEDIUM: u8 = 40;

/// Characters of passage text shown in the passage map
const MAP_PREVIEW_CHARS: usize = 60;

/// Aggregate statistics over a passage set
///
/// An empty set produces all-zero statistics; means never divide by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationStats {
    pub total_passages: usize,
    pub avg_word_count: u32,
    pub avg_vector_quality: u32,
    pub avg_retrieval_score: u32,
    pub avg_semantic_weight: f64,
    pub section_count: usize,
}

impl SegmentationStats {
    pub fn from_passages(passages: &[Passage]) -> Self {
        if passages.is_empty() {
            return Self {
                total_passages: 0,
                avg_word_count: 0,
                avg_vector_quality: 0,
                avg_retrieval_score: 0,
                avg_semantic_weight: 0.0,
                section_count: 0,
            };
        }

        let count = passages.len() as f64;
        let mean = |sum: f64| (sum / count).round() as u32;

        let mut sections: Vec<&str> = passages.iter().map(|p| p.section.as_str()).collect();
        sections.sort_unstable();
        sections.dedup();

        Self {
            total_passages: passages.len(),
            avg_word_count: mean(passages.iter().map(|p| p.word_count as f64).sum()),
            avg_vector_quality: mean(passages.iter().map(|p| p.vector_quality as f64).sum()),
            avg_retrieval_score: mean(passages.iter().map(|p| p.retrieval_score as f64).sum()),
            avg_semantic_weight: round2(
                passages.iter().map(|p| p.semantic_weight).sum::<f64>() / count,
            ),
            section_count: sections.len(),
        }
    }
}

/// Passage ids partitioned by vector quality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityTiers {
    /// vector_quality >= 80
    pub excellent: Vec<String>,
    /// 60 <= vector_quality < 80
    pub good: Vec<String>,
    /// vector_quality < 60
    pub needs_work: Vec<String>,
}

impl QualityTiers {
    pub fn partition(passages: &[Passage]) -> Self {
        let ids = |pred: &dyn Fn(&Passage) -> bool| {
            passages
                .iter()
                .filter(|p| pred(p))
                .map(|p| p.id.clone())
                .collect()
        };

        Self {
            excellent: ids(&|p| p.vector_quality >= QUALITY_EXCELLENT),
            good: ids(&|p| {
                p.vector_quality >= QUALITY_GOOD && p.vector_quality < QUALITY_EXCELLENT
            }),
            needs_work: ids(&|p| p.vector_quality < QUALITY_GOOD),
        }
    }
}

/// Passage ids partitioned by retrieval score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalTiers {
    /// retrieval_score >= 70
    pub high: Vec<String>,
    /// 40 <= retrieval_score < 70
    pub medium: Vec<String>,
    /// retrieval_score < 40
    pub low: Vec<String>,
}

impl RetrievalTiers {
    pub fn partition(passages: &[Passage]) -> Self {
        let ids = |pred: &dyn Fn(&Passage) -> bool| {
            passages
                .iter()
                .filter(|p| pred(p))
                .map(|p| p.id.clone())
                .collect()
        };

        Self {
            high: ids(&|p| p.retrieval_score >= RETRIEVAL_HIGH),
            medium: ids(&|p| {
                p.retrieval_score >= RETRIEVAL_MEDIUM && p.retrieval_score < RETRIEVAL_HIGH
            }),
            low: ids(&|p| p.retrieval_score < RETRIEVAL_MEDIUM),
        }
    }
}

/// Complete analysis report over one document run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub source: String,
    pub title: Option<String>,
    pub stats: SegmentationStats,
    pub quality_tiers: QualityTiers,
    pub retrieval_tiers: RetrievalTiers,
    /// Share of passages inside the [min, target] word window, in percent
    pub optimal_length_ratio: u32,
    pub passages: Vec<Passage>,
    /// LLM analysis body, when the analysis step ran
    pub analysis: Option<String>,
}

impl AnalysisReport {
    pub fn new(
        source: impl Into<String>,
        title: Option<String>,
        passages: Vec<Passage>,
        analysis: Option<String>,
        config: &SegmentationConfig,
    ) -> Self {
        let stats = SegmentationStats::from_passages(&passages);
        let quality_tiers = QualityTiers::partition(&passages);
        let retrieval_tiers = RetrievalTiers::partition(&passages);

        let optimal_length_ratio = if passages.is_empty() {
            0
        } else {
            let optimal = passages
                .iter()
                .filter(|p| p.word_count >= config.min_length && p.word_count <= config.target_length)
                .count();
            (optimal as f64 / passages.len() as f64 * 100.0).round() as u32
        };

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            source: source.into(),
            title,
            stats,
            quality_tiers,
            retrieval_tiers,
            optimal_length_ratio,
            passages,
            analysis,
        }
    }

    /// Render the full human-readable report
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("MuVeRA Content Analysis\n");
        out.push_str("=======================\n");
        out.push_str(&format!("Generated: {}\n", self.generated_at));
        out.push_str(&format!("Source: {}\n", self.source));
        if let Some(title) = &self.title {
            out.push_str(&format!("Title: {}\n", title));
        }

        out.push_str("\nExecutive Summary\n-----------------\n");
        out.push_str(&format!(
            "Total passages: {} across {} sections\n",
            self.stats.total_passages, self.stats.section_count
        ));
        out.push_str(&format!(
            "Vector optimization: {} (avg {}/100)\n",
            quality_verdict(self.stats.avg_vector_quality),
            self.stats.avg_vector_quality
        ));
        out.push_str(&format!(
            "Retrieval readiness: {} (avg {}/100)\n",
            retrieval_verdict(self.stats.avg_retrieval_score),
            self.stats.avg_retrieval_score
        ));
        out.push_str(&format!("Recommendation: {}\n", self.recommendation()));

        out.push_str("\nVector Quality Metrics\n----------------------\n");
        out.push_str(&format!("Average word count: {}\n", self.stats.avg_word_count));
        out.push_str(&format!(
            "Average semantic weight: {}\n",
            self.stats.avg_semantic_weight
        ));
        out.push_str(&format!(
            "Optimal length ratio: {}%\n",
            self.optimal_length_ratio
        ));
        out.push_str(&format!(
            "Quality tiers: excellent {} | good {} | needs work {}\n",
            self.quality_tiers.excellent.len(),
            self.quality_tiers.good.len(),
            self.quality_tiers.needs_work.len()
        ));

        out.push_str("\nRetrieval Performance\n---------------------\n");
        out.push_str(&format!(
            "High potential: {}\n",
            self.scored_id_list(&self.retrieval_tiers.high)
        ));
        out.push_str(&format!(
            "Medium potential: {}\n",
            self.scored_id_list(&self.retrieval_tiers.medium)
        ));
        out.push_str(&format!(
            "Low potential: {}\n",
            self.scored_id_list(&self.retrieval_tiers.low)
        ));
        out.push_str(&format!(
            "Primary index candidates: {}\n",
            self.primary_index_candidates()
        ));

        out.push_str("\nPassage Analytics\n-----------------\n");
        for (section, entries) in self.section_analytics() {
            out.push_str(&format!(
                "{} ({} passages): {}\n",
                section,
                entries.len(),
                entries.join(", ")
            ));
        }

        if let Some(analysis) = &self.analysis {
            out.push_str("\nLLM Analysis\n------------\n");
            out.push_str(analysis);
            out.push('\n');
        }

        out.push_str("\nPassage Map\n-----------\n");
        for passage in &self.passages {
            out.push_str(&format!(
                "{}[{}w] V:{} R:{} S:{} \"{}\"\n",
                passage.id,
                passage.word_count,
                passage.vector_quality,
                passage.retrieval_score,
                passage.semantic_weight,
                map_preview(&passage.text)
            ));
        }

        out
    }

    /// Ids that qualify for the primary vector index
    fn primary_index_candidates(&self) -> String {
        let candidates: Vec<&str> = self
            .passages
            .iter()
            .filter(|p| {
                p.vector_quality >= QUALITY_EXCELLENT && p.retrieval_score >= RETRIEVAL_HIGH
            })
            .map(|p| p.id.as_str())
            .collect();

        if candidates.is_empty() {
            "None identified".to_string()
        } else {
            candidates.join(", ")
        }
    }

    fn recommendation(&self) -> &'static str {
        if self.stats.avg_vector_quality >= 70 && self.stats.avg_retrieval_score >= 60 {
            "Deploy to production"
        } else {
            "Implement optimizations first"
        }
    }

    /// "P03(85), P07(72)" style listing for a tier
    fn scored_id_list(&self, ids: &[String]) -> String {
        if ids.is_empty() {
            return "None".to_string();
        }

        ids.iter()
            .map(|id| {
                match self.passages.iter().find(|p| &p.id == id) {
                    Some(p) => format!("{}({})", id, p.retrieval_score),
                    None => id.clone(),
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Per-section compact passage entries, in first-appearance order
    fn section_analytics(&self) -> Vec<(String, Vec<String>)> {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for p in &self.passages {
            let entry = format!(
                "{}[{}w|V{}|R{}|S{}]",
                p.id, p.word_count, p.vector_quality, p.retrieval_score, p.semantic_weight
            );
            match groups.iter_mut().find(|(section, _)| *section == p.section) {
                Some((_, entries)) => entries.push(entry),
                None => groups.push((p.section.clone(), vec![entry])),
            }
        }
        groups
    }
}

fn quality_verdict(avg: u32) -> &'static str {
    if avg >= 75 {
        "Excellent"
    } else if avg >= 60 {
        "Good"
    } else {
        "Needs Work"
    }
}

fn retrieval_verdict(avg: u32) -> &'static str {
    if avg >= 60 { "Ready" } else { "Needs Optimization" }
}

fn map_preview(text: &str) -> String {
    if text.chars().count() > MAP_PREVIEW_CHARS {
        format!("{}...", truncate_chars(text, MAP_PREVIEW_CHARS))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn passage(id: &str, section: &str, words: usize, vq: u8, rs: u8, weight: f64) -> Passage {
        Passage {
            id: id.to_string(),
            text: (0..words).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" "),
            word_count: words,
            section: section.to_string(),
            semantic_weight: weight,
            vector_quality: vq,
            retrieval_score: rs,
        }
    }

    #[test]
    fn test_stats_means() {
        let passages = vec![
            passage("P00", "Intro", 100, 80, 60, 1.0),
            passage("P01", "Intro", 200, 60, 20, 2.0),
            passage("P02", "Body", 150, 70, 40, 1.5),
        ];
        let stats = SegmentationStats::from_passages(&passages);

        assert_eq!(stats.total_passages, 3);
        assert_eq!(stats.avg_word_count, 150);
        assert_eq!(stats.avg_vector_quality, 70);
        assert_eq!(stats.avg_retrieval_score, 40);
        assert_relative_eq!(stats.avg_semantic_weight, 1.5);
        assert_eq!(stats.section_count, 2);
    }

    #[test]
    fn test_stats_empty_set_is_defined() {
        let stats = SegmentationStats::from_passages(&[]);
        assert_eq!(stats.total_passages, 0);
        assert_eq!(stats.avg_word_count, 0);
        assert_eq!(stats.section_count, 0);
        assert_relative_eq!(stats.avg_semantic_weight, 0.0);
    }

    #[test]
    fn test_quality_tier_boundaries() {
        let passages = vec![
            passage("P00", "S", 100, 80, 0, 1.0),
            passage("P01", "S", 100, 79, 0, 1.0),
            passage("P02", "S", 100, 60, 0, 1.0),
            passage("P03", "S", 100, 59, 0, 1.0),
        ];
        let tiers = QualityTiers::partition(&passages);

        assert_eq!(tiers.excellent, vec!["P00"]);
        assert_eq!(tiers.good, vec!["P01", "P02"]);
        assert_eq!(tiers.needs_work, vec!["P03"]);
    }

    #[test]
    fn test_retrieval_tier_boundaries() {
        let passages = vec![
            passage("P00", "S", 100, 0, 70, 1.0),
            passage("P01", "S", 100, 0, 69, 1.0),
            passage("P02", "S", 100, 0, 40, 1.0),
            passage("P03", "S", 100, 0, 39, 1.0),
        ];
        let tiers = RetrievalTiers::partition(&passages);

        assert_eq!(tiers.high, vec!["P00"]);
        assert_eq!(tiers.medium, vec!["P01", "P02"]);
        assert_eq!(tiers.low, vec!["P03"]);
    }

    #[test]
    fn test_report_renders_all_sections() {
        let passages = vec![
            passage("P00", "Intro", 120, 85, 75, 2.5),
            passage("P01", "Body", 90, 55, 30, 1.0),
        ];
        let report = AnalysisReport::new(
            "doc.html",
            Some("A Document".to_string()),
            passages,
            Some("Model analysis text".to_string()),
            &SegmentationConfig::default(),
        );

        let text = report.render_text();
        assert!(text.contains("Source: doc.html"));
        assert!(text.contains("Title: A Document"));
        assert!(text.contains("Total passages: 2 across 2 sections"));
        assert!(text.contains("High potential: P00(75)"));
        assert!(text.contains("Primary index candidates: P00"));
        assert!(text.contains("Intro (1 passages)"));
        assert!(text.contains("Model analysis text"));
        assert!(text.contains("P01[90w] V:55 R:30"));
        // Both passages sit inside [min, target].
        assert!(text.contains("Optimal length ratio: 100%"));
    }

    #[test]
    fn test_report_without_analysis_omits_section() {
        let report = AnalysisReport::new(
            "doc.html",
            None,
            vec![passage("P00", "S", 100, 50, 50, 1.0)],
            None,
            &SegmentationConfig::default(),
        );

        let text = report.render_text();
        assert!(!text.contains("LLM Analysis"));
        assert!(text.contains("Passage Map"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = AnalysisReport::new(
            "doc.html",
            None,
            vec![passage("P00", "S", 100, 50, 50, 1.0)],
            None,
            &SegmentationConfig::default(),
        );

        let json = serde_json::to_string(&report).unwrap();
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.stats, report.stats);
        assert_eq!(parsed.passages, report.passages);
    }
}
