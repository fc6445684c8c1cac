//! PassageAnalyzer - Main segmentation API
//!
//! This provides the high-level interface for turning a document into scored
//! passages: extract blocks, weigh them, run the segmentation state machine,
//! and score every emitted passage.

use crate::config::Config;
use crate::error::Result;
use crate::extract::HtmlExtractor;
use crate::text::{Passage, PassageBuilder, QualityScorer, TextBlock, WeightCalculator, WeightedBlock};

/// Main analyzer for producing scored passages from documents
///
/// The pipeline is a pure, synchronous transformation: independent analyzer
/// instances can run concurrently over different documents, but blocks within
/// one document are always processed in order because section labels and
/// overlap carry-over depend on it.
pub struct PassageAnalyzer {
    config: Config,
    extractor: HtmlExtractor,
    weigher: WeightCalculator,
    scorer: QualityScorer,
}

impl PassageAnalyzer {
    /// Create a new analyzer with optional configuration
    pub fn new(config: Option<Config>) -> Result<Self> {
        let config = config.unwrap_or_default();
        config.validate()?;

        let extractor = HtmlExtractor::new()?;
        let weigher = WeightCalculator::new()?;
        let scorer = QualityScorer::new(config.segmentation.clone())?;

        Ok(Self {
            config,
            extractor,
            weigher,
            scorer,
        })
    }

    /// Extract content blocks from an HTML document and segment them
    pub fn analyze_html(&self, html: &str) -> Result<Vec<Passage>> {
        let blocks = self.extractor.extract_blocks(html);
        self.segment_blocks(blocks)
    }

    /// Title of an HTML document, when one is present
    pub fn document_title(&self, html: &str) -> Option<String> {
        self.extractor.document_title(html)
    }

    /// Segment pre-extracted blocks into scored passages
    ///
    /// An empty block sequence yields an empty passage list.
    pub fn segment_blocks(&self, blocks: Vec<TextBlock>) -> Result<Vec<Passage>> {
        let weighted: Vec<WeightedBlock> = blocks
            .into_iter()
            .map(|block| {
                let semantic_weight = self.weigher.weight(&block.tag, &block.text);
                WeightedBlock {
                    block,
                    semantic_weight,
                }
            })
            .collect();

        let builder = PassageBuilder::new(self.config.segmentation.clone())?;
        let mut passages = builder.segment(&weighted);

        for passage in &mut passages {
            self.scorer.score(passage);
        }

        log::info!(
            "Segmented {} blocks into {} passages",
            weighted.len(),
            passages.len()
        );

        Ok(passages)
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
