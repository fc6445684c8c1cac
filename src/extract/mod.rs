//! HTML content extraction for muvera-rs
//!
//! Pulls an ordered sequence of content blocks out of an HTML document for
//! the segmentation pipeline. Boilerplate subtrees (navigation, chrome, ad
//! containers) are skipped, nested content elements are deduplicated down to
//! their leaves, and block text is whitespace-normalized before the
//! minimum-length filter is applied.

use scraper::{ElementRef, Html, Selector};

use crate::error::{MuveraError, Result};
use crate::text::TextBlock;
use crate::utils::normalize_whitespace;

/// Blocks at or below this character count carry too little signal to keep
const MIN_BLOCK_CHARS: usize = 30;

/// Elements whose subtrees never contribute content
const EXCLUDED_CONTAINERS: &[&str] = &["script", "style", "noscript", "nav", "header", "footer"];

/// Class tokens marking ad/sidebar chrome
const EXCLUDED_CLASSES: &[&str] = &["ads", "sidebar"];

/// Heading element names, in hierarchy order
const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Extracts content blocks from HTML documents
pub struct HtmlExtractor {
    content_selector: Selector,
    title_selector: Selector,
}

impl HtmlExtractor {
    pub fn new() -> Result<Self> {
        let content_selector = Selector::parse(
            r#"p, li, td, th, blockquote, h1, h2, h3, h4, h5, h6, div[class*="content"], article, section"#,
        )
        .map_err(|e| MuveraError::Extraction(format!("Failed to parse content selector: {}", e)))?;

        let title_selector = Selector::parse("title")
            .map_err(|e| MuveraError::Extraction(format!("Failed to parse title selector: {}", e)))?;

        Ok(Self {
            content_selector,
            title_selector,
        })
    }

    /// Extract content blocks in document order
    ///
    /// Only leaf matches produce blocks: a container (`article`, `section`,
    /// `div`) that holds further content elements is skipped in favor of its
    /// children, so no text is emitted twice.
    pub fn extract_blocks(&self, html: &str) -> Vec<TextBlock> {
        let document = Html::parse_document(html);
        let mut blocks = Vec::new();

        for element in document.select(&self.content_selector) {
            if element.select(&self.content_selector).next().is_some() {
                continue;
            }
            if self.in_excluded_subtree(element) {
                continue;
            }

            let text = normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "));
            if text.chars().count() <= MIN_BLOCK_CHARS {
                continue;
            }

            let tag = element.value().name().to_lowercase();
            let is_heading = HEADING_TAGS.contains(&tag.as_str());
            blocks.push(TextBlock::new(text, is_heading, tag));
        }

        log::debug!("Extracted {} content blocks", blocks.len());
        blocks
    }

    /// Document title, if present and non-empty
    pub fn document_title(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.title_selector)
            .next()
            .map(|el| normalize_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
            .filter(|title| !title.is_empty())
    }

    /// Whether any ancestor is a boilerplate container or ad/sidebar chrome
    fn in_excluded_subtree(&self, element: ElementRef) -> bool {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| {
                let value = ancestor.value();
                if EXCLUDED_CONTAINERS.contains(&value.name()) {
                    return true;
                }
                value.attr("class").is_some_and(|classes| {
                    classes
                        .split_whitespace()
                        .any(|class| EXCLUDED_CLASSES.contains(&class))
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> HtmlExtractor {
        HtmlExtractor::new().unwrap()
    }

    const PAGE: &str = r#"
        <html>
          <head><title>Vector Retrieval Guide</title></head>
          <body>
            <nav><ul><li>A navigation entry that is long enough to match</li></ul></nav>
            <h1>Optimizing Content for Retrieval</h1>
            <p>Passages need enough context to embed well and answer queries.</p>
            <div class="sidebar">
              <p>Related articles and promotions that should never be extracted.</p>
            </div>
            <article>
              <h2>Why Passage Length Matters for Embeddings</h2>
              <p>Embedding quality degrades when passages grow beyond a few hundred words.</p>
              <ul>
                <li>Short passages lose surrounding context entirely.</li>
                <li>Long passages dilute the signal of any single topic.</li>
              </ul>
            </article>
            <p>tiny</p>
          </body>
        </html>
    "#;

    #[test]
    fn test_extracts_blocks_in_document_order() {
        let blocks = extractor().extract_blocks(PAGE);
        let texts: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();

        assert_eq!(
            texts,
            vec![
                "Optimizing Content for Retrieval",
                "Passages need enough context to embed well and answer queries.",
                "Why Passage Length Matters for Embeddings",
                "Embedding quality degrades when passages grow beyond a few hundred words.",
                "Short passages lose surrounding context entirely.",
                "Long passages dilute the signal of any single topic.",
            ]
        );
    }

    #[test]
    fn test_marks_headings() {
        let blocks = extractor().extract_blocks(PAGE);

        assert!(blocks[0].is_heading);
        assert_eq!(blocks[0].tag, "h1");
        assert!(!blocks[1].is_heading);
        assert_eq!(blocks[1].tag, "p");
        assert!(blocks[2].is_heading);
        assert_eq!(blocks[2].tag, "h2");
        assert_eq!(blocks[4].tag, "li");
    }

    #[test]
    fn test_skips_nav_and_sidebar() {
        let blocks = extractor().extract_blocks(PAGE);
        assert!(blocks.iter().all(|b| !b.text.contains("navigation")));
        assert!(blocks.iter().all(|b| !b.text.contains("promotions")));
    }

    #[test]
    fn test_containers_do_not_duplicate_children() {
        // The <article> matches the selector but holds matching children, so
        // only its leaves appear.
        let blocks = extractor().extract_blocks(PAGE);
        assert!(blocks.iter().all(|b| b.tag != "article"));
    }

    #[test]
    fn test_short_blocks_are_dropped() {
        let blocks = extractor().extract_blocks(PAGE);
        assert!(blocks.iter().all(|b| b.text.chars().count() > MIN_BLOCK_CHARS));
    }

    #[test]
    fn test_content_div_matches_class_substring() {
        let html = r#"
            <body>
              <div class="main-content-area">Standalone text living directly inside a content wrapper.</div>
              <div class="widget">Unrelated widget text that is long enough to qualify.</div>
            </body>
        "#;
        let blocks = extractor().extract_blocks(html);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].tag, "div");
        assert!(blocks[0].text.starts_with("Standalone text"));
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let html = "<body><p>Spread   across\n\n   many\t\tlines of raw markup text.</p></body>";
        let blocks = extractor().extract_blocks(html);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Spread across many lines of raw markup text.");
    }

    #[test]
    fn test_document_title() {
        assert_eq!(
            extractor().document_title(PAGE),
            Some("Vector Retrieval Guide".to_string())
        );
        assert_eq!(extractor().document_title("<body><p>No head</p></body>"), None);
    }

    #[test]
    fn test_empty_document_yields_no_blocks() {
        assert!(extractor().extract_blocks("").is_empty());
        assert!(extractor().extract_blocks("<body></body>").is_empty());
    }
}
