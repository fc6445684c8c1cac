//! muvera-rs CLI application
//!
//! Command-line interface for the muvera-rs library.

use clap::{Parser, Subcommand};
use muvera_rs::api::{AnalysisContext, GeminiClient, PassageAnalyzer, build_analysis_prompt};
use muvera_rs::report::AnalysisReport;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "muvera-rs")]
#[command(about = "Semantic passage segmentation and scoring for multi-vector retrieval")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a document, score its passages, and produce the full report
    Analyze {
        /// Input HTML file
        input: PathBuf,

        /// Gemini API key (falls back to GEMINI_API_KEY; omit to skip the
        /// LLM analysis section)
        #[arg(long)]
        api_key: Option<String>,

        /// Model used for content analysis
        #[arg(long)]
        model: Option<String>,

        /// Source label recorded in the report (defaults to the input path)
        #[arg(long)]
        url: Option<String>,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Segment a document and print the scored passages, no network
    Segment {
        /// Input HTML file
        input: PathBuf,

        /// Emit passages as JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            api_key,
            model,
            url,
            json,
            output,
        } => {
            analyze_command(input, api_key, model, url, json, output).await?;
        }
        Commands::Segment { input, json } => {
            segment_command(input, json)?;
        }
    }

    Ok(())
}

async fn analyze_command(
    input: PathBuf,
    api_key: Option<String>,
    model: Option<String>,
    url: Option<String>,
    json: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Analyzing: {}", input.display());

    let html = std::fs::read_to_string(&input)?;

    let mut config = muvera_rs::Config::default();
    config.analysis.api_key = api_key.or_else(|| std::env::var("GEMINI_API_KEY").ok());
    if let Some(model) = model {
        config.analysis.model = model;
    }

    let analyzer = PassageAnalyzer::new(Some(config.clone()))?;
    let passages = analyzer.analyze_html(&html)?;

    if passages.is_empty() {
        eprintln!("❌ No content passages found in {}", input.display());
        return Ok(());
    }

    println!("📄 Segmented into {} passages", passages.len());

    let title = analyzer.document_title(&html);
    let source = url.unwrap_or_else(|| input.display().to_string());

    // Optional LLM analysis; any failure degrades to a report without it.
    let client = GeminiClient::new(config.analysis.clone());
    let analysis = if client.is_configured() {
        let context = AnalysisContext {
            title: title.clone().unwrap_or_default(),
            source: source.clone(),
        };
        let prompt =
            build_analysis_prompt(&passages, &context, config.segmentation.preview_length)?;

        match client.analyze(&prompt).await {
            Ok(analysis) => {
                println!("🧠 LLM analysis complete");
                Some(analysis)
            }
            Err(e) => {
                log::warn!("LLM analysis failed: {}. Continuing without it.", e);
                None
            }
        }
    } else {
        println!("ℹ️  No API key configured, skipping LLM analysis");
        None
    };

    let report = AnalysisReport::new(source, title, passages, analysis, &config.segmentation);
    let rendered = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        report.render_text()
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            println!("✅ Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn segment_command(input: PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let html = std::fs::read_to_string(&input)?;

    let analyzer = PassageAnalyzer::new(None)?;
    let passages = analyzer.analyze_html(&html)?;

    if passages.is_empty() {
        eprintln!("❌ No content passages found in {}", input.display());
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&passages)?);
    } else {
        println!("📄 {} passages from {}", passages.len(), input.display());
        println!();
        for passage in &passages {
            println!(
                "{} [{} words] V:{} R:{} S:{} | {}",
                passage.id,
                passage.word_count,
                passage.vector_quality,
                passage.retrieval_score,
                passage.semantic_weight,
                passage.section
            );
            println!("   {}", passage.text);
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["muvera-rs", "segment", "page.html"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["muvera-rs", "analyze", "page.html", "--json"]);
        assert!(cli.is_ok());
    }
}
