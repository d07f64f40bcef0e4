//! Utility functions for text hygiene and file system checks.
//!
//! This module provides the helpers shared by all source adapters:
//! - Whitespace and HTML-entity cleanup for scraped text
//! - Word-boundary summary truncation
//! - The AI-relevance keyword filter used by general-interest sources
//! - HTML tag stripping for feed descriptions that embed markup
//! - File system validation for the output directory

use scraper::Html;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Keywords that mark an item as AI-related. Matched as lowercase
/// substrings against title and summary together.
const AI_KEYWORDS: &[&str] = &[
    "ai",
    "artificial intelligence",
    "machine learning",
    "ml",
    "deep learning",
    "neural network",
    "llm",
    "gpt",
    "transformer",
    "nlp",
    "computer vision",
    "reinforcement learning",
    "generative",
    "diffusion",
    "model",
    "dataset",
    "training",
    "inference",
    "embedding",
    "attention",
    "agent",
    "chatbot",
    "claude",
    "openai",
    "anthropic",
    "hugging face",
    "pytorch",
    "tensorflow",
    "keras",
    "scikit",
    "langchain",
    "prompt",
];

/// Normalize scraped text: collapse runs of whitespace to single spaces,
/// trim the ends, and decode the handful of HTML entities that survive
/// feed and page extraction.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("  Tom &amp; Jerry\n\treturn  "), "Tom & Jerry return");
/// assert_eq!(clean_text("A&nbsp;B"), "A B");
/// ```
pub fn clean_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Run [`clean_text`] over `text`, then truncate to at most `max_chars`
/// characters, cutting back to the last word boundary and appending `"..."`.
/// Text at or under the limit is returned unchanged. Operates on characters,
/// not bytes, so multi-byte input cannot be split mid-codepoint.
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    let text = clean_text(text);
    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    let truncated = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{truncated}...")
}

/// Whether the text mentions any of the AI keywords. Used by adapters for
/// general-interest sources to drop off-topic items.
pub fn is_ai_related(text: &str) -> bool {
    let text = text.to_lowercase();
    AI_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

/// Strip HTML tags from a fragment, keeping only its text content. Feed
/// descriptions routinely embed `<p>` and `<a>` markup.
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect::<String>()
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
