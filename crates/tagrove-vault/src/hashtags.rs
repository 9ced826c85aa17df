//! Inline hashtag scanning.
//!
//! Finds `#tag` tokens in document body text while skipping markdown
//! constructs that look like hashtags but are not: headings, fenced and
//! inline code, link anchors, and URL fragments. Unlike a search index,
//! the patcher needs tags exactly as written, so names keep their original
//! case and document order.

use once_cell::sync::Lazy;
use regex::Regex;

static CODE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[a-zA-Z]*\n.*?```").unwrap());
static INLINE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]+`").unwrap());
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>\[\]()]+|www\.[^\s<>\[\]()]+").unwrap());
static HASHTAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(?:^|[^a-zA-Z0-9_/-])#([a-zA-Z][a-zA-Z0-9_/-]*)").unwrap());

/// Extract inline `#tag` names from markdown content.
///
/// Returns bare names (no `#`), deduplicated, in document order, with the
/// original casing preserved.
///
/// # Rules
///
/// 1. A hashtag is `#` followed by a letter, then letters, digits, `-`,
///    `_`, or `/`
/// 2. Markdown headings are excluded (`# Heading`)
/// 3. Fenced code blocks and inline code are excluded
/// 4. Markdown link targets and URL fragments are excluded
pub fn extract_inline_tags(content: &str) -> Vec<String> {
    let without_code_blocks = CODE_BLOCK_RE.replace_all(content, "");
    let without_inline_code = INLINE_CODE_RE.replace_all(&without_code_blocks, "");
    let without_headings = remove_headings(&without_inline_code);
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_headings, "$1");
    let without_urls = URL_RE.replace_all(&without_links, "");

    let mut tags: Vec<String> = Vec::new();
    for cap in HASHTAG_RE.captures_iter(&without_urls) {
        if let Some(tag) = cap.get(1) {
            let tag = tag.as_str();
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
    }
    tags
}

/// Drop markdown heading lines (`#` repeated, then a space or end of line).
fn remove_headings(content: &str) -> String {
    content
        .lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            if !trimmed.starts_with('#') {
                return true;
            }
            let hash_count = trimmed.chars().take_while(|&c| c == '#').count();
            let after_hashes = trimmed.chars().nth(hash_count);
            !(after_hashes.is_none() || after_hashes == Some(' '))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
