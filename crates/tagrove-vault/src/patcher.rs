//! Content patching: add or remove tags in a file's raw text.
//!
//! Two storage locations exist for a tag: the frontmatter `tags` field and
//! inline `#tag` tokens in the body. Frontmatter presence takes absolute
//! precedence on the add path: when a file has a frontmatter block, every new
//! tag goes into its `tags` field, never inline, even if the body already
//! carries inline hashtags. Removal touches both locations.
//!
//! Both entry points are pure text transforms returning `None` when the file
//! should not be rewritten, so callers never issue spurious writes.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tagrove_core::FileMeta;

use crate::frontmatter::{Frontmatter, FrontmatterBlock};

/// Add tags to file content.
///
/// `meta` is the metadata-cache view of the file and drives the idempotence
/// check: names already present on the file (frontmatter or inline) are
/// subtracted before anything is touched. Returns the new content, or `None`
/// when there is nothing to do.
///
/// When the metadata reports frontmatter but the raw text has no well-formed
/// leading block, the file degrades to inline placement rather than failing.
pub fn add_tags(content: &str, meta: &FileMeta, tags_to_add: &[String]) -> Option<String> {
    if tags_to_add.is_empty() {
        return None;
    }

    let existing = meta.all_tags();
    let mut effective: Vec<String> = Vec::new();
    for tag in tags_to_add {
        if !existing.contains(tag) && !effective.contains(tag) {
            effective.push(tag.clone());
        }
    }
    if effective.is_empty() {
        tracing::debug!(tag_count = tags_to_add.len(), "add_tags: all tags already present");
        return None;
    }

    if meta.has_frontmatter() {
        if let Some(block) = FrontmatterBlock::extract(content) {
            let mut fm = Frontmatter::parse(block.inner_text(content));
            let mut tags = fm.tags();
            for tag in &effective {
                if !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }
            fm.set_tags(tags);
            return Some(block.splice(content, &fm.serialize()));
        }
        // Metadata claims frontmatter but the text disagrees; fall through to
        // inline placement.
        tracing::debug!("add_tags: frontmatter reported but block not found, appending inline");
    }

    let line = effective
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    Some(format!("{}\n\n{}", content.trim_end(), line))
}

/// Remove tags from file content.
///
/// Filters the frontmatter `tags` field (deleting the key when the filtered
/// list is empty) and strips inline `#tag` occurrences with word-boundary
/// matching, collapsing surrounding whitespace to a single unit. Returns the
/// new content, or `None` when the text is unchanged.
pub fn remove_tags(content: &str, tags_to_remove: &[String]) -> Option<String> {
    if tags_to_remove.is_empty() {
        return None;
    }

    let mut current = content.to_string();

    if let Some(block) = FrontmatterBlock::extract(&current) {
        let mut fm = Frontmatter::parse(block.inner_text(&current));
        if fm.get("tags").is_some() {
            let kept: Vec<String> = fm
                .tags()
                .into_iter()
                .filter(|t| !tags_to_remove.contains(t))
                .collect();
            if kept.len() != fm.tags().len() {
                fm.set_tags(kept);
                current = block.splice(&current, &fm.serialize());
            }
        }
    }

    for tag in tags_to_remove {
        current = remove_inline_occurrences(&current, tag);
    }

    if current == content {
        None
    } else {
        Some(current)
    }
}

/// Remove every inline `#tag` occurrence of one tag name.
///
/// Word-boundary matching keeps `#tag` from eating into `#tagged`. One unit
/// of surrounding whitespace goes with each occurrence; when whitespace
/// exists on both sides a single unit survives, so removal never leaves a
/// doubled space.
fn remove_inline_occurrences(content: &str, tag: &str) -> String {
    static BOUNDARY: &str = "a-zA-Z0-9_/-";
    let pattern = format!(
        "(?m)(?P<pre>^|[^{b}])#{tag}(?P<post>$|[^{b}])",
        b = BOUNDARY,
        tag = regex::escape(tag)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return content.to_string();
    };

    let mut current = content.to_string();
    // Adjacent occurrences share boundary characters, so one pass can miss
    // the next occurrence; iterate until stable.
    loop {
        let replaced = re
            .replace_all(&current, |caps: &Captures| {
                let pre = caps.name("pre").map(|m| m.as_str()).unwrap_or("");
                let post = caps.name("post").map(|m| m.as_str()).unwrap_or("");
                let pre_ws = pre.chars().all(char::is_whitespace) && !pre.is_empty();
                let post_ws = post.chars().all(char::is_whitespace) && !post.is_empty();
                match (pre_ws, post_ws) {
                    // Whitespace on both sides: a single unit survives, the
                    // preceding one so newlines are not collapsed into spaces.
                    (true, true) => pre.to_string(),
                    // Leading whitespace goes with the tag.
                    (true, false) => post.to_string(),
                    // Tag at line start: the one trailing space goes too.
                    (false, true) if pre.is_empty() => String::new(),
                    (false, true) => format!("{}{}", pre, post),
                    (false, false) => format!("{}{}", pre, post),
                }
            })
            .into_owned();
        if replaced == current {
            break;
        }
        current = replaced;
    }
    current
}
