//! Minimal frontmatter codec.
//!
//! Parses the restricted YAML subset needed for a flat `tags` field: each
//! non-empty line splits on the first `:` into a trimmed key and value, and a
//! value of the exact shape `[ ... ]` parses as a comma-split list. Anything
//! richer (nested maps, multiline strings, comments, quoting) is not
//! guaranteed to round-trip; that is an explicit non-goal. Lines that do not
//! look like `key: value` are ignored rather than rejected, so the worst
//! outcome of unexpected structure is an empty parse, never an error.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a leading `---` delimited block and captures the inner YAML text.
static BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|$)").unwrap()
});

/// A frontmatter value: flat scalar or flat list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

/// Parsed frontmatter: ordered `key -> value` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, Value)>,
}

impl Frontmatter {
    /// Parse the inner text of a frontmatter block.
    ///
    /// Tolerant by design: lines without a `:` are dropped, duplicate keys
    /// keep their first position with the later value.
    pub fn parse(block: &str) -> Self {
        let mut fm = Frontmatter::default();
        for line in block.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            fm.set(key, parse_value(value.trim()));
        }
        fm
    }

    /// Serialize back to block text: `key: value` and `key: [v1, v2]` lines.
    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| match value {
                Value::Scalar(v) => format!("{}: {}", key, v),
                Value::List(vs) => format!("{}: [{}]", key, vs.join(", ")),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Set a key, keeping its position if it already exists.
    pub fn set(&mut self, key: &str, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Remove a key. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        self.entries.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `tags` field normalized to a list: absent is empty, a scalar is a
    /// singleton, a list is taken as-is.
    pub fn tags(&self) -> Vec<String> {
        match self.get("tags") {
            None => Vec::new(),
            Some(Value::Scalar(v)) => vec![v.clone()],
            Some(Value::List(vs)) => vs.clone(),
        }
    }

    /// Replace the `tags` field. An empty list deletes the key entirely
    /// rather than serializing `tags: []`.
    pub fn set_tags(&mut self, tags: Vec<String>) {
        if tags.is_empty() {
            self.remove("tags");
        } else {
            self.set("tags", Value::List(tags));
        }
    }
}

fn parse_value(raw: &str) -> Value {
    if let Some(inner) = raw
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        let items = inner
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Value::List(items)
    } else {
        Value::Scalar(raw.to_string())
    }
}

/// The located frontmatter block of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterBlock {
    /// Byte range of the inner YAML text within the document.
    pub inner: Range<usize>,
    /// Byte offset just past the closing delimiter, where the body starts.
    pub block_end: usize,
}

impl FrontmatterBlock {
    /// Locate the leading delimited block, if any.
    ///
    /// Returns `None` for documents without a well-formed leading block,
    /// including the case where a metadata index claims frontmatter exists
    /// but the raw text disagrees; callers degrade to inline placement.
    pub fn extract(content: &str) -> Option<Self> {
        let caps = BLOCK_RE.captures(content)?;
        let inner = caps.get(1)?;
        Some(Self {
            inner: inner.range(),
            block_end: caps.get(0)?.end(),
        })
    }

    /// The inner YAML text of the block.
    pub fn inner_text<'a>(&self, content: &'a str) -> &'a str {
        &content[self.inner.clone()]
    }

    /// Rebuild the document with the inner YAML replaced, leaving everything
    /// outside the block untouched.
    pub fn splice(&self, content: &str, new_inner: &str) -> String {
        let mut out = String::with_capacity(content.len() + new_inner.len());
        out.push_str(&content[..self.inner.start]);
        out.push_str(new_inner);
        out.push_str(&content[self.inner.end..]);
        out
    }
}
