//! Core data model for folder tags.
//!
//! The persisted aggregate is [`FolderTagSettings`]: one [`FolderTagRecord`]
//! per folder that has direct tags, keyed by vault-relative path. The
//! `inherited` flag on [`TagAssignment`] is computed at resolution time and
//! never persisted as `true`.

use serde::{Deserialize, Serialize};

/// A single tag attached to a folder, with its provenance in a resolved view.
///
/// `inherited` marks whether, for the folder being queried, this tag arrived
/// from an ancestor folder rather than being declared directly. The persisted
/// form of a folder's direct tags always carries `inherited = false`, so the
/// flag is skipped during serialization when false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAssignment {
    /// Bare tag name, without the `#` marker.
    pub tag: String,
    /// Whether this assignment was contributed by an ancestor folder.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inherited: bool,
}

impl TagAssignment {
    /// A direct (non-inherited) assignment.
    pub fn direct(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            inherited: false,
        }
    }

    /// An assignment contributed by an ancestor folder.
    pub fn inherited(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            inherited: true,
        }
    }
}

/// Direct tags for one folder.
///
/// `path` is vault-relative, `/`-separated, with no trailing slash. The empty
/// string addresses the vault root. At most one record exists per path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTagRecord {
    pub path: String,
    pub tags: Vec<TagAssignment>,
}

/// The settings root: every folder that has direct tags.
///
/// Loaded once at startup (merged over defaults), mutated by every tag-edit
/// operation, persisted after each mutation. Owned exclusively by the
/// controller; all access goes through the methods below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTagSettings {
    #[serde(default)]
    pub folder_tags: Vec<FolderTagRecord>,
}

impl FolderTagSettings {
    /// Look up the direct-tag record for an exact folder path.
    pub fn record(&self, path: &str) -> Option<&FolderTagRecord> {
        self.folder_tags.iter().find(|r| r.path == path)
    }

    /// Direct tags for a folder; empty when no record exists.
    pub fn direct_tags(&self, path: &str) -> &[TagAssignment] {
        self.record(path).map(|r| r.tags.as_slice()).unwrap_or(&[])
    }

    /// Replace the entire direct-tag list for a folder (upsert).
    ///
    /// Duplicate tag names within `tags` are dropped, first occurrence wins,
    /// preserving the record invariant of unique tag names. Callers must
    /// filter out entries marked `inherited` before calling; only direct,
    /// folder-owned tags belong in a persisted record.
    pub fn set_record(&mut self, path: &str, tags: Vec<TagAssignment>) {
        let mut deduped: Vec<TagAssignment> = Vec::with_capacity(tags.len());
        for t in tags {
            if !deduped.iter().any(|d| d.tag == t.tag) {
                deduped.push(t);
            }
        }
        match self.folder_tags.iter_mut().find(|r| r.path == path) {
            Some(record) => record.tags = deduped,
            None => self.folder_tags.push(FolderTagRecord {
                path: path.to_string(),
                tags: deduped,
            }),
        }
    }

    /// Delete the record for an exact path match.
    ///
    /// Does not cascade: descendant folders keep their own records, though
    /// their resolved inherited view changes on the next query.
    ///
    /// Returns whether a record was removed.
    pub fn remove_record(&mut self, path: &str) -> bool {
        let before = self.folder_tags.len();
        self.folder_tags.retain(|r| r.path != path);
        self.folder_tags.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.folder_tags.is_empty()
    }
}

/// A file or folder in the vault, with its path and parent folder path.
///
/// Paths are vault-relative and `/`-separated; the vault root's path is the
/// empty string and it has no parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSystemEntry {
    File { path: String, parent: String },
    Folder { path: String, parent: Option<String> },
}

impl FileSystemEntry {
    pub fn path(&self) -> &str {
        match self {
            FileSystemEntry::File { path, .. } => path,
            FileSystemEntry::Folder { path, .. } => path,
        }
    }

    /// Parent folder path; `None` only for the vault root folder.
    pub fn parent(&self) -> Option<&str> {
        match self {
            FileSystemEntry::File { parent, .. } => Some(parent),
            FileSystemEntry::Folder { parent, .. } => parent.as_deref(),
        }
    }

    /// Final path segment.
    pub fn name(&self) -> &str {
        self.path().rsplit('/').next().unwrap_or("")
    }
}

/// The `tags` frontmatter field as reported by the metadata cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagsField {
    /// `tags: value`
    Scalar(String),
    /// `tags: [a, b]`
    List(Vec<String>),
}

impl TagsField {
    /// Normalize to a list: scalar becomes a singleton.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            TagsField::Scalar(v) => vec![v.clone()],
            TagsField::List(vs) => vs.clone(),
        }
    }
}

/// Frontmatter fields the tag engine cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontmatterMeta {
    /// The `tags` field, if present.
    pub tags: Option<TagsField>,
}

/// A file's tag-relevant metadata, as reported by the metadata cache.
///
/// Authoritative for "what tags does this file currently have", though it may
/// be stale immediately after a write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMeta {
    /// Present when the file starts with a frontmatter block.
    pub frontmatter: Option<FrontmatterMeta>,
    /// Inline `#tag` names found in the body, in document order.
    pub inline_tags: Vec<String>,
}

impl FileMeta {
    /// Canonical deduplicated tag list: frontmatter tags first, then inline.
    ///
    /// This is the existing-tag set used for idempotence checks before adding
    /// tags to a file.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        if let Some(fm) = &self.frontmatter {
            if let Some(field) = &fm.tags {
                for t in field.to_list() {
                    if !tags.contains(&t) {
                        tags.push(t);
                    }
                }
            }
        }
        for t in &self.inline_tags {
            if !tags.contains(t) {
                tags.push(t.clone());
            }
        }
        tags
    }

    pub fn has_frontmatter(&self) -> bool {
        self.frontmatter.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_assignment_constructors() {
        let d = TagAssignment::direct("project");
        assert_eq!(d.tag, "project");
        assert!(!d.inherited);

        let i = TagAssignment::inherited("archive");
        assert_eq!(i.tag, "archive");
        assert!(i.inherited);
    }

    #[test]
    fn test_tag_assignment_serde_skips_false_inherited() {
        let json = serde_json::to_string(&TagAssignment::direct("work")).unwrap();
        assert_eq!(json, r#"{"tag":"work"}"#);

        let parsed: TagAssignment = serde_json::from_str(r#"{"tag":"work"}"#).unwrap();
        assert!(!parsed.inherited);
    }

    #[test]
    fn test_set_record_upserts() {
        let mut settings = FolderTagSettings::default();
        settings.set_record("projects", vec![TagAssignment::direct("work")]);
        assert_eq!(settings.folder_tags.len(), 1);
        assert_eq!(settings.direct_tags("projects").len(), 1);

        settings.set_record(
            "projects",
            vec![TagAssignment::direct("work"), TagAssignment::direct("active")],
        );
        assert_eq!(settings.folder_tags.len(), 1);
        assert_eq!(settings.direct_tags("projects").len(), 2);
    }

    #[test]
    fn test_set_record_dedups_by_name() {
        let mut settings = FolderTagSettings::default();
        settings.set_record(
            "notes",
            vec![
                TagAssignment::direct("a"),
                TagAssignment::direct("b"),
                TagAssignment::direct("a"),
            ],
        );
        let tags: Vec<&str> = settings
            .direct_tags("notes")
            .iter()
            .map(|t| t.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["a", "b"]);
    }

    #[test]
    fn test_remove_record_exact_match_only() {
        let mut settings = FolderTagSettings::default();
        settings.set_record("a", vec![TagAssignment::direct("x")]);
        settings.set_record("a/b", vec![TagAssignment::direct("y")]);

        assert!(settings.remove_record("a"));
        assert!(settings.record("a").is_none());
        // Descendant record untouched
        assert!(settings.record("a/b").is_some());
        // Removing again is a no-op
        assert!(!settings.remove_record("a"));
    }

    #[test]
    fn test_settings_round_trip() {
        let mut settings = FolderTagSettings::default();
        settings.set_record("inbox", vec![TagAssignment::direct("triage")]);

        let json = serde_json::to_string(&settings).unwrap();
        let back: FolderTagSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn test_settings_default_from_empty_json() {
        let settings: FolderTagSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.is_empty());
    }

    #[test]
    fn test_file_system_entry_accessors() {
        let file = FileSystemEntry::File {
            path: "projects/alpha/notes.md".to_string(),
            parent: "projects/alpha".to_string(),
        };
        assert_eq!(file.path(), "projects/alpha/notes.md");
        assert_eq!(file.parent(), Some("projects/alpha"));
        assert_eq!(file.name(), "notes.md");

        let root = FileSystemEntry::Folder {
            path: String::new(),
            parent: None,
        };
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn test_tags_field_to_list() {
        assert_eq!(
            TagsField::Scalar("solo".to_string()).to_list(),
            vec!["solo".to_string()]
        );
        assert_eq!(
            TagsField::List(vec!["a".to_string(), "b".to_string()]).to_list(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_file_meta_all_tags_dedups_across_sources() {
        let meta = FileMeta {
            frontmatter: Some(FrontmatterMeta {
                tags: Some(TagsField::List(vec!["a".to_string(), "b".to_string()])),
            }),
            inline_tags: vec!["b".to_string(), "c".to_string()],
        };
        assert_eq!(
            meta.all_tags(),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_file_meta_empty() {
        let meta = FileMeta::default();
        assert!(meta.all_tags().is_empty());
        assert!(!meta.has_frontmatter());
    }
}
