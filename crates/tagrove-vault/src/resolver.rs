//! Effective tag resolution over the folder hierarchy.
//!
//! A folder's effective tag set is its own direct tags plus every strict
//! ancestor's tags re-marked as inherited. Inheritance flows only from
//! ancestor path prefixes to descendants; a folder's tags never affect its
//! siblings or ancestors.

use tagrove_core::{FolderTagSettings, TagAssignment};

/// Compute the effective (direct + inherited) tag set for a folder.
///
/// Pure computation over the settings root:
///
/// 1. Direct tags come from the record for the exact path (empty if absent).
/// 2. Every strict ancestor prefix is walked shortest to longest; each
///    ancestor record's tags are appended re-marked `inherited`, regardless
///    of how they were marked on the ancestor, so inheritance is transitive.
/// 3. Union by tag name: a name declared directly wins and is emitted with
///    `inherited = false`; a name present only via ancestors is emitted once
///    with `inherited = true`.
///
/// Output order is direct tags first, then inherited tags in ancestor order,
/// but callers should not rely on ordering beyond that.
///
/// Path segments are `/`-delimited; no segment validation happens here, that
/// is the caller's concern. The empty string addresses the vault root, which
/// has no ancestors.
pub fn resolve_folder_tags(settings: &FolderTagSettings, folder_path: &str) -> Vec<TagAssignment> {
    let mut resolved: Vec<TagAssignment> = settings
        .direct_tags(folder_path)
        .iter()
        .map(|t| TagAssignment::direct(t.tag.clone()))
        .collect();

    for ancestor in ancestor_paths(folder_path) {
        for t in settings.direct_tags(&ancestor) {
            if !resolved.iter().any(|r| r.tag == t.tag) {
                resolved.push(TagAssignment::inherited(t.tag.clone()));
            }
        }
    }

    resolved
}

/// Strict ancestor prefixes of a folder path, shortest first.
///
/// `"a/b/c"` yields `["", "a", "a/b"]`; the vault root `""` yields nothing.
pub fn ancestor_paths(folder_path: &str) -> Vec<String> {
    if folder_path.is_empty() {
        return Vec::new();
    }
    let mut ancestors = vec![String::new()];
    let mut prefix = String::new();
    let mut segments = folder_path.split('/').peekable();
    while let Some(segment) = segments.next() {
        // The final segment is the folder itself, not an ancestor.
        if segments.peek().is_none() {
            break;
        }
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);
        ancestors.push(prefix.clone());
    }
    ancestors
}

/// Whether a file whose parent folder is `parent` lives inside `folder`
/// (the folder itself or any descendant).
pub fn folder_contains(folder: &str, parent: &str) -> bool {
    if folder.is_empty() {
        return true;
    }
    parent == folder || parent.starts_with(&format!("{}/", folder))
}
