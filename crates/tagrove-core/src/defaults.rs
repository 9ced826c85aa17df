//! Centralized default constants for tagrove.
//!
//! Single source of truth for shared default values; crates reference these
//! constants instead of defining their own magic numbers.

/// File name of the persisted folder-tag settings document.
pub const SETTINGS_FILE: &str = "folder-tags.json";

/// Command id hosts register for the interactive edit flow, invoked on the
/// active file's parent folder.
pub const CMD_ADD_TAGS_TO_FOLDER: &str = "add-tags-to-folder";

/// Broadcast buffer capacity for the vault event bus.
pub const EVENT_BUS_CAPACITY: usize = 256;

/// File extensions the patcher treats as taggable documents.
pub const TAGGABLE_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Returns whether a vault path points at a taggable document.
pub fn is_taggable(path: &str) -> bool {
    path.rsplit('.')
        .next()
        .map(|ext| TAGGABLE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
