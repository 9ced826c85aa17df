//! # tagrove-vault
//!
//! The working layer of tagrove: resolves a folder's effective tag set from
//! direct and ancestor-inherited assignments, and patches file content
//! (frontmatter block or inline hashtags) to match.
//!
//! This crate provides:
//! - Ancestor-walk tag resolution over the settings root
//! - A minimal flat-key frontmatter codec (scalars and `[a, b]` lists)
//! - Idempotent content patching for tag addition and removal
//! - Inline `#tag` scanning that ignores code and headings
//! - Filesystem vault, JSON settings store, and scan-backed metadata cache
//! - The controller orchestrating folder edits and file-creation events
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tagrove_vault::{DirVault, FolderTagManager, JsonSettingsStore, ScanMetadataCache};
//!
//! # async fn run() -> tagrove_core::Result<()> {
//! let files = Arc::new(DirVault::new("/home/me/vault"));
//! let meta = Arc::new(ScanMetadataCache::new(files.clone()));
//! let store = Arc::new(JsonSettingsStore::new("/home/me/vault/.tagrove/folder-tags.json"));
//!
//! let mut manager = FolderTagManager::load(store, files, meta).await?;
//! let tags = manager.folder_tags("projects/alpha");
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod frontmatter;
pub mod hashtags;
pub mod patcher;
pub mod resolver;
pub mod settings_store;
pub mod vault;

pub use controller::FolderTagManager;
pub use frontmatter::{Frontmatter, FrontmatterBlock, Value};
pub use hashtags::extract_inline_tags;
pub use patcher::{add_tags, remove_tags};
pub use resolver::resolve_folder_tags;
pub use settings_store::JsonSettingsStore;
pub use vault::{DirVault, ScanMetadataCache};
