//! Core traits for tagrove abstractions.
//!
//! These traits define the interfaces the host application must satisfy,
//! enabling pluggable backends and testability. The vault layer ships
//! filesystem- and content-scan-backed implementations; an embedding host
//! with its own index or settings mechanism supplies its own.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FileMeta, FileSystemEntry, FolderTagSettings, TagAssignment};

// =============================================================================
// FILE STORE
// =============================================================================

/// Read/write access to vault files, plus enumeration.
///
/// Paths are vault-relative and `/`-separated. `write` overwrites the whole
/// file content.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Read a file's full text content. Fails if the file was deleted
    /// mid-operation.
    async fn read(&self, path: &str) -> Result<String>;

    /// Overwrite a file's full text content.
    async fn write(&self, path: &str, content: &str) -> Result<()>;

    /// List every file in the vault (files only, no folders).
    async fn list_files(&self) -> Result<Vec<FileSystemEntry>>;
}

// =============================================================================
// METADATA CACHE
// =============================================================================

/// Source of "what tags does this file currently have".
///
/// Authoritative for idempotence checks, though possibly stale immediately
/// after a write.
#[async_trait]
pub trait MetadataCache: Send + Sync {
    /// Tag-relevant metadata for one file.
    async fn file_meta(&self, path: &str) -> Result<FileMeta>;
}

// =============================================================================
// SETTINGS STORE
// =============================================================================

/// Persistence for the folder-tag settings root.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load persisted settings; `Ok(None)` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<FolderTagSettings>>;

    /// Persist the whole settings document.
    async fn save(&self, settings: &FolderTagSettings) -> Result<()>;
}

// =============================================================================
// TAG EDITOR
// =============================================================================

/// Interactive collector for a folder's desired tag set.
///
/// Presented with the folder's resolved assignments (inherited entries are
/// shown but not removable by the host UI), returns the submitted list or
/// `None` on cancel. The submitted list may still contain the inherited
/// entries it was seeded with; the controller strips them before treating the
/// result as the new direct set.
#[async_trait]
pub trait TagEditor: Send + Sync {
    async fn collect(
        &self,
        initial: Vec<TagAssignment>,
    ) -> Result<Option<Vec<TagAssignment>>>;
}
