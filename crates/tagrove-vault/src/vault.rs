//! Filesystem vault backend and scan-backed metadata cache.
//!
//! [`DirVault`] serves a vault rooted at a directory, addressing files by
//! vault-relative `/`-separated paths. [`ScanMetadataCache`] derives a file's
//! tag metadata by reading and scanning its content on demand; hosts with a
//! real metadata index supply their own [`MetadataCache`] instead.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use tagrove_core::{
    Error, FileMeta, FileStore, FileSystemEntry, FrontmatterMeta, MetadataCache, Result, TagsField,
};

use crate::frontmatter::{Frontmatter, FrontmatterBlock, Value};
use crate::hashtags::extract_inline_tags;

/// [`FileStore`] over a directory tree on the local filesystem.
pub struct DirVault {
    root: PathBuf,
}

impl DirVault {
    /// Create a vault rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a vault-relative path to a filesystem path.
    ///
    /// Rejects absolute paths and `..` segments; vault paths address files
    /// inside the root only.
    fn full_path(&self, path: &str) -> Result<PathBuf> {
        if path.is_empty() || path.starts_with('/') {
            return Err(Error::InvalidPath(path.to_string()));
        }
        if Path::new(path)
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(Error::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(path))
    }
}

/// Parent folder path of a vault-relative file path.
fn parent_of(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

#[async_trait]
impl FileStore for DirVault {
    async fn read(&self, path: &str) -> Result<String> {
        let full = self.full_path(path)?;
        match fs::read_to_string(&full).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::FileNotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, path: &str, content: &str) -> Result<()> {
        let full = self.full_path(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Atomic write: temp file + rename
        let temp = full.with_extension("tagrove-tmp");
        let mut file = fs::File::create(&temp).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp, &full).await?;

        debug!(file_path = %path, bytes = content.len(), "vault write");
        Ok(())
    }

    async fn list_files(&self) -> Result<Vec<FileSystemEntry>> {
        let mut files = Vec::new();
        let mut pending: Vec<PathBuf> = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                if name.starts_with('.') {
                    continue;
                }
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(entry.path());
                } else if file_type.is_file() {
                    let rel = entry
                        .path()
                        .strip_prefix(&self.root)
                        .map_err(|_| Error::Internal("walk escaped vault root".to_string()))?
                        .to_string_lossy()
                        .replace(std::path::MAIN_SEPARATOR, "/");
                    files.push(FileSystemEntry::File {
                        parent: parent_of(&rel),
                        path: rel,
                    });
                }
            }
        }

        files.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(files)
    }
}

/// [`MetadataCache`] computed from file content on demand.
///
/// Frontmatter tags come from the minimal codec; inline tags from the body
/// text only, so frontmatter lines never show up as inline hashtags.
pub struct ScanMetadataCache<F: FileStore> {
    files: Arc<F>,
}

impl<F: FileStore> ScanMetadataCache<F> {
    pub fn new(files: Arc<F>) -> Self {
        Self { files }
    }

    /// Derive tag metadata from raw content.
    pub fn scan(content: &str) -> FileMeta {
        match FrontmatterBlock::extract(content) {
            Some(block) => {
                let fm = Frontmatter::parse(block.inner_text(content));
                let tags = fm.get("tags").map(|v| match v {
                    Value::Scalar(s) => TagsField::Scalar(s.clone()),
                    Value::List(vs) => TagsField::List(vs.clone()),
                });
                FileMeta {
                    frontmatter: Some(FrontmatterMeta { tags }),
                    inline_tags: extract_inline_tags(&content[block.block_end..]),
                }
            }
            None => FileMeta {
                frontmatter: None,
                inline_tags: extract_inline_tags(content),
            },
        }
    }
}

#[async_trait]
impl<F: FileStore> MetadataCache for ScanMetadataCache<F> {
    async fn file_meta(&self, path: &str) -> Result<FileMeta> {
        let content = self.files.read(path).await?;
        Ok(Self::scan(&content))
    }
}
