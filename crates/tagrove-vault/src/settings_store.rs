//! JSON file-backed settings persistence.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use tagrove_core::{Error, FolderTagSettings, Result, SettingsStore};

/// [`SettingsStore`] persisting the settings root as a single JSON document.
///
/// Writes are atomic (temp file + rename) so a crash mid-save never leaves a
/// truncated settings file behind.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn load(&self) -> Result<Option<FolderTagSettings>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "settings file absent, using defaults");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let settings: FolderTagSettings = serde_json::from_str(&raw)
            .map_err(|e| Error::Settings(format!("{}: {}", self.path.display(), e)))?;
        Ok(Some(settings))
    }

    async fn save(&self, settings: &FolderTagSettings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Atomic write: temp file + rename
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), bytes = json.len(), "settings saved");
        Ok(())
    }
}
