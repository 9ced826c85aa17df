//! Folder tag orchestration.
//!
//! [`FolderTagManager`] owns the loaded settings root and coordinates the two
//! flows that mutate files: the interactive folder-tag edit and the
//! file-creation feed. All settings access goes through the manager; nothing
//! else holds the aggregate.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, trace, warn};

use tagrove_core::defaults::{is_taggable, EVENT_BUS_CAPACITY};
use tagrove_core::{
    EventEnvelope, FileStore, FileSystemEntry, FolderTagSettings, MetadataCache, Result,
    SettingsStore, TagAssignment, TagEditor, VaultEvent, VaultEventBus,
};

use crate::patcher;
use crate::resolver::{folder_contains, resolve_folder_tags};

/// Per-file operation guards.
///
/// Each file's read-modify-write cycle runs under its own async mutex, so a
/// bulk folder edit and a creation event touching the same file cannot
/// interleave and lose an update.
#[derive(Default)]
struct FileLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FileLocks {
    async fn acquire(&self, path: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().await;
        map.entry(path.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Controller for folder tags: resolution, persistence, and file patching.
pub struct FolderTagManager<S, F, M>
where
    S: SettingsStore,
    F: FileStore,
    M: MetadataCache,
{
    settings: FolderTagSettings,
    store: Arc<S>,
    files: Arc<F>,
    meta: Arc<M>,
    bus: VaultEventBus,
    locks: FileLocks,
}

impl<S, F, M> FolderTagManager<S, F, M>
where
    S: SettingsStore,
    F: FileStore,
    M: MetadataCache,
{
    /// Load persisted settings (merged over defaults) and build the manager.
    pub async fn load(store: Arc<S>, files: Arc<F>, meta: Arc<M>) -> Result<Self> {
        let settings = store.load().await?.unwrap_or_default();
        info!(
            record_count = settings.folder_tags.len(),
            "folder tag settings loaded"
        );
        Ok(Self {
            settings,
            store,
            files,
            meta,
            bus: VaultEventBus::new(EVENT_BUS_CAPACITY),
            locks: FileLocks::default(),
        })
    }

    /// The currently loaded settings root.
    pub fn settings(&self) -> &FolderTagSettings {
        &self.settings
    }

    /// The vault event bus. Hosts bridge their creation feed onto this bus
    /// and subscribe for `folder.tags_changed` notifications.
    pub fn events(&self) -> &VaultEventBus {
        &self.bus
    }

    /// Effective (direct + inherited) tag set for a folder.
    pub fn folder_tags(&self, folder_path: &str) -> Vec<TagAssignment> {
        resolve_folder_tags(&self.settings, folder_path)
    }

    /// Replace a folder's direct-tag list and persist settings.
    ///
    /// Caller contract: `tags` must already exclude entries marked
    /// `inherited`; only direct, folder-owned tags belong in a persisted
    /// record. This is not checked here.
    pub async fn save_folder_tags(
        &mut self,
        folder_path: &str,
        tags: Vec<TagAssignment>,
    ) -> Result<()> {
        self.settings.set_record(folder_path, tags);
        self.store.save(&self.settings).await?;
        debug!(folder_path, op = "save_folder_tags", "direct tags persisted");
        Ok(())
    }

    /// Delete a folder's record (exact path match) and persist settings.
    ///
    /// Does not cascade: descendant records stay, though their resolved
    /// inherited view changes on the next query.
    pub async fn remove_folder_record(&mut self, folder_path: &str) -> Result<()> {
        self.settings.remove_record(folder_path);
        self.store.save(&self.settings).await?;
        debug!(folder_path, op = "remove_folder_record", "record removed");
        Ok(())
    }

    /// Interactive folder-tag edit flow.
    ///
    /// Resolves the folder's direct and inherited tags, presents their union
    /// to the editor, and on submission diffs the result against the prior
    /// direct set **by tag name** into added/removed sets, persists the new
    /// direct list, then patches the folder's files and every descendant
    /// file: removals first, then additions, so a tag removed and re-added
    /// in one edit never races against itself within a file.
    ///
    /// For a `File` entry the edit targets its parent folder (the command
    /// palette invokes this on the active file).
    pub async fn edit_folder_tags(
        &mut self,
        entry: &FileSystemEntry,
        editor: &dyn TagEditor,
    ) -> Result<()> {
        let folder_path = match entry {
            FileSystemEntry::Folder { path, .. } => path.clone(),
            FileSystemEntry::File { parent, .. } => parent.clone(),
        };

        let resolved = self.folder_tags(&folder_path);
        let Some(submitted) = editor.collect(resolved).await? else {
            debug!(%folder_path, "edit cancelled");
            return Ok(());
        };

        // Inherited entries are owned by ancestors; only direct tags are
        // persisted on this folder.
        let new_direct: Vec<TagAssignment> =
            submitted.into_iter().filter(|t| !t.inherited).collect();

        let prior: Vec<String> = self
            .settings
            .direct_tags(&folder_path)
            .iter()
            .map(|t| t.tag.clone())
            .collect();
        let (added, removed) = diff_by_name(&prior, &new_direct);

        self.settings.set_record(&folder_path, new_direct);
        self.store.save(&self.settings).await?;

        self.bus.emit(VaultEvent::FolderTagsChanged {
            path: folder_path.clone(),
            added: added.clone(),
            removed: removed.clone(),
        });

        if added.is_empty() && removed.is_empty() {
            debug!(%folder_path, "edit changed nothing, skipping file pass");
            return Ok(());
        }

        self.apply_to_folder(&folder_path, &removed, &added).await;
        Ok(())
    }

    /// Patch every taggable file under a folder: removals, then additions.
    ///
    /// A failure on one file is logged and skipped; the batch always runs to
    /// completion.
    async fn apply_to_folder(&self, folder_path: &str, removed: &[String], added: &[String]) {
        let files = match self.files.list_files().await {
            Ok(files) => files,
            Err(e) => {
                warn!(folder_path, error = %e, "could not list vault files");
                return;
            }
        };

        let mut visited = 0usize;
        let mut skipped = 0usize;
        for file in files {
            let FileSystemEntry::File { path, parent } = &file else {
                continue;
            };
            if !folder_contains(folder_path, parent) || !is_taggable(path) {
                continue;
            }
            visited += 1;
            trace!(file_path = %path, "applying folder tag edit");

            if let Err(e) = self.remove_tags_from_file(path, removed).await {
                warn!(file_path = %path, error = %e, "tag removal failed, skipping file");
                skipped += 1;
                continue;
            }
            if let Err(e) = self.add_tags_to_file(path, added).await {
                warn!(file_path = %path, error = %e, "tag addition failed, skipping file");
                skipped += 1;
            }
        }

        info!(
            folder_path,
            file_count = visited,
            skipped_count = skipped,
            tag_count = added.len() + removed.len(),
            op = "edit_folder_tags",
            "folder tag edit applied"
        );
    }

    /// Add tags to one file's content, honoring placement precedence.
    ///
    /// No-op when `tags` is empty or every tag is already present on the
    /// file according to the metadata cache.
    pub async fn add_tags_to_file(&self, path: &str, tags: &[String]) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let lock = self.locks.acquire(path).await;
        let _guard = lock.lock().await;

        let meta = self.meta.file_meta(path).await?;
        let content = self.files.read(path).await?;
        if let Some(patched) = patcher::add_tags(&content, &meta, tags) {
            self.files.write(path, &patched).await?;
        }
        Ok(())
    }

    /// Remove tags from one file's content (frontmatter and inline).
    ///
    /// Writes only when the content actually changed.
    pub async fn remove_tags_from_file(&self, path: &str, tags: &[String]) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let lock = self.locks.acquire(path).await;
        let _guard = lock.lock().await;

        let content = self.files.read(path).await?;
        if let Some(patched) = patcher::remove_tags(&content, tags) {
            self.files.write(path, &patched).await?;
        }
        Ok(())
    }

    /// Apply the parent folder's effective tags to a newly created file.
    ///
    /// Additions only: a brand-new file has no existing tags to remove.
    /// This is a background path, so failures are logged rather than
    /// surfaced.
    pub async fn apply_file_created(&self, path: &str, parent: &str) {
        if !is_taggable(path) {
            return;
        }
        let resolved = self.folder_tags(parent);
        if resolved.is_empty() {
            return;
        }
        let tags: Vec<String> = resolved.into_iter().map(|t| t.tag).collect();
        debug!(file_path = %path, folder_path = %parent, tag_count = tags.len(), op = "apply_file_created", "tagging new file");
        if let Err(e) = self.add_tags_to_file(path, &tags).await {
            warn!(file_path = %path, error = %e, "could not tag new file");
        }
    }

    /// Dispatch one event from the vault bus.
    ///
    /// Hosts drive this from their (serialized) event loop so one event is
    /// processed to completion before the next is dispatched.
    pub async fn handle_event(&self, envelope: &EventEnvelope) {
        if let VaultEvent::FileCreated { path, parent } = &envelope.payload {
            self.apply_file_created(path, parent).await;
        }
    }
}

/// Name-based diff of a folder's direct tags before and after an edit.
///
/// Tag equality throughout the edit flow is by name only; the `inherited`
/// flag never participates in duplicate detection or diffing.
fn diff_by_name(prior: &[String], new_direct: &[TagAssignment]) -> (Vec<String>, Vec<String>) {
    let added = new_direct
        .iter()
        .filter(|t| !prior.iter().any(|p| p == &t.tag))
        .map(|t| t.tag.clone())
        .collect();
    let removed = prior
        .iter()
        .filter(|p| !new_direct.iter().any(|t| &t.tag == *p))
        .cloned()
        .collect();
    (added, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_by_name() {
        let prior = vec!["keep".to_string(), "drop".to_string()];
        let new_direct = vec![
            TagAssignment::direct("keep"),
            TagAssignment::direct("fresh"),
        ];
        let (added, removed) = diff_by_name(&prior, &new_direct);
        assert_eq!(added, vec!["fresh".to_string()]);
        assert_eq!(removed, vec!["drop".to_string()]);
    }

    #[test]
    fn test_diff_by_name_ignores_inherited_flag() {
        // An entry that differs only in the inherited flag is not a change.
        let prior = vec!["same".to_string()];
        let new_direct = vec![TagAssignment::inherited("same")];
        let (added, removed) = diff_by_name(&prior, &new_direct);
        assert!(added.is_empty());
        assert!(removed.is_empty());
    }

    #[test]
    fn test_diff_by_name_empty_sides() {
        let (added, removed) = diff_by_name(&[], &[TagAssignment::direct("a")]);
        assert_eq!(added, vec!["a".to_string()]);
        assert!(removed.is_empty());

        let (added, removed) = diff_by_name(&["a".to_string()], &[]);
        assert!(added.is_empty());
        assert_eq!(removed, vec!["a".to_string()]);
    }
}
