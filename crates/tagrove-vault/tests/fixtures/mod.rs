//! Test fixtures for controller integration tests.
//!
//! In-memory stands-ins for the host services: a file store over a map, a
//! settings store over an option, and a scripted tag editor.

// Not every test target exercises every fixture.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use tagrove_core::{
    Error, FileStore, FileSystemEntry, FolderTagSettings, Result, SettingsStore, TagAssignment,
    TagEditor,
};

/// Install a test subscriber so `RUST_LOG` controls test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parent folder of a vault-relative file path.
fn parent_of(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

/// In-memory [`FileStore`] with per-path failure injection and a write log.
#[derive(Default)]
pub struct MemVault {
    files: Mutex<BTreeMap<String, String>>,
    fail_reads: Mutex<HashSet<String>>,
    write_log: Mutex<Vec<String>>,
}

impl MemVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// Make every read of `path` fail with an internal error.
    pub fn fail_reads_on(&self, path: &str) {
        self.fail_reads.lock().unwrap().insert(path.to_string());
    }

    /// Paths written so far, in order.
    pub fn write_log(&self) -> Vec<String> {
        self.write_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStore for MemVault {
    async fn read(&self, path: &str) -> Result<String> {
        if self.fail_reads.lock().unwrap().contains(path) {
            return Err(Error::Internal(format!("simulated read failure: {}", path)));
        }
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::FileNotFound(path.to_string()))
    }

    async fn write(&self, path: &str, content: &str) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
        self.write_log.lock().unwrap().push(path.to_string());
        Ok(())
    }

    async fn list_files(&self) -> Result<Vec<FileSystemEntry>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .keys()
            .map(|path| FileSystemEntry::File {
                path: path.clone(),
                parent: parent_of(path),
            })
            .collect())
    }
}

/// In-memory [`SettingsStore`] counting saves.
#[derive(Default)]
pub struct MemSettingsStore {
    saved: Mutex<Option<FolderTagSettings>>,
    save_count: Mutex<usize>,
}

impl MemSettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: FolderTagSettings) -> Self {
        Self {
            saved: Mutex::new(Some(settings)),
            save_count: Mutex::new(0),
        }
    }

    pub fn saved(&self) -> Option<FolderTagSettings> {
        self.saved.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }
}

#[async_trait]
impl SettingsStore for MemSettingsStore {
    async fn load(&self) -> Result<Option<FolderTagSettings>> {
        Ok(self.saved.lock().unwrap().clone())
    }

    async fn save(&self, settings: &FolderTagSettings) -> Result<()> {
        *self.saved.lock().unwrap() = Some(settings.clone());
        *self.save_count.lock().unwrap() += 1;
        Ok(())
    }
}

/// [`TagEditor`] that submits a preset result and records what it was shown.
pub struct ScriptedEditor {
    result: Option<Vec<TagAssignment>>,
    shown: Mutex<Option<Vec<TagAssignment>>>,
}

impl ScriptedEditor {
    /// An editor whose user submits `result`.
    pub fn submitting(result: Vec<TagAssignment>) -> Self {
        Self {
            result: Some(result),
            shown: Mutex::new(None),
        }
    }

    /// An editor whose user cancels.
    pub fn cancelling() -> Self {
        Self {
            result: None,
            shown: Mutex::new(None),
        }
    }

    /// The initial assignments the editor was presented with.
    pub fn shown(&self) -> Option<Vec<TagAssignment>> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait]
impl TagEditor for ScriptedEditor {
    async fn collect(&self, initial: Vec<TagAssignment>) -> Result<Option<Vec<TagAssignment>>> {
        *self.shown.lock().unwrap() = Some(initial);
        Ok(self.result.clone())
    }
}
