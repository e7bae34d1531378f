//! File-based key-value store
//!
//! Persists every key in a single JSON object file in the application data
//! directory, the desktop counterpart of browser-local storage. Each write
//! goes to a temporary sibling file which is synced and renamed over the
//! store file, so a crash leaves either the old or the new content on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use cp_core::ports::KeyValueStorePort;
use tracing::{debug, warn};

pub use cp_core::config::DEFAULT_STORE_FILE;

type Entries = BTreeMap<String, String>;

pub struct FileKeyValueStore {
    store_file_path: PathBuf,
    /// Serializes read-modify-write cycles within the process.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create store with custom file path
    pub fn new(store_file_path: PathBuf) -> Self {
        Self {
            store_file_path,
            write_lock: Mutex::new(()),
        }
    }

    /// Create store with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.store_file_path
    }

    fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.store_file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory {}", parent.display()))?;
        }
        Ok(())
    }

    fn read_content(&self) -> anyhow::Result<Option<String>> {
        if !self.store_file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.store_file_path)
            .with_context(|| format!("Failed to read store file {}", self.store_file_path.display()))?;

        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    fn read_entries(&self) -> anyhow::Result<Entries> {
        match self.read_content()? {
            Some(content) => serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse store file: {}", e)),
            None => Ok(Entries::new()),
        }
    }

    /// Entries to modify; a corrupt file is replaced rather than blocking writes.
    fn read_entries_for_write(&self) -> anyhow::Result<Entries> {
        let Some(content) = self.read_content()? else {
            return Ok(Entries::new());
        };
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                warn!(
                    path = %self.store_file_path.display(),
                    error = %err,
                    "store file is corrupt, starting from an empty store"
                );
                Ok(Entries::new())
            }
        }
    }

    fn write_entries(&self, entries: &Entries) -> anyhow::Result<()> {
        self.ensure_parent_dir()?;

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| anyhow::anyhow!("Failed to serialize store: {}", e))?;

        let tmp_path = self.store_file_path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp_path)
                .map_err(|e| anyhow::anyhow!("Failed to create store file: {}", e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| anyhow::anyhow!("Failed to write store file: {}", e))?;
            file.sync_all()
                .map_err(|e| anyhow::anyhow!("Failed to sync store file: {}", e))?;
        }
        fs::rename(&tmp_path, &self.store_file_path)
            .map_err(|e| anyhow::anyhow!("Failed to replace store file: {}", e))?;
        Ok(())
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("store write lock poisoned"))
    }
}

impl KeyValueStorePort for FileKeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let _guard = self.lock()?;
        let mut entries = self.read_entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;
        debug!(key, bytes = value.len(), "store key written");
        Ok(())
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        let _guard = self.lock()?;
        let mut entries = self.read_entries_for_write()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
            debug!(key, "store key deleted");
        }
        Ok(())
    }
}
