//! JSON-file backed storage for the native build

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Storage, StorageError};

/// All keys live in one JSON object, rewritten on every `set_item`
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`. A missing file is an empty
    /// store; an unreadable or malformed one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("Opened {} with {} keys", path.display(), items.len());
        Ok(Self { path, items })
    }

    /// `$HOME/.homerun_dodge.json`, or the working directory without `$HOME`
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".homerun_dodge.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole object back to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            log::warn!("Failed to persist {} to {}: {}", key, self.path.display(), e);
        }
    }
}
