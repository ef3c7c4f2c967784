//! Key/value persistence
//!
//! The game only ever stores small strings under fixed keys (the best time and
//! the settings blob), so every backend exposes the LocalStorage shape:
//! - `MemoryStorage` for tests and throwaway sessions
//! - `FileStorage` (native) keeps a JSON object on disk
//! - `LocalStorage` (web) wraps `window.localStorage`

use std::collections::BTreeMap;
use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// String key/value store. Writes are best-effort: a failing backend logs and
/// carries on rather than interrupting the game.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

/// Errors opening or flushing a persistent backend
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage i/o error: {e}"),
            Self::Json(e) => write!(f, "storage file is not valid JSON: {e}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// In-memory store that also counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set_item` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.writes += 1;
        self.items.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut store = MemoryStorage::new();
        assert_eq!(store.get_item("highScore"), None);

        store.set_item("highScore", "12.5");
        store.set_item("highScore", "13");
        assert_eq!(store.get_item("highScore").as_deref(), Some("13"));
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::from(std::io::Error::other("disk full"));
        assert!(err.to_string().contains("disk full"));
    }
}
