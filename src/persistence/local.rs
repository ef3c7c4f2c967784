//! Browser LocalStorage backend

use super::Storage;

pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// `window.localStorage`, if the browser exposes one
    pub fn open() -> Option<Self> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        Some(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        if self.inner.set_item(key, value).is_err() {
            log::warn!("LocalStorage rejected write to {}", key);
        }
    }
}
