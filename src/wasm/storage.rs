//! LocalStorage: `window.localStorage` as a storage backend

use crate::session::{StorageBackend, StoreError, StoreResult};
use wasm_bindgen::JsValue;

fn unavailable(op: &str, e: JsValue) -> StoreError {
    // QuotaExceededError and SecurityError both land here
    StoreError::unavailable(format!("localStorage.{} failed: {:?}", op, e))
}

/// Origin-scoped browser storage. `!Send`; lives on the UI thread.
#[derive(Clone)]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> StoreResult<Self> {
        let window = web_sys::window().ok_or_else(|| StoreError::unavailable("no window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| unavailable("open", e))?
            .ok_or_else(|| StoreError::unavailable("localStorage disabled"))?;
        Ok(Self { storage })
    }
}

impl StorageBackend for LocalStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage.get_item(key).map_err(|e| unavailable("getItem", e))
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.storage.set_item(key, value).map_err(|e| unavailable("setItem", e))
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.storage.remove_item(key).map_err(|e| unavailable("removeItem", e))
    }

    fn clear(&self) -> StoreResult<()> {
        self.storage.clear().map_err(|e| unavailable("clear", e))
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let len = self.storage.length().map_err(|e| unavailable("length", e))?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(key) = self.storage.key(i).map_err(|e| unavailable("key", e))? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
