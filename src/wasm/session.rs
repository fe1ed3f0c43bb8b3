//! WalletStore: JS-facing session store backed by localStorage

use super::storage::LocalStorage;
use super::{from_js, js_error, log, to_js};
use crate::session::{Session, SessionStore};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WalletStore {
    inner: SessionStore<LocalStorage>,
}

#[wasm_bindgen]
impl WalletStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WalletStore, JsValue> {
        let storage = LocalStorage::open().map_err(js_error)?;
        Ok(Self { inner: SessionStore::new(storage) })
    }

    /// Stored session, or `null`
    #[wasm_bindgen(js_name = "getSession")]
    pub fn get_session(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.get_session().map_err(js_error)?)
    }

    /// Stored account list, or `null`
    #[wasm_bindgen(js_name = "getAccounts")]
    pub fn get_accounts(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.get_accounts().map_err(js_error)?)
    }

    /// Stored connection flag, or `null`
    #[wasm_bindgen(js_name = "getConnectionStatus")]
    pub fn get_connection_status(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.get_connection_status().map_err(js_error)?)
    }

    /// `{session, accounts, isConnected}`; read failures yield the empty snapshot.
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.snapshot_or_disconnected())
    }

    /// Every key in this origin's localStorage
    #[wasm_bindgen(js_name = "storedKeys")]
    pub fn stored_keys(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.stored_keys().map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = "updateSession")]
    pub fn update_session(&self, session: JsValue) -> Result<(), JsValue> {
        let session: Session = from_js(session)?;
        self.inner.update_session(&session).map_err(js_error)
    }

    #[wasm_bindgen(js_name = "updateAccounts")]
    pub fn update_accounts(&self, accounts: JsValue) -> Result<(), JsValue> {
        let accounts: Vec<String> = from_js(accounts)?;
        self.inner.update_accounts(&accounts).map_err(js_error)
    }

    #[wasm_bindgen(js_name = "updateConnectionStatus")]
    pub fn update_connection_status(&self, status: bool) -> Result<(), JsValue> {
        self.inner.update_connection_status(status).map_err(js_error)
    }

    /// Remove `session`, `accounts` and `isConnected` only.
    #[wasm_bindgen(js_name = "clearOwnedFields")]
    pub fn clear_owned_fields(&self) -> Result<(), JsValue> {
        self.inner.clear_owned_fields().map_err(js_error)
    }

    /// Wipe the entire origin's localStorage, not just this store's keys.
    #[wasm_bindgen(js_name = "clearStorage")]
    pub fn clear_storage(&self) -> Result<(), JsValue> {
        log!("[WalletStore] clearing all of localStorage");
        self.inner.clear_storage().map_err(js_error)
    }
}
