//! WASM module: browser bindings for the session store and navigation table
//!
//! Architecture:
//! ```text
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │   WalletStore (JS API)   │   │   WasmRouter (JS API)    │
//! │ get*/update*/clear*      │   │ resolve, resolveName     │
//! └────────────┬─────────────┘   └────────────┬─────────────┘
//!              │                              │
//! ┌────────────▼─────────────┐   ┌────────────▼─────────────┐
//! │ SessionStore<LocalStorage>│  │ RouteTable (validated)   │
//! └────────────┬─────────────┘   └──────────────────────────┘
//!              │
//! ┌────────────▼─────────────┐
//! │  window.localStorage     │
//! └──────────────────────────┘
//! ```

mod router;
mod session;
mod storage;

pub use router::WasmRouter;
pub use session::WalletStore;
pub use storage::LocalStorage;

use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;

pub(crate) fn js_error(message: impl ToString) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(js_error)
}

/// Serialize JSON-style: `None` becomes `null`, maps become plain objects.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_error)
}
