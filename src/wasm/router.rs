//! WasmRouter: JS-facing navigation table

use super::{js_error, log, to_js};
use crate::router::RouteTable;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmRouter {
    table: RouteTable,
}

#[wasm_bindgen]
impl WasmRouter {
    /// The canonical table shipped with the app
    #[wasm_bindgen]
    pub fn builtin() -> Result<WasmRouter, JsValue> {
        let table = RouteTable::builtin().map_err(js_error)?;
        Ok(Self { table })
    }

    /// Validate a route config (`{version, routes}`) and build a router.
    /// Configuration defects throw here, never during navigation.
    #[wasm_bindgen(js_name = "fromJson")]
    pub fn from_json(text: &str) -> Result<WasmRouter, JsValue> {
        let table = RouteTable::from_json(text).map_err(|e| {
            log!("[WasmRouter] rejected route config: {}", e);
            js_error(e)
        })?;
        Ok(Self { table })
    }

    /// `{route, view, path, params, redirected_from?}` for a requested path
    #[wasm_bindgen]
    pub fn resolve(&self, path: &str) -> Result<JsValue, JsValue> {
        to_js(&self.table.resolve(path))
    }

    /// Same as `resolve`, by route name; `null` for unknown names
    #[wasm_bindgen(js_name = "resolveName")]
    pub fn resolve_name(&self, name: &str) -> Result<JsValue, JsValue> {
        to_js(&self.table.resolve_name(name))
    }

    /// Route definitions in declaration order
    #[wasm_bindgen]
    pub fn routes(&self) -> Result<JsValue, JsValue> {
        to_js(&self.table.to_config().routes)
    }
}
