//! HTTP routes for route resolution and session storage inspection

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::keys::storage;
use crate::router::{Resolution, RouteConfig, RouteTable};
use crate::session::{Session, SessionSnapshot, SessionStore, StorageBackend, StoreError};

/// Backend shared across handler tasks
pub type SharedBackend = Box<dyn StorageBackend + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore<SharedBackend>>,
    pub routes: Arc<RouteTable>,
    pub app_name: String,
}

impl AppState {
    pub fn new(backend: SharedBackend, routes: RouteTable, app_name: impl Into<String>) -> Self {
        Self {
            store: Arc::new(SessionStore::new(backend)),
            routes: Arc::new(routes),
            app_name: app_name.into(),
        }
    }
}

#[derive(Deserialize)]
pub struct ResolveQuery { #[serde(default = "default_path")] path: String }
fn default_path() -> String { "/".into() }

#[derive(Deserialize, Default)]
pub struct ClearQuery { #[serde(default)] all: bool }

#[derive(Serialize)]
pub struct ClearResponse { cleared: &'static str }

#[derive(Serialize)]
pub struct KeysResponse { keys: Vec<String>, foreign: Vec<String> }

type ApiError = (StatusCode, String);

fn store_error(e: StoreError) -> ApiError {
    let status = match &e {
        StoreError::MalformedPersistedData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, e.to_string())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/routes", get(list_routes))
        .route("/resolve", get(resolve))
        .route("/storage", get(read_storage).delete(clear_storage))
        .route("/storage/keys", get(list_keys))
        .route("/storage/session", put(put_session))
        .route("/storage/accounts", put(put_accounts))
        .route("/storage/isConnected", put(put_connection_status))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(s): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok", "service": s.app_name}))
}

async fn list_routes(State(s): State<AppState>) -> Json<RouteConfig> {
    Json(s.routes.to_config())
}

async fn resolve(State(s): State<AppState>, Query(q): Query<ResolveQuery>) -> Json<Resolution> {
    Json(s.routes.resolve(&q.path))
}

async fn read_storage(State(s): State<AppState>) -> Result<Json<SessionSnapshot>, ApiError> {
    s.store.snapshot().map(Json).map_err(store_error)
}

async fn list_keys(State(s): State<AppState>) -> Result<Json<KeysResponse>, ApiError> {
    let keys = s.store.stored_keys().map_err(store_error)?;
    let foreign = keys.iter().filter(|k| !storage::is_owned(k)).cloned().collect();
    Ok(Json(KeysResponse { keys, foreign }))
}

async fn put_session(State(s): State<AppState>, Json(data): Json<Value>) -> Result<StatusCode, ApiError> {
    s.store.update_session(&Session::new(data)).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn put_accounts(State(s): State<AppState>, Json(accounts): Json<Vec<String>>) -> Result<StatusCode, ApiError> {
    s.store.update_accounts(&accounts).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn put_connection_status(State(s): State<AppState>, Json(status): Json<bool>) -> Result<StatusCode, ApiError> {
    s.store.update_connection_status(status).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_storage(State(s): State<AppState>, Query(q): Query<ClearQuery>) -> Result<Json<ClearResponse>, ApiError> {
    if q.all {
        s.store.clear_storage().map_err(store_error)?;
        Ok(Json(ClearResponse { cleared: "all" }))
    } else {
        s.store.clear_owned_fields().map_err(store_error)?;
        Ok(Json(ClearResponse { cleared: "owned" }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStorage;
    use serde_json::json;

    fn state() -> (AppState, MemoryStorage) {
        let storage = MemoryStorage::new();
        let routes = RouteTable::builtin().unwrap();
        (AppState::new(Box::new(storage.clone()), routes, "test"), storage)
    }

    #[tokio::test]
    async fn resolve_endpoint_follows_fallback() {
        let (s, _) = state();
        let Json(r) = resolve(State(s), Query(ResolveQuery { path: "/unknown/path".into() })).await;
        assert_eq!(r.view, "AzguardSDK");
        assert_eq!(r.redirected_from.as_deref(), Some("NotFound"));
    }

    #[tokio::test]
    async fn routes_endpoint_lists_config() {
        let (s, _) = state();
        let Json(config) = list_routes(State(s)).await;
        assert_eq!(config.version, 1);
        assert_eq!(config.routes.len(), 4);
    }

    #[tokio::test]
    async fn write_then_read_storage() {
        let (s, _) = state();
        put_session(State(s.clone()), Json(json!({"topic": "t"}))).await.unwrap();
        put_accounts(State(s.clone()), Json(vec!["0xabc".into()])).await.unwrap();
        put_connection_status(State(s.clone()), Json(true)).await.unwrap();

        let Json(snapshot) = read_storage(State(s)).await.unwrap();
        assert_eq!(snapshot.session, Some(Session::new(json!({"topic": "t"}))));
        assert_eq!(snapshot.accounts, Some(vec!["0xabc".to_string()]));
        assert!(snapshot.is_connected());
    }

    #[tokio::test]
    async fn malformed_storage_maps_to_422() {
        let (s, storage) = state();
        storage.set_item("accounts", "not json").unwrap();
        let (status, _) = read_storage(State(s)).await.unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn keys_endpoint_flags_foreign_entries() {
        let (s, storage) = state();
        storage.set_item("theme", "\"dark\"").unwrap();
        put_accounts(State(s.clone()), Json(vec!["0xabc".into()])).await.unwrap();

        let Json(resp) = list_keys(State(s)).await.unwrap();
        assert_eq!(resp.keys, vec!["accounts", "theme"]);
        assert_eq!(resp.foreign, vec!["theme"]);
    }

    #[tokio::test]
    async fn clear_scopes() {
        let (s, storage) = state();
        storage.set_item("theme", "\"dark\"").unwrap();
        put_connection_status(State(s.clone()), Json(true)).await.unwrap();

        let Json(resp) = clear_storage(State(s.clone()), Query(ClearQuery::default())).await.unwrap();
        assert_eq!(resp.cleared, "owned");
        assert_eq!(storage.keys().unwrap(), vec!["theme"]);

        let Json(resp) = clear_storage(State(s), Query(ClearQuery { all: true })).await.unwrap();
        assert_eq!(resp.cleared, "all");
        assert!(storage.is_empty());
    }
}
