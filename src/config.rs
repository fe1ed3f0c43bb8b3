//! App configuration for native tools (CLI and inspection server)

use crate::core::keys::env;
use crate::router::RouteTable;
use crate::session::{FileStorage, SessionStore, StoreResult};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_APP: &str = "azguard-demo";
pub const DEFAULT_PORT: u16 = 8080;
const STORAGE_FILE: &str = "storage.json";

/// Native configuration. The CLI and env vars construct this.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: String,
    /// Directory holding `storage.json`; defaults to the platform data dir
    pub data_dir: Option<PathBuf>,
    /// Route table file; the builtin table is used when unset
    pub routes_file: Option<PathBuf>,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { app: DEFAULT_APP.into(), data_dir: None, routes_file: None, port: DEFAULT_PORT }
    }
}

impl AppConfig {
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into(), ..Default::default() }
    }
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self { self.data_dir = Some(dir.into()); self }
    pub fn with_routes_file(mut self, path: impl Into<PathBuf>) -> Self { self.routes_file = Some(path.into()); self }
    pub fn with_port(mut self, port: u16) -> Self { self.port = port; self }

    /// Read `AZGUARD_DEMO_*` variables on top of the defaults. Empty values
    /// count as unset.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        let mut config = Self::new(var(env::APP).unwrap_or_else(|| DEFAULT_APP.into()));
        if let Some(dir) = var(env::DATA_DIR) {
            config = config.with_data_dir(dir);
        }
        if let Some(routes) = var(env::ROUTES) {
            config = config.with_routes_file(routes);
        }
        match var(env::PORT).map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => config = config.with_port(port),
            Some(Err(e)) => tracing::warn!(error = %e, "ignoring invalid {}", env::PORT),
            None => {}
        }
        config
    }

    /// Location of the file-backed storage scope.
    pub fn storage_path(&self) -> PathBuf {
        let dir = self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(&self.app)
        });
        dir.join(STORAGE_FILE)
    }

    pub fn open_store(&self) -> StoreResult<SessionStore<FileStorage>> {
        Ok(SessionStore::new(FileStorage::open(self.storage_path())?))
    }

    /// Load the configured route file, or the builtin table.
    pub fn load_routes(&self) -> Result<RouteTable> {
        match &self.routes_file {
            Some(path) => load_routes_file(path),
            None => RouteTable::builtin().context("builtin route table is invalid"),
        }
    }
}

pub fn load_routes_file(path: &Path) -> Result<RouteTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route file {}", path.display()))?;
    RouteTable::from_json(&text).with_context(|| format!("invalid route file {}", path.display()))
}
