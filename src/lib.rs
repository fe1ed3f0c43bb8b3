//! Azguard demo: navigation table and wallet session persistence.
//!
//! # Architecture
//!
//! ```text
//! boot ──▶ RouteTable (validated once) ──resolve(path)──▶ view to mount
//!                                                            │
//!                                      wallet connect/disconnect events
//!                                                            │
//!                                                            ▼
//!                             SessionStore<B: StorageBackend>
//!                               ├── MemoryStorage (tests, ephemeral)
//!                               ├── FileStorage   (native tools)
//!                               └── LocalStorage  (browser, feature `wasm`)
//! ```
//!
//! # Persisted keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `session` | opaque wallet session (JSON) |
//! | `accounts` | `string[]` |
//! | `isConnected` | `bool` |
//!
//! # Features
//!
//! - `native` - CLI, file-backed storage, HTTP inspection server
//! - `wasm` - browser bindings (`WalletStore`, `WasmRouter`) over localStorage
//!
//! # Usage
//!
//! ```ignore
//! use azguard_demo::{MemoryStorage, RouteTable, SessionStore};
//!
//! let routes = RouteTable::builtin()?;
//! assert_eq!(routes.resolve("/unknown/path").view, "AzguardSDK");
//!
//! let store = SessionStore::new(MemoryStorage::new());
//! store.update_accounts(&["0xabc".into()])?;
//! assert_eq!(store.get_accounts()?, Some(vec!["0xabc".to_string()]));
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod core;
pub mod router;
pub mod session;

// =============================================================================
// Native-only modules (CLI, filesystem, tokio)
// =============================================================================
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod server;

// =============================================================================
// WASM-only modules (browser, localStorage, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use router::{Resolution, Route, RouteError, RouteMatch, RouteTable, RouteTarget};
pub use session::{
    MemoryStorage, Session, SessionSnapshot, SessionStore, StorageBackend, StoreError, StoreResult,
};

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use config::AppConfig;
#[cfg(feature = "native")]
pub use server::{create_router, serve, AppState};
#[cfg(feature = "native")]
pub use session::FileStorage;

// =============================================================================
// Re-exports: WASM
// =============================================================================
#[cfg(feature = "wasm")]
pub use wasm::{LocalStorage, WalletStore, WasmRouter};
