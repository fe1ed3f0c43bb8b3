//! Session Store: wallet-connection state persisted in key-value storage
//!
//! Three independent fields live under fixed keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | `session` | JSON session descriptor or `null` |
//! | `accounts` | JSON `string[]` or `null` |
//! | `isConnected` | JSON boolean or `null` |
//!
//! The store is a thin accessor over a [`StorageBackend`]: no caching, no
//! cross-field consistency. Callers that want all three cleared together use
//! [`SessionStore::clear_owned_fields`].

mod backend;
#[cfg(feature = "native")]
mod file;
mod store;

pub use backend::{MemoryStorage, StorageBackend};
#[cfg(feature = "native")]
pub use file::FileStorage;
pub use store::SessionStore;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result type for session store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Session store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Stored text is not valid JSON or not the expected shape
    #[error("malformed persisted data under '{key}': {source}")]
    MalformedPersistedData {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// Backend is inaccessible, full or disabled
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl StoreError {
    pub fn unavailable(message: impl ToString) -> Self {
        StoreError::StorageUnavailable(message.to_string())
    }
}

/// Opaque wallet-connection descriptor. The wallet protocol owns its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session(pub Value);

impl Session {
    pub fn new(value: Value) -> Self {
        Self(value)
    }
}

impl From<Value> for Session {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// All three persisted fields, read together when a view mounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub accounts: Option<Vec<String>>,
    #[serde(rename = "isConnected")]
    pub is_connected: Option<bool>,
}

impl SessionSnapshot {
    /// A wallet counts as connected only when the flag is explicitly `true`.
    pub fn is_connected(&self) -> bool {
        self.is_connected.unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.session.is_none() && self.accounts.is_none() && self.is_connected.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_serializes_transparently() {
        let session = Session::new(json!({"topic": "abc", "expiry": 17}));
        let text = serde_json::to_string(&session).unwrap();
        assert_eq!(text, r#"{"expiry":17,"topic":"abc"}"#);
    }

    #[test]
    fn snapshot_uses_persisted_key_names() {
        let snapshot = SessionSnapshot {
            session: None,
            accounts: Some(vec!["0xabc".into()]),
            is_connected: Some(true),
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["isConnected"], true);
        assert_eq!(value["accounts"][0], "0xabc");
        assert!(value["session"].is_null());
    }

    #[test]
    fn empty_snapshot_is_disconnected() {
        let snapshot = SessionSnapshot::default();
        assert!(snapshot.is_empty());
        assert!(!snapshot.is_connected());
    }
}
