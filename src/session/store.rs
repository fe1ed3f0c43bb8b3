//! SessionStore: typed accessors over a storage backend

use super::backend::StorageBackend;
use super::{Session, SessionSnapshot, StoreError, StoreResult};
use crate::core::keys::storage;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Reads and writes the three wallet-session fields.
///
/// Each field is serialized as JSON under its own key and written
/// independently; a failure halfway through [`record_connection`] leaves the
/// earlier fields written.
///
/// [`record_connection`]: SessionStore::record_connection
#[derive(Debug, Clone)]
pub struct SessionStore<B> {
    backend: B,
}

impl<B: StorageBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }


    fn read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.backend.get_item(key)? else {
            return Ok(None);
        };
        // `Option<T>` maps a stored literal `null` to None
        serde_json::from_str::<Option<T>>(&raw).map_err(|source| {
            tracing::warn!(key, error = %source, "malformed persisted value");
            StoreError::MalformedPersistedData { key: key.to_string(), source }
        })
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| {
            StoreError::MalformedPersistedData { key: key.to_string(), source }
        })?;
        self.backend.set_item(key, &raw)?;
        tracing::debug!(key, bytes = raw.len(), "persisted");
        Ok(())
    }

    // =========================================================================
    // READS
    // =========================================================================

    pub fn get_session(&self) -> StoreResult<Option<Session>> {
        self.read(storage::SESSION)
    }

    pub fn get_accounts(&self) -> StoreResult<Option<Vec<String>>> {
        self.read(storage::ACCOUNTS)
    }

    pub fn get_connection_status(&self) -> StoreResult<Option<bool>> {
        self.read(storage::IS_CONNECTED)
    }

    /// Read all three fields. Fails on the first field that fails.
    pub fn snapshot(&self) -> StoreResult<SessionSnapshot> {
        Ok(SessionSnapshot {
            session: self.get_session()?,
            accounts: self.get_accounts()?,
            is_connected: self.get_connection_status()?,
        })
    }

    /// Read all three fields, treating any failure as "no active session".
    pub fn snapshot_or_disconnected(&self) -> SessionSnapshot {
        self.snapshot().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "session read failed; rendering as disconnected");
            SessionSnapshot::default()
        })
    }

    /// Every key in the backend's scope, including keys this store does not own.
    pub fn stored_keys(&self) -> StoreResult<Vec<String>> {
        self.backend.keys()
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    pub fn update_session(&self, session: &Session) -> StoreResult<()> {
        self.write(storage::SESSION, session)
    }

    pub fn update_accounts(&self, accounts: &[String]) -> StoreResult<()> {
        self.write(storage::ACCOUNTS, accounts)
    }

    pub fn update_connection_status(&self, status: bool) -> StoreResult<()> {
        self.write(storage::IS_CONNECTED, &status)
    }

    /// Persist a freshly established connection: session, accounts, then the
    /// connected flag. Not atomic.
    pub fn record_connection(&self, session: &Session, accounts: &[String]) -> StoreResult<()> {
        self.update_session(session)?;
        self.update_accounts(accounts)?;
        self.update_connection_status(true)?;
        tracing::info!(accounts = accounts.len(), "wallet connected");
        Ok(())
    }

    /// Forget the current connection. Same as [`clear_owned_fields`].
    ///
    /// [`clear_owned_fields`]: SessionStore::clear_owned_fields
    pub fn record_disconnection(&self) -> StoreResult<()> {
        self.clear_owned_fields()?;
        tracing::info!("wallet disconnected");
        Ok(())
    }

    // =========================================================================
    // CLEARING
    // =========================================================================

    /// Remove `session`, `accounts` and `isConnected`. Other keys are untouched.
    pub fn clear_owned_fields(&self) -> StoreResult<()> {
        for key in storage::ALL {
            self.backend.remove_item(key)?;
        }
        Ok(())
    }

    /// Erase **every** entry in the backend's scope.
    ///
    /// This is destructive and indiscriminate: data written by anything else
    /// sharing the same storage scope (the whole browser origin for
    /// localStorage) is removed too. Prefer [`clear_owned_fields`].
    ///
    /// [`clear_owned_fields`]: SessionStore::clear_owned_fields
    pub fn clear_storage(&self) -> StoreResult<()> {
        self.backend.clear()?;
        tracing::warn!("cleared entire storage scope");
        Ok(())
    }
}
