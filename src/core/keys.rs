//! Key and name constants shared by storage, routing and config.
//!
//! Centralized registry so the browser bindings, the CLI and the HTTP
//! server agree on the persisted layout.

/// Storage keys owned by the session store
pub mod storage {
    pub const SESSION: &str = "session";
    pub const ACCOUNTS: &str = "accounts";
    pub const IS_CONNECTED: &str = "isConnected";

    pub const ALL: &[&str] = &[SESSION, ACCOUNTS, IS_CONNECTED];

    /// True if `key` is one of the three keys this layer owns.
    pub fn is_owned(key: &str) -> bool {
        ALL.contains(&key)
    }
}

/// Route names of the canonical navigation table
pub mod routes {
    pub const APP: &str = "App";
    pub const AZGUARD_SDK: &str = "Azguard SDK";
    pub const WALLET_CONNECT: &str = "Wallet Connect";
    pub const NOT_FOUND: &str = "NotFound";
}

/// View identifiers rendered by the canonical table
pub mod views {
    pub const AZGUARD_SDK: &str = "AzguardSDK";
    pub const WALLET_CONNECT: &str = "WalletConnect";
}

/// Environment variables read by native config and logging
pub mod env {
    pub const APP: &str = "AZGUARD_DEMO_APP";
    pub const DATA_DIR: &str = "AZGUARD_DEMO_DATA_DIR";
    pub const ROUTES: &str = "AZGUARD_DEMO_ROUTES";
    pub const PORT: &str = "AZGUARD_DEMO_PORT";
    pub const LOG_JSON: &str = "AZGUARD_DEMO_LOG_JSON";
}
