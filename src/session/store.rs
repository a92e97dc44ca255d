//! Session persistence: identity claims behind a thin key/value port
//!
//! The store is a pure storage contract with no logic of its own. The
//! library ships two implementations: an in-memory map for tests and
//! embedded webview hosts that bridge their own persistence, and an OS
//! keyring store for desktop shells where the session should survive a
//! restart. Keyring entries are namespaced per key to avoid collisions
//! with other applications sharing the credential store.

use std::collections::HashMap;
use std::sync::Mutex;

/// Storage keys used for session identity claims.
pub mod keys {
    /// Bearer token issued by the credential exchange.
    pub const TOKEN: &str = "token";
    /// Numeric role identifier of the signed-in user.
    pub const ROLE_ID: &str = "role_id";
    /// Display name of the signed-in user.
    pub const NAME: &str = "name";
    /// `"true"`/`"false"` admin flag derived from the role.
    pub const ADMIN: &str = "admin";

    /// All session identity keys, in the order they are cleared.
    pub const ALL: [&str; 4] = [TOKEN, ROLE_ID, NAME, ADMIN];
}

/// Thin key/value persistence port for session state.
///
/// The contract is intentionally infallible: implementations that can fail
/// (such as the OS keyring) degrade to no-ops and log the failure, so that
/// callers never have to thread storage errors through the login flow.
pub trait SessionStore: Send + Sync {
    /// Reads a named value, or `None` when absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a named value, overwriting any existing one.
    fn set(&self, key: &str, value: &str);

    /// Removes a named value; a no-op when absent.
    fn remove(&self, key: &str);
}

/// Identity claims held for the duration of a signed-in session.
///
/// Created only after a successful credential exchange and destroyed by
/// the session guard on an expiry signal or by explicit logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token presented on subsequent requests.
    pub token: String,
    /// Numeric role identifier; role `0` is the administrator role.
    pub role_id: i64,
    /// Display name shown in the panel header.
    pub display_name: String,
    /// Whether the signed-in user holds the administrator role.
    pub is_admin: bool,
}

impl Session {
    /// Builds a session from credential-exchange claims.
    ///
    /// The admin flag is derived here, once, from the role identifier.
    pub fn new(token: impl Into<String>, role_id: i64, display_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            role_id,
            display_name: display_name.into(),
            is_admin: role_id == 0,
        }
    }

    /// Writes all identity claims into the store.
    pub fn persist(&self, store: &dyn SessionStore) {
        store.set(keys::TOKEN, &self.token);
        store.set(keys::ROLE_ID, &self.role_id.to_string());
        store.set(keys::NAME, &self.display_name);
        store.set(keys::ADMIN, if self.is_admin { "true" } else { "false" });
    }

    /// Reads a session back from the store.
    ///
    /// Returns `None` when the token or role claim is missing or
    /// unparseable, treating a partially written session as absent.
    pub fn load(store: &dyn SessionStore) -> Option<Self> {
        let token = store.get(keys::TOKEN)?;
        let role_id = store.get(keys::ROLE_ID)?.parse::<i64>().ok()?;
        let display_name = store.get(keys::NAME).unwrap_or_default();
        Some(Self::new(token, role_id, display_name))
    }

    /// Removes every identity claim from the store.
    ///
    /// Safe to call when nothing is stored.
    pub fn clear(store: &dyn SessionStore) {
        for key in keys::ALL {
            store.remove(key);
        }
    }
}

// ---------------------------------------------------------------------------
// MemorySessionStore
// ---------------------------------------------------------------------------

/// In-memory [`SessionStore`] backed by a mutex-guarded map.
///
/// The default store for tests and for webview hosts that persist session
/// state through their own bridge.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("session store poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("session store poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values
            .lock()
            .expect("session store poisoned")
            .remove(key);
    }
}

// ---------------------------------------------------------------------------
// KeyringSessionStore
// ---------------------------------------------------------------------------

/// [`SessionStore`] backed by the OS native credential store.
///
/// Each claim is stored under a service name derived from the key so that
/// entries never collide with other applications. Keyring failures are
/// logged and swallowed: the trait contract is infallible, and a broken
/// credential store must not take the login flow down with it.
pub struct KeyringSessionStore {
    /// Service-name prefix, e.g. `panel-client`.
    prefix: String,
}

impl KeyringSessionStore {
    /// Creates a store namespaced under the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, keyring::Error> {
        let service = format!("{}-{}", self.prefix, key);
        keyring::Entry::new(&service, key)
    }
}

impl SessionStore for KeyringSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let entry = match self.entry(key) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Keyring unavailable while reading '{}': {}", key, e);
                return None;
            }
        };
        match entry.get_password() {
            Ok(value) => Some(value),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                tracing::warn!("Keyring read failed for '{}': {}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        match self.entry(key) {
            Ok(entry) => {
                if let Err(e) = entry.set_password(value) {
                    tracing::warn!("Keyring write failed for '{}': {}", key, e);
                }
            }
            Err(e) => tracing::warn!("Keyring unavailable while writing '{}': {}", key, e),
        }
    }

    fn remove(&self, key: &str) {
        match self.entry(key) {
            Ok(entry) => match entry.delete_password() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => tracing::warn!("Keyring delete failed for '{}': {}", key, e),
            },
            Err(e) => tracing::warn!("Keyring unavailable while removing '{}': {}", key, e),
        }
    }
}
