//! Session store
//!
//! Holds the API base URL and bearer token. Both are mirrored into a
//! `KeyValueStore` and read back lazily, once, on first access.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StoreError;
use crate::store::{KeyValueStore, MemoryStore};

/// Store key for the API base URL
pub const ENDPOINT_KEY: &str = "aivena-api-endpoint";
/// Store key for the bearer token
pub const TOKEN_KEY: &str = "aivena-api-token";

/// Observable session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Disconnected => write!(f, "disconnected"),
            SessionState::Connected => write!(f, "connected"),
        }
    }
}

#[derive(Default)]
struct Fields {
    endpoint: Option<String>,
    token: Option<String>,
    hydrated: bool,
}

/// Endpoint + token pair shared by every request
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    fields: Mutex<Fields>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            fields: Mutex::new(Fields::default()),
        }
    }

    /// Session without persistence
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Lock the fields, reading the store the first time through
    fn fields(&self) -> MutexGuard<'_, Fields> {
        let mut fields = self.fields.lock().unwrap_or_else(|e| e.into_inner());
        if !fields.hydrated {
            fields.endpoint = self.store.get(ENDPOINT_KEY).filter(|v| !v.is_empty());
            fields.token = self.store.get(TOKEN_KEY).filter(|v| !v.is_empty());
            fields.hydrated = true;
            tracing::debug!(
                endpoint = fields.endpoint.is_some(),
                token = fields.token.is_some(),
                "Session loaded from store"
            );
        }
        fields
    }

    /// Write `value` under `key`, or remove the key when empty
    fn persist(&self, key: &str, value: &str) -> Result<Option<String>, StoreError> {
        if value.is_empty() {
            self.store.remove(key)?;
            Ok(None)
        } else {
            self.store.set(key, value)?;
            Ok(Some(value.to_string()))
        }
    }

    /// Set the API base URL, without trailing slashes
    ///
    /// A URL that is empty once trimmed unsets the endpoint.
    pub fn set_endpoint(&self, url: &str) -> Result<(), StoreError> {
        let mut fields = self.fields();
        fields.endpoint = self.persist(ENDPOINT_KEY, url.trim_end_matches('/'))?;
        Ok(())
    }

    pub fn endpoint(&self) -> Option<String> {
        self.fields().endpoint.clone()
    }

    /// Set the bearer token; an empty token unsets it
    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        let mut fields = self.fields();
        fields.token = self.persist(TOKEN_KEY, token)?;
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.fields().token.clone()
    }

    /// Endpoint and token read under one lock
    pub(crate) fn credentials(&self) -> (Option<String>, Option<String>) {
        let fields = self.fields();
        (fields.endpoint.clone(), fields.token.clone())
    }

    /// Forget both values, in memory and in the store
    ///
    /// Memory is always wiped, even if the store fails.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut fields = self.fields();
        fields.endpoint = None;
        fields.token = None;
        drop(fields);

        self.store.remove(ENDPOINT_KEY)?;
        self.store.remove(TOKEN_KEY)?;
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        let fields = self.fields();
        fields.endpoint.is_some() && fields.token.is_some()
    }

    pub fn state(&self) -> SessionState {
        if self.is_connected() {
            SessionState::Connected
        } else {
            SessionState::Disconnected
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileStore;

    #[test]
    fn set_endpoint_strips_trailing_slashes() {
        let session = Session::in_memory();
        session.set_endpoint("https://x.com///").unwrap();
        assert_eq!(session.endpoint().as_deref(), Some("https://x.com"));

        session.set_endpoint("https://x.com").unwrap();
        assert_eq!(session.endpoint().as_deref(), Some("https://x.com"));
    }

    #[test]
    fn connected_iff_endpoint_and_token() {
        let session = Session::in_memory();
        assert!(!session.is_connected());
        assert_eq!(session.state(), SessionState::Disconnected);

        session.set_endpoint("https://api.example.com").unwrap();
        assert!(!session.is_connected());

        session.set_token("secret").unwrap();
        assert!(session.is_connected());
        assert_eq!(session.state(), SessionState::Connected);

        session.clear().unwrap();
        assert!(!session.is_connected());
        assert_eq!(session.endpoint(), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn token_only_is_not_connected() {
        let session = Session::in_memory();
        session.set_token("secret").unwrap();
        assert!(!session.is_connected());
    }

    #[test]
    fn empty_values_are_absent_before_and_after_restart() {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());
        session.set_endpoint("https://api.example.com").unwrap();
        session.set_token("secret").unwrap();

        session.set_endpoint("///").unwrap();
        session.set_token("").unwrap();
        assert_eq!(session.endpoint(), None);
        assert_eq!(session.token(), None);
        assert!(!session.is_connected());

        assert_eq!(store.get(ENDPOINT_KEY), None);
        assert_eq!(store.get(TOKEN_KEY), None);
        let restarted = Session::new(store);
        assert_eq!(restarted.endpoint(), None);
        assert!(!restarted.is_connected());
    }

    #[test]
    fn values_are_persisted_to_store() {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());
        session.set_endpoint("https://api.example.com/").unwrap();
        session.set_token("secret").unwrap();

        assert_eq!(
            store.get(ENDPOINT_KEY).as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("secret"));
    }

    #[test]
    fn hydrates_from_store_on_first_access() {
        let store = Arc::new(
            MemoryStore::new()
                .with_entry(ENDPOINT_KEY, "https://api.example.com")
                .with_entry(TOKEN_KEY, "secret"),
        );
        let session = Session::new(store);
        assert!(session.is_connected());
        assert_eq!(session.token().as_deref(), Some("secret"));
    }

    #[test]
    fn store_is_read_only_once() {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());
        assert_eq!(session.endpoint(), None);

        // Written behind the session's back after hydration
        store.set(ENDPOINT_KEY, "https://late.example.com").unwrap();
        assert_eq!(session.endpoint(), None);
    }

    #[test]
    fn clear_wipes_store() {
        let store = Arc::new(
            MemoryStore::new()
                .with_entry(ENDPOINT_KEY, "https://api.example.com")
                .with_entry(TOKEN_KEY, "secret"),
        );
        let session = Session::new(store.clone());
        session.clear().unwrap();

        assert_eq!(store.get(ENDPOINT_KEY), None);
        assert_eq!(store.get(TOKEN_KEY), None);
        assert!(!Session::new(store).is_connected());
    }

    #[test]
    fn file_backed_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let first = Session::new(Arc::new(FileStore::new(&path)));
        first.set_endpoint("https://api.example.com/").unwrap();
        first.set_token("secret").unwrap();

        let second = Session::new(Arc::new(FileStore::new(&path)));
        assert!(second.is_connected());
        assert_eq!(
            second.endpoint().as_deref(),
            Some("https://api.example.com")
        );
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Connected.to_string(), "connected");
        assert_eq!(SessionState::Disconnected.to_string(), "disconnected");
    }
}
