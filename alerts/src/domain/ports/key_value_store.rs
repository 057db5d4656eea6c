//! Driven port for the local JSON key-value store.
//!
//! Values are opaque JSON strings; services own their encoding so the store
//! can stay a thin file or memory adapter.

use super::define_port_error;

/// Key holding the JSON array of subscriptions.
pub const SUBSCRIPTIONS_KEY: &str = "subscriptions";
/// Key holding the mock sign-in session.
pub const SESSION_KEY: &str = "session";
/// Key holding the JSON array of community reports.
pub const REPORTS_KEY: &str = "reports";

define_port_error! {
    /// Errors raised by key-value store adapters.
    pub enum KeyValueStoreError {
        /// The key is not one the store accepts.
        InvalidKey { key: String } =>
            "invalid store key: {key}",
        /// Reading or writing the backing medium failed.
        Io { key: String, message: String } =>
            "store io failed for {key}: {message}",
    }
}

/// Port for loading and saving JSON documents by key.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Load the document stored under `key`, or `None` when absent.
    fn load(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `json` under `key`, replacing any previous document.
    fn save(&self, key: &str, json: &str) -> Result<(), KeyValueStoreError>;

    /// Delete the document under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}

/// Whether `key` is safe to use as a single file name.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}
