//! JSON encoding helpers shared by the local-state services.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::error::DomainError;
use super::ports::{KeyValueStore, KeyValueStoreError};

fn store_error(error: &KeyValueStoreError) -> DomainError {
    DomainError::internal("local store unavailable").with_details(json!({
        "error": error.to_string(),
    }))
}

/// Load and decode the document under `key`.
///
/// Corrupt documents are reported rather than discarded since they mean
/// local data was lost.
pub(crate) fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, DomainError> {
    let Some(raw) = store.load(key).map_err(|error| store_error(&error))? else {
        return Ok(None);
    };
    serde_json::from_str(&raw).map(Some).map_err(|error| {
        DomainError::internal("local data is corrupt").with_details(json!({
            "key": key,
            "error": error.to_string(),
        }))
    })
}

/// Encode `value` and store it under `key`.
pub(crate) fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), DomainError> {
    let raw = serde_json::to_string(value).map_err(|error| {
        DomainError::internal("failed to encode local data").with_details(json!({
            "key": key,
            "error": error.to_string(),
        }))
    })?;
    store.save(key, &raw).map_err(|error| store_error(&error))
}

/// Delete the document under `key`.
pub(crate) fn remove(store: &dyn KeyValueStore, key: &str) -> Result<(), DomainError> {
    store.remove(key).map_err(|error| store_error(&error))
}
