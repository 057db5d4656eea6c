//! Mock sign-in backed by the local store.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::error::DomainError;
use super::local_state::{load_json, remove, save_json};
use super::ports::{KeyValueStore, SESSION_KEY};
use super::session::Session;

/// Sign in, inspect and sign out of the local session.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    /// Build the service over `store`.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record a session for `email`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error unless `email` has a non-empty local
    /// part and domain around a single `@`.
    pub fn sign_in(&self, email: &str) -> Result<Session, DomainError> {
        let email = email.trim();
        if !is_plausible_email(email) {
            return Err(DomainError::invalid_request("email must look like name@domain")
                .with_details(json!({ "field": "email" })));
        }
        let session = Session {
            email: email.to_owned(),
            signed_in_at: self.clock.utc(),
        };
        save_json(self.store.as_ref(), SESSION_KEY, &session)?;
        info!(email, "signed in");
        Ok(session)
    }

    /// The current session, if signed in.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the store fails or holds corrupt data.
    pub fn current(&self) -> Result<Option<Session>, DomainError> {
        load_json(self.store.as_ref(), SESSION_KEY)
    }

    /// Forget the current session. Signing out twice is not an error.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the store fails.
    pub fn sign_out(&self) -> Result<(), DomainError> {
        remove(self.store.as_ref(), SESSION_KEY)?;
        info!("signed out");
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    !email.chars().any(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        })
}
