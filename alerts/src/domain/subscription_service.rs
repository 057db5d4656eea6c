//! Managing the locally stored subscription list.

use std::sync::Arc;

use mockable::Clock;
use nz_regions::{RegionCatalog, fold_name};
use serde_json::json;
use tracing::info;

use super::error::DomainError;
use super::hazard::{HazardKind, HazardToggles};
use super::local_state::{load_json, save_json};
use super::ports::{KeyValueStore, SUBSCRIPTIONS_KEY};
use super::subscription::{Subscription, SubscriptionTarget};

/// Create, list, toggle and remove subscriptions.
#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    catalog: RegionCatalog,
}

impl SubscriptionService {
    /// Build the service over `store`.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        catalog: RegionCatalog,
    ) -> Self {
        Self {
            store,
            clock,
            catalog,
        }
    }

    /// Every stored subscription, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the store fails or holds corrupt data.
    pub fn list(&self) -> Result<Vec<Subscription>, DomainError> {
        Ok(load_json(self.store.as_ref(), SUBSCRIPTIONS_KEY)?.unwrap_or_default())
    }

    /// Subscribe to `location` with the given hazard toggles.
    ///
    /// An existing subscription for the same location (compared
    /// case-insensitively) is returned unchanged instead of adding a
    /// duplicate.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error for a blank location, or an internal
    /// error when the store fails.
    pub fn subscribe(
        &self,
        location: &str,
        hazards: HazardToggles,
    ) -> Result<Subscription, DomainError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(DomainError::invalid_request("location must not be blank")
                .with_details(json!({ "field": "location" })));
        }

        let mut subscriptions = self.list()?;
        let key = fold_name(location);
        if let Some(existing) = subscriptions
            .iter()
            .find(|subscription| fold_name(&subscription.location) == key)
        {
            info!(id = %existing.id, location, "subscription already exists");
            return Ok(existing.clone());
        }

        let created_at = self.clock.utc();
        let subscription = Subscription {
            id: next_id(&subscriptions, created_at.timestamp_millis()),
            location: location.to_owned(),
            target: SubscriptionTarget::resolve(&self.catalog, location),
            hazards,
            created_at,
        };
        subscriptions.push(subscription.clone());
        save_json(self.store.as_ref(), SUBSCRIPTIONS_KEY, &subscriptions)?;
        info!(id = %subscription.id, location, target = ?subscription.target, "subscribed");
        Ok(subscription)
    }

    /// Flip one hazard toggle on subscription `id`.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown id, or an internal error when the
    /// store fails.
    pub fn toggle(&self, id: &str, kind: HazardKind) -> Result<Subscription, DomainError> {
        self.modify(id, |subscription| {
            let enabled = subscription.hazards.toggle(kind);
            info!(id, hazard = %kind, enabled, "hazard toggled");
        })
    }

    /// Replace every hazard toggle on subscription `id`.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown id, or an internal error when the
    /// store fails.
    pub fn update_hazards(
        &self,
        id: &str,
        hazards: HazardToggles,
    ) -> Result<Subscription, DomainError> {
        self.modify(id, |subscription| {
            subscription.hazards = hazards;
            info!(id, "hazards updated");
        })
    }

    /// Remove subscription `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown id, or an internal error when the
    /// store fails.
    pub fn unsubscribe(&self, id: &str) -> Result<Subscription, DomainError> {
        let mut subscriptions = self.list()?;
        let position = subscriptions
            .iter()
            .position(|subscription| subscription.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = subscriptions.remove(position);
        save_json(self.store.as_ref(), SUBSCRIPTIONS_KEY, &subscriptions)?;
        info!(id, location = %removed.location, "unsubscribed");
        Ok(removed)
    }

    fn modify(
        &self,
        id: &str,
        change: impl FnOnce(&mut Subscription),
    ) -> Result<Subscription, DomainError> {
        let mut subscriptions = self.list()?;
        let subscription = subscriptions
            .iter_mut()
            .find(|subscription| subscription.id == id)
            .ok_or_else(|| not_found(id))?;
        change(subscription);
        let updated = subscription.clone();
        save_json(self.store.as_ref(), SUBSCRIPTIONS_KEY, &subscriptions)?;
        Ok(updated)
    }
}

fn not_found(id: &str) -> DomainError {
    DomainError::not_found(format!("subscription {id} not found")).with_details(json!({ "id": id }))
}

/// Millisecond timestamp id, bumped forward until unused.
fn next_id(existing: &[Subscription], millis: i64) -> String {
    let mut candidate = millis;
    loop {
        let id = candidate.to_string();
        if existing.iter().all(|subscription| subscription.id != id) {
            return id;
        }
        candidate = candidate.saturating_add(1);
    }
}
