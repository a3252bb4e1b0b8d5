use tracing::info;

use crate::{
    domain::Subscription,
    storage::{self, KeyValueStore, StoreKey},
};

use super::{ServiceError, ServiceResult};

pub struct SubscriptionService;

impl SubscriptionService {
    pub fn list(store: &dyn KeyValueStore) -> ServiceResult<Vec<Subscription>> {
        Ok(storage::load_list(store, StoreKey::Subscriptions)?)
    }

    pub fn add(store: &dyn KeyValueStore, subscription: Subscription) -> ServiceResult<()> {
        let mut subscriptions = Self::list(store)?;
        info!(id = %subscription.id, name = %subscription.name, "subscription added");
        subscriptions.push(subscription);
        storage::save(store, StoreKey::Subscriptions, &subscriptions)?;
        Ok(())
    }

    pub fn remove(store: &dyn KeyValueStore, id: &str) -> ServiceResult<Subscription> {
        let mut subscriptions = Self::list(store)?;
        let position = subscriptions
            .iter()
            .position(|sub| sub.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("subscription {}", id)))?;
        let removed = subscriptions.remove(position);
        storage::save(store, StoreKey::Subscriptions, &subscriptions)?;
        info!(id, "subscription removed");
        Ok(removed)
    }

    /// Marks the current payment of `id` as made and moves its due date forward.
    pub fn record_payment(store: &dyn KeyValueStore, id: &str) -> ServiceResult<Subscription> {
        let mut subscriptions = Self::list(store)?;
        let subscription = subscriptions
            .iter_mut()
            .find(|sub| sub.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("subscription {}", id)))?;
        subscription.advance_payment();
        let updated = subscription.clone();
        storage::save(store, StoreKey::Subscriptions, &subscriptions)?;
        info!(id, next_payment = %updated.next_payment_date, "subscription payment recorded");
        Ok(updated)
    }
}
