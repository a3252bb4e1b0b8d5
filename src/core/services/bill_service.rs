use crate::{
    bills::{UpcomingBill, UpcomingBillsAggregator},
    config::Config,
    domain::{Subscription, Transaction},
    storage::{self, KeyValueStore, StoreKey},
    time::Clock,
};

use super::ServiceResult;

pub struct BillService;

impl BillService {
    /// Aggregates the stored subscriptions and transactions into upcoming bills.
    pub fn upcoming<C: Clock>(
        store: &dyn KeyValueStore,
        aggregator: &UpcomingBillsAggregator<C>,
        horizon_days: i64,
    ) -> ServiceResult<Vec<UpcomingBill>> {
        let subscriptions: Vec<Subscription> = storage::load_list(store, StoreKey::Subscriptions)?;
        let transactions: Vec<Transaction> = storage::load_list(store, StoreKey::Transactions)?;
        Ok(aggregator.upcoming(&subscriptions, &transactions, horizon_days))
    }

    /// Same as [`upcoming`](Self::upcoming) over the configured horizon.
    pub fn upcoming_configured<C: Clock>(
        store: &dyn KeyValueStore,
        aggregator: &UpcomingBillsAggregator<C>,
        config: &Config,
    ) -> ServiceResult<Vec<UpcomingBill>> {
        Self::upcoming(store, aggregator, config.bill_horizon_days)
    }
}
