use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    common::saturating_add_days, Amounted, NamedEntity, Subscription, Transaction,
};
use crate::time::{Clock, SystemClock};

pub const DEFAULT_HORIZON_DAYS: i64 = 30;

/// Where an upcoming bill was derived from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BillSource {
    Subscription,
    RecurringExpense,
}

/// A bill due within the requested horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingBill {
    pub id: String,
    pub name: String,
    pub amount: f64,
    #[serde(with = "crate::domain::dates")]
    pub due_date: DateTime<Utc>,
    pub source_kind: BillSource,
}

impl UpcomingBill {
    fn from_entry<T: NamedEntity + Amounted>(
        entry: &T,
        id: &str,
        due_date: DateTime<Utc>,
        source_kind: BillSource,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: entry.name().to_string(),
            amount: entry.amount(),
            due_date,
            source_kind,
        }
    }
}

impl Amounted for UpcomingBill {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Sum of the amounts of the given bills.
pub fn total_due<T: Amounted>(bills: &[T]) -> f64 {
    bills.iter().map(Amounted::amount).sum()
}

/// Merges subscriptions and recurring expenses into a date-ordered bill list.
#[derive(Debug, Clone, Default)]
pub struct UpcomingBillsAggregator<C: Clock = SystemClock> {
    clock: C,
}

impl<C: Clock> UpcomingBillsAggregator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Bills due between the clock's current time and `horizon_days` ahead.
    pub fn upcoming(
        &self,
        subscriptions: &[Subscription],
        transactions: &[Transaction],
        horizon_days: i64,
    ) -> Vec<UpcomingBill> {
        self.upcoming_at(subscriptions, transactions, horizon_days, self.clock.now())
    }

    /// Same as [`upcoming`](Self::upcoming) with an explicit reference time.
    ///
    /// Subscriptions are bounded only by the cutoff, so overdue ones stay
    /// listed. Recurring expenses must also fall on or after `now`.
    pub fn upcoming_at(
        &self,
        subscriptions: &[Subscription],
        transactions: &[Transaction],
        horizon_days: i64,
        now: DateTime<Utc>,
    ) -> Vec<UpcomingBill> {
        if horizon_days < 0 {
            return Vec::new();
        }
        let cutoff = saturating_add_days(now, horizon_days);

        let from_subscriptions = subscriptions
            .iter()
            .filter(|sub| sub.next_payment_date <= cutoff)
            .map(|sub| {
                UpcomingBill::from_entry(
                    sub,
                    &sub.id,
                    sub.next_payment_date,
                    BillSource::Subscription,
                )
            });

        let from_recurring = transactions
            .iter()
            .filter(|txn| txn.is_recurring_expense())
            .filter(|txn| txn.date >= now && txn.date <= cutoff)
            .map(|txn| {
                UpcomingBill::from_entry(txn, &txn.id, txn.date, BillSource::RecurringExpense)
            });

        let mut bills: Vec<UpcomingBill> = from_subscriptions.chain(from_recurring).collect();
        // Stable sort keeps insertion order for equal due dates.
        bills.sort_by_key(|bill| bill.due_date);

        debug!(
            horizon_days,
            bills = bills.len(),
            "aggregated upcoming bills"
        );
        bills
    }
}
