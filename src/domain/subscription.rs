//! Subscription records and their billing cadence.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{shift_months, Amounted, NamedEntity};
use crate::time::Clock;

/// Billing cadence of a subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    pub fn months(self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Quarterly => 3,
            Frequency::Annual => 12,
        }
    }

    /// Moves a payment date forward by one billing interval.
    pub fn advance(self, from: DateTime<Utc>) -> DateTime<Utc> {
        shift_months(from, self.months() as i32)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Annual => "annual",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    #[serde(with = "super::dates")]
    pub next_payment_date: DateTime<Utc>,
    pub category: String,
    #[serde(with = "super::dates")]
    pub date_added: DateTime<Utc>,
    #[serde(
        default,
        with = "super::dates::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        frequency: Frequency,
        next_payment_date: DateTime<Utc>,
        category: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            amount,
            frequency,
            next_payment_date,
            category: category.into(),
            date_added: clock.now(),
            start_date: None,
        }
    }

    pub fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Cost spread evenly over one month of the billing interval.
    pub fn monthly_cost(&self) -> f64 {
        self.amount / self.frequency.months() as f64
    }

    /// Marks the current payment as consumed and moves to the next due date.
    pub fn advance_payment(&mut self) {
        self.next_payment_date = self.frequency.advance(self.next_payment_date);
    }
}

impl NamedEntity for Subscription {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Subscription {
    fn amount(&self) -> f64 {
        self.amount
    }
}
