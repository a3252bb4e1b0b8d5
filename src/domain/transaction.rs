//! Cash-flow transactions as supplied by the persistence layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Amounted, NamedEntity};

const RECURRING_MARKER: &str = "recurring";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    #[serde(with = "super::dates")]
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
}

impl Transaction {
    pub fn new(
        date: DateTime<Utc>,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            kind,
            category: category.into(),
            description: None,
            amount,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Expenses whose description carries the "recurring" marker, in any case.
    pub fn is_recurring_expense(&self) -> bool {
        self.is_expense()
            && self
                .description
                .as_deref()
                .map(|text| text.to_lowercase().contains(RECURRING_MARKER))
                .unwrap_or(false)
    }
}

impl NamedEntity for Transaction {
    fn name(&self) -> &str {
        &self.category
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}
