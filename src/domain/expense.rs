use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{common::Amounted, BudgetCategory};

/// A category whose allocation is pinned to an entered or observed amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpense {
    pub category: String,
    pub amount: f64,
    #[serde(with = "super::dates")]
    pub last_updated: DateTime<Utc>,
}

impl FixedExpense {
    pub fn new(category: impl Into<String>, amount: f64, last_updated: DateTime<Utc>) -> Self {
        Self {
            category: category.into(),
            amount,
            last_updated,
        }
    }

    /// The canonical category, or `None` for names the allocator ignores.
    pub fn canonical_category(&self) -> Option<BudgetCategory> {
        BudgetCategory::from_name(&self.category)
    }
}

impl Amounted for FixedExpense {
    fn amount(&self) -> f64 {
        self.amount
    }
}
