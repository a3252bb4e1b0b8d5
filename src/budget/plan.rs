use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::allocator::{Allocation, BudgetAllocator};
use crate::domain::{BudgetCategory, FixedExpense};

/// Persisted outcome of a budget generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    pub monthly_income: f64,
    pub allocations: Allocation,
    pub savings_goal: f64,
    pub is_plan_generated: bool,
    #[serde(
        default,
        with = "crate::domain::dates::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_at: Option<DateTime<Utc>>,
}

impl BudgetPlan {
    pub fn generate(
        allocator: &BudgetAllocator<'_>,
        monthly_income: f64,
        fixed_expenses: &[FixedExpense],
        now: DateTime<Utc>,
    ) -> Self {
        let allocations = allocator.allocate(monthly_income, fixed_expenses);
        Self {
            monthly_income,
            savings_goal: allocations.get(BudgetCategory::Savings),
            allocations,
            is_plan_generated: true,
            generated_at: Some(now),
        }
    }
}
