//! Proportional distribution of monthly income across the canonical categories.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{BudgetCategory, CategoryTable, FixedExpense};

/// Amount assigned to every canonical category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Allocation(BTreeMap<BudgetCategory, f64>);

impl Allocation {
    pub fn zeroed() -> Self {
        Self(BudgetCategory::ALL.into_iter().map(|c| (c, 0.0)).collect())
    }

    pub fn get(&self, category: BudgetCategory) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BudgetCategory, f64)> + '_ {
        self.0.iter().map(|(category, amount)| (*category, *amount))
    }

    fn set(&mut self, category: BudgetCategory, amount: f64) {
        self.0.insert(category, amount);
    }

    fn scale(&mut self, category: BudgetCategory, ratio: f64) {
        if let Some(amount) = self.0.get_mut(&category) {
            *amount *= ratio;
        }
    }
}

impl Default for Allocation {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Computes category allocations from a monthly income and pinned expenses.
#[derive(Debug, Clone, Copy)]
pub struct BudgetAllocator<'a> {
    table: &'a CategoryTable,
}

impl Default for BudgetAllocator<'static> {
    fn default() -> Self {
        Self::new(CategoryTable::default_table())
    }
}

impl<'a> BudgetAllocator<'a> {
    pub fn new(table: &'a CategoryTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CategoryTable {
        self.table
    }

    /// Allocates `monthly_income` across every canonical category.
    ///
    /// Fixed expenses pin their category to the given amount; the remaining
    /// income is spread over the other categories in proportion to their
    /// default ratios. Fixed expenses naming unknown categories are ignored.
    /// When nothing remains to distribute the variable categories keep their
    /// plain default amounts, so the total may then differ from the income.
    pub fn allocate(&self, monthly_income: f64, fixed_expenses: &[FixedExpense]) -> Allocation {
        if monthly_income <= 0.0 {
            return Allocation::zeroed();
        }

        let defaults: BTreeMap<BudgetCategory, f64> = self
            .table
            .iter()
            .map(|(category, ratio)| (category, monthly_income * ratio))
            .collect();
        let mut allocation = Allocation(defaults.clone());

        let mut pinned = BTreeSet::new();
        let mut total_fixed = 0.0;
        for expense in fixed_expenses {
            match expense.canonical_category() {
                Some(category) => {
                    allocation.set(category, expense.amount);
                    pinned.insert(category);
                    total_fixed += expense.amount;
                }
                None => warn!(
                    category = %expense.category,
                    "ignoring fixed expense outside the canonical categories"
                ),
            }
        }

        let remaining_income = monthly_income - total_fixed;
        let non_fixed_total: f64 = defaults
            .iter()
            .filter(|(category, _)| !pinned.contains(*category))
            .map(|(_, amount)| amount)
            .sum();

        if remaining_income > 0.0 && non_fixed_total > 0.0 {
            let ratio = remaining_income / non_fixed_total;
            for category in BudgetCategory::ALL {
                if !pinned.contains(&category) {
                    allocation.scale(category, ratio);
                }
            }
        }

        debug!(
            monthly_income,
            total_fixed,
            remaining_income,
            pinned = pinned.len(),
            "computed budget allocation"
        );
        allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixed(category: &str, amount: f64) -> FixedExpense {
        FixedExpense::new(
            category,
            amount,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn non_positive_income_yields_all_zero_map() {
        let allocator = BudgetAllocator::default();
        for income in [0.0, -250.0] {
            let allocation = allocator.allocate(income, &[fixed("Rent", 900.0)]);
            assert_eq!(allocation.iter().count(), 9);
            assert!(allocation.iter().all(|(_, amount)| amount == 0.0));
        }
    }

    #[test]
    fn default_ratios_apply_without_fixed_expenses() {
        let allocation = BudgetAllocator::default().allocate(1000.0, &[]);
        let expected = [
            (BudgetCategory::Rent, 300.0),
            (BudgetCategory::Groceries, 120.0),
            (BudgetCategory::Insurance, 100.0),
            (BudgetCategory::Transportation, 150.0),
            (BudgetCategory::Entertainment, 50.0),
            (BudgetCategory::DiningOut, 80.0),
            (BudgetCategory::Clothes, 50.0),
            (BudgetCategory::Other, 50.0),
            (BudgetCategory::Savings, 100.0),
        ];
        for (category, amount) in expected {
            assert_close(allocation.get(category), amount);
        }
    }

    #[test]
    fn unknown_fixed_category_is_dropped() {
        let allocator = BudgetAllocator::default();
        let baseline = allocator.allocate(1000.0, &[]);
        let with_unknown = allocator.allocate(1000.0, &[fixed("Vacation", 500.0)]);
        assert_eq!(baseline, with_unknown);
    }

    #[test]
    fn pinned_rent_rescales_remaining_categories() {
        let allocation = BudgetAllocator::default().allocate(4000.0, &[fixed("Rent", 1500.0)]);
        assert_eq!(allocation.get(BudgetCategory::Rent), 1500.0);
        assert_close(allocation.get(BudgetCategory::Groceries), 480.0 * 2500.0 / 2800.0);
        assert_close(allocation.get(BudgetCategory::Savings), 400.0 * 2500.0 / 2800.0);
        assert_close(allocation.total(), 4000.0);
    }

    #[test]
    fn fixed_amounts_are_kept_exactly_even_when_exceeding_income() {
        let allocation = BudgetAllocator::default().allocate(
            1000.0,
            &[fixed("Rent", 1200.0), fixed("Insurance", 150.0)],
        );
        assert_eq!(allocation.get(BudgetCategory::Rent), 1200.0);
        assert_eq!(allocation.get(BudgetCategory::Insurance), 150.0);
        // Nothing left to distribute: variable categories keep raw defaults.
        assert_close(allocation.get(BudgetCategory::Groceries), 120.0);
        assert_close(allocation.get(BudgetCategory::Savings), 100.0);
    }

    #[test]
    fn every_category_pinned_skips_rescaling() {
        let fixed_expenses: Vec<_> = BudgetCategory::ALL
            .into_iter()
            .map(|category| fixed(category.name(), 10.0))
            .collect();
        let allocation = BudgetAllocator::default().allocate(5000.0, &fixed_expenses);
        assert!(allocation.iter().all(|(_, amount)| amount == 10.0));
    }

    #[test]
    fn duplicate_fixed_category_last_write_wins() {
        let allocation = BudgetAllocator::default().allocate(
            3000.0,
            &[fixed("Rent", 800.0), fixed("Rent", 1000.0)],
        );
        assert_eq!(allocation.get(BudgetCategory::Rent), 1000.0);
        // Both entries count toward the fixed total.
        let variable: f64 = allocation
            .iter()
            .filter(|(category, _)| *category != BudgetCategory::Rent)
            .map(|(_, amount)| amount)
            .sum();
        assert_close(variable, 3000.0 - 1800.0);
    }

    #[test]
    fn inputs_are_left_untouched() {
        let fixed_expenses = vec![fixed("Groceries", 250.0)];
        let snapshot = fixed_expenses.clone();
        let _ = BudgetAllocator::default().allocate(2000.0, &fixed_expenses);
        assert_eq!(fixed_expenses, snapshot);
    }

    #[test]
    fn conservation_holds_across_incomes() {
        let allocator = BudgetAllocator::default();
        let fixed_expenses = [fixed("Rent", 700.0), fixed("Transportation", 120.0)];
        for income in [900.0, 1500.0, 4321.5, 10_000.0] {
            let allocation = allocator.allocate(income, &fixed_expenses);
            let total = allocation.total();
            assert!(
                ((total - income) / income).abs() < 1e-9,
                "income {income} allocated {total}"
            );
        }
    }

    #[test]
    fn allocation_serializes_with_category_names() {
        let allocation = BudgetAllocator::default().allocate(1000.0, &[]);
        let value = serde_json::to_value(&allocation).unwrap();
        assert!(value.get("Dining Out").is_some());
        assert_eq!(value.as_object().map(|map| map.len()), Some(9));
    }
}
