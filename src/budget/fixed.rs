//! Maintenance of pinned category amounts.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{common::saturating_add_days, FixedExpense, Transaction};

pub const DEFAULT_TOLERANCE: f64 = 1.0;
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Replaces the pinned amount for `category`, or pins it if absent.
pub fn upsert_fixed_expense(
    fixed_expenses: &mut Vec<FixedExpense>,
    category: &str,
    amount: f64,
    now: DateTime<Utc>,
) {
    match fixed_expenses
        .iter_mut()
        .find(|expense| expense.category == category)
    {
        Some(existing) => {
            existing.amount = amount;
            existing.last_updated = now;
        }
        None => fixed_expenses.push(FixedExpense::new(category, amount, now)),
    }
}

/// A pinned amount that no longer matches what was recently spent.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedExpenseUpdate {
    pub category: String,
    pub previous: f64,
    pub observed: f64,
}

/// Watches recent expenses for drift away from pinned amounts.
#[derive(Debug, Clone, Copy)]
pub struct FixedExpenseDetector {
    pub tolerance: f64,
    pub lookback_days: i64,
}

impl Default for FixedExpenseDetector {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl FixedExpenseDetector {
    pub fn new(tolerance: f64, lookback_days: i64) -> Self {
        Self {
            tolerance,
            lookback_days,
        }
    }

    /// Compares each fixed expense with the latest expense of its category
    /// dated in `[now - lookback, now]` and reports differences above the
    /// tolerance.
    pub fn detect(
        &self,
        fixed_expenses: &[FixedExpense],
        transactions: &[Transaction],
        now: DateTime<Utc>,
    ) -> Vec<FixedExpenseUpdate> {
        let window_start = saturating_add_days(now, self.lookback_days.saturating_neg());
        let mut updates = Vec::new();

        for expense in fixed_expenses {
            let latest = transactions
                .iter()
                .filter(|txn| txn.is_expense() && txn.category == expense.category)
                .filter(|txn| txn.date >= window_start && txn.date <= now)
                .max_by_key(|txn| txn.date);
            let Some(latest) = latest else {
                continue;
            };
            if (latest.amount - expense.amount).abs() > self.tolerance {
                debug!(
                    category = %expense.category,
                    previous = expense.amount,
                    observed = latest.amount,
                    "fixed expense drifted"
                );
                updates.push(FixedExpenseUpdate {
                    category: expense.category.clone(),
                    previous: expense.amount,
                    observed: latest.amount,
                });
            }
        }

        updates
    }

    /// Writes detected amounts back into the fixed expense list.
    pub fn apply(
        fixed_expenses: &mut Vec<FixedExpense>,
        updates: &[FixedExpenseUpdate],
        now: DateTime<Utc>,
    ) {
        for update in updates {
            upsert_fixed_expense(fixed_expenses, &update.category, update.observed, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionKind;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap()
    }

    fn expense(days_ago: i64, category: &str, amount: f64) -> Transaction {
        Transaction::new(
            now() - Duration::days(days_ago),
            TransactionKind::Expense,
            category,
            amount,
        )
    }

    #[test]
    fn upsert_replaces_existing_and_appends_new() {
        let earlier = now() - Duration::days(40);
        let mut fixed = vec![FixedExpense::new("Rent", 1000.0, earlier)];

        upsert_fixed_expense(&mut fixed, "Rent", 1100.0, now());
        upsert_fixed_expense(&mut fixed, "Insurance", 90.0, now());

        assert_eq!(fixed.len(), 2);
        assert_eq!(fixed[0].amount, 1100.0);
        assert_eq!(fixed[0].last_updated, now());
        assert_eq!(fixed[1].category, "Insurance");
    }

    #[test]
    fn drift_within_tolerance_is_ignored() {
        let fixed = vec![FixedExpense::new("Rent", 1000.0, now())];
        let txns = vec![expense(3, "Rent", 1000.75)];
        assert!(FixedExpenseDetector::default()
            .detect(&fixed, &txns, now())
            .is_empty());
    }

    #[test]
    fn latest_recent_expense_drives_update() {
        let fixed = vec![FixedExpense::new("Rent", 1000.0, now())];
        let txns = vec![
            expense(20, "Rent", 1040.0),
            expense(2, "Rent", 1075.0),
            expense(45, "Rent", 1500.0),
            expense(1, "Groceries", 60.0),
        ];
        let updates = FixedExpenseDetector::default().detect(&fixed, &txns, now());
        assert_eq!(
            updates,
            vec![FixedExpenseUpdate {
                category: "Rent".into(),
                previous: 1000.0,
                observed: 1075.0,
            }]
        );
    }

    #[test]
    fn income_and_stale_entries_do_not_count() {
        let fixed = vec![FixedExpense::new("Insurance", 100.0, now())];
        let txns = vec![
            Transaction::new(now(), TransactionKind::Income, "Insurance", 400.0),
            expense(31, "Insurance", 180.0),
        ];
        assert!(FixedExpenseDetector::default()
            .detect(&fixed, &txns, now())
            .is_empty());
    }

    #[test]
    fn drift_equal_to_tolerance_is_ignored() {
        let fixed = vec![FixedExpense::new("Rent", 1000.0, now())];
        let detector = FixedExpenseDetector::default();

        assert!(detector
            .detect(&fixed, &[expense(3, "Rent", 1001.0)], now())
            .is_empty());
        assert!(detector
            .detect(&fixed, &[expense(3, "Rent", 999.0)], now())
            .is_empty());
        assert_eq!(
            detector
                .detect(&fixed, &[expense(3, "Rent", 1001.01)], now())
                .len(),
            1
        );
    }

    #[test]
    fn huge_lookback_clamps_instead_of_overflowing() {
        let fixed = vec![FixedExpense::new("Rent", 1000.0, now())];
        let txns = vec![expense(365 * 40, "Rent", 1200.0)];
        for lookback in [200_000_000, i64::MAX] {
            let updates = FixedExpenseDetector::new(DEFAULT_TOLERANCE, lookback)
                .detect(&fixed, &txns, now());
            assert_eq!(updates.len(), 1);
            assert_eq!(updates[0].observed, 1200.0);
        }
    }

    #[test]
    fn apply_writes_observed_amounts() {
        let mut fixed = vec![FixedExpense::new("Rent", 1000.0, now() - Duration::days(60))];
        let updates = vec![FixedExpenseUpdate {
            category: "Rent".into(),
            previous: 1000.0,
            observed: 1075.0,
        }];
        FixedExpenseDetector::apply(&mut fixed, &updates, now());
        assert_eq!(fixed[0].amount, 1075.0);
        assert_eq!(fixed[0].last_updated, now());
    }
}
