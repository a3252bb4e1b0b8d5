use tracing::info;

use crate::{
    budget::{
        upsert_fixed_expense, BudgetAllocator, BudgetPlan, FixedExpenseDetector,
        FixedExpenseUpdate,
    },
    domain::{FixedExpense, Transaction},
    storage::{self, KeyValueStore, StoreKey},
    time::Clock,
};

use super::ServiceResult;

pub struct BudgetService;

impl BudgetService {
    /// Allocates `monthly_income` against the stored fixed expenses and persists the plan.
    pub fn generate_plan(
        store: &dyn KeyValueStore,
        allocator: &BudgetAllocator<'_>,
        monthly_income: f64,
        clock: &dyn Clock,
    ) -> ServiceResult<BudgetPlan> {
        let fixed: Vec<FixedExpense> = storage::load_list(store, StoreKey::FixedExpenses)?;
        let plan = BudgetPlan::generate(allocator, monthly_income, &fixed, clock.now());
        storage::save(store, StoreKey::BudgetPlan, &plan)?;
        info!(
            monthly_income,
            savings_goal = plan.savings_goal,
            "budget plan generated"
        );
        Ok(plan)
    }

    /// Returns the stored plan, or an ungenerated default.
    pub fn load_plan(store: &dyn KeyValueStore) -> ServiceResult<BudgetPlan> {
        Ok(storage::load(store, StoreKey::BudgetPlan)?.unwrap_or_default())
    }

    pub fn fixed_expenses(store: &dyn KeyValueStore) -> ServiceResult<Vec<FixedExpense>> {
        Ok(storage::load_list(store, StoreKey::FixedExpenses)?)
    }

    /// Pins `category` to `amount`, replacing any previous pin.
    pub fn set_fixed_expense(
        store: &dyn KeyValueStore,
        category: &str,
        amount: f64,
        clock: &dyn Clock,
    ) -> ServiceResult<Vec<FixedExpense>> {
        let mut fixed = Self::fixed_expenses(store)?;
        upsert_fixed_expense(&mut fixed, category, amount, clock.now());
        storage::save(store, StoreKey::FixedExpenses, &fixed)?;
        info!(category, amount, "fixed expense updated");
        Ok(fixed)
    }

    /// Re-pins fixed expenses whose recent spending drifted past the detector tolerance.
    pub fn refresh_fixed_expenses(
        store: &dyn KeyValueStore,
        detector: &FixedExpenseDetector,
        clock: &dyn Clock,
    ) -> ServiceResult<Vec<FixedExpenseUpdate>> {
        let mut fixed = Self::fixed_expenses(store)?;
        let transactions: Vec<Transaction> = storage::load_list(store, StoreKey::Transactions)?;
        let now = clock.now();
        let updates = detector.detect(&fixed, &transactions, now);
        if !updates.is_empty() {
            FixedExpenseDetector::apply(&mut fixed, &updates, now);
            storage::save(store, StoreKey::FixedExpenses, &fixed)?;
            info!(updated = updates.len(), "fixed expenses refreshed");
        }
        Ok(updates)
    }
}
