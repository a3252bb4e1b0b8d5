//! Budget allocation, pinned expenses and generated plans.

pub mod allocator;
pub mod fixed;
pub mod plan;

pub use allocator::{Allocation, BudgetAllocator};
pub use fixed::{upsert_fixed_expense, FixedExpenseDetector, FixedExpenseUpdate};
pub use plan::BudgetPlan;
