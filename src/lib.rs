#![doc(test(attr(deny(warnings))))]

//! Budget Planner offers the budget allocation and upcoming-bill computations
//! behind a personal finance tracker, plus the storage and configuration
//! plumbing that feeds them.

pub mod bills;
pub mod budget;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod time;
pub mod utils;

pub use bills::{BillSource, UpcomingBill, UpcomingBillsAggregator};
pub use budget::{Allocation, BudgetAllocator, BudgetPlan};
pub use errors::PlannerError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Planner tracing initialized.");
    });
}
