//! Upcoming bill aggregation over subscriptions and recurring expenses.

pub mod aggregator;

pub use aggregator::{
    total_due, BillSource, UpcomingBill, UpcomingBillsAggregator, DEFAULT_HORIZON_DAYS,
};
