//! Plain data records shared by the allocator, the bill aggregator and storage.

pub mod category;
pub mod common;
pub mod dates;
pub mod expense;
pub mod subscription;
pub mod transaction;

pub use category::{BudgetCategory, CategoryTable};
pub use common::{Amounted, NamedEntity};
pub use expense::FixedExpense;
pub use subscription::{Frequency, Subscription};
pub use transaction::{Transaction, TransactionKind};
