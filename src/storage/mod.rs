pub mod json_backend;
pub mod memory;

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// Names of the collections the planner persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    FixedExpenses,
    Subscriptions,
    Transactions,
    BudgetPlan,
}

impl StoreKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::FixedExpenses => "fixedExpenses",
            StoreKey::Subscriptions => "subscriptions",
            StoreKey::Transactions => "transactions",
            StoreKey::BudgetPlan => "budgetPlan",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstraction over key-value persistence backends holding JSON documents.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when nothing has been stored under `key`.
    fn load_raw(&self, key: StoreKey) -> Result<Option<Value>>;
    fn save_raw(&self, key: StoreKey, value: Value) -> Result<()>;
    fn remove(&self, key: StoreKey) -> Result<()>;
}

/// Loads and deserializes the document stored under `key`.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: StoreKey) -> Result<Option<T>> {
    match store.load_raw(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Loads a collection, treating a missing key as empty.
pub fn load_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: StoreKey) -> Result<Vec<T>> {
    Ok(load(store, key)?.unwrap_or_default())
}

/// Serializes `value` and stores it under `key`.
pub fn save<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: StoreKey, value: &T) -> Result<()> {
    store.save_raw(key, serde_json::to_value(value)?)
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
