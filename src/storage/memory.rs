use std::{collections::HashMap, sync::Mutex};

use serde_json::Value;

use crate::errors::{PlannerError, Result};

use super::{KeyValueStore, StoreKey};

/// In-process store, handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<StoreKey, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<StoreKey, Value>>> {
        self.entries
            .lock()
            .map_err(|_| PlannerError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn load_raw(&self, key: StoreKey) -> Result<Option<Value>> {
        Ok(self.lock()?.get(&key).cloned())
    }

    fn save_raw(&self, key: StoreKey, value: Value) -> Result<()> {
        self.lock()?.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<()> {
        self.lock()?.remove(&key);
        Ok(())
    }
}
