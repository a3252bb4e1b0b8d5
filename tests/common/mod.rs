#![allow(dead_code)]

use std::sync::Mutex;

use budget_planner::{storage::JsonFileStore, time::FixedClock};
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated on-disk store backed by a unique directory for each test.
pub fn setup_store() -> JsonFileStore {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    JsonFileStore::new(base.join("store")).expect("create json file store")
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock(now())
}
