//! Persistent user preferences for the planner.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    bills::DEFAULT_HORIZON_DAYS,
    budget::fixed::{FixedExpenseDetector, DEFAULT_LOOKBACK_DAYS, DEFAULT_TOLERANCE},
    utils::paths,
};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_bill_horizon_days")]
    pub bill_horizon_days: i64,
    #[serde(default = "Config::default_fixed_expense_tolerance")]
    pub fixed_expense_tolerance: f64,
    #[serde(default = "Config::default_fixed_expense_lookback_days")]
    pub fixed_expense_lookback_days: i64,

    /// Optional custom directory for persisted documents. When unset the
    /// documents live in the `store` folder of the application data directory
    /// (`~/.budget_planner`, or `BUDGET_PLANNER_HOME` when set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            bill_horizon_days: Self::default_bill_horizon_days(),
            fixed_expense_tolerance: Self::default_fixed_expense_tolerance(),
            fixed_expense_lookback_days: Self::default_fixed_expense_lookback_days(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_bill_horizon_days() -> i64 {
        DEFAULT_HORIZON_DAYS
    }

    pub fn default_fixed_expense_tolerance() -> f64 {
        DEFAULT_TOLERANCE
    }

    pub fn default_fixed_expense_lookback_days() -> i64 {
        DEFAULT_LOOKBACK_DAYS
    }

    /// Directory the JSON store is rooted at.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::store_dir)
    }

    pub fn detector(&self) -> FixedExpenseDetector {
        FixedExpenseDetector::new(self.fixed_expense_tolerance, self.fixed_expense_lookback_days)
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manager for the configuration file in the application data directory.
    pub fn new_default() -> Self {
        Self::new(paths::config_file())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(paths::config_file_in(&base)))
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
