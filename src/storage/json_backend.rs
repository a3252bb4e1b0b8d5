use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::debug;

use crate::{config::Config, errors::Result, utils::paths};

use super::{KeyValueStore, StoreKey};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed store keeping one pretty-printed JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Store rooted at the application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(paths::store_dir())
    }

    /// Store rooted at the configured data directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.resolve_data_dir())
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.root
            .join(format!("{}.{}", key.as_str(), FILE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load_raw(&self, key: StoreKey) -> Result<Option<Value>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn save_raw(&self, key: StoreKey, value: Value) -> Result<()> {
        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(&value)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        debug!(key = %key, path = %path.display(), "saved document");
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
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

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
