//! JSON file record store
//!
//! One pretty-printed JSON document per record at `<base>/<name>.json`.

use std::fs;
use std::path::{Path, PathBuf};

use aqua_core::{PoolError, Record, Result};

use crate::{RecordLocation, RecordStore};

/// Default base directory
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base: PathBuf,
}

impl JsonFileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// File path for a record name
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base.join(format!("{name}.json"))
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl RecordStore for JsonFileStore {
    fn save(&mut self, name: &str, record: &Record) -> Result<RecordLocation> {
        fs::create_dir_all(&self.base)?;
        let path = self.path_for(name);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;

        tracing::info!("saved record '{}' to {}", name, path.display());
        Ok(RecordLocation::File(path))
    }

    fn load(&self, name: &str) -> Result<Record> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(PoolError::not_found("record", name));
        }
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
