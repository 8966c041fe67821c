//! In-memory record store

use std::collections::HashMap;

use aqua_core::{PoolError, Record, Result};

use crate::{RecordLocation, RecordStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn save(&mut self, name: &str, record: &Record) -> Result<RecordLocation> {
        self.records.insert(name.to_string(), record.clone());
        Ok(RecordLocation::Memory(name.to_string()))
    }

    fn load(&self, name: &str) -> Result<Record> {
        self.records
            .get(name)
            .cloned()
            .ok_or_else(|| PoolError::not_found("record", name))
    }
}
