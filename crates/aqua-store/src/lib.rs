//! # Aqua Store
//!
//! Persistence for service records

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::fmt;
use std::path::PathBuf;

use aqua_core::{Record, Result};

/// Where a record ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLocation {
    File(PathBuf),
    Memory(String),
}

impl fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordLocation::File(path) => write!(f, "{}", path.display()),
            RecordLocation::Memory(name) => write!(f, "memory:{name}"),
        }
    }
}

/// Named record storage
pub trait RecordStore {
    /// Save under `name`, replacing any previous record of that name
    fn save(&mut self, name: &str, record: &Record) -> Result<RecordLocation>;

    fn load(&self, name: &str) -> Result<Record>;
}
