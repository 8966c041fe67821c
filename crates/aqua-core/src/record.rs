//! Persistence record

use serde::{Deserialize, Serialize};

/// Named payload handed to a record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub description: String,
    pub data: serde_json::Value,
}

impl Record {
    pub fn new(description: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            description: description.into(),
            data,
        }
    }
}
