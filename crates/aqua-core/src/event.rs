//! Stock threshold events

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which ledger a stock event refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockOrigin {
    /// The business's own inventory
    Local,
    /// A client's home stock
    Client(String),
}

impl fmt::Display for StockOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockOrigin::Local => f.write_str("local"),
            StockOrigin::Client(id) => write!(f, "cliente:{id}"),
        }
    }
}

/// Emitted when a deduction leaves stock at or below its minimum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEvent {
    pub origin: StockOrigin,

    /// SKU (local) or chemical type label (client)
    pub key: String,

    /// Quantity after the deduction
    pub new_quantity: f64,

    /// Configured minimum
    pub minimum: f64,
}

impl StockEvent {
    pub fn new(origin: StockOrigin, key: impl Into<String>, new_quantity: f64, minimum: f64) -> Self {
        Self {
            origin,
            key: key.into(),
            new_quantity,
            minimum,
        }
    }
}
