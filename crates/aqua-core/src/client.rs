//! Client model

use serde::{Deserialize, Serialize};

use crate::stock::StockLedger;

/// Service client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Client ID (national identity number)
    pub id: String,

    pub name: String,

    pub address: String,

    /// Home stock, keyed by chemical type label
    pub stock: StockLedger,
}

impl Client {
    /// Create a new client with empty home stock
    pub fn new(id: impl Into<String>, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            stock: StockLedger::new(),
        }
    }

    /// Builder: set home stock
    pub fn with_stock(mut self, stock: StockLedger) -> Self {
        self.stock = stock;
        self
    }
}
