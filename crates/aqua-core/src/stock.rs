//! Stock ledger model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{PoolError, Result};

/// Quantity-by-key store
///
/// Used for the business inventory (keyed by SKU) and for each client's home
/// stock (keyed by chemical type label). Quantities never go negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockLedger {
    quantities: BTreeMap<String, f64>,
}

impl StockLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an initial quantity
    pub fn with_quantity(mut self, key: impl Into<String>, amount: f64) -> Self {
        self.add(key, amount);
        self
    }

    /// Increase the stored quantity for `key`
    ///
    /// Negative or non-finite amounts are ignored.
    pub fn add(&mut self, key: impl Into<String>, amount: f64) {
        let key = key.into();
        if !amount.is_finite() || amount < 0.0 {
            tracing::warn!("ignoring invalid stock addition for {}: {}", key, amount);
            return;
        }
        *self.quantities.entry(key).or_insert(0.0) += amount;
    }

    /// Decrease the stored quantity for `key`
    ///
    /// Fails without touching the ledger when `amount` exceeds what is stored.
    pub fn subtract(&mut self, key: &str, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(PoolError::InvalidQuantity {
                key: key.to_string(),
                amount,
            });
        }

        let current = self.available(key);
        if amount > current {
            return Err(PoolError::InsufficientStock {
                key: key.to_string(),
                available: current,
                requested: amount,
            });
        }

        self.quantities.insert(key.to_string(), current - amount);
        Ok(())
    }

    /// Stored quantity for `key`, 0 when absent
    pub fn available(&self, key: &str) -> f64 {
        self.quantities.get(key).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.quantities.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.quantities.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.quantities.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}
