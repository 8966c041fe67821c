//! # Aqua Core
//!
//! Core data model and types for the pool maintenance service

pub mod client;
pub mod config;
pub mod event;
pub mod pool;
pub mod product;
pub mod record;
pub mod rounding;
pub mod stock;
pub mod visit;

// Re-export main types
pub use client::Client;
pub use config::{DoseReferences, QualityThresholds, ServiceConfig, StockMinimums};
pub use event::{StockEvent, StockOrigin};
pub use pool::{Pool, Readings};
pub use product::{Product, ProductType, Unit};
pub use record::Record;
pub use stock::StockLedger;
pub use visit::Visit;

/// Pool service error type
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("insufficient stock for {key}: available {available}, requested {requested}")]
    InsufficientStock {
        key: String,
        available: f64,
        requested: f64,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("unknown product type: {0}")]
    UnknownProductType(String),

    #[error("unknown treatment regimen: {0}")]
    UnknownRegimen(String),

    #[error("invalid quantity for {key}: {amount}")]
    InvalidQuantity { key: String, amount: f64 },

    #[error("invalid reading: {0}")]
    InvalidReading(String),

    #[error("stock observer failed: {0}")]
    Observer(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PoolError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PoolError>;
