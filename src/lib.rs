//! # AquaKeeper
//!
//! Pool maintenance decision engine: chemical dosage per regimen, water
//! quality scoring, client stock coverage, business inventory with low-stock
//! alerts, and the visit decision log.

pub mod logging;

pub use aqua_calc as calc;
pub use aqua_core as model;
pub use aqua_store as store;

pub use aqua_calc::{InventoryService, PoolService, Regimen};
pub use aqua_core::{PoolError, Result, ServiceConfig};
pub use aqua_store::{JsonFileStore, MemoryStore, RecordStore};
