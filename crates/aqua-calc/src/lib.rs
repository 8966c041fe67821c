//! # Aqua Calculation Engine
//!
//! Dosage, water quality scoring, stock coverage and visit decisions

pub mod coverage;
pub mod dosage;
pub mod formatting;
pub mod inventory;
pub mod notify;
pub mod quality;
pub mod service;

// Re-export main types
pub use coverage::{format_quantities, Coverage, CoverageCalculator, CoverageLine, Shortfall};
pub use dosage::{DosePlan, DoseStrategy, Regimen, RegimenDosage};
pub use formatting::{format_catalog, CatalogFormatter, ProductFormatter, StockListingFormatter};
pub use inventory::{InventoryService, KitLine, KitOutcome, KitReport};
pub use notify::{LoggingObserver, StockEventBus, StockObserver, SubscriptionId};
pub use quality::{QualityAssessment, QualityScorer};
pub use service::{PoolService, VisitDecision};
