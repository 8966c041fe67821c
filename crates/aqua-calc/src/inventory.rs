//! Business inventory service

use std::collections::HashMap;

use aqua_core::{
    PoolError, Product, ProductType, Result, ServiceConfig, StockEvent, StockLedger, StockOrigin,
};

use crate::dosage::DosePlan;
use crate::notify::{StockEventBus, StockObserver, SubscriptionId};

/// Outcome of one kit line
#[derive(Debug, Clone, PartialEq)]
pub enum KitOutcome {
    /// Deducted; remaining quantity after the deduction
    Deducted { remaining: f64 },
    /// Not enough stock; nothing deducted
    Short { available: f64, requested: f64 },
    /// No catalog product of this type
    Unmapped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KitLine {
    pub product_type: ProductType,
    pub sku: Option<String>,
    pub outcome: KitOutcome,
}

/// Result of preparing a kit from the local inventory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KitReport {
    pub lines: Vec<KitLine>,
}

impl KitReport {
    pub fn is_complete(&self) -> bool {
        self.lines
            .iter()
            .all(|l| matches!(l.outcome, KitOutcome::Deducted { .. }))
    }

    pub fn deducted(&self) -> impl Iterator<Item = &KitLine> {
        self.lines
            .iter()
            .filter(|l| matches!(l.outcome, KitOutcome::Deducted { .. }))
    }
}

/// Owns the product catalog and the SKU-keyed business stock
#[derive(Debug)]
pub struct InventoryService {
    products: HashMap<String, Product>,

    /// SKUs in registration order
    registration_order: Vec<String>,

    stock: StockLedger,

    /// Deductions leaving a SKU at or below this raise a stock event
    local_minimum: f64,

    bus: StockEventBus,
}

impl InventoryService {
    pub fn new(local_minimum: f64) -> Self {
        Self {
            products: HashMap::new(),
            registration_order: Vec::new(),
            stock: StockLedger::new(),
            local_minimum,
            bus: StockEventBus::new(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.stock_minimums.local)
    }

    pub fn local_minimum(&self) -> f64 {
        self.local_minimum
    }

    /// Insert or replace a catalog entry
    ///
    /// A non-zero `initial_quantity` is added to the SKU's stock on every call.
    pub fn register_product(&mut self, product: Product, initial_quantity: f64) {
        let sku = product.sku.clone();
        if self.products.insert(sku.clone(), product).is_none() {
            self.registration_order.push(sku.clone());
        }
        if initial_quantity != 0.0 {
            self.stock.add(sku.clone(), initial_quantity);
        }
        tracing::debug!(
            "registered product {} (stock {})",
            sku,
            self.stock.available(&sku)
        );
    }

    /// Resolve a SKU, or a type label to the first registered SKU of that type
    ///
    /// A type may map to several SKUs; only the first is ever returned.
    pub fn resolve_key(&self, sku_or_type: &str) -> Result<String> {
        if self.products.contains_key(sku_or_type) {
            return Ok(sku_or_type.to_string());
        }
        if let Ok(product_type) = sku_or_type.parse::<ProductType>() {
            if let Some(sku) = self.first_sku_of(product_type) {
                return Ok(sku.to_string());
            }
        }
        Err(PoolError::not_found("product", sku_or_type))
    }

    fn first_sku_of(&self, product_type: ProductType) -> Option<&str> {
        self.registration_order
            .iter()
            .find(|sku| {
                self.products
                    .get(sku.as_str())
                    .is_some_and(|p| p.product_type == product_type)
            })
            .map(String::as_str)
    }

    pub fn replenish(&mut self, sku_or_type: &str, quantity: f64) -> Result<()> {
        let sku = self.resolve_key(sku_or_type)?;
        self.stock.add(sku, quantity);
        Ok(())
    }

    pub fn available(&self, sku_or_type: &str) -> Result<f64> {
        let sku = self.resolve_key(sku_or_type)?;
        Ok(self.stock.available(&sku))
    }

    /// Withdraw stock; returns the remaining quantity
    ///
    /// Observers are notified synchronously when the remaining quantity is at
    /// or below the local minimum. An observer error is returned to the caller
    /// after the stock has already been deducted.
    pub fn deduct(&mut self, sku_or_type: &str, quantity: f64) -> Result<f64> {
        let sku = self.resolve_key(sku_or_type)?;
        self.stock.subtract(&sku, quantity)?;

        let remaining = self.stock.available(&sku);
        tracing::debug!("deducted {} of {}, {} left", quantity, sku, remaining);

        if remaining <= self.local_minimum {
            let event = StockEvent::new(StockOrigin::Local, sku, remaining, self.local_minimum);
            self.bus.publish(&event)?;
        }
        Ok(remaining)
    }

    /// Take `units_per_item` of each chemical in the plan from local stock
    ///
    /// Shortages and unmapped types are reported per line and do not stop the
    /// remaining lines. Any other error aborts the kit.
    pub fn prepare_kit(&mut self, plan: &DosePlan, units_per_item: f64) -> Result<KitReport> {
        let mut report = KitReport::default();

        for &product_type in plan.keys() {
            let Some(sku) = self.first_sku_of(product_type).map(str::to_string) else {
                tracing::warn!("no SKU registered for {}, skipping", product_type);
                report.lines.push(KitLine {
                    product_type,
                    sku: None,
                    outcome: KitOutcome::Unmapped,
                });
                continue;
            };

            let outcome = match self.deduct(&sku, units_per_item) {
                Ok(remaining) => KitOutcome::Deducted { remaining },
                Err(PoolError::InsufficientStock {
                    available,
                    requested,
                    ..
                }) => {
                    tracing::warn!(
                        "kit short on {}: available {}, requested {}",
                        sku,
                        available,
                        requested
                    );
                    KitOutcome::Short {
                        available,
                        requested,
                    }
                }
                Err(err) => return Err(err),
            };

            report.lines.push(KitLine {
                product_type,
                sku: Some(sku),
                outcome,
            });
        }

        Ok(report)
    }

    pub fn product(&self, sku: &str) -> Result<&Product> {
        self.products
            .get(sku)
            .ok_or_else(|| PoolError::not_found("product", sku))
    }

    /// Catalog in registration order
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.registration_order
            .iter()
            .filter_map(|sku| self.products.get(sku))
    }

    pub fn stock(&self) -> &StockLedger {
        &self.stock
    }

    pub fn subscribe(&mut self, observer: Box<dyn StockObserver>) -> SubscriptionId {
        self.bus.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }
}

impl Default for InventoryService {
    fn default() -> Self {
        Self::from_config(&ServiceConfig::default())
    }
}
