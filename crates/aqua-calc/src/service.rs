//! Visit decision engine

use std::collections::HashMap;

use aqua_core::{
    Client, Pool, PoolError, ProductType, Readings, Record, Result, ServiceConfig, StockEvent,
    StockOrigin, Visit,
};
use serde_json::json;
use uuid::Uuid;

use crate::coverage::{format_quantities, Coverage, CoverageCalculator, Shortfall};
use crate::dosage::{DoseStrategy, Regimen, RegimenDosage};
use crate::notify::{StockEventBus, StockObserver, SubscriptionId};
use crate::quality::{QualityAssessment, QualityScorer};

/// Outcome of a visit evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct VisitDecision {
    /// Logged visit
    pub visit: Visit,

    pub visit_required: bool,

    pub quality: QualityAssessment,

    pub shortfall: Shortfall,
}

/// Owns the pool and client registries and the visit log
#[derive(Debug)]
pub struct PoolService {
    config: ServiceConfig,

    scorer: QualityScorer,

    /// Pool ID -> pool
    pools: HashMap<String, Pool>,

    /// Client ID -> client
    clients: HashMap<String, Client>,

    /// Append-only decision log
    visits: Vec<Visit>,

    /// Client home stock alerts
    bus: StockEventBus,
}

impl PoolService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            scorer: QualityScorer::new(config.quality),
            config,
            pools: HashMap::new(),
            clients: HashMap::new(),
            visits: Vec::new(),
            bus: StockEventBus::new(),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Regimen bound to the configured dose table
    pub fn strategy(&self, regimen: Regimen) -> RegimenDosage {
        regimen.with_references(self.config.doses)
    }

    pub fn register_client(&mut self, client: Client) {
        tracing::debug!("registering client {}", client.id);
        self.clients.insert(client.id.clone(), client);
    }

    pub fn register_pool(&mut self, pool: Pool) {
        tracing::debug!("registering pool {} ({} L)", pool.id, pool.volume_liters);
        self.pools.insert(pool.id.clone(), pool);
    }

    pub fn pool(&self, pool_id: &str) -> Result<&Pool> {
        self.pools
            .get(pool_id)
            .ok_or_else(|| PoolError::not_found("pool", pool_id))
    }

    pub fn client(&self, client_id: &str) -> Result<&Client> {
        self.clients
            .get(client_id)
            .ok_or_else(|| PoolError::not_found("client", client_id))
    }

    pub fn client_mut(&mut self, client_id: &str) -> Result<&mut Client> {
        self.clients
            .get_mut(client_id)
            .ok_or_else(|| PoolError::not_found("client", client_id))
    }

    /// Pools owned by a client
    pub fn pools_of(&self, client_id: &str) -> Vec<&Pool> {
        let mut pools: Vec<_> = self
            .pools
            .values()
            .filter(|p| p.client_id == client_id)
            .collect();
        pools.sort_by(|a, b| a.id.cmp(&b.id));
        pools
    }

    pub fn update_readings(&mut self, pool_id: &str, readings: Readings) -> Result<()> {
        let pool = self
            .pools
            .get_mut(pool_id)
            .ok_or_else(|| PoolError::not_found("pool", pool_id))?;
        pool.update_readings(readings);
        Ok(())
    }

    fn pool_and_client(&self, pool_id: &str) -> Result<(&Pool, &Client)> {
        let pool = self.pool(pool_id)?;
        let client = self.client(&pool.client_id)?;
        Ok((pool, client))
    }

    pub fn water_quality(&self, pool_id: &str) -> Result<QualityAssessment> {
        Ok(self.scorer.assess(&self.pool(pool_id)?.readings))
    }

    /// How much of today's dose the owning client has at home
    pub fn coverage(&self, pool_id: &str, strategy: &dyn DoseStrategy) -> Result<Coverage> {
        let (pool, client) = self.pool_and_client(pool_id)?;
        Ok(CoverageCalculator::coverage(
            &client.stock,
            &strategy.required_doses(pool),
        ))
    }

    /// What the owning client is missing for today's dose
    pub fn shortfall(&self, pool_id: &str, strategy: &dyn DoseStrategy) -> Result<Shortfall> {
        let (pool, client) = self.pool_and_client(pool_id)?;
        Ok(CoverageCalculator::shortfall(
            &client.stock,
            &strategy.required_doses(pool),
        ))
    }

    /// Placeholder presence estimate, see [`CoverageCalculator::pool_presence`]
    pub fn product_presence(&self, pool_id: &str, strategy: &dyn DoseStrategy) -> Result<Coverage> {
        let pool = self.pool(pool_id)?;
        Ok(CoverageCalculator::pool_presence(
            &strategy.required_doses(pool),
        ))
    }

    /// Decide whether the pool needs an on-site visit and log the decision
    ///
    /// A visit is required when the water score is below the threshold or the
    /// client is missing any chemical. The visit is logged either way.
    pub fn evaluate_visit(
        &mut self,
        pool_id: &str,
        reason: &str,
        strategy: &dyn DoseStrategy,
    ) -> Result<(Visit, bool)> {
        let decision = self.decide(pool_id, reason, strategy)?;
        self.visits.push(decision.visit.clone());
        Ok((decision.visit, decision.visit_required))
    }

    fn decide(
        &self,
        pool_id: &str,
        reason: &str,
        strategy: &dyn DoseStrategy,
    ) -> Result<VisitDecision> {
        let (pool, client) = self.pool_and_client(pool_id)?;

        let quality = self.scorer.assess(&pool.readings);
        let plan = strategy.required_doses(pool);
        let shortfall = CoverageCalculator::shortfall(&client.stock, &plan);

        let low_quality = quality.score < self.config.visit_score_threshold;
        let visit_required = low_quality || !shortfall.is_empty();

        let observation = format!(
            "Water quality {:.1}%. Shortfall: {}",
            quality.score,
            format_quantities(&shortfall)
        );
        tracing::info!(
            pool = %pool.id,
            client = %client.id,
            reason,
            score = quality.score,
            shortfall_items = shortfall.len(),
            visit_required,
            "visit evaluated"
        );

        Ok(VisitDecision {
            visit: Visit::new(pool_id, reason).with_observation(observation),
            visit_required,
            quality,
            shortfall,
        })
    }

    /// Full decision detail, logged like [`evaluate_visit`](Self::evaluate_visit)
    pub fn evaluate_visit_detailed(
        &mut self,
        pool_id: &str,
        reason: &str,
        strategy: &dyn DoseStrategy,
    ) -> Result<VisitDecision> {
        let decision = self.decide(pool_id, reason, strategy)?;
        self.visits.push(decision.visit.clone());
        Ok(decision)
    }

    /// Decision log, oldest first
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Mark a logged visit as carried out
    pub fn complete_visit(&mut self, visit_id: Uuid) -> Result<&Visit> {
        let visit = self
            .visits
            .iter_mut()
            .find(|v| v.id == visit_id)
            .ok_or_else(|| PoolError::not_found("visit", visit_id.to_string()))?;
        visit.mark_completed();
        Ok(visit)
    }

    /// Use chemicals from a client's home stock; returns the remaining quantity
    ///
    /// Raises a client stock event when the remainder is at or below the
    /// client minimum.
    pub fn consume_client_stock(
        &mut self,
        client_id: &str,
        product_type: ProductType,
        quantity: f64,
    ) -> Result<f64> {
        let minimum = self.config.stock_minimums.client;
        let client = self
            .clients
            .get_mut(client_id)
            .ok_or_else(|| PoolError::not_found("client", client_id))?;

        let key = product_type.label();
        client.stock.subtract(key, quantity)?;
        let remaining = client.stock.available(key);

        if remaining <= minimum {
            let event = StockEvent::new(
                StockOrigin::Client(client_id.to_string()),
                key,
                remaining,
                minimum,
            );
            self.bus.publish(&event)?;
        }
        Ok(remaining)
    }

    pub fn subscribe(&mut self, observer: Box<dyn StockObserver>) -> SubscriptionId {
        self.bus.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Pools and visits as a persistence record
    pub fn snapshot(&self) -> Result<Record> {
        let mut pools: Vec<&Pool> = self.pools.values().collect();
        pools.sort_by(|a, b| a.id.cmp(&b.id));

        let data = json!({
            "pools": serde_json::to_value(&pools)?,
            "visits": serde_json::to_value(&self.visits)?,
        });
        Ok(Record::new("summary", data))
    }
}

impl Default for PoolService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
