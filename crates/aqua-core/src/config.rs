//! Service configuration model

use serde::{Deserialize, Serialize};

use crate::{PoolError, Result};

/// Reference doses per 10,000 liters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoseReferences {
    /// Granulated chlorine, daily maintenance (g)
    pub chlorine_maintenance: f64,

    /// Granulated chlorine, shock treatment (g)
    pub chlorine_shock: f64,

    /// Clarifier (ml)
    pub clarifier: f64,

    /// Algaecide (ml)
    pub algaecide: f64,

    /// Anti-scale agent (ml)
    pub anti_scale: f64,
}

impl Default for DoseReferences {
    fn default() -> Self {
        Self {
            chlorine_maintenance: 30.0,
            chlorine_shock: 120.0,
            clarifier: 40.0,
            algaecide: 25.0,
            anti_scale: 35.0,
        }
    }
}

/// Water quality thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Lower bound of the ideal pH band (inclusive)
    pub ph_min: f64,

    /// Upper bound of the ideal pH band (inclusive)
    pub ph_max: f64,

    /// Maximum permitted turbidity
    pub turbidity_max: f64,

    /// Algae level above which the pool is flagged
    pub algae_alert: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            ph_min: 7.2,
            ph_max: 7.6,
            turbidity_max: 30.0,
            algae_alert: 0.5,
        }
    }
}

/// Minimum stock levels that trigger alerts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockMinimums {
    /// Business inventory, units per SKU
    pub local: f64,

    /// Client home stock, per chemical type
    pub client: f64,
}

impl Default for StockMinimums {
    fn default() -> Self {
        Self {
            local: 2.0,
            client: 1.0,
        }
    }
}

/// Top-level configuration for the pool service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub doses: DoseReferences,

    pub quality: QualityThresholds,

    pub stock_minimums: StockMinimums,

    /// Water quality scores below this require a visit
    pub visit_score_threshold: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            doses: DoseReferences::default(),
            quality: QualityThresholds::default(),
            stock_minimums: StockMinimums::default(),
            visit_score_threshold: 70.0,
        }
    }
}

impl ServiceConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON; missing sections keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ServiceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder: set reference doses
    pub fn with_doses(mut self, doses: DoseReferences) -> Self {
        self.doses = doses;
        self
    }

    /// Builder: set quality thresholds
    pub fn with_quality(mut self, quality: QualityThresholds) -> Self {
        self.quality = quality;
        self
    }

    /// Builder: set the business inventory minimum
    pub fn with_local_minimum(mut self, minimum: f64) -> Self {
        self.stock_minimums.local = minimum;
        self
    }

    /// Builder: set the client home stock minimum
    pub fn with_client_minimum(mut self, minimum: f64) -> Self {
        self.stock_minimums.client = minimum;
        self
    }

    /// Builder: set the visit score threshold
    pub fn with_visit_score_threshold(mut self, threshold: f64) -> Self {
        self.visit_score_threshold = threshold;
        self
    }

    /// Reject inconsistent values
    pub fn validate(&self) -> Result<()> {
        let doses = [
            ("chlorine_maintenance", self.doses.chlorine_maintenance),
            ("chlorine_shock", self.doses.chlorine_shock),
            ("clarifier", self.doses.clarifier),
            ("algaecide", self.doses.algaecide),
            ("anti_scale", self.doses.anti_scale),
        ];
        for (name, value) in doses {
            if !value.is_finite() || value < 0.0 {
                return Err(PoolError::Config(format!(
                    "dose {name} must be a non-negative number, got {value}"
                )));
            }
        }

        let q = &self.quality;
        if q.ph_min > q.ph_max {
            return Err(PoolError::Config(format!(
                "ph_min {} is above ph_max {}",
                q.ph_min, q.ph_max
            )));
        }
        if q.turbidity_max < 0.0 || !(0.0..=1.0).contains(&q.algae_alert) {
            return Err(PoolError::Config(
                "turbidity_max must be non-negative and algae_alert within 0..=1".to_string(),
            ));
        }

        if self.stock_minimums.local < 0.0 || self.stock_minimums.client < 0.0 {
            return Err(PoolError::Config("stock minimums must be non-negative".to_string()));
        }

        if !(0.0..=100.0).contains(&self.visit_score_threshold) {
            return Err(PoolError::Config(format!(
                "visit_score_threshold must be within 0..=100, got {}",
                self.visit_score_threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::new();

        assert_eq!(config.doses.chlorine_shock, 120.0);
        assert_eq!(config.doses.chlorine_shock, config.doses.chlorine_maintenance * 4.0);
        assert_eq!(config.quality.ph_min, 7.2);
        assert_eq!(config.quality.ph_max, 7.6);
        assert_eq!(config.stock_minimums.local, 2.0);
        assert_eq!(config.visit_score_threshold, 70.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ServiceConfig::new()
            .with_local_minimum(5.0)
            .with_client_minimum(0.5)
            .with_visit_score_threshold(60.0);

        assert_eq!(config.stock_minimums.local, 5.0);
        assert_eq!(config.stock_minimums.client, 0.5);
        assert_eq!(config.visit_score_threshold, 60.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ServiceConfig::from_json_str(
            r#"{ "quality": { "ph_min": 7.0 }, "stock_minimums": { "local": 3 } }"#,
        )
        .unwrap();

        assert_eq!(config.quality.ph_min, 7.0);
        assert_eq!(config.quality.ph_max, 7.6);
        assert_eq!(config.stock_minimums.local, 3.0);
        assert_eq!(config.doses, DoseReferences::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = ServiceConfig::from_json_str(r#"{ "quality": { "ph_min": 8.0, "ph_max": 7.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, PoolError::Config(_)));

        let err = ServiceConfig::from_json_str(r#"{ "doses": { "clarifier": -1 } }"#).unwrap_err();
        assert!(matches!(err, PoolError::Config(_)));

        let err = ServiceConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, PoolError::Serialization(_)));
    }
}
