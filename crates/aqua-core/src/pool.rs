//! Pool model

use serde::{Deserialize, Serialize};

use crate::{PoolError, Result};

/// Current water readings of a pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    /// pH value
    pub ph: f64,

    /// Turbidity (lower is better)
    pub turbidity: f64,

    /// Algae level, 0 (none) to 1 (heavy)
    pub algae_level: f64,
}

impl Readings {
    /// Create validated readings
    pub fn new(ph: f64, turbidity: f64, algae_level: f64) -> Result<Self> {
        if !ph.is_finite() || !(0.0..=14.0).contains(&ph) {
            return Err(PoolError::InvalidReading(format!("pH out of range: {ph}")));
        }
        if !turbidity.is_finite() || turbidity < 0.0 {
            return Err(PoolError::InvalidReading(format!(
                "turbidity must be non-negative: {turbidity}"
            )));
        }
        if !algae_level.is_finite() || !(0.0..=1.0).contains(&algae_level) {
            return Err(PoolError::InvalidReading(format!(
                "algae level must be within 0..=1: {algae_level}"
            )));
        }
        Ok(Self {
            ph,
            turbidity,
            algae_level,
        })
    }
}

impl Default for Readings {
    fn default() -> Self {
        Self {
            ph: 7.4,
            turbidity: 10.0,
            algae_level: 0.0,
        }
    }
}

/// A client's pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    /// Pool ID
    pub id: String,

    /// Volume in liters
    pub volume_liters: u32,

    /// Owning client ID
    pub client_id: String,

    /// Latest readings
    pub readings: Readings,
}

impl Pool {
    /// Create a new pool with default readings
    pub fn new(id: impl Into<String>, volume_liters: u32, client_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            volume_liters,
            client_id: client_id.into(),
            readings: Readings::default(),
        }
    }

    /// Builder: set readings
    pub fn with_readings(mut self, readings: Readings) -> Self {
        self.readings = readings;
        self
    }

    pub fn update_readings(&mut self, readings: Readings) {
        self.readings = readings;
    }
}
