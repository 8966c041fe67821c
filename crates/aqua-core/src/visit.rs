//! Visit record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Logged visit decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// Visit ID
    pub id: Uuid,

    /// Pool ID
    pub pool_id: String,

    /// Regimen label that motivated the evaluation
    pub reason: String,

    /// Whether the visit was carried out (planned visits start as false)
    pub completed: bool,

    /// State and shortfalls at decision time
    pub observation: String,

    /// Decision timestamp
    pub recorded_at: DateTime<Utc>,
}

impl Visit {
    /// Create a new planned visit
    pub fn new(pool_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            pool_id: pool_id.into(),
            reason: reason.into(),
            completed: false,
            observation: String::new(),
            recorded_at: Utc::now(),
        }
    }

    /// Builder: set observation
    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = observation.into();
        self
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}
