//! Water quality scoring

use aqua_core::{QualityThresholds, Readings};
use serde::Serialize;

pub const PH_PENALTY: f64 = 25.0;
pub const TURBIDITY_PENALTY: f64 = 25.0;
pub const ALGAE_PENALTY: f64 = 50.0;

/// Score plus the criteria that failed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityAssessment {
    /// Health score, 0..=100
    pub score: f64,
    pub ph_out_of_range: bool,
    pub turbidity_high: bool,
    pub algae_alert: bool,
}

impl QualityAssessment {
    pub fn is_healthy(&self) -> bool {
        !(self.ph_out_of_range || self.turbidity_high || self.algae_alert)
    }
}

/// Water quality scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityScorer {
    thresholds: QualityThresholds,
}

impl QualityScorer {
    pub fn new(thresholds: QualityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Penalize each failed criterion, clamp once at the end
    pub fn assess(&self, readings: &Readings) -> QualityAssessment {
        let t = &self.thresholds;
        let ph_out_of_range = !(t.ph_min..=t.ph_max).contains(&readings.ph);
        let turbidity_high = readings.turbidity > t.turbidity_max;
        let algae_alert = readings.algae_level > t.algae_alert;

        let mut score = 100.0;
        if ph_out_of_range {
            score -= PH_PENALTY;
        }
        if turbidity_high {
            score -= TURBIDITY_PENALTY;
        }
        if algae_alert {
            score -= ALGAE_PENALTY;
        }

        QualityAssessment {
            score: f64::clamp(score, 0.0, 100.0),
            ph_out_of_range,
            turbidity_high,
            algae_alert,
        }
    }

    pub fn score(&self, readings: &Readings) -> f64 {
        self.assess(readings).score
    }
}
