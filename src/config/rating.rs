//! Rating system configuration

use crate::rating::elo::EloConfig;
use serde::{Deserialize, Serialize};

/// Rating parameters exposed to configuration files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating given to players added without an explicit one
    pub default_rating: f64,
    pub k_factor: f64,
    pub logistic_scale: f64,
    pub gap_dampening: f64,
    pub dampening_base: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        let elo = EloConfig::default();
        Self {
            default_rating: 1000.0,
            k_factor: elo.k_factor,
            logistic_scale: elo.logistic_scale,
            gap_dampening: elo.gap_dampening,
            dampening_base: elo.dampening_base,
        }
    }
}

impl RatingConfig {
    /// Engine parameters for the team Elo calculator
    pub fn elo_config(&self) -> EloConfig {
        EloConfig {
            k_factor: self.k_factor,
            logistic_scale: self.logistic_scale,
            gap_dampening: self.gap_dampening,
            dampening_base: self.dampening_base,
        }
    }
}
