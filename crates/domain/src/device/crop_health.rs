//! Crop health analyzer: derives a health index from soil and weather.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::WeatherConditions;

/// Below this index the analyzer recommends action.
pub const HEALTHY_INDEX: f64 = 50.0;

/// Advice derived from the last analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    ImproveConditions,
    Healthy,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImproveConditions => {
                f.write_str("Recommend: Improve soil quality or adjust irrigation.")
            }
            Self::Healthy => f.write_str("Crops are healthy. Keep up the great farming!"),
        }
    }
}

/// Payload of a crop health analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropHealthAnalyzer {
    health_index: f64,
    soil_quality: f64,
}

impl Default for CropHealthAnalyzer {
    fn default() -> Self {
        Self {
            health_index: 100.0,
            soil_quality: 100.0,
        }
    }
}

impl CropHealthAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Always within `0..=100`.
    #[must_use]
    pub fn health_index(&self) -> f64 {
        self.health_index
    }

    /// `(soil_quality + humidity - temperature) / 2`, clamped to `0..=100`.
    /// A NaN result lands on 0.
    pub(crate) fn analyze(&mut self, soil_quality: f64, conditions: &WeatherConditions) -> f64 {
        let raw = (soil_quality + conditions.humidity_or_default()
            - conditions.temperature_or_default())
            / 2.0;
        self.soil_quality = soil_quality;
        self.health_index = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 100.0) };
        self.health_index
    }

    #[must_use]
    pub fn generate_recommendations(&self) -> Recommendation {
        if self.health_index < HEALTHY_INDEX {
            Recommendation::ImproveConditions
        } else {
            Recommendation::Healthy
        }
    }
}
