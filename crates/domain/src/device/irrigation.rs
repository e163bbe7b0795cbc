//! Irrigation controller: waters crops within a fixed water budget.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DeviceError, ValidationError};

/// Most water a single irrigation run may use, in litres.
pub const MAX_WATER_USAGE: f64 = 1000.0;

/// Check that `rate` is a usable flow rate (strictly positive).
///
/// # Errors
///
/// Returns [`ValidationError::NonPositiveFlowRate`] otherwise (including NaN).
pub fn validate_flow_rate(rate: f64) -> Result<f64, ValidationError> {
    if rate > 0.0 {
        Ok(rate)
    } else {
        Err(ValidationError::NonPositiveFlowRate(rate))
    }
}

/// One completed irrigation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationRun {
    /// Second-resolution key the run was recorded under.
    pub timestamp: String,
    /// Minutes of watering.
    pub duration: f64,
    /// Litres used.
    pub water_used: f64,
}

/// Payload of an irrigation controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationController {
    water_flow_rate: f64,
    max_water_usage: f64,
    history: BTreeMap<String, f64>,
}

impl IrrigationController {
    /// Create a controller delivering `water_flow_rate` litres per minute.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveFlowRate`] when the rate is not
    /// strictly positive.
    pub fn new(water_flow_rate: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            water_flow_rate: validate_flow_rate(water_flow_rate)?,
            max_water_usage: MAX_WATER_USAGE,
            history: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn water_flow_rate(&self) -> f64 {
        self.water_flow_rate
    }

    /// Replace the flow rate, keeping the old one on rejection.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveFlowRate`] when `rate` is not
    /// strictly positive.
    pub fn set_water_flow_rate(&mut self, rate: f64) -> Result<f64, ValidationError> {
        let rate = validate_flow_rate(rate)?;
        Ok(std::mem::replace(&mut self.water_flow_rate, rate))
    }

    /// Litres a run of `duration` minutes would use, if within budget.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::ExceedsCapacity`] when the run would use more
    /// than [`MAX_WATER_USAGE`] litres.
    pub fn water_needed(&self, duration: f64) -> Result<f64, DeviceError> {
        let water_used = self.water_flow_rate * duration;
        if water_used > self.max_water_usage {
            return Err(DeviceError::ExceedsCapacity {
                requested: water_used,
                limit: self.max_water_usage,
            });
        }
        Ok(water_used)
    }

    /// Store a run under `timestamp`, replacing any run with the same key.
    pub(crate) fn record(&mut self, run: &IrrigationRun) {
        self.history.insert(run.timestamp.clone(), run.water_used);
    }

    /// Litres used per run, keyed by timestamp.
    #[must_use]
    pub fn irrigation_history(&self) -> &BTreeMap<String, f64> {
        &self.history
    }
}
