//! Soil moisture sensor: compares moisture levels against a threshold.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::Readings;

/// Accepted range for a moisture threshold, in percent.
pub const THRESHOLD_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Check that `threshold` lies within [`THRESHOLD_RANGE`].
///
/// # Errors
///
/// Returns [`ValidationError::ThresholdOutOfRange`] otherwise (including NaN).
pub fn validate_threshold(threshold: f64) -> Result<f64, ValidationError> {
    if THRESHOLD_RANGE.contains(&threshold) {
        Ok(threshold)
    } else {
        Err(ValidationError::ThresholdOutOfRange(threshold))
    }
}

/// Payload of a soil moisture sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilMoistureSensor {
    threshold: f64,
    alerts: Vec<String>,
    readings: Readings,
}

impl SoilMoistureSensor {
    /// Create a sensor alerting below `threshold` percent moisture.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ThresholdOutOfRange`] when `threshold` is
    /// outside `0..=100`.
    pub fn new(threshold: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            threshold: validate_threshold(threshold)?,
            alerts: Vec::new(),
            readings: Readings::default(),
        })
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Replace the threshold, keeping the old one on rejection.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ThresholdOutOfRange`] when `threshold` is
    /// outside `0..=100`.
    pub fn set_threshold(&mut self, threshold: f64) -> Result<f64, ValidationError> {
        let threshold = validate_threshold(threshold)?;
        Ok(std::mem::replace(&mut self.threshold, threshold))
    }

    /// Whether `current_level` is too dry, i.e. strictly below the threshold.
    #[must_use]
    pub fn check_moisture(&self, current_level: f64) -> bool {
        current_level < self.threshold
    }

    /// Record a low-moisture alert. The same timestamp may be recorded twice.
    pub fn trigger_alert(&mut self, timestamp: impl Into<String>) {
        self.alerts.push(timestamp.into());
    }

    /// Alert timestamps in the order they fired.
    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    #[must_use]
    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    pub(crate) fn readings_mut(&mut self) -> &mut Readings {
        &mut self.readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_dry_only_when_strictly_below_threshold() {
        let sensor = SoilMoistureSensor::new(30.0).unwrap();
        assert!(sensor.check_moisture(29.9));
        assert!(!sensor.check_moisture(30.0));
        assert!(!sensor.check_moisture(55.0));
    }

    #[test]
    fn should_keep_duplicate_alert_timestamps() {
        let mut sensor = SoilMoistureSensor::new(30.0).unwrap();
        sensor.trigger_alert("2024-05-01 06:00:00");
        sensor.trigger_alert("2024-05-01 06:00:00");
        assert_eq!(sensor.alerts().len(), 2);
    }

    #[test]
    fn should_not_alert_when_checking_moisture() {
        let sensor = SoilMoistureSensor::new(30.0).unwrap();
        let _ = sensor.check_moisture(5.0);
        assert!(sensor.alerts().is_empty());
    }

    #[test]
    fn should_reject_threshold_above_range_and_keep_previous() {
        let mut sensor = SoilMoistureSensor::new(30.0).unwrap();
        let result = sensor.set_threshold(150.0);
        assert_eq!(result, Err(ValidationError::ThresholdOutOfRange(150.0)));
        assert!((sensor.threshold() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_accept_threshold_bounds() {
        let mut sensor = SoilMoistureSensor::new(30.0).unwrap();
        assert_eq!(sensor.set_threshold(0.0), Ok(30.0));
        assert_eq!(sensor.set_threshold(100.0), Ok(0.0));
    }

    #[test]
    fn should_reject_nan_threshold() {
        assert!(SoilMoistureSensor::new(f64::NAN).is_err());
    }
}
