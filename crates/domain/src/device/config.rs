//! Creation options for devices.
//!
//! Callers fill a [`DeviceOptions`] before the device type is known; once it
//! resolves, the options are narrowed into a [`DeviceConfig`] holding only
//! the fields that variant uses.

use crate::error::ValidationError;

use super::DeviceType;
use super::irrigation::validate_flow_rate;
use super::soil_moisture::validate_threshold;

/// Fallback values for options a caller leaves unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceDefaults {
    pub soil_threshold: f64,
    pub water_flow_rate: f64,
}

impl Default for DeviceDefaults {
    fn default() -> Self {
        Self {
            soil_threshold: 30.0,
            water_flow_rate: 10.0,
        }
    }
}

/// Optional per-type settings supplied at creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceOptions {
    threshold: Option<f64>,
    water_flow_rate: Option<f64>,
}

impl DeviceOptions {
    /// Moisture threshold, used by soil moisture sensors.
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Flow rate in litres per minute, used by irrigation controllers.
    #[must_use]
    pub fn water_flow_rate(mut self, rate: f64) -> Self {
        self.water_flow_rate = Some(rate);
        self
    }

    /// Keep only the options relevant to `device_type`, filling gaps from
    /// `defaults`, and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ThresholdOutOfRange`] or
    /// [`ValidationError::NonPositiveFlowRate`] for an invalid value.
    pub fn into_config(
        self,
        device_type: DeviceType,
        defaults: &DeviceDefaults,
    ) -> Result<DeviceConfig, ValidationError> {
        Ok(match device_type {
            DeviceType::SoilMoistureSensor => DeviceConfig::SoilMoisture {
                threshold: validate_threshold(self.threshold.unwrap_or(defaults.soil_threshold))?,
            },
            DeviceType::WeatherMonitor => DeviceConfig::Weather,
            DeviceType::IrrigationController => DeviceConfig::Irrigation {
                water_flow_rate: validate_flow_rate(
                    self.water_flow_rate.unwrap_or(defaults.water_flow_rate),
                )?,
            },
            DeviceType::CropHealthAnalyzer => DeviceConfig::CropHealth,
        })
    }
}

/// Validated construction parameters for exactly one device variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceConfig {
    SoilMoisture { threshold: f64 },
    Weather,
    Irrigation { water_flow_rate: f64 },
    CropHealth,
}
