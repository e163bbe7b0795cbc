//! Device: a sensor or controller installed at a station.
//!
//! A [`Device`] carries the attributes every device shares (id, on/off
//! status, owning station) plus a [`DeviceKind`], the closed set of variant
//! payloads. Operations that only make sense for one variant reject the
//! others with [`DeviceError::Unsupported`].

pub mod config;
pub mod crop_health;
pub mod device_type;
pub mod irrigation;
pub mod readings;
pub mod setting;
pub mod soil_moisture;
pub mod status;
pub mod weather;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DeviceError, FarmError, ValidationError};
use crate::id::{DeviceId, StationId};
use crate::time::{self, Timestamp};

pub use config::{DeviceConfig, DeviceDefaults, DeviceOptions};
pub use crop_health::{CropHealthAnalyzer, Recommendation};
pub use device_type::DeviceType;
pub use irrigation::{IrrigationController, IrrigationRun};
pub use readings::Readings;
pub use setting::{EditableSetting, SettingChange};
pub use soil_moisture::SoilMoistureSensor;
pub use status::DeviceStatus;
pub use weather::{WeatherAlert, WeatherConditions, WeatherMonitor};

/// Variant-specific state of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeviceKind {
    SoilMoisture(SoilMoistureSensor),
    Weather(WeatherMonitor),
    Irrigation(IrrigationController),
    CropHealth(CropHealthAnalyzer),
}

impl DeviceKind {
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::SoilMoisture(_) => DeviceType::SoilMoistureSensor,
            Self::Weather(_) => DeviceType::WeatherMonitor,
            Self::Irrigation(_) => DeviceType::IrrigationController,
            Self::CropHealth(_) => DeviceType::CropHealthAnalyzer,
        }
    }
}

/// A managed device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    id: DeviceId,
    status: DeviceStatus,
    location: StationId,
    kind: DeviceKind,
}

impl Device {
    /// Build a device from a validated configuration. The device starts OFF.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the configuration carries an
    /// out-of-range threshold or flow rate.
    pub fn new(
        id: DeviceId,
        location: StationId,
        config: DeviceConfig,
    ) -> Result<Self, ValidationError> {
        let kind = match config {
            DeviceConfig::SoilMoisture { threshold } => {
                DeviceKind::SoilMoisture(SoilMoistureSensor::new(threshold)?)
            }
            DeviceConfig::Weather => DeviceKind::Weather(WeatherMonitor::new()),
            DeviceConfig::Irrigation { water_flow_rate } => {
                DeviceKind::Irrigation(IrrigationController::new(water_flow_rate)?)
            }
            DeviceConfig::CropHealth => DeviceKind::CropHealth(CropHealthAnalyzer::new()),
        };
        Ok(Self {
            id,
            status: DeviceStatus::default(),
            location,
            kind,
        })
    }

    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[must_use]
    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    /// Station the device was installed at.
    #[must_use]
    pub fn location(&self) -> StationId {
        self.location
    }

    #[must_use]
    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.kind.device_type()
    }

    /// Flip between ON and OFF, returning the new status.
    pub fn toggle_status(&mut self) -> DeviceStatus {
        self.status = self.status.toggled();
        self.status
    }

    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            id: self.id,
            device_type: self.device_type(),
            status: self.status,
        }
    }

    /// Reading log, for sensor variants only.
    #[must_use]
    pub fn readings(&self) -> Option<&Readings> {
        match &self.kind {
            DeviceKind::SoilMoisture(sensor) => Some(sensor.readings()),
            DeviceKind::Weather(monitor) => Some(monitor.readings()),
            DeviceKind::Irrigation(_) | DeviceKind::CropHealth(_) => None,
        }
    }

    /// Insert or overwrite the reading at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotASensor`] for controllers and analyzers.
    pub fn record_reading(
        &mut self,
        timestamp: impl Into<String>,
        value: f64,
    ) -> Result<(), DeviceError> {
        let (id, device_type) = (self.id, self.device_type());
        let readings = match &mut self.kind {
            DeviceKind::SoilMoisture(sensor) => sensor.readings_mut(),
            DeviceKind::Weather(monitor) => monitor.readings_mut(),
            DeviceKind::Irrigation(_) | DeviceKind::CropHealth(_) => {
                return Err(DeviceError::NotASensor { id, device_type });
            }
        };
        readings.record(timestamp, value);
        Ok(())
    }

    /// The setting a user may edit on this device, if any.
    #[must_use]
    pub fn editable_setting(&self) -> Option<EditableSetting> {
        match self.kind {
            DeviceKind::SoilMoisture(_) => Some(EditableSetting::MoistureThreshold),
            DeviceKind::Irrigation(_) => Some(EditableSetting::WaterFlowRate),
            DeviceKind::Weather(_) | DeviceKind::CropHealth(_) => None,
        }
    }

    /// Apply a new value to this device's editable setting.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ThresholdOutOfRange`] or
    /// [`ValidationError::NonPositiveFlowRate`] for a bad value (the old
    /// value is kept), or [`DeviceError::NoEditableSettings`] for variants
    /// without one.
    pub fn apply_setting(&mut self, value: f64) -> Result<SettingChange, FarmError> {
        let (id, device_type) = (self.id, self.device_type());
        let (setting, previous) = match &mut self.kind {
            DeviceKind::SoilMoisture(sensor) => (
                EditableSetting::MoistureThreshold,
                sensor.set_threshold(value)?,
            ),
            DeviceKind::Irrigation(controller) => (
                EditableSetting::WaterFlowRate,
                controller.set_water_flow_rate(value)?,
            ),
            DeviceKind::Weather(_) | DeviceKind::CropHealth(_) => {
                return Err(DeviceError::NoEditableSettings { id, device_type }.into());
            }
        };
        Ok(SettingChange {
            setting,
            previous,
            value,
        })
    }

    /// Water for `duration` minutes and record the run under `at`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Unsupported`] for other variants,
    /// [`DeviceError::Off`] when the controller is OFF, and the errors of
    /// [`IrrigationController::water_needed`]. No history is written on error.
    pub fn start_irrigation(
        &mut self,
        duration: f64,
        at: &Timestamp,
    ) -> Result<IrrigationRun, FarmError> {
        let (id, status, device_type) = (self.id, self.status, self.device_type());
        let DeviceKind::Irrigation(controller) = &mut self.kind else {
            return Err(DeviceError::Unsupported {
                id,
                device_type,
                operation: "irrigation",
            }
            .into());
        };
        if !status.is_on() {
            return Err(DeviceError::Off {
                id,
                device_type: DeviceType::IrrigationController,
            }
            .into());
        }
        let water_used = controller.water_needed(duration)?;
        let run = IrrigationRun {
            timestamp: time::stamp(at),
            duration,
            water_used,
        };
        controller.record(&run);
        Ok(run)
    }

    /// Run a health analysis and return the new index.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Unsupported`] for other variants and
    /// [`DeviceError::Off`] when the analyzer is OFF; the index is left
    /// unchanged in both cases.
    pub fn analyze_health(
        &mut self,
        soil_quality: f64,
        conditions: &WeatherConditions,
    ) -> Result<f64, DeviceError> {
        let (id, status, device_type) = (self.id, self.status, self.device_type());
        let DeviceKind::CropHealth(analyzer) = &mut self.kind else {
            return Err(DeviceError::Unsupported {
                id,
                device_type,
                operation: "health analysis",
            });
        };
        if !status.is_on() {
            return Err(DeviceError::Off {
                id,
                device_type: DeviceType::CropHealthAnalyzer,
            });
        }
        Ok(analyzer.analyze(soil_quality, conditions))
    }

    #[must_use]
    pub fn as_soil_moisture(&self) -> Option<&SoilMoistureSensor> {
        match &self.kind {
            DeviceKind::SoilMoisture(sensor) => Some(sensor),
            _ => None,
        }
    }

    pub fn as_soil_moisture_mut(&mut self) -> Option<&mut SoilMoistureSensor> {
        match &mut self.kind {
            DeviceKind::SoilMoisture(sensor) => Some(sensor),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_weather(&self) -> Option<&WeatherMonitor> {
        match &self.kind {
            DeviceKind::Weather(monitor) => Some(monitor),
            _ => None,
        }
    }

    pub fn as_weather_mut(&mut self) -> Option<&mut WeatherMonitor> {
        match &mut self.kind {
            DeviceKind::Weather(monitor) => Some(monitor),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_irrigation(&self) -> Option<&IrrigationController> {
        match &self.kind {
            DeviceKind::Irrigation(controller) => Some(controller),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_crop_health(&self) -> Option<&CropHealthAnalyzer> {
        match &self.kind {
            DeviceKind::CropHealth(analyzer) => Some(analyzer),
            _ => None,
        }
    }

    /// Rejection for an operation this variant does not offer.
    #[must_use]
    pub fn unsupported(&self, operation: &'static str) -> DeviceError {
        DeviceError::Unsupported {
            id: self.id,
            device_type: self.device_type(),
            operation,
        }
    }
}

/// Snapshot of the attributes every device shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    pub id: DeviceId,
    pub device_type: DeviceType,
    pub status: DeviceStatus,
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Device ID: {}, Type: {}, Status: {}",
            self.id, self.device_type, self.status
        )
    }
}
