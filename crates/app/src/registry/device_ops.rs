//! Variant-specific device operations, routed through the registry by id.
//!
//! Each operation looks the device up, checks it is the right variant, and
//! delegates to the domain payload. A device of the wrong variant is
//! rejected with [`DeviceError::Unsupported`](farmhub_domain::error::DeviceError::Unsupported).

use std::collections::BTreeMap;

use farmhub_domain::device::{IrrigationRun, Recommendation, WeatherAlert, WeatherConditions};
use farmhub_domain::error::FarmError;
use farmhub_domain::id::{DeviceId, StationId};
use farmhub_domain::time::{self, Timestamp};

use super::Registry;

impl Registry {
    /// Store a reading on a sensor device.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device and
    /// [`DeviceError::NotASensor`](farmhub_domain::error::DeviceError::NotASensor)
    /// for non-sensor variants.
    #[tracing::instrument(skip(self, timestamp))]
    pub fn record_reading(
        &mut self,
        device_id: DeviceId,
        timestamp: impl Into<String>,
        value: f64,
    ) -> Result<(), FarmError> {
        self.device_mut(device_id)?.record_reading(timestamp, value)?;
        tracing::debug!("reading recorded");
        Ok(())
    }

    /// Whether `current_level` is below a soil sensor's threshold.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device and
    /// [`DeviceError::Unsupported`](farmhub_domain::error::DeviceError::Unsupported)
    /// for other variants.
    pub fn check_moisture(&self, device_id: DeviceId, current_level: f64) -> Result<bool, FarmError> {
        let device = self.device(device_id)?;
        let sensor = device
            .as_soil_moisture()
            .ok_or_else(|| device.unsupported("moisture checks"))?;
        Ok(sensor.check_moisture(current_level))
    }

    /// Record a low-moisture alert on a soil sensor.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device and
    /// [`DeviceError::Unsupported`](farmhub_domain::error::DeviceError::Unsupported)
    /// for other variants.
    #[tracing::instrument(skip(self, timestamp))]
    pub fn trigger_moisture_alert(
        &mut self,
        device_id: DeviceId,
        timestamp: impl Into<String>,
    ) -> Result<(), FarmError> {
        let device = self.device_mut(device_id)?;
        let unsupported = device.unsupported("moisture alerts");
        let sensor = device.as_soil_moisture_mut().ok_or(unsupported)?;
        let timestamp = timestamp.into();
        tracing::warn!(%timestamp, "moisture too low");
        sensor.trigger_alert(timestamp);
        Ok(())
    }

    /// Overwrite a weather monitor's temperature and humidity.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device and
    /// [`DeviceError::Unsupported`](farmhub_domain::error::DeviceError::Unsupported)
    /// for other variants.
    #[tracing::instrument(skip(self))]
    pub fn update_weather(
        &mut self,
        device_id: DeviceId,
        temperature: f64,
        humidity: f64,
    ) -> Result<(), FarmError> {
        let device = self.device_mut(device_id)?;
        let unsupported = device.unsupported("weather updates");
        device
            .as_weather_mut()
            .ok_or(unsupported)?
            .update_weather(temperature, humidity);
        Ok(())
    }

    /// Evaluate a weather monitor's conditions and return every alert it
    /// has accumulated.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device and
    /// [`DeviceError::Unsupported`](farmhub_domain::error::DeviceError::Unsupported)
    /// for other variants.
    #[tracing::instrument(skip(self))]
    pub fn generate_weather_alert(
        &mut self,
        device_id: DeviceId,
    ) -> Result<Vec<WeatherAlert>, FarmError> {
        let device = self.device_mut(device_id)?;
        let unsupported = device.unsupported("weather alerts");
        let alerts: Vec<_> = device
            .as_weather_mut()
            .ok_or(unsupported)?
            .generate_weather_alert()
            .copied()
            .collect();
        for alert in &alerts {
            tracing::warn!(%alert, "weather alert");
        }
        Ok(alerts)
    }

    /// Current readings of a weather monitor, ready to feed a crop analysis.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device and
    /// [`DeviceError::Unsupported`](farmhub_domain::error::DeviceError::Unsupported)
    /// for other variants.
    pub fn weather_conditions(&self, device_id: DeviceId) -> Result<WeatherConditions, FarmError> {
        let device = self.device(device_id)?;
        let monitor = device
            .as_weather()
            .ok_or_else(|| device.unsupported("weather readings"))?;
        Ok(WeatherConditions::from(monitor))
    }

    /// Start an irrigation run of `duration` minutes now.
    ///
    /// # Errors
    ///
    /// See [`start_irrigation_at`](Self::start_irrigation_at).
    pub fn start_irrigation(
        &mut self,
        device_id: DeviceId,
        duration: f64,
    ) -> Result<IrrigationRun, FarmError> {
        self.start_irrigation_at(device_id, duration, &time::now())
    }

    /// Start an irrigation run of `duration` minutes recorded at `at`.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device,
    /// [`DeviceError::Unsupported`](farmhub_domain::error::DeviceError::Unsupported)
    /// for other variants,
    /// [`DeviceError::Off`](farmhub_domain::error::DeviceError::Off)
    /// when the controller is OFF, and
    /// [`DeviceError::ExceedsCapacity`](farmhub_domain::error::DeviceError::ExceedsCapacity)
    /// when the run would use more than the controller's limit.
    #[tracing::instrument(skip(self, at))]
    pub fn start_irrigation_at(
        &mut self,
        device_id: DeviceId,
        duration: f64,
        at: &Timestamp,
    ) -> Result<IrrigationRun, FarmError> {
        self.device_mut(device_id)?
            .start_irrigation(duration, at)
            .inspect(|run| {
                tracing::info!(water_used = run.water_used, timestamp = %run.timestamp, "watering crops");
            })
            .inspect_err(|err| tracing::warn!(error = %err, "irrigation refused"))
    }

    /// Manual stop. Advisory only: no state or status changes.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device and
    /// [`DeviceError::Unsupported`](farmhub_domain::error::DeviceError::Unsupported)
    /// for other variants.
    #[tracing::instrument(skip(self))]
    pub fn stop_irrigation(&self, device_id: DeviceId) -> Result<(), FarmError> {
        let device = self.device(device_id)?;
        if device.as_irrigation().is_none() {
            return Err(device.unsupported("irrigation").into());
        }
        tracing::info!("irrigation stopped manually");
        Ok(())
    }

    /// Litres used per run, keyed by timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device and
    /// [`DeviceError::Unsupported`](farmhub_domain::error::DeviceError::Unsupported)
    /// for other variants.
    pub fn irrigation_history(
        &self,
        device_id: DeviceId,
    ) -> Result<&BTreeMap<String, f64>, FarmError> {
        let device = self.device(device_id)?;
        device
            .as_irrigation()
            .map(|controller| controller.irrigation_history())
            .ok_or_else(|| device.unsupported("irrigation history").into())
    }

    /// Run a crop health analysis and return the new health index.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device,
    /// [`DeviceError::Unsupported`](farmhub_domain::error::DeviceError::Unsupported)
    /// for other variants, and
    /// [`DeviceError::Off`](farmhub_domain::error::DeviceError::Off) when the analyzer is OFF.
    #[tracing::instrument(skip(self))]
    pub fn analyze_health(
        &mut self,
        device_id: DeviceId,
        soil_quality: f64,
        conditions: &WeatherConditions,
    ) -> Result<f64, FarmError> {
        let index = self
            .device_mut(device_id)?
            .analyze_health(soil_quality, conditions)
            .inspect_err(|err| tracing::warn!(error = %err, "health analysis refused"))?;
        tracing::info!(health_index = index, "crop health analyzed");
        Ok(index)
    }

    /// Advice based on an analyzer's last health index.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown device and
    /// [`DeviceError::Unsupported`](farmhub_domain::error::DeviceError::Unsupported)
    /// for other variants.
    pub fn recommendations(&self, device_id: DeviceId) -> Result<Recommendation, FarmError> {
        let device = self.device(device_id)?;
        let analyzer = device
            .as_crop_health()
            .ok_or_else(|| device.unsupported("recommendations"))?;
        Ok(analyzer.generate_recommendations())
    }

    /// Add an entry to a station's event log.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::NotFound`] for an unknown station.
    #[tracing::instrument(skip(self, timestamp, description))]
    pub fn log_station_event(
        &mut self,
        station_id: StationId,
        timestamp: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), FarmError> {
        let station = self.station_mut(station_id)?;
        let (timestamp, description) = (timestamp.into(), description.into());
        tracing::info!(%timestamp, %description, "event logged");
        station.log_event(timestamp, description);
        Ok(())
    }
}
