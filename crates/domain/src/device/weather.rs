//! Weather monitor: tracks temperature and humidity and raises alerts.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Readings;

/// Temperatures strictly above this raise [`WeatherAlert::HighTemperature`].
pub const HIGH_TEMPERATURE_LIMIT: f64 = 40.0;

/// Humidity strictly below this raises [`WeatherAlert::LowHumidity`].
pub const LOW_HUMIDITY_LIMIT: f64 = 20.0;

/// A weather condition worth telling the farmer about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeatherAlert {
    HighTemperature,
    LowHumidity,
}

impl fmt::Display for WeatherAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighTemperature => f.write_str("High Temperature Alert"),
            Self::LowHumidity => f.write_str("Low Humidity Alert"),
        }
    }
}

/// Payload of a weather monitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherMonitor {
    temperature: f64,
    humidity: f64,
    alerts: BTreeSet<WeatherAlert>,
    readings: Readings,
}

impl WeatherMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    #[must_use]
    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    /// Overwrite both readings.
    pub fn update_weather(&mut self, temperature: f64, humidity: f64) {
        self.temperature = temperature;
        self.humidity = humidity;
    }

    /// Add alerts for the current conditions and return every alert raised
    /// so far. Alerts accumulate and are never cleared.
    pub fn generate_weather_alert(&mut self) -> impl Iterator<Item = &WeatherAlert> {
        if self.temperature > HIGH_TEMPERATURE_LIMIT {
            self.alerts.insert(WeatherAlert::HighTemperature);
        }
        if self.humidity < LOW_HUMIDITY_LIMIT {
            self.alerts.insert(WeatherAlert::LowHumidity);
        }
        self.alerts.iter()
    }

    #[must_use]
    pub fn alerts(&self) -> &BTreeSet<WeatherAlert> {
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

/// Weather inputs for a crop health analysis. Missing values fall back to
/// [`WeatherConditions::DEFAULT_TEMPERATURE`] and
/// [`WeatherConditions::DEFAULT_HUMIDITY`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConditions {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

impl WeatherConditions {
    pub const DEFAULT_TEMPERATURE: f64 = 25.0;
    pub const DEFAULT_HUMIDITY: f64 = 50.0;

    #[must_use]
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature: Some(temperature),
            humidity: Some(humidity),
        }
    }

    #[must_use]
    pub fn temperature_or_default(&self) -> f64 {
        self.temperature.unwrap_or(Self::DEFAULT_TEMPERATURE)
    }

    #[must_use]
    pub fn humidity_or_default(&self) -> f64 {
        self.humidity.unwrap_or(Self::DEFAULT_HUMIDITY)
    }
}

impl From<&WeatherMonitor> for WeatherConditions {
    fn from(monitor: &WeatherMonitor) -> Self {
        Self::new(monitor.temperature, monitor.humidity)
    }
}
