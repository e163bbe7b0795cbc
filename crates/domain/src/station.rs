//! Station: a physical site that devices are installed at.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, StationId};

/// Planar position of a station on the farm map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

/// A site holding an ordered list of installed devices and an event log.
///
/// The station only records device ids; devices themselves are owned by the
/// registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    id: StationId,
    coordinates: Coordinates,
    devices: Vec<DeviceId>,
    logs: BTreeMap<String, String>,
}

impl Station {
    #[must_use]
    pub fn new(id: StationId, x: f64, y: f64) -> Self {
        Self {
            id,
            coordinates: Coordinates { x, y },
            devices: Vec::new(),
            logs: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> StationId {
        self.id
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Installed devices in installation order.
    #[must_use]
    pub fn devices(&self) -> &[DeviceId] {
        &self.devices
    }

    /// Append a device. Duplicates are not checked here.
    pub fn add_device(&mut self, device: DeviceId) {
        self.devices.push(device);
    }

    /// Record `description` at `timestamp`, replacing an earlier entry with
    /// the same timestamp.
    pub fn log_event(&mut self, timestamp: impl Into<String>, description: impl Into<String>) {
        self.logs.insert(timestamp.into(), description.into());
    }

    #[must_use]
    pub fn logs(&self) -> &BTreeMap<String, String> {
        &self.logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_with_no_devices_and_no_logs() {
        let station = Station::new(StationId::new(0), 3.5, -2.0);
        assert_eq!(station.coordinates(), Coordinates { x: 3.5, y: -2.0 });
        assert!(station.devices().is_empty());
        assert!(station.logs().is_empty());
    }

    #[test]
    fn should_keep_devices_in_insertion_order() {
        let mut station = Station::new(StationId::new(0), 0.0, 0.0);
        station.add_device(DeviceId::new(4));
        station.add_device(DeviceId::new(1));
        assert_eq!(station.devices(), [DeviceId::new(4), DeviceId::new(1)]);
    }

    #[test]
    fn should_overwrite_log_with_same_timestamp() {
        let mut station = Station::new(StationId::new(0), 0.0, 0.0);
        station.log_event("2024-05-01 06:00:00", "pump primed");
        station.log_event("2024-05-01 06:00:00", "pump primed twice");
        assert_eq!(station.logs().len(), 1);
        assert_eq!(
            station.logs().get("2024-05-01 06:00:00").map(String::as_str),
            Some("pump primed twice")
        );
    }

    #[test]
    fn should_display_coordinates_with_decimal_point() {
        let coords = Coordinates { x: 1.0, y: 2.5 };
        assert_eq!(coords.to_string(), "(1.0, 2.5)");
    }
}
