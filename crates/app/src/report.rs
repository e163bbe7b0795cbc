//! Plain-text views over the registry: the full state dump and the device
//! type help.

use std::fmt;

use farmhub_domain::device::{DeviceInfo, DeviceKind, DeviceType};
use farmhub_domain::id::StationId;
use farmhub_domain::station::Coordinates;

use crate::registry::Registry;

/// The variant-specific field shown next to a device's base info.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceDetail {
    Threshold(f64),
    FlowRate(f64),
    HealthIndex(f64),
}

impl DeviceDetail {
    fn of(kind: &DeviceKind) -> Option<Self> {
        match kind {
            DeviceKind::SoilMoisture(sensor) => Some(Self::Threshold(sensor.threshold())),
            DeviceKind::Irrigation(controller) => {
                Some(Self::FlowRate(controller.water_flow_rate()))
            }
            DeviceKind::CropHealth(analyzer) => Some(Self::HealthIndex(analyzer.health_index())),
            DeviceKind::Weather(_) => None,
        }
    }
}

impl fmt::Display for DeviceDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Threshold(value) => write!(f, "Threshold: {value}%"),
            Self::FlowRate(value) => write!(f, "Flow Rate: {value} L/min"),
            Self::HealthIndex(value) => write!(f, "Health Index: {value:.1}"),
        }
    }
}

/// One device row of a [`StateReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceLine {
    pub info: DeviceInfo,
    pub detail: Option<DeviceDetail>,
}

impl fmt::Display for DeviceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info)?;
        if let Some(detail) = &self.detail {
            write!(f, ", {detail}")?;
        }
        Ok(())
    }
}

/// One station block of a [`StateReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct StationReport {
    pub id: StationId,
    pub coordinates: Coordinates,
    pub devices: Vec<DeviceLine>,
}

/// Every station in id order, each with its devices in installation order.
#[derive(Debug, Clone, PartialEq)]
pub struct StateReport {
    pub stations: Vec<StationReport>,
}

impl StateReport {
    pub(crate) fn build(registry: &Registry) -> Self {
        let stations = registry
            .stations()
            .map(|station| StationReport {
                id: station.id(),
                coordinates: station.coordinates(),
                devices: station
                    .devices()
                    .iter()
                    .filter_map(|id| registry.device(*id).ok())
                    .map(|device| DeviceLine {
                        info: device.device_info(),
                        detail: DeviceDetail::of(device.kind()),
                    })
                    .collect(),
            })
            .collect();
        Self { stations }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl fmt::Display for StateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for station in &self.stations {
            writeln!(
                f,
                "Station {}: Coordinates {}",
                station.id, station.coordinates
            )?;
            for device in &station.devices {
                writeln!(f, "    - {device}")?;
            }
        }
        Ok(())
    }
}

/// Help text listing each device type and its shorthand names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Help;

impl fmt::Display for Help {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available Device Types:")?;
        for ty in DeviceType::ALL {
            let aliases: Vec<_> = ty.aliases().map(|alias| format!("'{alias}'")).collect();
            writeln!(f, " - {ty} (or just {})", aliases.join(" or "))?;
        }
        Ok(())
    }
}
