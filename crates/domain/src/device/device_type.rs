//! Device type tag and free-text resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four kinds of device a station can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    SoilMoistureSensor,
    WeatherMonitor,
    IrrigationController,
    CropHealthAnalyzer,
}

/// Shorthand keys, checked in this order for substring containment.
const ALIASES: [(&str, DeviceType); 5] = [
    ("soil", DeviceType::SoilMoistureSensor),
    ("weather", DeviceType::WeatherMonitor),
    ("irrigation", DeviceType::IrrigationController),
    ("crop", DeviceType::CropHealthAnalyzer),
    ("health", DeviceType::CropHealthAnalyzer),
];

impl DeviceType {
    /// Every device type, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::SoilMoistureSensor,
        Self::WeatherMonitor,
        Self::IrrigationController,
        Self::CropHealthAnalyzer,
    ];

    /// Canonical CamelCase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SoilMoistureSensor => "SoilMoistureSensor",
            Self::WeatherMonitor => "WeatherMonitor",
            Self::IrrigationController => "IrrigationController",
            Self::CropHealthAnalyzer => "CropHealthAnalyzer",
        }
    }

    /// Shorthand keys that resolve to this type.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        ALIASES
            .iter()
            .filter(move |(_, target)| *target == self)
            .map(|(alias, _)| *alias)
    }

    /// Map free-text user input to a device type.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. An
    /// exact canonical name wins; otherwise the first shorthand key contained
    /// in the input decides, so `"soil sensor"` resolves to
    /// [`SoilMoistureSensor`](Self::SoilMoistureSensor).
    #[must_use]
    pub fn resolve(input: &str) -> Option<Self> {
        let needle = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(&needle))
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| needle.contains(alias))
                    .map(|(_, ty)| *ty)
            })
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
