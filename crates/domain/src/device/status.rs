//! Device status: the on/off power state of a device.

use serde::{Deserialize, Serialize};

/// Power state of a device. Every device starts [`Off`](Self::Off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceStatus {
    On,
    #[default]
    Off,
}

impl DeviceStatus {
    /// The opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("ON"),
            Self::Off => f.write_str("OFF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_off() {
        assert_eq!(DeviceStatus::default(), DeviceStatus::Off);
    }

    #[test]
    fn should_return_to_original_after_two_toggles() {
        for status in [DeviceStatus::On, DeviceStatus::Off] {
            assert_eq!(status.toggled().toggled(), status);
        }
    }

    #[test]
    fn should_display_uppercase_variant_name() {
        assert_eq!(DeviceStatus::On.to_string(), "ON");
        assert_eq!(DeviceStatus::Off.to_string(), "OFF");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let json = serde_json::to_string(&DeviceStatus::On).unwrap();
        assert_eq!(json, "\"ON\"");
        let parsed: DeviceStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DeviceStatus::On);
    }
}
