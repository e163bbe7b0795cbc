//! User-editable device settings.

use std::fmt;

/// The single setting a device variant lets the user edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableSetting {
    /// Soil moisture threshold, percent in `0..=100`.
    MoistureThreshold,
    /// Irrigation flow rate, litres per minute, strictly positive.
    WaterFlowRate,
}

impl EditableSetting {
    /// Short human label, e.g. for prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MoistureThreshold => "moisture threshold (0–100)",
            Self::WaterFlowRate => "water flow rate",
        }
    }
}

/// A setting edit that was accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingChange {
    pub setting: EditableSetting,
    pub previous: f64,
    pub value: f64,
}

impl fmt::Display for SettingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.setting {
            EditableSetting::MoistureThreshold => write!(f, "Threshold updated to {}%", self.value),
            EditableSetting::WaterFlowRate => {
                write!(f, "Water flow rate updated to {} L/min", self.value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_threshold_change_as_percent() {
        let change = SettingChange {
            setting: EditableSetting::MoistureThreshold,
            previous: 30.0,
            value: 42.5,
        };
        assert_eq!(change.to_string(), "Threshold updated to 42.5%");
    }

    #[test]
    fn should_display_flow_rate_change_in_litres_per_minute() {
        let change = SettingChange {
            setting: EditableSetting::WaterFlowRate,
            previous: 10.0,
            value: 12.0,
        };
        assert_eq!(change.to_string(), "Water flow rate updated to 12 L/min");
    }
}
