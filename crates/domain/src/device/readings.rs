//! Timestamped reading log kept by sensor devices.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Numeric readings keyed by timestamp. Recording at an existing timestamp
/// overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Readings(HashMap<String, f64>);

impl Readings {
    pub fn record(&mut self, timestamp: impl Into<String>, value: f64) {
        self.0.insert(timestamp.into(), value);
    }

    #[must_use]
    pub fn get(&self, timestamp: &str) -> Option<f64> {
        self.0.get(timestamp).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_overwrite_value_at_same_timestamp() {
        let mut readings = Readings::default();
        readings.record("2024-05-01 06:00:00", 31.0);
        readings.record("2024-05-01 06:00:00", 28.5);

        assert_eq!(readings.len(), 1);
        assert_eq!(readings.get("2024-05-01 06:00:00"), Some(28.5));
    }

    #[test]
    fn should_accept_any_value_without_range_check() {
        let mut readings = Readings::default();
        readings.record("t0", -400.0);
        assert_eq!(readings.get("t0"), Some(-400.0));
    }
}
