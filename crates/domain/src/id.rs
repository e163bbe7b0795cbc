//! Typed identifier newtypes backed by sequential integers.
//!
//! Ids are handed out by the registry in creation order and never reused.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw sequence number.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Access the inner sequence number.
            #[must_use]
            pub const fn value(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Station`](crate::station::Station).
    StationId
);

define_id!(
    /// Unique identifier for a [`Device`](crate::device::Device).
    DeviceId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_order_ids_by_sequence_number() {
        assert!(DeviceId::new(1) < DeviceId::new(2));
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = StationId::new(42);
        let parsed: StationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_ignore_surrounding_whitespace_when_parsing() {
        let parsed: DeviceId = " 7\n".parse().unwrap();
        assert_eq!(parsed.value(), 7);
    }

    #[test]
    fn should_serialize_as_bare_number() {
        let json = serde_json::to_string(&DeviceId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn should_return_error_when_parsing_negative_number() {
        assert!(StationId::from_str("-1").is_err());
    }
}
