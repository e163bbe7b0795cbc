//! Common error types used across the workspace.
//!
//! Every failure in farmhub is a recoverable rejection: the operation is
//! validated first and nothing is mutated when a check fails. The `Display`
//! output of each error is the message shown to the user.

use crate::device::DeviceType;
use crate::id::DeviceId;

/// Top-level error returned by registry operations.
#[derive(Debug, thiserror::Error)]
pub enum FarmError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// A user-supplied value was rejected before touching any state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown device type {0:?}. Try 'soil', 'weather', 'irrigation', or 'crop'")]
    UnknownDeviceType(String),

    #[error("invalid threshold {0}: must be between 0 and 100")]
    ThresholdOutOfRange(f64),

    #[error("invalid flow rate {0}: must be positive")]
    NonPositiveFlowRate(f64),
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A device refused an operation because of its variant or current state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeviceError {
    #[error("{device_type} {id} must be ON")]
    Off { id: DeviceId, device_type: DeviceType },

    #[error("cannot irrigate: {requested}L exceeds max water usage limit of {limit}L")]
    ExceedsCapacity { requested: f64, limit: f64 },

    #[error("{device_type} {id} does not record readings")]
    NotASensor { id: DeviceId, device_type: DeviceType },

    #[error("{device_type} {id} has no editable settings")]
    NoEditableSettings { id: DeviceId, device_type: DeviceType },

    #[error("{device_type} {id} does not support {operation}")]
    Unsupported {
        id: DeviceId,
        device_type: DeviceType,
        operation: &'static str,
    },
}
