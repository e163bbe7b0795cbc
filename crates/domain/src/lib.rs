//! # farmhub-domain
//!
//! Pure domain model for the farmhub farm registry.
//!
//! ## Responsibilities
//! - Foundational types: sequential identifiers, error conventions, timestamps
//! - Define **Devices** (soil sensors, weather monitors, irrigation controllers,
//!   crop health analyzers) as one closed sum type
//! - Define **Stations** (physical sites that devices are installed at)
//! - Contain all invariant enforcement and per-device domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! Ownership of stations and devices, and any logging, lives in `farmhub-app`.

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod station;
