//! # farmhub-app
//!
//! Application layer: the registry that owns every station and device.
//!
//! ## Responsibilities
//! - [`Registry`](registry::Registry): allocate sequential ids, create
//!   stations and devices, keep the flat device index and each station's
//!   device list consistent, and route per-device operations by id
//! - [`report`]: render system state and help as plain text
//! - Emit `tracing` events for every accepted or rejected mutation
//!
//! ## Dependency rule
//! Depends on `farmhub-domain` only (plus `tracing`).
//! Never reads from or writes to the terminal; the shell in the `farmhub`
//! binary does that.

pub mod registry;
pub mod report;
