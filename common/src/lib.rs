//! # camscout common
//!
//! Models and helpers shared by every camscout crate:
//!
//! * [`config`]: scan defaults and the runtime [`config::Config`].
//! * [`device`]: the [`device::DiscoveredDevice`] model and its IP-keyed set.
//! * [`error`]: the [`error::ScanError`] surfaced to callers of a scan.
//! * [`network`]: local interface enumeration and /24 host ranges.

pub mod config;
pub mod device;
pub mod error;
pub mod log;
pub mod network;
