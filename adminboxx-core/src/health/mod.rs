//! Connection health monitoring
//!
//! Tracks whether the serial link is connected and whether the host
//! application is still sending commands.

pub mod monitor;

pub use monitor::{HealthChange, HealthEvent, HealthMonitor, LinkState};
