//! Board-agnostic core logic for the AdminBoxx panel firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Capability traits for the panel bus, the host transport and the clock
//! - Connection health monitoring (transport presence, host heartbeat)
//! - LED feedback: steady colours, flash sequences, link-state signalling
//! - Button press dispatch to the host
//! - The session loop tying it all together
//! - Build-time timing and palette constants

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod feedback;
pub mod health;
pub mod input;
pub mod session;
pub mod traits;

#[cfg(test)]
pub(crate) mod fakes;

pub use session::{Session, SessionError, TickReport};
