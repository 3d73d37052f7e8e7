//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in adminboxx-core:
//!
//! - Button/LED panel: two Adafruit NeoTrellis boards over I2C (seesaw)
//! - Host transport: any `embedded-io` serial port plus a presence input

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod neotrellis;
pub mod seesaw;
pub mod serial_link;

#[cfg(test)]
mod mock;

pub use neotrellis::{NeoTrellisGrid, BOARD_ADDRESSES};
pub use seesaw::{Seesaw, SeesawError};
pub use serial_link::{SerialLink, SerialLinkError};
