//! Session loop
//!
//! One [`Session`] lives for the whole uptime of the panel. Each tick polls
//! the buttons, drains host bytes through the frame decoder, evaluates link
//! health, forwards presses, and signals the link state when it changed.

pub mod machine;
pub mod report;

pub use machine::Session;
pub use report::{SessionError, TickReport};
