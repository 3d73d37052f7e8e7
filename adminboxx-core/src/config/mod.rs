//! Configuration constants
//!
//! Everything here is fixed at build time. The firmware never reads
//! configuration at runtime.

pub mod palette;
pub mod timing;

pub use palette::*;
pub use timing::*;
