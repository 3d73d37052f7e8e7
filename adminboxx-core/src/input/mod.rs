//! Button press handling
//!
//! Presses are forwarded to the host while it is alive. While it is not,
//! reports would go nowhere, so a press instead asks for the link state to
//! be shown again.

pub mod dispatcher;

pub use dispatcher::{DispatchReport, InputDispatcher};
