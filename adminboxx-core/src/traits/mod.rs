//! Hardware abstraction traits
//!
//! These traits define the interface between the session logic
//! and hardware-specific implementations.

pub mod clock;
pub mod panel;
pub mod transport;

pub use clock::Clock;
pub use panel::{Edge, KeyEvent, KeyEvents, PanelBus, MAX_KEY_EVENTS};
pub use transport::Transport;
