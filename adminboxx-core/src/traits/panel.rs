//! Button/LED panel bus trait

use adminboxx_protocol::{Color, GridPosition, LED_COUNT};
use heapless::Vec;

/// Most key events returned by a single poll
pub const MAX_KEY_EVENTS: usize = 2 * LED_COUNT;

/// Key events collected by one poll of the panel
pub type KeyEvents = Vec<KeyEvent, MAX_KEY_EVENTS>;

/// Key transition direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Key went down
    Rising,
    /// Key was released
    Falling,
}

/// A single key transition reported by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub position: GridPosition,
    pub edge: Edge,
}

impl KeyEvent {
    pub const fn pressed(position: GridPosition) -> Self {
        Self {
            position,
            edge: Edge::Rising,
        }
    }

    pub const fn released(position: GridPosition) -> Self {
        Self {
            position,
            edge: Edge::Falling,
        }
    }
}

/// Trait for the illuminated button grid
///
/// Implementations own the LED frame buffer; the session only writes to it.
pub trait PanelBus {
    /// Error type for bus operations
    type Error: core::fmt::Debug;

    /// Collect key transitions since the previous poll
    ///
    /// Returns an empty list when nothing happened. Edge detection is done
    /// by the implementation (hardware FIFO or level comparison).
    fn poll_keys(&mut self) -> Result<KeyEvents, Self::Error>;

    /// Stage a colour for one LED
    ///
    /// Takes effect on the next [`PanelBus::flush`].
    fn set_pixel(&mut self, position: GridPosition, color: Color) -> Result<(), Self::Error>;

    /// Push staged colours to the LEDs
    fn flush(&mut self) -> Result<(), Self::Error>;
}
