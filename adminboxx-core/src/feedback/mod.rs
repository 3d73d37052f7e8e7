//! LED feedback
//!
//! Renders host colours and the panel's own status animations. Every delay
//! inside an animation goes through a [`Waiter`], so the session can cut
//! animations short when the host sends data.

pub mod wait;

pub use wait::{sleep, wait_interruptible, TransportWaiter, WaitOutcome, Waiter};

use adminboxx_protocol::{Color, GridPosition};

use crate::config::{
    Timing, ALERT_COLOR, ALERT_INDICATOR, DISABLED, NOTICE_COLOR, NOTICE_INDICATOR, STARTUP_COLOR,
};
use crate::health::LinkState;
use crate::traits::PanelBus;

/// Phases of a flash sequence: on, off, on, off, on
const FLASH_PHASES: [bool; 5] = [true, false, true, false, true];

/// LED feedback controller
///
/// Borrows the panel bus for the duration of one operation. Writes are
/// unconditional: whatever was written last is what the panel shows.
pub struct LedFeedback<'a, B, W> {
    bus: &'a mut B,
    waiter: W,
    timing: &'a Timing,
}

impl<'a, B, W> LedFeedback<'a, B, W>
where
    B: PanelBus,
    W: Waiter,
{
    pub fn new(bus: &'a mut B, waiter: W, timing: &'a Timing) -> Self {
        Self {
            bus,
            waiter,
            timing,
        }
    }

    /// Show a host-requested colour on one LED
    pub fn apply(&mut self, position: GridPosition, color: Color) -> Result<(), B::Error> {
        self.bus.set_pixel(position, color)?;
        self.bus.flush()
    }

    /// Set every LED to one colour
    pub fn set_all(&mut self, color: Color) -> Result<(), B::Error> {
        for position in GridPosition::all() {
            self.bus.set_pixel(position, color)?;
        }
        self.bus.flush()
    }

    /// Flash one LED on/off/on/off/on
    ///
    /// Each phase lasts one flash phase unless interrupted. With
    /// `hold_final` the LED is left lit, otherwise it ends dark.
    pub fn flash(
        &mut self,
        position: GridPosition,
        color: Color,
        hold_final: bool,
    ) -> Result<WaitOutcome, B::Error> {
        let mut outcome = WaitOutcome::Elapsed;

        for lit in FLASH_PHASES {
            let phase_color = if lit { color } else { DISABLED };
            self.apply(position, phase_color)?;
            outcome = outcome.or(self.waiter.wait(self.timing.flash_phase));
        }

        if !hold_final {
            self.apply(position, DISABLED)?;
        }

        Ok(outcome)
    }

    /// Show the link state on the indicator LEDs
    ///
    /// Clears the grid, flashes the alert indicator, flashes the notice
    /// indicator too when the transport is present, holds both, then clears
    /// the grid again.
    pub fn signal_link_state(&mut self, state: LinkState) -> Result<WaitOutcome, B::Error> {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "Link state: transport={} host={}",
            state.transport_present,
            state.host_alive
        );

        self.set_all(DISABLED)?;

        let mut outcome = self.flash(ALERT_INDICATOR, ALERT_COLOR, true)?;

        if state.transport_present {
            outcome = outcome.or(self.flash(NOTICE_INDICATOR, NOTICE_COLOR, true)?);
        }

        outcome = outcome.or(self.waiter.wait(self.timing.indicator_hold));
        self.set_all(DISABLED)?;

        Ok(outcome)
    }

    /// Boot animation: whole grid bright/dark/bright/dark/bright, then clear
    pub fn startup(&mut self) -> Result<WaitOutcome, B::Error> {
        let mut outcome = WaitOutcome::Elapsed;

        for lit in FLASH_PHASES {
            self.set_all(if lit { STARTUP_COLOR } else { DISABLED })?;
            outcome = outcome.or(self.waiter.wait(self.timing.flash_phase));
        }

        self.set_all(DISABLED)?;
        Ok(outcome)
    }
}
