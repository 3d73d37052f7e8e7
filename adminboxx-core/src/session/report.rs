//! Tick results and session errors

use crate::health::HealthEvent;
use crate::input::DispatchReport;

/// Summary of one session tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Valid commands applied (pings and colours)
    pub commands: usize,
    /// Frames discarded as malformed
    pub malformed: usize,
    /// Health observation of this tick
    pub health: HealthEvent,
    /// Press handling of this tick
    pub dispatch: DispatchReport,
    /// Link state was signalled on the LEDs
    pub signaled: bool,
}

/// Collaborator failure surfaced by a tick
///
/// The session logic itself has no failure modes; these wrap errors from
/// the panel bus and the host transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError<B, T> {
    /// Panel bus (buttons/LEDs) operation failed
    Bus(B),
    /// Host transport operation failed
    Transport(T),
}
