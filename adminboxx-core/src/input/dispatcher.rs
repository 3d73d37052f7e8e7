//! Input dispatcher implementation

use adminboxx_protocol::PressReport;

use crate::traits::{Edge, KeyEvent, Transport};

/// What happened to the key events of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchReport {
    /// Presses sent to the host
    pub reported: usize,
    /// Presses dropped because the host was not alive
    pub suppressed: usize,
}

/// Forwards presses to the host and tracks owed feedback
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    /// Link state should be re-signalled even without a transition
    feedback_owed: bool,
}

impl InputDispatcher {
    /// Create a new dispatcher with no feedback owed
    pub const fn new() -> Self {
        Self {
            feedback_owed: false,
        }
    }

    /// Ask for the link state to be signalled on the next feedback pass
    pub fn request_feedback(&mut self) {
        self.feedback_owed = true;
    }

    pub fn feedback_owed(&self) -> bool {
        self.feedback_owed
    }

    /// Clear the owed flag, returning whether it was set
    pub fn take_feedback_request(&mut self) -> bool {
        core::mem::take(&mut self.feedback_owed)
    }

    /// Handle the key events of one tick
    ///
    /// Only rising edges count as presses. With the host alive each press is
    /// written to the transport as `:<row>,<column>\n`; otherwise nothing is
    /// sent and feedback becomes owed.
    pub fn dispatch<T: Transport>(
        &mut self,
        events: &[KeyEvent],
        host_alive: bool,
        transport: &mut T,
    ) -> Result<DispatchReport, T::Error> {
        let mut report = DispatchReport::default();

        for event in events.iter().filter(|e| e.edge == Edge::Rising) {
            if host_alive {
                let line = PressReport::new(event.position).encode();
                transport.write_bytes(line.as_bytes())?;
                report.reported += 1;

                #[cfg(feature = "defmt")]
                defmt::debug!("Press reported: {}", event.position);
            } else {
                self.feedback_owed = true;
                report.suppressed += 1;

                #[cfg(feature = "defmt")]
                defmt::debug!("Press suppressed, host not alive: {}", event.position);
            }
        }

        Ok(report)
    }
}
