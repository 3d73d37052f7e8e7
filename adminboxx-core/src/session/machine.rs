//! Session state and tick logic
//!
//! The link "state machine" is implicit: the state is the pair
//! `(transport_present, host_alive)` plus the owed-feedback flag, and the
//! only action a transition triggers is a link-state signal on the LEDs.
//!
//! | Transition                     | Signalled |
//! |--------------------------------|-----------|
//! | transport present ↔ absent     | yes       |
//! | host alive → unresponsive      | yes       |
//! | host unresponsive → alive      | no        |
//! | press while host unresponsive  | yes       |

use core::time::Duration;

use adminboxx_protocol::{Command, FrameDecoder};
use embedded_hal::delay::DelayNs;

use super::report::{SessionError, TickReport};
use crate::config::Timing;
use crate::feedback::{sleep, LedFeedback, TransportWaiter};
use crate::health::HealthMonitor;
use crate::input::InputDispatcher;
use crate::traits::{Clock, PanelBus, Transport};

type SessionResult<V, B, T> =
    core::result::Result<V, SessionError<<B as PanelBus>::Error, <T as Transport>::Error>>;

/// Panel session: owns every collaborator and all mutable state
pub struct Session<B, T, C> {
    bus: B,
    transport: T,
    clock: C,
    timing: Timing,
    decoder: FrameDecoder,
    health: HealthMonitor,
    dispatcher: InputDispatcher,
}

impl<B, T, C> Session<B, T, C>
where
    B: PanelBus,
    T: Transport,
    C: Clock + DelayNs,
{
    /// Create a session with the default timing
    pub fn new(bus: B, transport: T, clock: C) -> Self {
        Self::with_timing(bus, transport, clock, Timing::default())
    }

    /// Create a session with explicit timing
    pub fn with_timing(bus: B, transport: T, clock: C, timing: Timing) -> Self {
        let mut dispatcher = InputDispatcher::new();
        // First tick always shows the link state
        dispatcher.request_feedback();

        Self {
            bus,
            transport,
            clock,
            timing,
            decoder: FrameDecoder::new(),
            health: HealthMonitor::new(timing.heartbeat_timeout),
            dispatcher,
        }
    }

    /// Play the boot animation
    pub fn startup(&mut self) -> SessionResult<(), B, T> {
        #[cfg(feature = "defmt")]
        defmt::info!("Starting up");

        self.feedback().startup().map_err(SessionError::Bus)?;

        #[cfg(feature = "defmt")]
        defmt::info!("Started up OK");

        Ok(())
    }

    /// Run one iteration of the session loop
    ///
    /// Order: poll buttons, drain host bytes, evaluate health, dispatch
    /// presses, signal link state if needed, idle.
    pub fn tick(&mut self) -> SessionResult<TickReport, B, T> {
        let mut report = TickReport::default();

        let events = self.bus.poll_keys().map_err(SessionError::Bus)?;

        self.drain_transport(&mut report)?;

        let now = self.clock.now();
        let transport_present = self.transport.is_present();
        let health = self.health.observe(now, transport_present);
        report.health = health;

        // The monitor has already moved on; keep the signal owed until it runs
        if health.transport_changed() || health.host_lost() {
            self.dispatcher.request_feedback();
        }

        report.dispatch = self
            .dispatcher
            .dispatch(&events, health.host_alive, &mut self.transport)
            .map_err(SessionError::Transport)?;

        if self.dispatcher.feedback_owed() {
            #[cfg(feature = "defmt")]
            defmt::debug!("Signalling link state (change={})", health.change);

            self.feedback()
                .signal_link_state(health.link_state())
                .map_err(SessionError::Bus)?;
            self.dispatcher.take_feedback_request();
            report.signaled = true;
        }

        sleep(&mut self.clock, self.timing.tick_idle);

        Ok(report)
    }

    /// Tick forever
    ///
    /// Collaborator errors are logged and the loop carries on; recovery is
    /// left to the host resending.
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(_error) = self.tick() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Tick failed: {:?}", defmt::Debug2Format(&_error));

                sleep(&mut self.clock, self.timing.tick_idle);
            }
        }
    }

    /// Feed every available host byte through the decoder
    fn drain_transport(&mut self, report: &mut TickReport) -> SessionResult<(), B, T> {
        while self.transport.bytes_available() {
            let Some(byte) = self.transport.read_byte().map_err(SessionError::Transport)? else {
                break;
            };

            let now = self.clock.now();
            if let Some(command) = self.decoder.feed(byte) {
                self.apply(command, now, report)?;
            }
        }

        Ok(())
    }

    /// Apply one decoded command
    fn apply(&mut self, command: Command, now: Duration, report: &mut TickReport) -> SessionResult<(), B, T> {
        match command {
            Command::Ping => {
                #[cfg(feature = "defmt")]
                defmt::trace!("PING received");
            }
            Command::SetColor { position, color } => {
                #[cfg(feature = "defmt")]
                defmt::trace!("LED {} -> {}", position, color);

                self.feedback()
                    .apply(position, color)
                    .map_err(SessionError::Bus)?;
            }
            Command::Malformed(_error) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Malformed command received: {:?}", _error);
            }
        }

        if command.is_valid() {
            self.health.record_command(now);
            report.commands += 1;
        } else {
            report.malformed += 1;
        }

        Ok(())
    }

    fn feedback(&mut self) -> LedFeedback<'_, B, TransportWaiter<'_, C, T>> {
        let waiter = TransportWaiter::new(
            &mut self.clock,
            &mut self.transport,
            self.timing.poll_interval,
        );
        LedFeedback::new(&mut self.bus, waiter, &self.timing)
    }

    pub fn health(&self) -> &HealthMonitor {
        &self.health
    }

    pub fn dispatcher(&self) -> &InputDispatcher {
        &self.dispatcher
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
