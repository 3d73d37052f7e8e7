//! Connection health monitor implementation
//!
//! Transport presence comes straight from the link. Host liveness is derived
//! from the age of the last valid command: the host is alive while that age
//! is below the heartbeat timeout.

use core::time::Duration;

use crate::config::HEARTBEAT_TIMEOUT;

/// Snapshot of both link flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkState {
    /// Physical link to the host is connected
    pub transport_present: bool,
    /// Host application sent a valid command within the heartbeat timeout
    pub host_alive: bool,
}

/// Which flags changed during one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthChange {
    #[default]
    None,
    Transport,
    Host,
    Both,
}

impl HealthChange {
    fn from_flags(transport: bool, host: bool) -> Self {
        match (transport, host) {
            (false, false) => HealthChange::None,
            (true, false) => HealthChange::Transport,
            (false, true) => HealthChange::Host,
            (true, true) => HealthChange::Both,
        }
    }
}

/// Result of one health observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HealthEvent {
    pub change: HealthChange,
    pub transport_present: bool,
    pub host_alive: bool,
}

impl HealthEvent {
    /// Transport presence flipped (either direction)
    pub fn transport_changed(&self) -> bool {
        matches!(self.change, HealthChange::Transport | HealthChange::Both)
    }

    /// Host liveness flipped (either direction)
    pub fn host_changed(&self) -> bool {
        matches!(self.change, HealthChange::Host | HealthChange::Both)
    }

    /// Host went from alive to unresponsive
    pub fn host_lost(&self) -> bool {
        self.host_changed() && !self.host_alive
    }

    pub fn link_state(&self) -> LinkState {
        LinkState {
            transport_present: self.transport_present,
            host_alive: self.host_alive,
        }
    }
}

/// Connection health monitor
///
/// Remembers the flags from the previous observation so each call can
/// report what changed. Both start out `true`: a panel that boots without a
/// host sees a host-lost transition on its first observation.
#[derive(Debug, Clone)]
pub struct HealthMonitor {
    heartbeat_timeout: Duration,
    /// Time of the last valid command, if any arrived yet
    last_command_at: Option<Duration>,
    transport_present: bool,
    host_alive: bool,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new(HEARTBEAT_TIMEOUT)
    }
}

impl HealthMonitor {
    /// Create a new health monitor
    pub fn new(heartbeat_timeout: Duration) -> Self {
        Self {
            heartbeat_timeout,
            last_command_at: None,
            transport_present: true,
            host_alive: true,
        }
    }

    /// Record a valid command (ping or accepted colour) received at `now`
    pub fn record_command(&mut self, now: Duration) {
        self.last_command_at = Some(now);
    }

    /// Evaluate host liveness at `now` without updating any state
    pub fn host_alive_at(&self, now: Duration) -> bool {
        self.last_command_at
            .is_some_and(|at| now.saturating_sub(at) < self.heartbeat_timeout)
    }

    /// Observe link health once per tick
    ///
    /// # Arguments
    /// - `now`: Current monotonic time
    /// - `transport_present`: Presence as reported by the transport
    pub fn observe(&mut self, now: Duration, transport_present: bool) -> HealthEvent {
        let host_alive = self.host_alive_at(now);

        let change = HealthChange::from_flags(
            transport_present != self.transport_present,
            host_alive != self.host_alive,
        );

        self.transport_present = transport_present;
        self.host_alive = host_alive;

        HealthEvent {
            change,
            transport_present,
            host_alive,
        }
    }

    /// Host liveness as of the last observation
    pub fn is_host_alive(&self) -> bool {
        self.host_alive
    }

    /// Transport presence as of the last observation
    pub fn is_transport_present(&self) -> bool {
        self.transport_present
    }

    pub fn last_command_at(&self) -> Option<Duration> {
        self.last_command_at
    }

    pub fn link_state(&self) -> LinkState {
        LinkState {
            transport_present: self.transport_present,
            host_alive: self.host_alive,
        }
    }
}
