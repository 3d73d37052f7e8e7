//! Timing constants for the session loop and LED feedback

use core::time::Duration;

/// Host counts as alive while its last valid command is younger than this
pub const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(2);

/// Duration of each on/off phase of a flash sequence
pub const FLASH_PHASE: Duration = Duration::from_millis(250);

/// How long link indicators stay lit after a link-state signal
pub const INDICATOR_HOLD: Duration = Duration::from_secs(10);

/// Idle sleep at the end of every tick
pub const TICK_IDLE: Duration = Duration::from_millis(10);

/// Granularity of interruptible waits
pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Session timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub heartbeat_timeout: Duration,
    pub flash_phase: Duration,
    pub indicator_hold: Duration,
    pub tick_idle: Duration,
    pub poll_interval: Duration,
}

impl Timing {
    pub const DEFAULT: Self = Self {
        heartbeat_timeout: HEARTBEAT_TIMEOUT,
        flash_phase: FLASH_PHASE,
        indicator_hold: INDICATOR_HOLD,
        tick_idle: TICK_IDLE,
        poll_interval: WAIT_POLL_INTERVAL,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}
