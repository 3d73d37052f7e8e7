//! Time source backed by the embassy time driver

use core::time::Duration;

use adminboxx_core::traits::Clock;
use embassy_time::{block_for, Instant};
use embedded_hal::delay::DelayNs;

/// Monotonic clock with a busy-wait delay
///
/// The session has core 1 to itself and never yields, so sleeps spin on
/// the shared RP2040 timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Duration {
        Duration::from_micros(Instant::now().as_micros())
    }
}

impl DelayNs for EmbassyClock {
    fn delay_ns(&mut self, ns: u32) {
        block_for(embassy_time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        block_for(embassy_time::Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(embassy_time::Duration::from_millis(u64::from(ms)));
    }
}
