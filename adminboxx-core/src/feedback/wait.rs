//! Interruptible waits
//!
//! Animation delays poll a predicate while they sleep so that incoming host
//! data is never held up by LED feedback.

use core::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::traits::{Clock, Transport};

/// How a wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitOutcome {
    /// Full duration elapsed
    Elapsed,
    /// Returned early because the predicate fired
    Interrupted,
}

impl WaitOutcome {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, WaitOutcome::Interrupted)
    }

    /// Combine two outcomes; interrupted if either was
    pub fn or(self, other: WaitOutcome) -> WaitOutcome {
        if self.is_interrupted() || other.is_interrupted() {
            WaitOutcome::Interrupted
        } else {
            WaitOutcome::Elapsed
        }
    }
}

/// A bounded, possibly interruptible delay
pub trait Waiter {
    fn wait(&mut self, duration: Duration) -> WaitOutcome;
}

/// Sleep for `duration` on a blocking delay
pub fn sleep(delay: &mut impl DelayNs, duration: Duration) {
    let micros = u32::try_from(duration.as_micros()).unwrap_or(u32::MAX);
    delay.delay_us(micros);
}

/// Wait up to `max`, checking `interrupted` every `poll`
///
/// The predicate is checked before each sleep, so a wait that starts with
/// the predicate already true returns immediately.
pub fn wait_interruptible<C>(
    clock: &mut C,
    max: Duration,
    poll: Duration,
    mut interrupted: impl FnMut() -> bool,
) -> WaitOutcome
where
    C: Clock + DelayNs,
{
    let start = clock.now();

    loop {
        let elapsed = clock.now().saturating_sub(start);
        if elapsed >= max {
            return WaitOutcome::Elapsed;
        }
        if interrupted() {
            return WaitOutcome::Interrupted;
        }

        let step = poll.min(max - elapsed).max(Duration::from_micros(1));
        sleep(clock, step);
    }
}

/// Waiter that gives up as soon as the host transport has data
pub struct TransportWaiter<'a, C, T> {
    clock: &'a mut C,
    transport: &'a mut T,
    poll: Duration,
}

impl<'a, C, T> TransportWaiter<'a, C, T> {
    pub fn new(clock: &'a mut C, transport: &'a mut T, poll: Duration) -> Self {
        Self {
            clock,
            transport,
            poll,
        }
    }
}

impl<C, T> Waiter for TransportWaiter<'_, C, T>
where
    C: Clock + DelayNs,
    T: Transport,
{
    fn wait(&mut self, duration: Duration) -> WaitOutcome {
        let transport = &mut *self.transport;
        wait_interruptible(&mut *self.clock, duration, self.poll, || {
            transport.bytes_available()
        })
    }
}
