//! Monotonic time source

use core::time::Duration;

/// Monotonic clock
///
/// Sleeping is done through `embedded_hal::delay::DelayNs`, which clock
/// implementations are expected to provide as well.
pub trait Clock {
    /// Time since an arbitrary fixed origin (usually boot)
    fn now(&self) -> Duration;
}
