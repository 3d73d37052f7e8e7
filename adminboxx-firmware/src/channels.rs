//! Cross-core link state
//!
//! Core 0 runs the USB stack; core 1 runs the blocking panel session. The
//! two sides meet only through these statics.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;

/// Ring buffer size for each direction
pub const PIPE_SIZE: usize = 256;

/// Bytes received from the host, waiting for the session
pub static HOST_RX: Pipe<CriticalSectionRawMutex, PIPE_SIZE> = Pipe::new();

/// Bytes written by the session, waiting for the next USB IN packet
pub static HOST_TX: Pipe<CriticalSectionRawMutex, PIPE_SIZE> = Pipe::new();

/// True while the CDC data endpoints are enabled (host enumerated us)
static USB_CONNECTED: AtomicBool = AtomicBool::new(false);

pub fn set_connected(connected: bool) {
    USB_CONNECTED.store(connected, Ordering::Relaxed);
}

pub fn is_connected() -> bool {
    USB_CONNECTED.load(Ordering::Relaxed)
}
