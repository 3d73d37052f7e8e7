//! Serial host link
//!
//! Adapts any `embedded-io` receiver/transmitter pair (a buffered UART,
//! pipes fed by a CDC-ACM class) to the [`Transport`] trait. Presence
//! comes from a separate input that is high while the host is connected.

use adminboxx_core::traits::Transport;
use embedded_hal::digital::InputPin;
use embedded_io::{Read, ReadReady, Write};

/// Errors from the serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialLinkError<R, W> {
    Read(R),
    Write(W),
}

/// Host link over a serial port
pub struct SerialLink<R, W, P> {
    rx: R,
    tx: W,
    sense: P,
}

impl<R, W, P> SerialLink<R, W, P> {
    pub fn new(rx: R, tx: W, sense: P) -> Self {
        Self { rx, tx, sense }
    }

    /// Split back into the underlying halves
    pub fn release(self) -> (R, W, P) {
        (self.rx, self.tx, self.sense)
    }
}

impl<R, W, P> Transport for SerialLink<R, W, P>
where
    R: Read + ReadReady,
    W: Write,
    P: InputPin,
{
    type Error = SerialLinkError<R::Error, W::Error>;

    fn bytes_available(&mut self) -> bool {
        self.rx.read_ready().unwrap_or(false)
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.bytes_available() {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        match self.rx.read(&mut byte).map_err(SerialLinkError::Read)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data).map_err(SerialLinkError::Write)
    }

    fn is_present(&mut self) -> bool {
        // An unreadable sense pin counts as unplugged
        self.sense.is_high().unwrap_or(false)
    }
}
