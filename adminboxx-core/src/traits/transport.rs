//! Host link trait

/// Byte-oriented link to the host application
///
/// Reads never block: the session only calls [`Transport::read_byte`] after
/// [`Transport::bytes_available`] returned true.
pub trait Transport {
    /// Error type for link operations
    type Error: core::fmt::Debug;

    /// Check if received bytes are waiting
    fn bytes_available(&mut self) -> bool;

    /// Read one received byte
    ///
    /// Returns `Ok(None)` if nothing is buffered.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Write data to the host
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Check if the physical link to the host is connected
    ///
    /// This says nothing about whether the host application is running;
    /// that is tracked through heartbeats.
    fn is_present(&mut self) -> bool;
}
