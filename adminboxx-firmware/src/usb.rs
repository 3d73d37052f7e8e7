//! USB CDC-ACM host link
//!
//! The async half runs as two embassy tasks on core 0 and shuttles packets
//! between the CDC endpoints and the [`channels`](crate::channels) pipes.
//! The blocking half wraps the pipe ends in `embedded-io` types so the
//! session on core 1 can drive them through a [`SerialLink`].

use core::convert::Infallible;

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::cdc_acm::{Receiver, Sender};
use embassy_usb::driver::EndpointError;
use embassy_usb::UsbDevice;
use embedded_io::ErrorKind;

use adminboxx_drivers::SerialLink;

use crate::channels::{self, HOST_RX, HOST_TX};

/// Full-speed bulk packet size
pub const MAX_PACKET_SIZE: u16 = 64;

pub type UsbDriver = Driver<'static, USB>;

/// Session-side host link
pub type UsbLink = SerialLink<PipeReader, PipeWriter, UsbPresence>;

pub fn link() -> UsbLink {
    SerialLink::new(PipeReader, PipeWriter, UsbPresence)
}

/// USB device task - runs enumeration and control requests
#[embassy_executor::task]
pub async fn usb_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! {
    usb.run().await
}

/// Host to panel: OUT packets into [`HOST_RX`], tracks connection state
#[embassy_executor::task]
pub async fn cdc_rx_task(mut rx: Receiver<'static, UsbDriver>) {
    let mut buf = [0u8; MAX_PACKET_SIZE as usize];

    loop {
        rx.wait_connection().await;
        info!("USB host connected");
        channels::set_connected(true);

        loop {
            match rx.read_packet(&mut buf).await {
                Ok(n) => {
                    trace!("RX: {} bytes", n);
                    HOST_RX.write_all(&buf[..n]).await;
                }
                Err(EndpointError::Disabled) => break,
                Err(e) => {
                    warn!("USB read error: {:?}", Debug2Format(&e));
                }
            }
        }

        info!("USB host disconnected");
        channels::set_connected(false);
    }
}

/// Panel to host: [`HOST_TX`] into IN packets
#[embassy_executor::task]
pub async fn cdc_tx_task(mut tx: Sender<'static, UsbDriver>) {
    let mut buf = [0u8; MAX_PACKET_SIZE as usize];

    loop {
        tx.wait_connection().await;
        // Reports queued for a previous connection are stale
        HOST_TX.clear();

        loop {
            let n = HOST_TX.read(&mut buf).await;
            if tx.write_packet(&buf[..n]).await.is_err() {
                break;
            }
        }
    }
}

/// Receive end of [`HOST_RX`]
///
/// Never blocks: a read with nothing buffered returns `Ok(0)`.
pub struct PipeReader;

impl embedded_io::ErrorType for PipeReader {
    type Error = Infallible;
}

impl embedded_io::Read for PipeReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(HOST_RX.try_read(buf).unwrap_or(0))
    }
}

impl embedded_io::ReadReady for PipeReader {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!HOST_RX.is_empty())
    }
}

/// Transmit end of [`HOST_TX`]
///
/// Fails with [`ErrorKind::OutOfMemory`] when the pipe is full rather than
/// waiting for a host that may be gone.
pub struct PipeWriter;

impl embedded_io::ErrorType for PipeWriter {
    type Error = ErrorKind;
}

impl embedded_io::Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        HOST_TX.try_write(buf).map_err(|_| ErrorKind::OutOfMemory)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Link presence as a pin: high while the host has us enumerated
pub struct UsbPresence;

impl embedded_hal::digital::ErrorType for UsbPresence {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for UsbPresence {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(channels::is_connected())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!channels::is_connected())
    }
}
