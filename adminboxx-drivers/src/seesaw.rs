//! Adafruit seesaw register access
//!
//! The seesaw firmware exposes "modules" (base addresses) with registers
//! behind them. Every access starts with a `[base, register]` write; reads
//! then need a short pause before the result can be clocked out.
//!
//! Only the modules the NeoTrellis uses are listed here.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::Vec;

/// Status module
pub mod status {
    pub const BASE: u8 = 0x00;
    pub const HW_ID: u8 = 0x01;
    pub const SWRST: u8 = 0x7F;

    /// Hardware ID reported by SAMD09-based seesaw boards
    pub const HW_ID_CODE: u8 = 0x55;
}

/// NeoPixel module
pub mod neopixel {
    pub const BASE: u8 = 0x0E;
    pub const PIN: u8 = 0x01;
    pub const SPEED: u8 = 0x02;
    pub const BUF_LENGTH: u8 = 0x03;
    pub const BUF: u8 = 0x04;
    pub const SHOW: u8 = 0x05;
}

/// Keypad module
pub mod keypad {
    pub const BASE: u8 = 0x10;
    pub const EVENT: u8 = 0x01;
    pub const INTENSET: u8 = 0x02;
    pub const COUNT: u8 = 0x04;
    pub const FIFO: u8 = 0x10;

    /// Edge codes used both for activation and in FIFO events
    pub const EDGE_HIGH: u8 = 0;
    pub const EDGE_LOW: u8 = 1;
    pub const EDGE_FALLING: u8 = 2;
    pub const EDGE_RISING: u8 = 3;
}

/// Largest payload sent in one register write
pub const MAX_WRITE_PAYLOAD: usize = 32;

/// Pause between a register select and the read that follows (µs)
const READ_DELAY_US: u32 = 250;

/// Pause after a software reset (ms)
const RESET_DELAY_MS: u32 = 500;

/// Errors from seesaw communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeesawError<E> {
    /// Underlying I2C transfer failed
    I2c(E),
    /// Device answered with an unexpected hardware ID
    BadHardwareId(u8),
    /// Payload larger than [`MAX_WRITE_PAYLOAD`]
    PayloadTooLarge,
}

impl<E> From<E> for SeesawError<E> {
    fn from(error: E) -> Self {
        SeesawError::I2c(error)
    }
}

/// One seesaw device on a borrowed bus
pub struct Seesaw<'a, I2C, D> {
    i2c: &'a mut I2C,
    delay: &'a mut D,
    address: u8,
}

impl<'a, I2C, D> Seesaw<'a, I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: &'a mut I2C, delay: &'a mut D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Write `data` to a register
    pub fn write(&mut self, base: u8, register: u8, data: &[u8]) -> Result<(), SeesawError<I2C::Error>> {
        let mut frame: Vec<u8, { MAX_WRITE_PAYLOAD + 2 }> = Vec::new();
        frame
            .extend_from_slice(&[base, register])
            .map_err(|_| SeesawError::PayloadTooLarge)?;
        frame
            .extend_from_slice(data)
            .map_err(|_| SeesawError::PayloadTooLarge)?;

        self.i2c.write(self.address, &frame)?;
        Ok(())
    }

    /// Read a register into `buf`
    pub fn read(&mut self, base: u8, register: u8, buf: &mut [u8]) -> Result<(), SeesawError<I2C::Error>> {
        self.i2c.write(self.address, &[base, register])?;
        self.delay.delay_us(READ_DELAY_US);
        self.i2c.read(self.address, buf)?;
        Ok(())
    }

    /// Software reset, then check the hardware ID
    pub fn reset(&mut self) -> Result<(), SeesawError<I2C::Error>> {
        self.write(status::BASE, status::SWRST, &[0xFF])?;
        self.delay.delay_ms(RESET_DELAY_MS);

        let mut id = [0u8; 1];
        self.read(status::BASE, status::HW_ID, &mut id)?;
        if id[0] != status::HW_ID_CODE {
            return Err(SeesawError::BadHardwareId(id[0]));
        }
        Ok(())
    }
}

/// Keypad activation byte: bit 0 enables, bits 1-4 select the edge
pub const fn keypad_event_config(edge: u8, enable: bool) -> u8 {
    (1 << (edge + 1)) | enable as u8
}
