//! Bus mocks shared by the driver tests

use std::collections::{HashMap, VecDeque};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

/// I2C bus that logs writes and answers reads from per-address queues
#[derive(Default)]
pub struct MockI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    responses: HashMap<u8, VecDeque<Vec<u8>>>,
    pub fail: bool,
}

impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the bytes returned by the next read from `address`
    pub fn respond(&mut self, address: u8, bytes: &[u8]) {
        self.responses
            .entry(address)
            .or_default()
            .push_back(bytes.to_vec());
    }

    /// Writes to `address`, in order
    pub fn writes_to(&self, address: u8) -> Vec<Vec<u8>> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == address)
            .map(|(_, w)| w.clone())
            .collect()
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => self.writes.push((address, bytes.to_vec())),
                Operation::Read(buf) => {
                    let response = self
                        .responses
                        .get_mut(&address)
                        .and_then(VecDeque::pop_front)
                        .unwrap_or_default();
                    buf.fill(0);
                    let n = response.len().min(buf.len());
                    buf[..n].copy_from_slice(&response[..n]);
                }
            }
        }
        Ok(())
    }
}

/// Delay that only adds up the requested time
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
