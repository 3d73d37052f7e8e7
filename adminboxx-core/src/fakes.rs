//! Test doubles for the capability traits

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use core::time::Duration;

use adminboxx_protocol::{Color, GridPosition, NUM_COLUMNS, NUM_ROWS};
use embedded_hal::delay::DelayNs;

use crate::traits::{Clock, KeyEvent, KeyEvents, PanelBus, Transport};

/// Error returned by fakes configured to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError;

/// Clock whose time only moves when something sleeps on it
///
/// Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    now: Rc<Cell<Duration>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl DelayNs for FakeClock {
    fn delay_ns(&mut self, ns: u32) {
        self.advance(Duration::from_nanos(ns as u64));
    }
}

/// Panel that records every pixel write
#[derive(Debug, Default)]
pub struct FakeBus {
    staged: [[Color; NUM_COLUMNS as usize]; NUM_ROWS as usize],
    shown: [[Color; NUM_COLUMNS as usize]; NUM_ROWS as usize],
    writes: Vec<(GridPosition, Color)>,
    flushes: usize,
    pending: Vec<KeyEvent>,
    fail: bool,
    fail_flush: bool,
}

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colour currently shown (flushed) at a position
    pub fn pixel(&self, position: GridPosition) -> Color {
        self.shown[position.row() as usize][position.column() as usize]
    }

    pub fn writes(&self) -> &[(GridPosition, Color)] {
        &self.writes
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.flushes = 0;
    }

    pub fn push_key(&mut self, event: KeyEvent) {
        self.pending.push(event);
    }

    pub fn fail(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Fail only `flush`, leaving key polling working
    pub fn fail_flush(&mut self, fail: bool) {
        self.fail_flush = fail;
    }
}

impl PanelBus for FakeBus {
    type Error = FakeError;

    fn poll_keys(&mut self) -> Result<KeyEvents, Self::Error> {
        if self.fail {
            return Err(FakeError);
        }
        let mut events = KeyEvents::new();
        for event in self.pending.drain(..) {
            let _ = events.push(event);
        }
        Ok(events)
    }

    fn set_pixel(&mut self, position: GridPosition, color: Color) -> Result<(), Self::Error> {
        if self.fail {
            return Err(FakeError);
        }
        self.staged[position.row() as usize][position.column() as usize] = color;
        self.writes.push((position, color));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.fail || self.fail_flush {
            return Err(FakeError);
        }
        self.shown = self.staged;
        self.flushes += 1;
        Ok(())
    }
}

/// Host link fed from a schedule of timed bytes
#[derive(Debug)]
pub struct FakeTransport {
    clock: FakeClock,
    incoming: VecDeque<(Duration, u8)>,
    written: Vec<u8>,
    present: bool,
    fail_writes: bool,
}

impl FakeTransport {
    pub fn new(clock: &FakeClock) -> Self {
        Self {
            clock: clock.clone(),
            incoming: VecDeque::new(),
            written: Vec::new(),
            present: true,
            fail_writes: false,
        }
    }

    /// Queue bytes that are available right away
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let now = self.clock.now();
        self.push_bytes_at(now, bytes);
    }

    /// Queue bytes that become available at `at`
    pub fn push_bytes_at(&mut self, at: Duration, bytes: &[u8]) {
        self.incoming.extend(bytes.iter().map(|&b| (at, b)));
    }

    pub fn set_present(&mut self, present: bool) {
        self.present = present;
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }

    pub fn written_text(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }

    pub fn pending(&self) -> usize {
        self.incoming.len()
    }
}

impl Transport for FakeTransport {
    type Error = FakeError;

    fn bytes_available(&mut self) -> bool {
        self.incoming
            .front()
            .is_some_and(|(at, _)| *at <= self.clock.now())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.bytes_available() {
            return Ok(None);
        }
        Ok(self.incoming.pop_front().map(|(_, byte)| byte))
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(FakeError);
        }
        self.written.extend_from_slice(data);
        Ok(())
    }

    fn is_present(&mut self) -> bool {
        self.present
    }
}
