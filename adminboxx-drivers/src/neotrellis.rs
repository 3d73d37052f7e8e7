//! NeoTrellis 8x4 grid
//!
//! Two 4x4 NeoTrellis boards side by side on one I2C bus. Each board is a
//! seesaw device with 16 keys on its keypad module and 16 NeoPixels on
//! pin 3 of its NeoPixel module.
//!
//! ```text
//!   column  0 1 2 3   4 5 6 7
//!   row 0  [ 0x2E  ] [ 0x2F  ]
//!   row 3  [       ] [       ]
//! ```
//!
//! The seesaw numbers keys on an 8-wide matrix, so board key `k` is
//! seesaw key `(k / 4) * 8 + k % 4`.

use adminboxx_core::traits::{Edge, KeyEvent, KeyEvents, PanelBus};
use adminboxx_protocol::{Color, GridPosition};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::seesaw::{keypad, keypad_event_config, neopixel, Seesaw, SeesawError, MAX_WRITE_PAYLOAD};

/// I2C addresses of the left and right boards
pub const BOARD_ADDRESSES: [u8; 2] = [0x2E, 0x2F];

/// Keys per board edge
pub const BOARD_SIZE: u8 = 4;

const KEYS_PER_BOARD: usize = (BOARD_SIZE * BOARD_SIZE) as usize;
const BYTES_PER_PIXEL: usize = 3;
const PIXEL_BYTES: usize = KEYS_PER_BOARD * BYTES_PER_PIXEL;

/// Pixel bytes per BUF write, after the 2-byte offset
const PIXEL_CHUNK: usize = (MAX_WRITE_PAYLOAD - 2) / BYTES_PER_PIXEL * BYTES_PER_PIXEL;

const NEOPIXEL_PIN: u8 = 3;
const NEOPIXEL_800KHZ: u8 = 1;

/// Most FIFO entries drained from one board per poll
const MAX_FIFO_READ: usize = 2 * KEYS_PER_BOARD;

/// Seesaw key number for a board key
const fn seesaw_key(key: u8) -> u8 {
    (key / BOARD_SIZE) * 8 + key % BOARD_SIZE
}

/// Board key for a seesaw key number
const fn board_key(seesaw_key: u8) -> u8 {
    (seesaw_key / 8) * BOARD_SIZE + seesaw_key % 8
}

struct Board {
    address: u8,
    /// GRB, 3 bytes per pixel
    pixels: [u8; PIXEL_BYTES],
    dirty: bool,
}

impl Board {
    const fn new(address: u8) -> Self {
        Self {
            address,
            pixels: [0; PIXEL_BYTES],
            dirty: false,
        }
    }
}

/// Two NeoTrellis boards as one button/LED panel
pub struct NeoTrellisGrid<I2C, D> {
    i2c: I2C,
    delay: D,
    boards: [Board; 2],
}

impl<I2C, D> NeoTrellisGrid<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a grid at the default addresses
    ///
    /// Call [`NeoTrellisGrid::init`] before use.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_addresses(i2c, delay, BOARD_ADDRESSES)
    }

    /// Create a grid with jumpered addresses (left board first)
    pub fn with_addresses(i2c: I2C, delay: D, addresses: [u8; 2]) -> Self {
        Self {
            i2c,
            delay,
            boards: [Board::new(addresses[0]), Board::new(addresses[1])],
        }
    }

    /// Reset both boards, configure NeoPixels and key events, blank the LEDs
    pub fn init(&mut self) -> Result<(), SeesawError<I2C::Error>> {
        for board in 0..self.boards.len() {
            let address = self.boards[board].address;
            let mut dev = Seesaw::new(&mut self.i2c, &mut self.delay, address);

            dev.reset()?;

            dev.write(neopixel::BASE, neopixel::SPEED, &[NEOPIXEL_800KHZ])?;
            dev.write(
                neopixel::BASE,
                neopixel::BUF_LENGTH,
                &(PIXEL_BYTES as u16).to_be_bytes(),
            )?;
            dev.write(neopixel::BASE, neopixel::PIN, &[NEOPIXEL_PIN])?;

            let config = keypad_event_config(keypad::EDGE_RISING, true);
            for key in 0..KEYS_PER_BOARD as u8 {
                dev.write(keypad::BASE, keypad::EVENT, &[seesaw_key(key), config])?;
            }
            dev.write(keypad::BASE, keypad::INTENSET, &[0x01])?;

            #[cfg(feature = "defmt")]
            defmt::debug!("NeoTrellis at {=u8:#x} ready", address);

            self.boards[board].pixels = [0; PIXEL_BYTES];
            self.boards[board].dirty = true;
        }

        self.flush()
    }

    /// Release the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn locate(position: GridPosition) -> (usize, u8) {
        let board = (position.column() / BOARD_SIZE) as usize;
        let key = position.row() * BOARD_SIZE + position.column() % BOARD_SIZE;
        (board, key)
    }

    fn position(board: usize, key: u8) -> Option<GridPosition> {
        let column = board as u8 * BOARD_SIZE + key % BOARD_SIZE;
        GridPosition::new(column, key / BOARD_SIZE)
    }

    fn poll_board(&mut self, board: usize, events: &mut KeyEvents) -> Result<(), SeesawError<I2C::Error>> {
        let address = self.boards[board].address;
        let mut dev = Seesaw::new(&mut self.i2c, &mut self.delay, address);

        let mut count = [0u8; 1];
        dev.read(keypad::BASE, keypad::COUNT, &mut count)?;
        let count = (count[0] as usize).min(MAX_FIFO_READ);
        if count == 0 {
            return Ok(());
        }

        let mut fifo = [0u8; MAX_FIFO_READ];
        dev.read(keypad::BASE, keypad::FIFO, &mut fifo[..count])?;

        for raw in &fifo[..count] {
            let edge = match raw & 0x03 {
                keypad::EDGE_RISING => Edge::Rising,
                keypad::EDGE_FALLING => Edge::Falling,
                _ => continue,
            };
            let key = board_key(raw >> 2);
            if key as usize >= KEYS_PER_BOARD {
                continue;
            }
            if let Some(position) = Self::position(board, key) {
                // Full list drops the rest; the keys are lost, not misreported
                let _ = events.push(KeyEvent { position, edge });
            }
        }
        Ok(())
    }
}

impl<I2C, D> PanelBus for NeoTrellisGrid<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = SeesawError<I2C::Error>;

    fn poll_keys(&mut self) -> Result<KeyEvents, Self::Error> {
        let mut events = KeyEvents::new();
        for board in 0..self.boards.len() {
            self.poll_board(board, &mut events)?;
        }
        Ok(events)
    }

    fn set_pixel(&mut self, position: GridPosition, color: Color) -> Result<(), Self::Error> {
        let (board, key) = Self::locate(position);
        let board = &mut self.boards[board];
        let offset = key as usize * BYTES_PER_PIXEL;
        let grb = [color.g(), color.r(), color.b()];

        if board.pixels[offset..offset + BYTES_PER_PIXEL] != grb {
            board.pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&grb);
            board.dirty = true;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        for board in self.boards.iter_mut().filter(|b| b.dirty) {
            let mut dev = Seesaw::new(&mut self.i2c, &mut self.delay, board.address);

            for (chunk_index, chunk) in board.pixels.chunks(PIXEL_CHUNK).enumerate() {
                let offset = ((chunk_index * PIXEL_CHUNK) as u16).to_be_bytes();
                let mut payload = [0u8; MAX_WRITE_PAYLOAD];
                payload[..2].copy_from_slice(&offset);
                payload[2..2 + chunk.len()].copy_from_slice(chunk);
                dev.write(neopixel::BASE, neopixel::BUF, &payload[..2 + chunk.len()])?;
            }
            dev.write(neopixel::BASE, neopixel::SHOW, &[])?;

            board.dirty = false;
        }
        Ok(())
    }
}
