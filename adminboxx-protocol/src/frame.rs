//! Frame reassembly for host → panel traffic.
//!
//! Frames have no length prefix and no start byte. Bytes are collected until
//! the terminator (0xFF) arrives; the collected bytes, terminator included,
//! are then classified into a [`Command`]. There is no partial-frame timeout:
//! an open frame waits for its terminator indefinitely, and any terminator
//! closes whatever has been collected so far.

use heapless::Vec;

use crate::messages::Command;

/// Frame terminator byte
pub const TERMINATOR: u8 = 0xFF;

/// Bytes kept per frame before the decoder gives up on it
///
/// Valid frames are at most 6 bytes; anything longer is malformed anyway.
pub const MAX_FRAME_SIZE: usize = 64;

/// Errors that can occur during frame decoding or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Tag/length combination does not name a command
    UnknownFrame { tag: u8, len: u8 },
    /// SET COLOR addressed an LED outside the grid
    LedOutOfRange(u8),
    /// SET COLOR carried a channel above 127
    ChannelOutOfRange,
    /// Frame grew past [`MAX_FRAME_SIZE`] before its terminator
    Overflow,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Byte-at-a-time frame decoder
#[derive(Debug, Clone, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8, MAX_FRAME_SIZE>,
    overflowed: bool,
}

impl FrameDecoder {
    /// Create a new frame decoder
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Drop any partially received frame
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Number of bytes collected for the open frame
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Some(command)` exactly when `byte` is the terminator, `None`
    /// while the frame is still open. The buffer is empty after every
    /// returned command, valid or not.
    pub fn feed(&mut self, byte: u8) -> Option<Command> {
        if self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }

        if byte != TERMINATOR {
            return None;
        }

        let command = if self.overflowed {
            Command::Malformed(FrameError::Overflow)
        } else {
            Command::from_frame(&self.buffer)
        };

        self.reset();
        Some(command)
    }

    /// Feed multiple bytes to the decoder
    ///
    /// Returns the first command found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<Command> {
        bytes.iter().find_map(|&byte| self.feed(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridPosition, LED_COUNT, NUM_COLUMNS};
    use crate::messages::{Color, HostMessage};
    use proptest::prelude::*;

    #[test]
    fn test_decode_ping() {
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.feed(0x80), None);
        assert_eq!(decoder.feed(0xFF), Some(Command::Ping));
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_decode_set_color() {
        let mut decoder = FrameDecoder::new();
        let cmd = decoder.feed_bytes(&[0x81, 5, 10, 20, 30, 0xFF]).unwrap();

        assert_eq!(
            cmd,
            Command::SetColor {
                position: GridPosition::new(5, 0).unwrap(),
                color: Color::new(10, 20, 30).unwrap(),
            }
        );
    }

    #[test]
    fn test_decode_channel_out_of_range() {
        let mut decoder = FrameDecoder::new();
        let cmd = decoder.feed_bytes(&[0x81, 5, 200, 0, 0, 0xFF]).unwrap();
        assert_eq!(cmd, Command::Malformed(FrameError::ChannelOutOfRange));
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_terminator_closes_any_frame() {
        let mut decoder = FrameDecoder::new();
        // Truncated SET COLOR followed by a ping: the ping's own terminator
        // closes the garbage frame, so the ping is lost with it
        let cmd = decoder.feed_bytes(&[0x81, 5, 10, 0x80, 0xFF]).unwrap();
        assert!(matches!(cmd, Command::Malformed(FrameError::UnknownFrame { tag: 0x81, len: 5 })));

        // Next frame decodes cleanly
        assert_eq!(decoder.feed_bytes(&[0x80, 0xFF]), Some(Command::Ping));
    }

    #[test]
    fn test_open_frame_waits_for_terminator() {
        let mut decoder = FrameDecoder::new();
        for byte in [0x81, 1, 2, 3, 4] {
            assert_eq!(decoder.feed(byte), None);
        }
        assert_eq!(decoder.pending(), 5);
    }

    #[test]
    fn test_overflow_is_malformed() {
        let mut decoder = FrameDecoder::new();
        for _ in 0..MAX_FRAME_SIZE * 2 {
            assert_eq!(decoder.feed(0x10), None);
        }
        assert_eq!(decoder.feed(0xFF), Some(Command::Malformed(FrameError::Overflow)));

        // Decoder recovers
        assert_eq!(decoder.feed_bytes(&[0x80, 0xFF]), Some(Command::Ping));
    }

    #[test]
    fn test_feed_bytes_stops_after_first_command() {
        let mut decoder = FrameDecoder::new();
        let stream = [0x80, 0xFF, 0x80];
        assert_eq!(decoder.feed_bytes(&stream), Some(Command::Ping));
        assert_eq!(decoder.pending(), 0);
    }

    proptest! {
        #[test]
        fn prop_command_iff_terminator(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let mut decoder = FrameDecoder::new();
            for byte in bytes {
                let result = decoder.feed(byte);
                prop_assert_eq!(result.is_some(), byte == TERMINATOR);
                if result.is_some() {
                    prop_assert_eq!(decoder.pending(), 0);
                }
            }
        }

        #[test]
        fn prop_set_color_always_in_range(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut decoder = FrameDecoder::new();
            for byte in bytes {
                if let Some(Command::SetColor { position, color }) = decoder.feed(byte) {
                    prop_assert!((position.index() as usize) < LED_COUNT);
                    prop_assert!(color.r() <= Color::MAX_CHANNEL);
                    prop_assert!(color.g() <= Color::MAX_CHANNEL);
                    prop_assert!(color.b() <= Color::MAX_CHANNEL);
                }
            }
        }

        #[test]
        fn prop_set_color_frame_roundtrip(column in 0u8..NUM_COLUMNS, row in 0u8..4, r in 0u8..=127, g in 0u8..=127, b in 0u8..=127) {
            let position = GridPosition::new(column, row).unwrap();
            let color = Color::new(r, g, b).unwrap();
            let bytes = HostMessage::SetColor { position, color }.encode_to_vec().unwrap();

            let mut decoder = FrameDecoder::new();
            let cmd = decoder.feed_bytes(&bytes);
            prop_assert_eq!(cmd, Some(Command::SetColor { position, color }));
        }
    }
}
