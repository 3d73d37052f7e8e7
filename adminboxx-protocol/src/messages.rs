//! Message types for the AdminBoxx protocol
//!
//! - Host → Panel: heartbeat and LED colour frames ([`HostMessage`] to encode,
//!   [`Command`] once decoded on the panel)
//! - Panel → Host: press reports, see [`crate::events`]

use crate::frame::{FrameError, TERMINATOR};
use crate::grid::GridPosition;
use heapless::Vec;

// Frame tags: Host → Panel
pub const PING_TAG: u8 = 0x80;
pub const SET_COLOR_TAG: u8 = 0x81;

/// Frame lengths, terminator included
pub const PING_FRAME_LEN: usize = 2;
pub const SET_COLOR_FRAME_LEN: usize = 6;

/// Largest encoded host frame
pub const MAX_HOST_FRAME_LEN: usize = SET_COLOR_FRAME_LEN;

/// An LED colour with 7-bit channels
///
/// Channels never exceed [`Color::MAX_CHANNEL`], so a colour byte can never
/// be mistaken for the frame terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Highest value a single channel may carry
    pub const MAX_CHANNEL: u8 = 127;

    /// LED off
    pub const OFF: Color = Color { r: 0, g: 0, b: 0 };

    /// Create a colour, or `None` if any channel exceeds [`Color::MAX_CHANNEL`]
    pub const fn new(r: u8, g: u8, b: u8) -> Option<Self> {
        if r <= Self::MAX_CHANNEL && g <= Self::MAX_CHANNEL && b <= Self::MAX_CHANNEL {
            Some(Self { r, g, b })
        } else {
            None
        }
    }

    /// Create a colour, clamping each channel to [`Color::MAX_CHANNEL`]
    pub const fn saturating(r: u8, g: u8, b: u8) -> Self {
        const fn clamp(v: u8) -> u8 {
            if v > Color::MAX_CHANNEL {
                Color::MAX_CHANNEL
            } else {
                v
            }
        }

        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
        }
    }

    /// Scale normalized channels (0.0–1.0) by a brightness factor
    ///
    /// Each channel becomes `round(channel * brightness * 127)`, the scaling
    /// the host application applies before sending a colour.
    pub fn from_normalized(r: f32, g: f32, b: f32, brightness: f32) -> Self {
        let scale = |v: f32| -> u8 {
            let scaled = (v * brightness).clamp(0.0, 1.0) * Self::MAX_CHANNEL as f32;
            // NaN saturates to 0 in `as` casts
            (scaled + 0.5) as u8
        };

        Self::saturating(scale(r), scale(g), scale(b))
    }

    pub const fn r(&self) -> u8 {
        self.r
    }

    pub const fn g(&self) -> u8 {
        self.g
    }

    pub const fn b(&self) -> u8 {
        self.b
    }

    /// Check if the LED would be dark
    pub const fn is_off(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// Commands decoded on the panel from host frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Heartbeat, proves the host application is alive
    Ping,
    /// Set one LED to a colour
    SetColor { position: GridPosition, color: Color },
    /// Frame was terminated but did not match any valid command
    Malformed(FrameError),
}

impl Command {
    /// Classify a complete frame (terminator included)
    ///
    /// Frames are applied all-or-nothing: a `SET COLOR` frame with the right
    /// shape but an out-of-range field is rejected as a whole.
    pub fn from_frame(frame: &[u8]) -> Self {
        match frame {
            [PING_TAG, TERMINATOR] => Command::Ping,
            [SET_COLOR_TAG, led, r, g, b, TERMINATOR] => {
                let Some(position) = GridPosition::from_index(*led) else {
                    return Command::Malformed(FrameError::LedOutOfRange(*led));
                };
                match Color::new(*r, *g, *b) {
                    Some(color) => Command::SetColor { position, color },
                    None => Command::Malformed(FrameError::ChannelOutOfRange),
                }
            }
            _ => Command::Malformed(FrameError::UnknownFrame {
                tag: frame.first().copied().unwrap_or(TERMINATOR),
                len: frame.len().min(u8::MAX as usize) as u8,
            }),
        }
    }

    /// Returns true for commands that count as a heartbeat
    pub fn is_valid(&self) -> bool {
        !matches!(self, Command::Malformed(_))
    }
}

/// Messages sent by the host application to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage {
    /// Heartbeat
    Ping,
    /// Set one LED to a colour
    SetColor { position: GridPosition, color: Color },
}

impl HostMessage {
    /// Encode this message into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        match self {
            HostMessage::Ping => {
                let frame = [PING_TAG, TERMINATOR];
                Self::write(&frame, buffer)
            }
            HostMessage::SetColor { position, color } => {
                let frame = [
                    SET_COLOR_TAG,
                    position.index(),
                    color.r(),
                    color.g(),
                    color.b(),
                    TERMINATOR,
                ];
                Self::write(&frame, buffer)
            }
        }
    }

    /// Encode this message into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_HOST_FRAME_LEN>, FrameError> {
        let mut buffer = [0u8; MAX_HOST_FRAME_LEN];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }

    fn write(frame: &[u8], buffer: &mut [u8]) -> Result<usize, FrameError> {
        let out = buffer
            .get_mut(..frame.len())
            .ok_or(FrameError::BufferTooSmall)?;
        out.copy_from_slice(frame);
        Ok(frame.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_bounds() {
        assert!(Color::new(127, 127, 127).is_some());
        assert_eq!(Color::new(128, 0, 0), None);
        assert_eq!(Color::new(0, 0, 200), None);
        assert_eq!(Color::saturating(200, 16, 255), Color::new(127, 16, 127).unwrap());
    }

    #[test]
    fn test_color_from_normalized() {
        assert_eq!(Color::from_normalized(1.0, 0.0, 0.0, 1.0), Color::new(127, 0, 0).unwrap());
        assert_eq!(Color::from_normalized(1.0, 1.0, 0.0, 0.5), Color::new(64, 64, 0).unwrap());
        assert_eq!(Color::from_normalized(2.0, -1.0, f32::NAN, 1.0), Color::new(127, 0, 0).unwrap());
    }

    #[test]
    fn test_command_ping() {
        assert_eq!(Command::from_frame(&[0x80, 0xFF]), Command::Ping);
    }

    #[test]
    fn test_command_set_color() {
        let cmd = Command::from_frame(&[0x81, 5, 10, 20, 30, 0xFF]);
        assert_eq!(
            cmd,
            Command::SetColor {
                position: GridPosition::new(5, 0).unwrap(),
                color: Color::new(10, 20, 30).unwrap(),
            }
        );
    }

    #[test]
    fn test_command_rejects_channel_out_of_range() {
        let cmd = Command::from_frame(&[0x81, 5, 200, 0, 0, 0xFF]);
        assert_eq!(cmd, Command::Malformed(FrameError::ChannelOutOfRange));
        assert!(!cmd.is_valid());
    }

    #[test]
    fn test_command_rejects_led_out_of_range() {
        let cmd = Command::from_frame(&[0x81, 32, 0, 0, 0, 0xFF]);
        assert_eq!(cmd, Command::Malformed(FrameError::LedOutOfRange(32)));
    }

    #[test]
    fn test_command_wrong_length() {
        // Ping tag with the SET COLOR length and vice versa
        assert!(!Command::from_frame(&[0x80, 1, 2, 3, 4, 0xFF]).is_valid());
        assert!(!Command::from_frame(&[0x81, 0xFF]).is_valid());
        assert_eq!(
            Command::from_frame(&[0xFF]),
            Command::Malformed(FrameError::UnknownFrame { tag: 0xFF, len: 1 })
        );
    }

    #[test]
    fn test_host_message_encode() {
        let ping = HostMessage::Ping.encode_to_vec().unwrap();
        assert_eq!(ping.as_slice(), &[0x80, 0xFF]);

        let set = HostMessage::SetColor {
            position: GridPosition::new(3, 2).unwrap(),
            color: Color::new(1, 2, 3).unwrap(),
        };
        let bytes = set.encode_to_vec().unwrap();
        assert_eq!(bytes.as_slice(), &[0x81, 19, 1, 2, 3, 0xFF]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buffer = [0u8; 4];
        let set = HostMessage::SetColor {
            position: GridPosition::new(0, 0).unwrap(),
            color: Color::OFF,
        };
        assert_eq!(set.encode(&mut buffer), Err(FrameError::BufferTooSmall));
        assert_eq!(HostMessage::Ping.encode(&mut buffer), Ok(2));
    }
}
